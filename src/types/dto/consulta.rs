use poem_openapi::Object;

/// Vehicle record lookup request
#[derive(Object, Debug, Default)]
pub struct ConsultaVeiculoRequest {
    /// Plate in ABC1234 or ABC1D23 format
    pub placa: Option<String>,

    /// Accepted for compatibility, not forwarded
    pub chassis: Option<String>,

    /// Required for `atpv-e`
    pub renavam: Option<String>,

    /// One of `gravame`, `crv-digital`, `base-estadual`, `atpv-e`
    pub tipo: Option<String>,
}

/// Lookup result
///
/// `data` is the vendor JSON verbatim, or
/// `{tipo: "pdf", arquivo: <base64>, contentType: "application/pdf"}`.
#[derive(Object, Debug)]
pub struct ConsultaVeiculoResponse {
    pub success: bool,
    pub data: serde_json::Value,
}
