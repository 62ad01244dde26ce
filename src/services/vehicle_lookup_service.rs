use std::sync::{Arc, LazyLock};
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use regex::Regex;
use serde_json::{Map, Value, json};

use crate::audit::{AuditLogger, mask_plate};
use crate::errors::InternalError;
use crate::errors::internal::LookupError;
use crate::types::internal::audit::EventType;
use crate::types::internal::context::RequestContext;

static PLACA_REGEX: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}[0-9][A-Z0-9][0-9]{2}$"));

const USER_AGENT: &str = "MC-Despachante/1.0";
const UPSTREAM_DEFAULT_MESSAGE: &str = "Erro na consulta veicular";

/// Upper-case a plate and drop hyphens and surrounding blanks
pub fn normalize_placa(placa: &str) -> String {
    placa.trim().replace('-', "").to_uppercase()
}

/// Whether a normalised plate has the old (ABC1234) or Mercosul (ABC1D23) layout
pub fn is_valid_placa(placa: &str) -> bool {
    match PLACA_REGEX.as_ref() {
        Ok(regex) => regex.is_match(placa),
        Err(e) => {
            tracing::error!("Plate pattern failed to compile: {}", e);
            false
        }
    }
}

/// Vendor lookups this proxy supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Gravame,
    CrvDigital,
    BaseEstadual,
    AtpvE,
}

impl LookupKind {
    pub fn parse(tipo: &str) -> Option<Self> {
        match tipo {
            "gravame" => Some(Self::Gravame),
            "crv-digital" => Some(Self::CrvDigital),
            "base-estadual" => Some(Self::BaseEstadual),
            "atpv-e" => Some(Self::AtpvE),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gravame => "gravame",
            Self::CrvDigital => "crv-digital",
            Self::BaseEstadual => "base-estadual",
            Self::AtpvE => "atpv-e",
        }
    }

    /// Vendor path for this lookup
    pub fn path(&self) -> &'static str {
        match self {
            Self::Gravame => "/consultar-gravame",
            Self::CrvDigital => "/consultar-crv",
            Self::BaseEstadual => "/consultar-base-estadual",
            Self::AtpvE => "/consultar-atpve",
        }
    }
}

/// Raw lookup fields as sent by the caller
#[derive(Debug, Clone, Default)]
pub struct LookupRequest {
    pub placa: Option<String>,
    pub chassis: Option<String>,
    pub renavam: Option<String>,
    pub tipo: Option<String>,
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq)]
struct ValidLookup {
    kind: LookupKind,
    placa: String,
    renavam: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl LookupRequest {
    /// Check fields in the order callers see the messages
    fn validate(&self) -> Result<ValidLookup, LookupError> {
        let tipo = non_blank(&self.tipo).unwrap_or_default();
        let placa = non_blank(&self.placa);
        let renavam = non_blank(&self.renavam);

        if tipo == LookupKind::AtpvE.as_str() {
            if placa.is_none() || renavam.is_none() {
                return Err(LookupError::MissingField(
                    "Para ATPV-E: Placa e RENAVAM são obrigatórios".to_string(),
                ));
            }
        } else if placa.is_none() {
            return Err(LookupError::MissingField("Placa é obrigatória".to_string()));
        }

        let placa = normalize_placa(placa.unwrap_or_default());
        if !is_valid_placa(&placa) {
            return Err(LookupError::InvalidPlate);
        }

        let kind = LookupKind::parse(tipo).ok_or_else(|| LookupError::InvalidKind(tipo.to_string()))?;

        Ok(ValidLookup {
            kind,
            placa,
            renavam: renavam
                .filter(|_| kind == LookupKind::AtpvE)
                .map(str::to_string),
        })
    }
}

/// Proxy to the vehicle records vendor
pub struct VehicleLookupService {
    client: reqwest::Client,
    base_url: String,
    access_key: Option<String>,
    timeout: Duration,
    audit_logger: Arc<AuditLogger>,
}

impl VehicleLookupService {
    pub fn new(
        base_url: String,
        access_key: Option<String>,
        timeout: Duration,
        audit_logger: Arc<AuditLogger>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key,
            timeout,
            audit_logger,
        }
    }

    /// Validate, forward to the vendor and shape the answer
    ///
    /// # Returns
    /// The vendor JSON as-is, or a `{tipo:"pdf", arquivo, contentType}`
    /// object for PDF answers
    pub async fn consultar(
        &self,
        ctx: &RequestContext,
        request: LookupRequest,
    ) -> Result<Value, InternalError> {
        let lookup = request.validate()?;
        let access_key = self
            .access_key
            .as_deref()
            .ok_or(LookupError::AccessKeyMissing)?;

        self.audit_logger
            .builder(EventType::VehicleConsultationAttempt)
            .with_context(ctx)
            .mask_ip_address()
            .add_field("tipo", lookup.kind.as_str())
            .add_field("placa", mask_plate(&lookup.placa))
            .add_sensitive("placa_hash", &lookup.placa)
            .add_field("renavam_informado", lookup.renavam.is_some())
            .add_field("chassis_informado", non_blank(&request.chassis).is_some())
            .write()
            .await?;

        match self.forward(&lookup, access_key).await {
            Ok(data) => {
                let response_type = if is_pdf_payload(&data) { "pdf" } else { "json" };
                tracing::info!(tipo = lookup.kind.as_str(), response_type, "Vehicle lookup succeeded");

                self.audit_logger
                    .builder(EventType::VehicleConsultationSuccess)
                    .with_context(ctx)
                    .mask_ip_address()
                    .add_field("tipo", lookup.kind.as_str())
                    .add_field("placa", mask_plate(&lookup.placa))
                    .add_sensitive("placa_hash", &lookup.placa)
                    .add_field("response_type", response_type)
                    .write()
                    .await?;

                Ok(data)
            }
            Err(LookupError::Upstream { status, message }) => {
                tracing::warn!(tipo = lookup.kind.as_str(), status, "Vendor rejected lookup");

                self.audit_logger
                    .builder(EventType::VehicleConsultationError)
                    .with_context(ctx)
                    .mask_ip_address()
                    .add_field("tipo", lookup.kind.as_str())
                    .add_field("placa", mask_plate(&lookup.placa))
                    .add_sensitive("placa_hash", &lookup.placa)
                    .add_field("status", status)
                    .add_field("error", &message)
                    .write()
                    .await?;

                Err(LookupError::Upstream { status, message }.into())
            }
            Err(e) => {
                tracing::error!(tipo = lookup.kind.as_str(), error = %e, "Vehicle lookup failed");

                self.audit_logger
                    .builder(EventType::VehicleConsultationInternalError)
                    .with_context(ctx)
                    .mask_ip_address()
                    .add_field("tipo", lookup.kind.as_str())
                    .add_field("error", e.to_string())
                    .write()
                    .await?;

                Err(e.into())
            }
        }
    }

    /// One vendor call bounded by the timeout; the future is dropped on expiry
    async fn forward(&self, lookup: &ValidLookup, access_key: &str) -> Result<Value, LookupError> {
        let mut body = Map::new();
        body.insert("placa".to_string(), json!(lookup.placa));
        if let Some(renavam) = &lookup.renavam {
            body.insert("renavam".to_string(), json!(renavam));
        }

        let url = format!("{}{}", self.base_url, lookup.kind.path());
        let call = async {
            let response = self
                .client
                .post(&url)
                .header("chaveAcesso", access_key)
                .header("User-Agent", USER_AGENT)
                .json(&Value::Object(body))
                .send()
                .await
                .map_err(|e| LookupError::Transport(e.to_string()))?;

            let status = response.status();
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| LookupError::Transport(e.to_string()))?;

            if !status.is_success() {
                return Err(LookupError::Upstream {
                    status: status.as_u16(),
                    message: upstream_message(&bytes),
                });
            }

            if content_type.contains("application/pdf") {
                return Ok(json!({
                    "tipo": "pdf",
                    "arquivo": BASE64.encode(&bytes),
                    "contentType": "application/pdf",
                }));
            }

            serde_json::from_slice(&bytes).map_err(|e| LookupError::InvalidResponse(e.to_string()))
        };

        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| LookupError::Timeout(self.timeout.as_secs()))?
    }
}

/// `message` of a vendor error body, or the generic text
fn upstream_message(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| UPSTREAM_DEFAULT_MESSAGE.to_string())
}

fn is_pdf_payload(data: &Value) -> bool {
    data.get("tipo").and_then(Value::as_str) == Some("pdf") && data.get("arquivo").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(placa: Option<&str>, renavam: Option<&str>, tipo: &str) -> LookupRequest {
        LookupRequest {
            placa: placa.map(str::to_string),
            chassis: None,
            renavam: renavam.map(str::to_string),
            tipo: Some(tipo.to_string()),
        }
    }

    #[test]
    fn test_plate_formats() {
        assert!(is_valid_placa("ABC1234"));
        assert!(is_valid_placa("ABC1D23"));
        assert!(!is_valid_placa("AB12345"));
        assert!(!is_valid_placa("ABC12345"));
        assert!(!is_valid_placa("abc1234"));
        assert_eq!(normalize_placa(" abc-1234 "), "ABC1234");
    }

    #[test]
    fn test_missing_plate() {
        let err = request(None, None, "gravame").validate().unwrap_err();
        assert!(matches!(err, LookupError::MissingField(ref m) if m == "Placa é obrigatória"));

        let err = request(Some("  "), None, "crv-digital").validate().unwrap_err();
        assert!(matches!(err, LookupError::MissingField(_)));
    }

    #[test]
    fn test_atpve_needs_renavam() {
        let err = request(Some("ABC1234"), None, "atpv-e").validate().unwrap_err();
        assert!(matches!(
            err,
            LookupError::MissingField(ref m) if m == "Para ATPV-E: Placa e RENAVAM são obrigatórios"
        ));

        let ok = request(Some("ABC1234"), Some("12345678901"), "atpv-e").validate().unwrap();
        assert_eq!(ok.kind, LookupKind::AtpvE);
        assert_eq!(ok.renavam.as_deref(), Some("12345678901"));
    }

    #[test]
    fn test_plate_checked_before_kind() {
        let err = request(Some("XX"), None, "desconhecido").validate().unwrap_err();
        assert!(matches!(err, LookupError::InvalidPlate));

        let err = request(Some("ABC1234"), None, "desconhecido").validate().unwrap_err();
        assert!(matches!(err, LookupError::InvalidKind(_)));
    }

    #[test]
    fn test_renavam_only_forwarded_for_atpve() {
        let ok = request(Some("abc1d23"), Some("123"), "gravame").validate().unwrap();

        assert_eq!(ok.placa, "ABC1D23");
        assert_eq!(ok.renavam, None);
    }

    #[test]
    fn test_kind_paths() {
        assert_eq!(LookupKind::Gravame.path(), "/consultar-gravame");
        assert_eq!(LookupKind::CrvDigital.path(), "/consultar-crv");
        assert_eq!(LookupKind::BaseEstadual.path(), "/consultar-base-estadual");
        assert_eq!(LookupKind::AtpvE.path(), "/consultar-atpve");
    }

    #[test]
    fn test_upstream_message() {
        assert_eq!(upstream_message(r#"{"message":"Placa não encontrada"}"#.as_bytes()), "Placa não encontrada");
        assert_eq!(upstream_message(b"<html>"), "Erro na consulta veicular");
        assert_eq!(upstream_message(br#"{"error":"x"}"#), "Erro na consulta veicular");
    }
}
