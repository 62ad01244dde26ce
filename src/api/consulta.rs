use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers::enforce_rate_limit;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::LookupRequest;
use crate::types::dto::consulta::{ConsultaVeiculoRequest, ConsultaVeiculoResponse};
use crate::types::internal::context::RequestContext;

/// Vehicle lookup proxy endpoint
pub struct ConsultaApi {
    app_data: Arc<AppData>,
}

impl ConsultaApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

#[derive(Tags)]
enum ConsultaTags {
    /// Vehicle record lookups
    Consulta,
}

#[OpenApi]
impl ConsultaApi {
    /// Look up a vehicle at the records vendor
    ///
    /// `tipo` is one of `gravame`, `crv-digital`, `base-estadual`, `atpv-e`.
    /// PDF answers come back base64-encoded.
    #[oai(path = "/consulta-veiculo", method = "post", tag = "ConsultaTags::Consulta")]
    async fn consultar(
        &self,
        req: &Request,
        body: Json<ConsultaVeiculoRequest>,
    ) -> Result<Json<ConsultaVeiculoResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);
        enforce_rate_limit(&self.app_data, &ctx, "consulta-veiculo").await?;

        let body = body.0;
        let data = self
            .app_data
            .vehicle_lookup_service
            .consultar(
                &ctx,
                LookupRequest {
                    placa: body.placa,
                    chassis: body.chassis,
                    renavam: body.renavam,
                    tipo: body.tipo,
                },
            )
            .await?;

        Ok(Json(ConsultaVeiculoResponse {
            success: true,
            data,
        }))
    }
}
