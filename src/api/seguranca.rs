use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::auth::BearerAuth;
use crate::api::helpers::authenticated_context;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::types::dto::seguranca::{AuditLogResponse, AuthAttemptResponse, ResumoSegurancaResponse};

/// Admin view over the security tables
pub struct SegurancaApi {
    app_data: Arc<AppData>,
}

impl SegurancaApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

#[derive(Tags)]
enum SegurancaTags {
    /// Security monitoring
    Seguranca,
}

#[OpenApi(prefix_path = "/seguranca")]
impl SegurancaApi {
    /// 50 most recent login attempts
    #[oai(path = "/tentativas", method = "get", tag = "SegurancaTags::Seguranca")]
    async fn tentativas(
        &self,
        req: &Request,
        auth: BearerAuth,
    ) -> Result<Json<Vec<AuthAttemptResponse>>, ApiError> {
        let ctx = authenticated_context(&self.app_data, req, &auth)?;
        let rows = self.app_data.security_monitor.recent_auth_attempts(&ctx).await?;

        Ok(Json(rows.into_iter().map(AuthAttemptResponse::from).collect()))
    }

    /// 50 most recent audit log entries
    #[oai(path = "/logs", method = "get", tag = "SegurancaTags::Seguranca")]
    async fn logs(&self, req: &Request, auth: BearerAuth) -> Result<Json<Vec<AuditLogResponse>>, ApiError> {
        let ctx = authenticated_context(&self.app_data, req, &auth)?;
        let rows = self.app_data.security_monitor.recent_events(&ctx).await?;

        Ok(Json(rows.into_iter().map(AuditLogResponse::from).collect()))
    }

    /// Counts over the last 24 hours
    #[oai(path = "/resumo", method = "get", tag = "SegurancaTags::Seguranca")]
    async fn resumo(&self, req: &Request, auth: BearerAuth) -> Result<Json<ResumoSegurancaResponse>, ApiError> {
        let ctx = authenticated_context(&self.app_data, req, &auth)?;
        let resumo = self.app_data.security_monitor.resumo(&ctx).await?;

        Ok(Json(ResumoSegurancaResponse {
            janela_horas: resumo.janela_horas,
            tentativas_falhas: resumo.tentativas_falhas,
            limites_excedidos: resumo.limites_excedidos,
            consultas_veiculares: resumo.consultas_veiculares,
            alerta: resumo.alerta,
        }))
    }
}
