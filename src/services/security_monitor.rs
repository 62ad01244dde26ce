use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::errors::InternalError;
use crate::stores::AuditStore;
use crate::types::db::{auth_attempt, security_audit_log};
use crate::types::internal::audit::EventType;
use crate::types::internal::context::RequestContext;

const RECENT_LIMIT: u64 = 50;
const SUMMARY_WINDOW_HOURS: i64 = 24;

/// Counts over the summary window
#[derive(Debug, Clone, PartialEq)]
pub struct ResumoSeguranca {
    pub janela_horas: i64,
    pub tentativas_falhas: u64,
    pub limites_excedidos: u64,
    pub consultas_veiculares: u64,
    pub alerta: bool,
}

/// Admin read access to the security tables
pub struct SecurityMonitor {
    audit_store: Arc<AuditStore>,
    alert_threshold: u64,
}

impl SecurityMonitor {
    pub fn new(audit_store: Arc<AuditStore>, alert_threshold: u64) -> Self {
        Self {
            audit_store,
            alert_threshold,
        }
    }

    pub async fn recent_auth_attempts(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<auth_attempt::Model>, InternalError> {
        ctx.require_admin()?;
        self.audit_store.recent_auth_attempts(RECENT_LIMIT).await
    }

    pub async fn recent_events(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<security_audit_log::Model>, InternalError> {
        ctx.require_admin()?;
        self.audit_store.recent_events(RECENT_LIMIT).await
    }

    /// Failed logins, rate-limit rejections and lookups in the last day
    pub async fn resumo(&self, ctx: &RequestContext) -> Result<ResumoSeguranca, InternalError> {
        ctx.require_admin()?;

        let since = (Utc::now() - Duration::hours(SUMMARY_WINDOW_HOURS)).timestamp();
        let tentativas_falhas = self.audit_store.count_failed_auth_attempts_since(since).await?;
        let limites_excedidos = self
            .audit_store
            .count_events_since(EventType::RateLimitExceeded.as_str(), since)
            .await?;
        let consultas_veiculares = self
            .audit_store
            .count_events_since(EventType::VehicleConsultationAttempt.as_str(), since)
            .await?;

        let alerta = tentativas_falhas >= self.alert_threshold;
        if alerta {
            tracing::warn!(tentativas_falhas, "Failed login attempts above alert threshold");
        }

        Ok(ResumoSeguranca {
            janela_horas: SUMMARY_WINDOW_HOURS,
            tentativas_falhas,
            limites_excedidos,
            consultas_veiculares,
            alerta,
        })
    }
}
