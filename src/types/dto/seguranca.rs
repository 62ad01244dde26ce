use poem_openapi::Object;

use crate::types::db::{auth_attempt, security_audit_log};
use crate::types::dto::common::format_timestamp;

/// Login attempt row
#[derive(Object, Debug)]
pub struct AuthAttemptResponse {
    pub id: i64,
    pub identifier: String,
    pub email: Option<String>,
    pub attempt_type: String,
    pub success: bool,
    pub ip_address: Option<String>,
    pub error_message: Option<String>,
    pub created_at: String,
}

impl From<auth_attempt::Model> for AuthAttemptResponse {
    fn from(model: auth_attempt::Model) -> Self {
        Self {
            id: model.id,
            identifier: model.identifier,
            email: model.email,
            attempt_type: model.attempt_type,
            success: model.success,
            ip_address: model.ip_address,
            error_message: model.error_message,
            created_at: format_timestamp(model.created_at),
        }
    }
}

/// Security audit log row
#[derive(Object, Debug)]
pub struct AuditLogResponse {
    pub id: i64,
    pub action: String,
    pub resource_type: String,
    pub resource_id: Option<String>,
    pub user_id: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub details: serde_json::Value,
    pub created_at: String,
}

impl From<security_audit_log::Model> for AuditLogResponse {
    fn from(model: security_audit_log::Model) -> Self {
        let details = serde_json::from_str(&model.details).unwrap_or(serde_json::Value::Null);
        Self {
            id: model.id,
            action: model.action,
            resource_type: model.resource_type,
            resource_id: model.resource_id,
            user_id: model.user_id,
            ip_address: model.ip_address,
            user_agent: model.user_agent,
            details,
            created_at: format_timestamp(model.created_at),
        }
    }
}

/// Counters over the monitoring window
#[derive(Object, Debug)]
pub struct ResumoSegurancaResponse {
    pub janela_horas: i64,
    pub tentativas_falhas: u64,
    pub limites_excedidos: u64,
    pub consultas_veiculares: u64,

    /// Failed attempts reached the alert threshold
    pub alerta: bool,
}
