use std::collections::HashMap;
use std::fmt;

/// Event types for the security audit log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType {
    VehicleConsultationAttempt,
    VehicleConsultationSuccess,
    VehicleConsultationError,
    VehicleConsultationInternalError,
    AiAssistantQuery,
    AiAssistantError,
    RateLimitExceeded,
    ClienteCreated,
    ClienteStatusChanged,
    ClienteDeleted,
    DocumentoCreated,
    DocumentoUpdated,
    AdminCreated,
    Custom(String),
}

impl EventType {
    /// Convert EventType to string representation for database storage
    pub fn as_str(&self) -> &str {
        match self {
            Self::VehicleConsultationAttempt => "vehicle_consultation_attempt",
            Self::VehicleConsultationSuccess => "vehicle_consultation_success",
            Self::VehicleConsultationError => "vehicle_consultation_error",
            Self::VehicleConsultationInternalError => "vehicle_consultation_internal_error",
            Self::AiAssistantQuery => "ai_assistant_query",
            Self::AiAssistantError => "ai_assistant_error",
            Self::RateLimitExceeded => "rate_limit_exceeded",
            Self::ClienteCreated => "cliente_created",
            Self::ClienteStatusChanged => "cliente_status_changed",
            Self::ClienteDeleted => "cliente_deleted",
            Self::DocumentoCreated => "documento_created",
            Self::DocumentoUpdated => "documento_updated",
            Self::AdminCreated => "admin_created",
            Self::Custom(s) => s.as_str(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<T: Into<String>> From<T> for EventType {
    fn from(s: T) -> Self {
        EventType::Custom(s.into())
    }
}

/// Audit event ready to be written to security_audit_logs
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub event_type: EventType,
    pub resource_type: String,
    pub resource_id: Option<String>,
    pub user_id: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub data: HashMap<String, serde_json::Value>,
}

/// Which login form an attempt came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptType {
    Client,
    Admin,
}

impl AttemptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Admin => "admin",
        }
    }
}

/// One row of auth_attempts
#[derive(Debug, Clone)]
pub struct AuthAttempt {
    pub identifier: String,
    pub email: Option<String>,
    pub attempt_type: AttemptType,
    pub success: bool,
    pub ip_address: Option<String>,
    pub error_message: Option<String>,
}
