// Database entities - SeaORM models
pub mod api_rate_limit;
pub mod auth_attempt;
pub mod cliente;
pub mod documento;
pub mod profile;
pub mod security_audit_log;
