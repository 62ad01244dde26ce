use chrono::DateTime;
use poem_openapi::Object;

/// `GET /api/health` body
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    /// Database answered a ping
    pub database: bool,

    /// Time of the check (RFC 3339)
    pub timestamp: String,
}

/// Standardized error response model
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,

    /// Error type or category
    pub error: String,

    /// Human-readable error message (Portuguese)
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Render a stored Unix timestamp as RFC 3339
pub fn format_timestamp(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}
