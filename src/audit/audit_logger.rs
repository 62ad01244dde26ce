use std::sync::Arc;

use crate::audit::AuditBuilder;
use crate::errors::InternalError;
use crate::stores::AuditStore;
use crate::types::internal::audit::{AttemptType, AuthAttempt, EventType};
use crate::types::internal::context::RequestContext;

/// Entry point for everything written to the security tables
pub struct AuditLogger {
    pub audit_store: Arc<AuditStore>,
}

impl AuditLogger {
    pub fn new(audit_store: Arc<AuditStore>) -> Self {
        Self { audit_store }
    }

    /// Create an AuditBuilder for an event
    ///
    /// # Arguments
    /// * `event_type` - Event type (can be EventType enum or string for custom events)
    pub fn builder(&self, event_type: impl Into<EventType>) -> AuditBuilder {
        AuditBuilder::new(self.audit_store.clone(), event_type)
    }

    /// Record a login attempt in auth_attempts
    ///
    /// `error_message` carries the detailed reason; callers only ever see
    /// the generic invalid-credentials answer.
    pub async fn log_auth_attempt(
        &self,
        ctx: &RequestContext,
        attempt_type: AttemptType,
        identifier: &str,
        email: Option<String>,
        error_message: Option<&str>,
    ) -> Result<(), InternalError> {
        let success = error_message.is_none();
        if success {
            tracing::info!(attempt_type = attempt_type.as_str(), "Login succeeded");
        } else {
            tracing::warn!(
                attempt_type = attempt_type.as_str(),
                reason = error_message.unwrap_or_default(),
                "Login failed"
            );
        }

        self.audit_store
            .record_auth_attempt(AuthAttempt {
                identifier: identifier.to_string(),
                email,
                attempt_type,
                success,
                ip_address: Some(ctx.client_ip()),
                error_message: error_message.map(str::to_string),
            })
            .await
    }

    /// Record a request rejected by the rate limiter
    pub async fn log_rate_limit_exceeded(
        &self,
        ctx: &RequestContext,
        endpoint: &str,
        request_count: i32,
    ) -> Result<(), InternalError> {
        tracing::warn!(endpoint, request_count, "Rate limit exceeded");

        self.builder(EventType::RateLimitExceeded)
            .with_context(ctx)
            .resource("api_rate_limit", Some(endpoint.to_string()))
            .add_field("endpoint", endpoint)
            .add_field("request_count", request_count)
            .write()
            .await
    }
}
