use std::sync::Arc;

use crate::audit::AuditLogger;
use crate::errors::InternalError;
use crate::stores::RateLimitStore;
use crate::types::internal::context::RequestContext;

/// Outcome of a rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { count: i32 },
    Limited { count: i32 },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }
}

/// Fixed-window limiter keyed by client IP and endpoint
pub struct RateLimiter {
    store: Arc<RateLimitStore>,
    audit_logger: Arc<AuditLogger>,
    max_requests: i32,
    window_secs: i64,
}

impl RateLimiter {
    pub fn new(
        store: Arc<RateLimitStore>,
        audit_logger: Arc<AuditLogger>,
        max_requests: i32,
        window_secs: i64,
    ) -> Self {
        Self {
            store,
            audit_logger,
            max_requests,
            window_secs,
        }
    }

    /// Count this request and decide whether it may proceed
    ///
    /// Rejected requests still count toward the window.
    pub async fn check(&self, ctx: &RequestContext, endpoint: &str) -> Result<RateDecision, InternalError> {
        let count = self
            .store
            .register_hit(&ctx.client_ip(), endpoint, self.window_secs)
            .await?;

        if count <= self.max_requests {
            return Ok(RateDecision::Allowed { count });
        }

        self.audit_logger
            .log_rate_limit_exceeded(ctx, endpoint, count)
            .await?;
        Ok(RateDecision::Limited { count })
    }
}
