use poem::Request;

use crate::app_data::AppData;
use crate::api::auth::BearerAuth;
use crate::errors::ApiError;
use crate::services::RateDecision;
use crate::types::internal::context::RequestContext;

/// Context for an endpoint that takes a bearer token
///
/// # Errors
/// `ApiError::Unauthorized` when the token is invalid or expired
pub fn authenticated_context(
    app_data: &AppData,
    req: &Request,
    auth: &BearerAuth,
) -> Result<RequestContext, ApiError> {
    RequestContext::from_request(req)
        .authenticate(&auth.0.token, &app_data.token_service)
        .map_err(ApiError::from)
}

/// Count the request against `endpoint` and reject it over the limit
pub async fn enforce_rate_limit(
    app_data: &AppData,
    ctx: &RequestContext,
    endpoint: &str,
) -> Result<(), ApiError> {
    match app_data.rate_limiter.check(ctx, endpoint).await? {
        RateDecision::Allowed { .. } => Ok(()),
        RateDecision::Limited { .. } => Err(ApiError::rate_limited()),
    }
}
