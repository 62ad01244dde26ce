use std::net::{IpAddr, SocketAddr};

use poem::Request;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::services::TokenService;
use crate::types::internal::auth::Claims;

use super::{request_id::RequestId, request_source::RequestSource};

const MAX_USER_AGENT_LEN: usize = 50;

/// Request context that flows through all layers
///
/// Built once per request and passed explicitly; it carries the caller's
/// network identity and, once a bearer token is validated, the session claims.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// User agent, truncated
    pub user_agent: Option<String>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Whether the request is authenticated (JWT validated successfully)
    pub authenticated: bool,

    /// Full JWT claims if authenticated
    pub claims: Option<Claims>,

    /// Source of the request (API or CLI)
    pub source: RequestSource,

    /// Actor who initiated the operation
    pub actor_id: String,
}

impl RequestContext {
    /// Create a RequestContext for CLI operations
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            user_agent: None,
            request_id: RequestId::new(),
            authenticated: false,
            claims: None,
            source: RequestSource::CLI,
            actor_id: format!("cli:{}", command_name),
        }
    }

    /// Create an anonymous RequestContext from an HTTP request
    pub fn from_request(req: &Request) -> Self {
        let ctx = Self {
            ip_address: Self::extract_ip_address(req),
            user_agent: req
                .header("User-Agent")
                .map(|ua| ua.chars().take(MAX_USER_AGENT_LEN).collect()),
            request_id: RequestId::new(),
            authenticated: false,
            claims: None,
            source: RequestSource::API,
            actor_id: "anonymous".to_owned(),
        };

        tracing::trace!("Request context created: {:?}", ctx);
        ctx
    }

    /// Validate a bearer token and attach its claims
    pub fn authenticate(
        self,
        token: &str,
        token_service: &TokenService,
    ) -> Result<Self, InternalError> {
        let claims = token_service.validate_jwt(token)?;
        let actor_id = claims.sub.clone();
        Ok(self.with_auth(claims).with_actor_id(actor_id))
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    /// A header that does not hold an address is skipped.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(ip) = req
            .header("X-Forwarded-For")
            .and_then(|forwarded| forwarded.split(',').next())
            .and_then(parse_ip)
        {
            return Some(ip);
        }

        // Check X-Real-IP header (nginx)
        if let Some(ip) = req.header("X-Real-IP").and_then(parse_ip) {
            return Some(ip);
        }

        // Fall back to remote address
        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }

    /// Client IP as stored in rate-limit and audit rows
    pub fn client_ip(&self) -> String {
        self.ip_address
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Set authentication state with claims
    pub fn with_auth(mut self, claims: Claims) -> Self {
        self.authenticated = true;
        self.claims = Some(claims);
        self
    }

    /// Set the actor_id
    pub fn with_actor_id(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = actor_id.into();
        self
    }

    /// Claims of an authenticated admin
    pub fn require_admin(&self) -> Result<&Claims, InternalError> {
        match &self.claims {
            Some(claims) if claims.is_admin() => Ok(claims),
            Some(claims) => Err(CredentialError::Forbidden(format!(
                "{} is not an admin",
                claims.sub
            ))
            .into()),
            None => Err(CredentialError::InvalidToken("missing".to_string()).into()),
        }
    }

    /// Claims of an admin, or of the client who owns `cliente_id`
    pub fn require_admin_or_owner(&self, cliente_id: &str) -> Result<&Claims, InternalError> {
        match &self.claims {
            Some(claims) if claims.is_admin() || claims.sub == cliente_id => Ok(claims),
            Some(claims) => Err(CredentialError::Forbidden(format!(
                "{} cannot access cliente {}",
                claims.sub, cliente_id
            ))
            .into()),
            None => Err(CredentialError::InvalidToken("missing".to_string()).into()),
        }
    }
}

/// Address in a forwarding header, with or without a port
fn parse_ip(raw: &str) -> Option<IpAddr> {
    let raw = raw.trim();
    raw.parse()
        .ok()
        .or_else(|| raw.parse::<SocketAddr>().ok().map(|addr| addr.ip()))
}
