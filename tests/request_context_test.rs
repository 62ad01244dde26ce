use despachante_backend::errors::InternalError;
use despachante_backend::errors::internal::CredentialError;
use despachante_backend::services::TokenService;
use despachante_backend::types::internal::auth::UserType;
use despachante_backend::types::internal::context::{RequestContext, RequestSource};
use poem::Request;

const SECRET: &str = "request-context-secret-with-32-chars!";

#[test]
fn test_request_context_for_cli() {
    let ctx = RequestContext::for_cli("create-admin");

    assert_eq!(ctx.source, RequestSource::CLI);
    assert_eq!(ctx.actor_id, "cli:create-admin");
    assert_eq!(ctx.client_ip(), "unknown");
    assert!(!ctx.authenticated);
    assert!(ctx.claims.is_none());
}

#[test]
fn test_from_request_prefers_forwarded_for() {
    let req = Request::builder()
        .header("X-Forwarded-For", "203.0.113.5, 10.0.0.1")
        .header("X-Real-IP", "198.51.100.9")
        .header("User-Agent", "Mozilla/5.0")
        .finish();

    let ctx = RequestContext::from_request(&req);

    assert_eq!(ctx.source, RequestSource::API);
    assert_eq!(ctx.actor_id, "anonymous");
    assert_eq!(ctx.client_ip(), "203.0.113.5");
    assert_eq!(ctx.user_agent.as_deref(), Some("Mozilla/5.0"));
}

#[test]
fn test_from_request_uses_real_ip_header() {
    let req = Request::builder().header("X-Real-IP", "198.51.100.9").finish();

    assert_eq!(RequestContext::from_request(&req).client_ip(), "198.51.100.9");
}

#[test]
fn test_user_agent_is_truncated() {
    let long_agent = "a".repeat(200);
    let req = Request::builder().header("User-Agent", long_agent.as_str()).finish();

    let ctx = RequestContext::from_request(&req);

    assert_eq!(ctx.user_agent.unwrap().len(), 50);
}

#[test]
fn test_authenticate_attaches_claims() {
    let tokens = TokenService::new(SECRET.to_string());
    let (token, _) = tokens.generate_jwt("cliente-7", UserType::Cliente, None).unwrap();

    let ctx = RequestContext::from_request(&Request::builder().finish())
        .authenticate(&token, &tokens)
        .unwrap();

    assert!(ctx.authenticated);
    assert_eq!(ctx.actor_id, "cliente-7");
    assert!(ctx.require_admin_or_owner("cliente-7").is_ok());
    assert!(matches!(
        ctx.require_admin_or_owner("cliente-8"),
        Err(InternalError::Credential(CredentialError::Forbidden(_)))
    ));
    assert!(matches!(
        ctx.require_admin(),
        Err(InternalError::Credential(CredentialError::Forbidden(_)))
    ));
}

#[test]
fn test_authenticate_rejects_foreign_token() {
    let other = TokenService::new("another-secret-with-at-least-32-chars".to_string());
    let (token, _) = other.generate_jwt("admin-1", UserType::Admin, None).unwrap();

    let result = RequestContext::from_request(&Request::builder().finish())
        .authenticate(&token, &TokenService::new(SECRET.to_string()));

    assert!(matches!(
        result,
        Err(InternalError::Credential(CredentialError::InvalidToken(_)))
    ));
}
