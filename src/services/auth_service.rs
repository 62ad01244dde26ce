use std::sync::Arc;

use crate::audit::AuditLogger;
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::services::TokenService;
use crate::services::crypto::digits_only;
use crate::services::vehicle_lookup_service::normalize_placa;
use crate::stores::{AdminCredentialStore, AdminVerification, ClienteStore};
use crate::types::internal::audit::AttemptType;
use crate::types::internal::auth::{Claims, UserType};
use crate::types::internal::context::RequestContext;

/// Account states that may not log in
const BLOCKED_STATUSES: [&str; 2] = ["suspended", "locked"];

/// Identity returned with a new session
#[derive(Debug, Clone, PartialEq)]
pub struct Usuario {
    pub id: String,
    pub nome: String,
    pub email: Option<String>,
    pub tipo: UserType,
}

/// A freshly issued session
#[derive(Debug, Clone)]
pub struct Sessao {
    pub token: String,
    pub claims: Claims,
    pub usuario: Usuario,
}

/// Authentication service for client and admin logins
///
/// Every attempt lands in `auth_attempts` with its detailed reason, while
/// callers only ever see `CredentialError::InvalidCredentials`.
pub struct AuthService {
    cliente_store: Arc<ClienteStore>,
    credential_store: Arc<dyn AdminCredentialStore>,
    token_service: Arc<TokenService>,
    audit_logger: Arc<AuditLogger>,
}

fn required<'a>(value: Option<&'a str>) -> Option<&'a str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl AuthService {
    pub fn new(
        cliente_store: Arc<ClienteStore>,
        credential_store: Arc<dyn AdminCredentialStore>,
        token_service: Arc<TokenService>,
        audit_logger: Arc<AuditLogger>,
    ) -> Self {
        Self {
            cliente_store,
            credential_store,
            token_service,
            audit_logger,
        }
    }

    /// Log a client in with the vehicle plate and CPF
    ///
    /// # Arguments
    /// * `placa` - Plate in any case, with or without hyphen
    /// * `cpf` - CPF with or without punctuation
    pub async fn login_cliente(
        &self,
        ctx: &RequestContext,
        placa: Option<&str>,
        cpf: Option<&str>,
    ) -> Result<Sessao, InternalError> {
        let (Some(placa), Some(cpf)) = (required(placa), required(cpf)) else {
            return Err(CredentialError::MissingCredentials(
                "Placa e CPF são obrigatórios".to_string(),
            )
            .into());
        };

        let placa = normalize_placa(placa);
        let cpf_digits = digits_only(cpf);

        let cliente = if cpf_digits.is_empty() {
            None
        } else {
            self.cliente_store
                .find_by_placa_and_cpf(&placa, &cpf_digits)
                .await?
        };

        let Some(cliente) = cliente else {
            self.record_attempt(ctx, AttemptType::Client, &placa, None, Some("Cliente não encontrado"))
                .await;
            return Err(CredentialError::InvalidCredentials.into());
        };

        if BLOCKED_STATUSES.contains(&cliente.account_status.as_str()) {
            self.cliente_store.increment_login_attempts(&cliente.id).await?;
            self.record_attempt(
                ctx,
                AttemptType::Client,
                &placa,
                cliente.email.clone(),
                Some(&format!("Conta {}", cliente.account_status)),
            )
            .await;
            return Err(CredentialError::InvalidCredentials.into());
        }

        let (token, claims) =
            self.token_service
                .generate_jwt(&cliente.id, UserType::Cliente, cliente.email.clone())?;
        self.cliente_store.record_login_success(&cliente.id).await?;
        self.record_attempt(ctx, AttemptType::Client, &placa, cliente.email.clone(), None)
            .await;

        Ok(Sessao {
            token,
            claims,
            usuario: Usuario {
                id: cliente.id,
                nome: cliente.nome,
                email: cliente.email,
                tipo: UserType::Cliente,
            },
        })
    }

    /// Log an admin in with email and password
    pub async fn login_admin(
        &self,
        ctx: &RequestContext,
        email: Option<&str>,
        senha: Option<&str>,
    ) -> Result<Sessao, InternalError> {
        let (Some(email), Some(senha)) = (required(email), senha.filter(|s| !s.is_empty())) else {
            return Err(CredentialError::MissingCredentials(
                "Email e senha são obrigatórios".to_string(),
            )
            .into());
        };

        let email = email.to_lowercase();

        let profile = match self.credential_store.verify_admin(&email, senha).await? {
            AdminVerification::Verified(profile) => profile,
            AdminVerification::UnknownProfile => {
                self.record_attempt(ctx, AttemptType::Admin, &email, Some(email.clone()), Some("Administrador não encontrado"))
                    .await;
                return Err(CredentialError::InvalidCredentials.into());
            }
            AdminVerification::WrongPassword => {
                self.record_attempt(ctx, AttemptType::Admin, &email, Some(email.clone()), Some("Senha inválida"))
                    .await;
                return Err(CredentialError::InvalidCredentials.into());
            }
        };

        let (token, claims) = self.token_service.generate_jwt(
            &profile.user_id,
            UserType::Admin,
            Some(profile.email.clone()),
        )?;
        self.record_attempt(ctx, AttemptType::Admin, &email, Some(email.clone()), None)
            .await;

        Ok(Sessao {
            token,
            claims,
            usuario: Usuario {
                id: profile.user_id,
                nome: profile.nome,
                email: Some(profile.email),
                tipo: UserType::Admin,
            },
        })
    }

    /// Write an auth_attempts row; a failed write is logged, not returned
    async fn record_attempt(
        &self,
        ctx: &RequestContext,
        attempt_type: AttemptType,
        identifier: &str,
        email: Option<String>,
        error_message: Option<&str>,
    ) {
        if let Err(e) = self
            .audit_logger
            .log_auth_attempt(ctx, attempt_type, identifier, email, error_message)
            .await
        {
            tracing::error!("Failed to record auth attempt: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::{AuditStore, CredentialStore, NewCliente};
    use crate::test::utils::setup_test_db;

    struct Harness {
        service: AuthService,
        clientes: Arc<ClienteStore>,
        credentials: Arc<CredentialStore>,
        audit: Arc<AuditStore>,
        tokens: Arc<TokenService>,
    }

    async fn harness() -> Harness {
        let db = setup_test_db().await;
        let clientes = Arc::new(ClienteStore::new(db.clone()));
        let credentials = Arc::new(CredentialStore::new(db.clone(), "test-pepper-for-unit-tests".to_string()));
        let audit = Arc::new(AuditStore::new(db));
        let tokens = Arc::new(TokenService::new("test-secret-key-minimum-32-characters-long".to_string()));
        let service = AuthService::new(
            clientes.clone(),
            credentials.clone(),
            tokens.clone(),
            Arc::new(AuditLogger::new(audit.clone())),
        );
        Harness { service, clientes, credentials, audit, tokens }
    }

    async fn cliente(h: &Harness, cpf: &str) -> String {
        h.clientes
            .create(NewCliente {
                nome: "Maria Silva".to_string(),
                email: Some("maria@example.com".to_string()),
                cpf: cpf.to_string(),
                telefone: None,
                endereco: None,
                placa_veiculo: Some("ABC1D23".to_string()),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_cliente_login_with_masked_cpf() {
        let h = harness().await;
        let id = cliente(&h, "*****12345").await;
        let ctx = RequestContext::for_cli("test");

        let sessao = h
            .service
            .login_cliente(&ctx, Some("abc-1d23"), Some("987.654.123-45"))
            .await
            .unwrap();

        assert_eq!(sessao.usuario.id, id);
        assert_eq!(sessao.claims.tipo, UserType::Cliente);
        assert_eq!(h.tokens.validate_jwt(&sessao.token).unwrap().sub, id);
        assert!(h.clientes.get(&id).await.unwrap().last_login_at.is_some());

        let attempts = h.audit.recent_auth_attempts(10).await.unwrap();
        assert!(attempts[0].success);
        assert_eq!(attempts[0].identifier, "ABC1D23");
    }

    #[tokio::test]
    async fn test_cliente_login_wrong_cpf() {
        let h = harness().await;
        cliente(&h, "12345678901").await;

        let result = h
            .service
            .login_cliente(&RequestContext::for_cli("test"), Some("ABC1D23"), Some("99999"))
            .await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::InvalidCredentials))
        ));
        let attempts = h.audit.recent_auth_attempts(10).await.unwrap();
        assert!(!attempts[0].success);
        assert_eq!(attempts[0].error_message.as_deref(), Some("Cliente não encontrado"));
    }

    #[tokio::test]
    async fn test_blocked_cliente_cannot_login() {
        let h = harness().await;
        let id = cliente(&h, "12345678901").await;
        h.clientes.update_status(&id, "suspended").await.unwrap();

        let result = h
            .service
            .login_cliente(&RequestContext::for_cli("test"), Some("ABC1D23"), Some("12345678901"))
            .await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::InvalidCredentials))
        ));
        assert_eq!(h.clientes.get(&id).await.unwrap().login_attempts, 1);
    }

    #[tokio::test]
    async fn test_cliente_login_requires_both_fields() {
        let h = harness().await;

        let result = h
            .service
            .login_cliente(&RequestContext::for_cli("test"), Some("ABC1D23"), Some(" "))
            .await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::MissingCredentials(_)))
        ));
    }

    #[tokio::test]
    async fn test_admin_login() {
        let h = harness().await;
        h.credentials
            .create_admin("Admin", "admin@example.com", None, "senha-correta")
            .await
            .unwrap();
        let ctx = RequestContext::for_cli("test");

        let sessao = h
            .service
            .login_admin(&ctx, Some("ADMIN@example.com"), Some("senha-correta"))
            .await
            .unwrap();
        assert!(sessao.claims.is_admin());
        assert_eq!(sessao.claims.exp - sessao.claims.iat, 8 * 3600);

        let wrong = h
            .service
            .login_admin(&ctx, Some("admin@example.com"), Some("senha-errada"))
            .await;
        assert!(matches!(
            wrong,
            Err(InternalError::Credential(CredentialError::InvalidCredentials))
        ));

        let attempts = h.audit.recent_auth_attempts(10).await.unwrap();
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts.iter().filter(|a| a.success).count(), 1);
    }
}
