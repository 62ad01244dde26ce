use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::audit::AuditLogger;
use crate::config::{ConfigError, EnvironmentProvider, SecretManager, Settings};
use crate::services::{
    AnswerGenerator, AssistantService, AuthService, GeminiClient, RateLimiter, RegistryService,
    SecurityMonitor, TokenService, VehicleLookupService,
};
use crate::stores::{AuditStore, ClienteStore, CredentialStore, DocumentoStore, RateLimitStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once and shared by the API structs.
///
/// ```text
/// main.rs
///   ↓
/// AppData::from_env(db, env)
///   ↓ creates once
///   ├─ stores (audit, cliente, documento, credential, rate limit)
///   ├─ audit_logger
///   └─ services (token, auth, assistant, lookup, rate limiter, registry, monitor)
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to every #[OpenApi] struct
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: Settings,
    pub secret_manager: Arc<SecretManager>,
    pub audit_store: Arc<AuditStore>,
    pub cliente_store: Arc<ClienteStore>,
    pub documento_store: Arc<DocumentoStore>,
    pub credential_store: Arc<CredentialStore>,
    pub rate_limit_store: Arc<RateLimitStore>,
    pub audit_logger: Arc<AuditLogger>,
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub assistant_service: Arc<AssistantService>,
    pub vehicle_lookup_service: Arc<VehicleLookupService>,
    pub rate_limiter: Arc<RateLimiter>,
    pub registry_service: Arc<RegistryService>,
    pub security_monitor: Arc<SecurityMonitor>,
}

impl AppData {
    /// Read settings and secrets from `env` and build everything
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a setting is malformed or a required secret
    /// is missing
    pub fn from_env(db: DatabaseConnection, env: &dyn EnvironmentProvider) -> Result<Self, ConfigError> {
        let settings = Settings::from_env_provider(env)?;
        let secret_manager = Arc::new(SecretManager::init_with(env)?);
        Ok(Self::init(db, settings, secret_manager))
    }

    /// Wire stores and services over an already migrated database
    pub fn init(db: DatabaseConnection, settings: Settings, secret_manager: Arc<SecretManager>) -> Self {
        tracing::info!("Initializing AppData...");

        let audit_store = Arc::new(AuditStore::new(db.clone()));
        let cliente_store = Arc::new(ClienteStore::new(db.clone()));
        let documento_store = Arc::new(DocumentoStore::new(db.clone()));
        let credential_store = Arc::new(CredentialStore::new(
            db.clone(),
            secret_manager.password_pepper().to_string(),
        ));
        let rate_limit_store = Arc::new(RateLimitStore::new(db.clone()));
        tracing::debug!("Stores created");

        let audit_logger = Arc::new(AuditLogger::new(audit_store.clone()));
        let token_service = Arc::new(TokenService::new(secret_manager.jwt_secret().to_string()));
        let upstream_timeout = Duration::from_secs(settings.consulta_timeout_secs);

        let auth_service = Arc::new(AuthService::new(
            cliente_store.clone(),
            credential_store.clone(),
            token_service.clone(),
            audit_logger.clone(),
        ));

        let generator: Option<Arc<dyn AnswerGenerator>> = match secret_manager.gemini_api_key() {
            Some(api_key) => {
                tracing::info!(model = %settings.gemini_model, "Gemini answers enabled");
                Some(Arc::new(GeminiClient::new(
                    settings.gemini_api_url.clone(),
                    settings.gemini_model.clone(),
                    api_key.to_string(),
                    upstream_timeout,
                )))
            }
            None => {
                tracing::info!("GEMINI_API_KEY not set, assistant uses static answers only");
                None
            }
        };
        let assistant_service = Arc::new(AssistantService::new(generator, audit_logger.clone()));

        if secret_manager.vendor_access_key().is_none() {
            tracing::warn!("CHAVE_ACESSO_API not set, vehicle lookups will fail");
        }
        let vehicle_lookup_service = Arc::new(VehicleLookupService::new(
            settings.consulta_api_url.clone(),
            secret_manager.vendor_access_key().map(str::to_string),
            upstream_timeout,
            audit_logger.clone(),
        ));

        let rate_limiter = Arc::new(RateLimiter::new(
            rate_limit_store.clone(),
            audit_logger.clone(),
            settings.rate_limit_max_requests,
            settings.rate_limit_window_secs,
        ));

        let registry_service = Arc::new(RegistryService::new(
            cliente_store.clone(),
            documento_store.clone(),
            audit_logger.clone(),
        ));

        let security_monitor = Arc::new(SecurityMonitor::new(
            audit_store.clone(),
            settings.security_alert_threshold,
        ));

        tracing::info!("AppData initialization complete");

        Self {
            db,
            settings,
            secret_manager,
            audit_store,
            cliente_store,
            documento_store,
            credential_store,
            rate_limit_store,
            audit_logger,
            token_service,
            auth_service,
            assistant_service,
            vehicle_lookup_service,
            rate_limiter,
            registry_service,
            security_monitor,
        }
    }
}
