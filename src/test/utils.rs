// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::{MockEnvironment, SecretManager, Settings};
use crate::types::internal::auth::{Claims, UserType};
use crate::types::internal::context::RequestContext;

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_PASSWORD_PEPPER: &str = "test-pepper-for-unit-tests";

/// Fresh in-memory database with every migration applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Environment with the required secrets set
pub fn test_environment() -> MockEnvironment {
    MockEnvironment::empty().with_vars(&[
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("PASSWORD_PEPPER", TEST_PASSWORD_PEPPER),
    ])
}

/// AppData over a fresh database with default settings
pub async fn setup_test_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    let secret_manager = SecretManager::init_with(&test_environment())
        .expect("Failed to initialize test SecretManager");
    Arc::new(AppData::init(db, Settings::default(), Arc::new(secret_manager)))
}

fn claims(tipo: UserType, sub: &str) -> Claims {
    let now = Utc::now().timestamp();
    Claims {
        sub: sub.to_string(),
        tipo,
        email: None,
        iat: now,
        exp: now + 3600,
        jti: "test-jti".to_string(),
    }
}

/// Context authenticated as an admin
pub fn admin_context() -> RequestContext {
    RequestContext::for_cli("test").with_auth(claims(UserType::Admin, "admin-1"))
}

/// Context authenticated as the client `cliente_id`
pub fn cliente_context(cliente_id: &str) -> RequestContext {
    RequestContext::for_cli("test").with_auth(claims(UserType::Cliente, cliente_id))
}
