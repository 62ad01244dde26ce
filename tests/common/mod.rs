// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use despachante_backend::AppData;
use despachante_backend::api::build_routes;
use despachante_backend::config::MockEnvironment;
use despachante_backend::types::internal::auth::UserType;
use migration::{Migrator, MigratorTrait};
use poem::listener::{Acceptor, Listener, TcpListener};
use poem::test::{TestClient, TestResponse};
use poem::{Endpoint, Server};
use sea_orm::{Database, DatabaseConnection};
use serde_json::Value;

pub const TEST_JWT_SECRET: &str = "integration-secret-key-minimum-32-chars";
pub const TEST_PASSWORD_PEPPER: &str = "integration-pepper-value";
pub const ADMIN_EMAIL: &str = "admin@mcdespachante.com.br";
pub const ADMIN_PASSWORD: &str = "Senha-Admin-2025";

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Environment with the mandatory secrets set
pub fn test_environment() -> MockEnvironment {
    MockEnvironment::empty().with_vars(&[
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("PASSWORD_PEPPER", TEST_PASSWORD_PEPPER),
    ])
}

/// AppData over a fresh database, configured from `env`
pub async fn setup_app_data(env: MockEnvironment) -> Arc<AppData> {
    let db = setup_test_db().await;
    Arc::new(AppData::from_env(db, &env).expect("Failed to build AppData"))
}

/// HTTP client over the full route tree
pub fn test_client(app_data: Arc<AppData>) -> TestClient<impl Endpoint> {
    TestClient::new(build_routes(app_data, "http://localhost:3000/api"))
}

/// Decode a response body as JSON
pub async fn body_json(resp: TestResponse) -> Value {
    resp.0
        .into_body()
        .into_json()
        .await
        .expect("Response body is not JSON")
}

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn spawn_stub<E>(app: E) -> String
where
    E: Endpoint + 'static,
{
    let acceptor = TcpListener::bind("127.0.0.1:0")
        .into_acceptor()
        .await
        .expect("Failed to bind stub listener");
    let addr = acceptor
        .local_addr()
        .into_iter()
        .find_map(|addr| addr.as_socket_addr().copied())
        .expect("Stub listener has no socket address");

    tokio::spawn(Server::new_with_acceptor(acceptor).run(app));

    format!("http://{}", addr)
}

/// Register the test admin and return a token for them
pub async fn admin_token(app_data: &AppData) -> String {
    let profile = app_data
        .credential_store
        .create_admin("Administrador", ADMIN_EMAIL, None, ADMIN_PASSWORD)
        .await
        .expect("Failed to create admin");

    let (token, _) = app_data
        .token_service
        .generate_jwt(&profile.user_id, UserType::Admin, Some(profile.email))
        .expect("Failed to sign admin token");
    token
}

/// Token for the client `cliente_id`
pub fn cliente_token(app_data: &AppData, cliente_id: &str) -> String {
    let (token, _) = app_data
        .token_service
        .generate_jwt(cliente_id, UserType::Cliente, None)
        .expect("Failed to sign client token");
    token
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Helper to manage environment variables in tests
///
/// Cleans up specified environment variables on creation and drop,
/// ensuring test isolation when dealing with global environment state.
pub struct EnvGuard {
    vars: Vec<String>,
}

impl EnvGuard {
    pub fn new(vars: Vec<&str>) -> Self {
        for var in &vars {
            unsafe {
                std::env::remove_var(var);
            }
        }
        Self {
            vars: vars.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in &self.vars {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }
}

/// Global mutex for tests that modify environment variables
///
/// Environment variables are process-global, so tests that modify them
/// must run serially.
pub static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());
