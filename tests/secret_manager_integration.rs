mod common;

use std::sync::Arc;

use despachante_backend::AppData;
use despachante_backend::config::{ConfigError, SecretError, SecretManager, Settings, SystemEnvironment};

const SECRET_VARS: [&str; 4] = ["JWT_SECRET", "PASSWORD_PEPPER", "CHAVE_ACESSO_API", "GEMINI_API_KEY"];

#[test]
fn test_application_startup_with_valid_secrets() {
    let _lock = common::ENV_TEST_MUTEX.lock().unwrap();
    let _guard = common::EnvGuard::new(SECRET_VARS.to_vec());

    unsafe {
        std::env::set_var("JWT_SECRET", "this-is-a-valid-jwt-secret-with-32-characters");
        std::env::set_var("PASSWORD_PEPPER", "valid-pepper-16ch");
        std::env::set_var("CHAVE_ACESSO_API", "chave-do-portal");
    }

    let secret_manager = Arc::new(SecretManager::init().expect("valid secrets should load"));

    assert_eq!(secret_manager.jwt_secret(), "this-is-a-valid-jwt-secret-with-32-characters");
    assert_eq!(secret_manager.password_pepper(), "valid-pepper-16ch");
    assert_eq!(secret_manager.vendor_access_key(), Some("chave-do-portal"));
    assert_eq!(secret_manager.gemini_api_key(), None);

    let shared = Arc::clone(&secret_manager);
    assert_eq!(shared.jwt_secret(), secret_manager.jwt_secret());
}

#[test]
fn test_application_fails_gracefully_with_missing_jwt_secret() {
    let _lock = common::ENV_TEST_MUTEX.lock().unwrap();
    let _guard = common::EnvGuard::new(SECRET_VARS.to_vec());

    unsafe {
        std::env::set_var("PASSWORD_PEPPER", "valid-pepper-16ch");
    }

    let err = SecretManager::init().unwrap_err();

    assert_eq!(err.to_string(), "Required secret 'JWT_SECRET' is missing");
    match err {
        SecretError::Missing { secret_name } => assert_eq!(secret_name, "JWT_SECRET"),
        _ => panic!("Expected Missing error for JWT_SECRET"),
    }
}

#[test]
fn test_short_pepper_is_rejected() {
    let _lock = common::ENV_TEST_MUTEX.lock().unwrap();
    let _guard = common::EnvGuard::new(SECRET_VARS.to_vec());

    unsafe {
        std::env::set_var("JWT_SECRET", "this-is-a-valid-jwt-secret-with-32-characters");
        std::env::set_var("PASSWORD_PEPPER", "curta");
    }

    match SecretManager::init().unwrap_err() {
        SecretError::InvalidLength { secret_name, expected, actual } => {
            assert_eq!(secret_name, "PASSWORD_PEPPER");
            assert_eq!(expected, 16);
            assert_eq!(actual, 5);
        }
        _ => panic!("Expected InvalidLength error for PASSWORD_PEPPER"),
    }
}

#[tokio::test]
async fn test_app_data_from_process_environment() {
    let db = common::setup_test_db().await;
    let result = {
        let _lock = common::ENV_TEST_MUTEX.lock().unwrap();
        let _guard = common::EnvGuard::new(
            SECRET_VARS
                .iter()
                .copied()
                .chain(["RATE_LIMIT_MAX_REQUESTS"])
                .collect(),
        );

        unsafe {
            std::env::set_var("JWT_SECRET", "this-is-a-valid-jwt-secret-with-32-characters");
            std::env::set_var("PASSWORD_PEPPER", "valid-pepper-16ch");
            std::env::set_var("RATE_LIMIT_MAX_REQUESTS", "5");
        }

        AppData::from_env(db, &SystemEnvironment)
    };

    let app_data = result.expect("AppData should build from the environment");
    assert_eq!(app_data.settings.rate_limit_max_requests, 5);
    assert_eq!(app_data.settings.consulta_api_url, Settings::default().consulta_api_url);
}

#[tokio::test]
async fn test_app_data_reports_malformed_setting() {
    let db = common::setup_test_db().await;
    let env = common::test_environment().with_var("RATE_LIMIT_WINDOW_SECS", "um minuto");

    let err = AppData::from_env(db, &env).err().expect("malformed setting should fail");

    assert!(matches!(
        err,
        ConfigError::InvalidFormat { ref setting_name, .. } if setting_name == "RATE_LIMIT_WINDOW_SECS"
    ));
}
