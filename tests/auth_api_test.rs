mod common;

use std::sync::Arc;

use common::{
    ADMIN_EMAIL, ADMIN_PASSWORD, bearer, body_json, setup_app_data, test_client, test_environment,
};
use despachante_backend::AppData;
use despachante_backend::stores::NewCliente;
use poem::http::StatusCode;
use serde_json::json;

async fn seed_cliente(app_data: &Arc<AppData>, cpf: &str) -> String {
    app_data
        .cliente_store
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
async fn test_cliente_login_and_session() {
    let app_data = setup_app_data(test_environment()).await;
    let cliente_id = seed_cliente(&app_data, "*****12345").await;
    let cli = test_client(app_data.clone());

    let resp = cli
        .post("/api/auth/cliente")
        .body_json(&json!({ "placa": "abc-1d23", "cpf": "987.654.123-45" }))
        .send()
        .await;

    resp.assert_status_is_ok();
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["id"], cliente_id.as_str());
    assert_eq!(body["user"]["type"], "cliente");
    let token = body["token"].as_str().unwrap().to_string();

    let resp = cli
        .get("/api/auth/sessao")
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status_is_ok();
    let sessao = body_json(resp).await;
    assert_eq!(sessao["user_id"], cliente_id.as_str());
    assert_eq!(sessao["tipo"], "cliente");

    let cliente = app_data.cliente_store.get(&cliente_id).await.unwrap();
    assert!(cliente.last_login_at.is_some());
    let attempts = app_data.audit_store.recent_auth_attempts(10).await.unwrap();
    assert!(attempts[0].success);
}

#[tokio::test]
async fn test_cliente_login_wrong_cpf_is_401_and_audited() {
    let app_data = setup_app_data(test_environment()).await;
    seed_cliente(&app_data, "12345678901").await;
    let cli = test_client(app_data.clone());

    let resp = cli
        .post("/api/auth/cliente")
        .header("X-Forwarded-For", "203.0.113.77")
        .body_json(&json!({ "placa": "ABC1D23", "cpf": "00000000000" }))
        .send()
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Credenciais inválidas");

    let attempts = app_data.audit_store.recent_auth_attempts(10).await.unwrap();
    assert_eq!(attempts.len(), 1);
    assert!(!attempts[0].success);
    assert_eq!(attempts[0].identifier, "ABC1D23");
    assert_eq!(attempts[0].ip_address.as_deref(), Some("203.0.113.77"));
}

#[tokio::test]
async fn test_cliente_login_missing_fields_is_400() {
    let app_data = setup_app_data(test_environment()).await;
    let cli = test_client(app_data);

    let resp = cli
        .post("/api/auth/cliente")
        .body_json(&json!({ "placa": "ABC1D23" }))
        .send()
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Placa e CPF são obrigatórios");
}

#[tokio::test]
async fn test_suspended_cliente_cannot_log_in() {
    let app_data = setup_app_data(test_environment()).await;
    let cliente_id = seed_cliente(&app_data, "12345678901").await;
    app_data
        .cliente_store
        .update_status(&cliente_id, "suspended")
        .await
        .unwrap();
    let cli = test_client(app_data.clone());

    let resp = cli
        .post("/api/auth/cliente")
        .body_json(&json!({ "placa": "ABC1D23", "cpf": "12345678901" }))
        .send()
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    let cliente = app_data.cliente_store.get(&cliente_id).await.unwrap();
    assert_eq!(cliente.login_attempts, 1);
}

#[tokio::test]
async fn test_admin_login() {
    let app_data = setup_app_data(test_environment()).await;
    app_data
        .credential_store
        .create_admin("Administrador", ADMIN_EMAIL, None, ADMIN_PASSWORD)
        .await
        .unwrap();
    let cli = test_client(app_data);

    let resp = cli
        .post("/api/auth/admin")
        .body_json(&json!({ "email": ADMIN_EMAIL.to_uppercase(), "senha": ADMIN_PASSWORD }))
        .send()
        .await;

    resp.assert_status_is_ok();
    let body = body_json(resp).await;
    assert_eq!(body["user"]["type"], "admin");
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);
    let token = body["token"].as_str().unwrap().to_string();

    let resp = cli
        .get("/api/auth/sessao")
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(body_json(resp).await["tipo"], "admin");
}

#[tokio::test]
async fn test_admin_wrong_password_and_unknown_email_look_the_same() {
    let app_data = setup_app_data(test_environment()).await;
    app_data
        .credential_store
        .create_admin("Administrador", ADMIN_EMAIL, None, ADMIN_PASSWORD)
        .await
        .unwrap();
    let cli = test_client(app_data.clone());

    let wrong_password = cli
        .post("/api/auth/admin")
        .body_json(&json!({ "email": ADMIN_EMAIL, "senha": "errada" }))
        .send()
        .await;
    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    let wrong_password = body_json(wrong_password).await;

    let unknown = cli
        .post("/api/auth/admin")
        .body_json(&json!({ "email": "ninguem@example.com", "senha": "errada" }))
        .send()
        .await;
    unknown.assert_status(StatusCode::UNAUTHORIZED);
    let unknown = body_json(unknown).await;

    assert_eq!(wrong_password, unknown);

    let attempts = app_data.audit_store.recent_auth_attempts(10).await.unwrap();
    assert_eq!(attempts.len(), 2);
    assert!(attempts.iter().all(|a| !a.success && a.attempt_type == "admin"));
}

#[tokio::test]
async fn test_session_requires_a_valid_token() {
    let app_data = setup_app_data(test_environment()).await;
    let cli = test_client(app_data);

    cli.get("/api/auth/sessao")
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    cli.get("/api/auth/sessao")
        .header("Authorization", bearer("not-a-jwt"))
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
