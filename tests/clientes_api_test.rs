mod common;

use common::{
    admin_token, bearer, body_json, cliente_token, setup_app_data, test_client, test_environment,
};
use poem::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_admin_registers_and_lists_clientes() {
    let app_data = setup_app_data(test_environment()).await;
    let token = admin_token(&app_data).await;
    let cli = test_client(app_data.clone());

    let resp = cli
        .post("/api/clientes")
        .header("Authorization", bearer(&token))
        .body_json(&json!({
            "nome": "  Maria Silva ",
            "cpf": "12345",
            "email": "Maria@Example.com",
            "placa_veiculo": "abc-1d23"
        }))
        .send()
        .await;

    resp.assert_status(StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["nome"], "Maria Silva");
    assert_eq!(created["cpf"], "*****12345");
    assert_eq!(created["email"], "maria@example.com");
    assert_eq!(created["placa_veiculo"], "ABC1D23");
    assert_eq!(created["account_status"], "active");

    let resp = cli
        .get("/api/clientes")
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status_is_ok();
    let list = body_json(resp).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    // The registered client can now log in with the last five CPF digits
    cli.post("/api/auth/cliente")
        .body_json(&json!({ "placa": "ABC1D23", "cpf": "12345" }))
        .send()
        .await
        .assert_status_is_ok();
}

#[tokio::test]
async fn test_duplicate_cpf_is_409() {
    let app_data = setup_app_data(test_environment()).await;
    let token = admin_token(&app_data).await;
    let cli = test_client(app_data);
    let payload = json!({ "nome": "João", "cpf": "123.456.789-01" });

    cli.post("/api/clientes")
        .header("Authorization", bearer(&token))
        .body_json(&payload)
        .send()
        .await
        .assert_status(StatusCode::CREATED);

    let resp = cli
        .post("/api/clientes")
        .header("Authorization", bearer(&token))
        .body_json(&payload)
        .send()
        .await;

    resp.assert_status(StatusCode::CONFLICT);
    assert_eq!(body_json(resp).await["message"], "CPF já cadastrado");
}

#[tokio::test]
async fn test_invalid_cliente_is_400() {
    let app_data = setup_app_data(test_environment()).await;
    let token = admin_token(&app_data).await;
    let cli = test_client(app_data);

    let resp = cli
        .post("/api/clientes")
        .header("Authorization", bearer(&token))
        .body_json(&json!({ "nome": "João", "cpf": "123" }))
        .send()
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["message"], "CPF inválido");
}

#[tokio::test]
async fn test_cliente_sees_only_own_record() {
    let app_data = setup_app_data(test_environment()).await;
    let admin = admin_token(&app_data).await;
    let cli = test_client(app_data.clone());

    let mut ids = Vec::new();
    for cpf in ["11111111111", "22222222222"] {
        let resp = cli
            .post("/api/clientes")
            .header("Authorization", bearer(&admin))
            .body_json(&json!({ "nome": "Cliente", "cpf": cpf }))
            .send()
            .await;
        ids.push(body_json(resp).await["id"].as_str().unwrap().to_string());
    }
    let token = cliente_token(&app_data, &ids[0]);

    cli.get(format!("/api/clientes/{}", ids[0]))
        .header("Authorization", bearer(&token))
        .send()
        .await
        .assert_status_is_ok();

    cli.get(format!("/api/clientes/{}", ids[1]))
        .header("Authorization", bearer(&token))
        .send()
        .await
        .assert_status(StatusCode::FORBIDDEN);

    cli.get("/api/clientes")
        .header("Authorization", bearer(&token))
        .send()
        .await
        .assert_status(StatusCode::FORBIDDEN);

    cli.get(format!("/api/clientes/{}/documentos", ids[0]))
        .header("Authorization", bearer(&token))
        .send()
        .await
        .assert_status_is_ok();
}

#[tokio::test]
async fn test_status_change_and_unknown_status() {
    let app_data = setup_app_data(test_environment()).await;
    let admin = admin_token(&app_data).await;
    let cli = test_client(app_data);

    let resp = cli
        .post("/api/clientes")
        .header("Authorization", bearer(&admin))
        .body_json(&json!({ "nome": "Ana", "cpf": "33333333333" }))
        .send()
        .await;
    let id = body_json(resp).await["id"].as_str().unwrap().to_string();

    let resp = cli
        .patch(format!("/api/clientes/{}/status", id))
        .header("Authorization", bearer(&admin))
        .body_json(&json!({ "account_status": "locked" }))
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(body_json(resp).await["account_status"], "locked");

    cli.patch(format!("/api/clientes/{}/status", id))
        .header("Authorization", bearer(&admin))
        .body_json(&json!({ "account_status": "banido" }))
        .send()
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    cli.patch("/api/clientes/nao-existe/status")
        .header("Authorization", bearer(&admin))
        .body_json(&json!({ "account_status": "active" }))
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_documentos_lifecycle_and_cascade_delete() {
    let app_data = setup_app_data(test_environment()).await;
    let admin = admin_token(&app_data).await;
    let cli = test_client(app_data.clone());

    let resp = cli
        .post("/api/clientes")
        .header("Authorization", bearer(&admin))
        .body_json(&json!({ "nome": "Pedro", "cpf": "44444444444" }))
        .send()
        .await;
    let cliente_id = body_json(resp).await["id"].as_str().unwrap().to_string();

    let resp = cli
        .post(format!("/api/clientes/{}/documentos", cliente_id))
        .header("Authorization", bearer(&admin))
        .body_json(&json!({ "tipo_documento": "CRV", "numero_documento": "998877" }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    let documento = body_json(resp).await;
    assert_eq!(documento["status"], "pending");
    let documento_id = documento["id"].as_str().unwrap().to_string();

    let resp = cli
        .patch(format!("/api/documentos/{}", documento_id))
        .header("Authorization", bearer(&admin))
        .body_json(&json!({ "status": "completed", "observacoes": "Entregue ao cliente" }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let updated = body_json(resp).await;
    assert_eq!(updated["status"], "completed");
    assert_eq!(updated["observacoes"], "Entregue ao cliente");

    cli.patch(format!("/api/documentos/{}", documento_id))
        .header("Authorization", bearer(&admin))
        .body_json(&json!({}))
        .send()
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    cli.delete(format!("/api/clientes/{}", cliente_id))
        .header("Authorization", bearer(&admin))
        .send()
        .await
        .assert_status_is_ok();

    assert!(
        app_data
            .documento_store
            .list_by_cliente(&cliente_id)
            .await
            .unwrap()
            .is_empty()
    );

    cli.get(format!("/api/clientes/{}/documentos", cliente_id))
        .header("Authorization", bearer(&admin))
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let events = app_data.audit_store.recent_events(20).await.unwrap();
    for action in ["cliente_created", "documento_created", "documento_updated", "cliente_deleted"] {
        assert!(events.iter().any(|e| e.action == action), "missing {}", action);
    }
}

#[tokio::test]
async fn test_documento_for_unknown_cliente_is_404() {
    let app_data = setup_app_data(test_environment()).await;
    let admin = admin_token(&app_data).await;
    let cli = test_client(app_data);

    let resp = cli
        .post("/api/clientes/nao-existe/documentos")
        .header("Authorization", bearer(&admin))
        .body_json(&json!({ "tipo_documento": "CRV" }))
        .send()
        .await;

    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["message"], "Cliente não encontrado");
}
