mod common;

use common::{body_json, setup_app_data, test_client, test_environment};

#[tokio::test]
async fn test_health_reports_database() {
    let app_data = setup_app_data(test_environment()).await;
    let cli = test_client(app_data);

    let resp = cli.get("/api/health").send().await;

    resp.assert_status_is_ok();
    let body = body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let app_data = setup_app_data(test_environment()).await;
    let spec = despachante_backend::api::api_service(app_data, "http://localhost:3000/api").spec();

    for path in ["/assistente", "/consulta-veiculo", "/auth/cliente", "/clientes/{id}/documentos"] {
        assert!(spec.contains(path), "missing {}", path);
    }
}

#[tokio::test]
async fn test_routes_served_with_runtime_server_url() {
    let app_data = setup_app_data(test_environment()).await;
    let server_url = format!("http://localhost:{}/api", app_data.settings.port);
    let app = despachante_backend::api::build_routes(app_data, &server_url);
    drop(server_url);

    let base_url = common::spawn_stub(app).await;
    let body: serde_json::Value = reqwest::get(format!("{}/api/health", base_url))
        .await
        .expect("health request failed")
        .json()
        .await
        .expect("health body is not JSON");

    assert_eq!(body["status"], "healthy");
}
