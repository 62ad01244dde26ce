// API layer - HTTP endpoints
pub mod assistente;
pub mod auth;
pub mod clientes;
pub mod consulta;
pub mod conteudo;
pub mod health;
pub mod helpers;
pub mod seguranca;

use std::sync::Arc;

use poem::{
    EndpointExt, Route,
    middleware::{Cors, Tracing},
};
use poem_openapi::OpenApiService;

pub use assistente::AssistenteApi;
pub use auth::{AuthApi, BearerAuth};
pub use clientes::ClientesApi;
pub use consulta::ConsultaApi;
pub use conteudo::ConteudoApi;
pub use health::HealthApi;
pub use seguranca::SegurancaApi;

use crate::app_data::AppData;

/// OpenAPI service with every endpoint group
pub fn api_service(app_data: Arc<AppData>, server_url: &str) -> OpenApiService<impl poem_openapi::OpenApi + use<>, ()> {
    OpenApiService::new(
        (
            HealthApi::new(app_data.clone()),
            ConteudoApi,
            AssistenteApi::new(app_data.clone()),
            ConsultaApi::new(app_data.clone()),
            AuthApi::new(app_data.clone()),
            ClientesApi::new(app_data.clone()),
            SegurancaApi::new(app_data),
        ),
        "MC Despachante API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url)
}

/// `/api` endpoints plus Swagger UI under `/swagger`
pub fn build_routes(app_data: Arc<AppData>, server_url: &str) -> impl poem::Endpoint + use<> {
    let api_service = api_service(app_data, server_url);
    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .with(Cors::new())
        .with(Tracing)
}
