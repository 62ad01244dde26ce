// DTOs - request and response bodies exposed through the OpenAPI surface
pub mod assistente;
pub mod auth;
pub mod clientes;
pub mod common;
pub mod consulta;
pub mod conteudo;
pub mod seguranca;
