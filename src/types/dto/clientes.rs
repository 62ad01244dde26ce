use poem_openapi::Object;

use crate::types::db::{cliente, documento};
use crate::types::dto::common::format_timestamp;

/// Client as shown in the back office
#[derive(Object, Debug)]
pub struct ClienteResponse {
    pub id: String,
    pub nome: String,
    pub email: Option<String>,
    pub cpf: String,
    pub telefone: Option<String>,
    pub endereco: Option<String>,
    pub placa_veiculo: Option<String>,
    pub account_status: String,
    pub login_attempts: i32,
    pub last_login_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<cliente::Model> for ClienteResponse {
    fn from(model: cliente::Model) -> Self {
        Self {
            id: model.id,
            nome: model.nome,
            email: model.email,
            cpf: model.cpf,
            telefone: model.telefone,
            endereco: model.endereco,
            placa_veiculo: model.placa_veiculo,
            account_status: model.account_status,
            login_attempts: model.login_attempts,
            last_login_at: model.last_login_at.map(format_timestamp),
            created_at: format_timestamp(model.created_at),
            updated_at: format_timestamp(model.updated_at),
        }
    }
}

/// New client
#[derive(Object, Debug)]
pub struct CreateClienteRequest {
    pub nome: String,

    /// Full CPF or its last five digits
    pub cpf: String,

    pub email: Option<String>,
    pub telefone: Option<String>,
    pub endereco: Option<String>,
    pub placa_veiculo: Option<String>,
}

/// Account status change
#[derive(Object, Debug)]
pub struct UpdateClienteStatusRequest {
    /// `active`, `suspended`, `locked` or `pending`
    pub account_status: String,
}

/// Document as shown in the back office
#[derive(Object, Debug)]
pub struct DocumentoResponse {
    pub id: String,
    pub cliente_id: String,
    pub tipo_documento: String,
    pub numero_documento: Option<String>,
    pub status: String,
    pub arquivo_path: Option<String>,
    pub observacoes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<documento::Model> for DocumentoResponse {
    fn from(model: documento::Model) -> Self {
        Self {
            id: model.id,
            cliente_id: model.cliente_id,
            tipo_documento: model.tipo_documento,
            numero_documento: model.numero_documento,
            status: model.status,
            arquivo_path: model.arquivo_path,
            observacoes: model.observacoes,
            created_at: format_timestamp(model.created_at),
            updated_at: format_timestamp(model.updated_at),
        }
    }
}

/// New document for a client
#[derive(Object, Debug)]
pub struct CreateDocumentoRequest {
    pub tipo_documento: String,
    pub numero_documento: Option<String>,
    pub arquivo_path: Option<String>,
    pub observacoes: Option<String>,
}

/// Document status/notes update
#[derive(Object, Debug)]
pub struct UpdateDocumentoRequest {
    pub status: Option<String>,
    pub observacoes: Option<String>,
}

/// Plain acknowledgement
#[derive(Object, Debug)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}
