use std::sync::Arc;

use poem::Request;
use poem_openapi::{ApiResponse, OpenApi, Tags, param::Path, payload::Json};

use crate::api::auth::BearerAuth;
use crate::api::helpers::authenticated_context;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::stores::{NewCliente, NewDocumento};
use crate::types::dto::clientes::{
    ClienteResponse, CreateClienteRequest, CreateDocumentoRequest, DocumentoResponse,
    MessageResponse, UpdateClienteStatusRequest, UpdateDocumentoRequest,
};

/// Back-office client and document endpoints
pub struct ClientesApi {
    app_data: Arc<AppData>,
}

impl ClientesApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

#[derive(Tags)]
enum ClientesTags {
    /// Clients
    Clientes,
    /// Client documents
    Documentos,
}

/// Client registered
#[derive(ApiResponse)]
pub enum CreatedCliente {
    #[oai(status = 201)]
    Created(Json<ClienteResponse>),
}

/// Document registered
#[derive(ApiResponse)]
pub enum CreatedDocumento {
    #[oai(status = 201)]
    Created(Json<DocumentoResponse>),
}

#[OpenApi]
impl ClientesApi {
    /// All clients, newest first (admin)
    #[oai(path = "/clientes", method = "get", tag = "ClientesTags::Clientes")]
    async fn list_clientes(
        &self,
        req: &Request,
        auth: BearerAuth,
    ) -> Result<Json<Vec<ClienteResponse>>, ApiError> {
        let ctx = authenticated_context(&self.app_data, req, &auth)?;
        let clientes = self.app_data.registry_service.list_clientes(&ctx).await?;

        Ok(Json(clientes.into_iter().map(ClienteResponse::from).collect()))
    }

    /// Register a client (admin)
    #[oai(path = "/clientes", method = "post", tag = "ClientesTags::Clientes")]
    async fn create_cliente(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<CreateClienteRequest>,
    ) -> Result<CreatedCliente, ApiError> {
        let ctx = authenticated_context(&self.app_data, req, &auth)?;
        let body = body.0;

        let cliente = self
            .app_data
            .registry_service
            .create_cliente(
                &ctx,
                NewCliente {
                    nome: body.nome,
                    email: body.email,
                    cpf: body.cpf,
                    telefone: body.telefone,
                    endereco: body.endereco,
                    placa_veiculo: body.placa_veiculo,
                },
            )
            .await?;

        Ok(CreatedCliente::Created(Json(cliente.into())))
    }

    /// One client (admin or the client themselves)
    #[oai(path = "/clientes/:id", method = "get", tag = "ClientesTags::Clientes")]
    async fn get_cliente(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<ClienteResponse>, ApiError> {
        let ctx = authenticated_context(&self.app_data, req, &auth)?;
        let cliente = self.app_data.registry_service.get_cliente(&ctx, &id.0).await?;

        Ok(Json(cliente.into()))
    }

    /// Change a client's account status (admin)
    #[oai(path = "/clientes/:id/status", method = "patch", tag = "ClientesTags::Clientes")]
    async fn update_status(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateClienteStatusRequest>,
    ) -> Result<Json<ClienteResponse>, ApiError> {
        let ctx = authenticated_context(&self.app_data, req, &auth)?;
        let cliente = self
            .app_data
            .registry_service
            .update_status(&ctx, &id.0, &body.account_status)
            .await?;

        Ok(Json(cliente.into()))
    }

    /// Delete a client and their documents (admin)
    #[oai(path = "/clientes/:id", method = "delete", tag = "ClientesTags::Clientes")]
    async fn delete_cliente(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = authenticated_context(&self.app_data, req, &auth)?;
        self.app_data.registry_service.delete_cliente(&ctx, &id.0).await?;

        Ok(Json(MessageResponse {
            success: true,
            message: "Cliente removido".to_string(),
        }))
    }

    /// Documents of a client (admin or the client themselves)
    #[oai(path = "/clientes/:id/documentos", method = "get", tag = "ClientesTags::Documentos")]
    async fn list_documentos(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<Vec<DocumentoResponse>>, ApiError> {
        let ctx = authenticated_context(&self.app_data, req, &auth)?;
        let documentos = self
            .app_data
            .registry_service
            .list_documentos(&ctx, &id.0)
            .await?;

        Ok(Json(documentos.into_iter().map(DocumentoResponse::from).collect()))
    }

    /// Register a document for a client (admin)
    #[oai(path = "/clientes/:id/documentos", method = "post", tag = "ClientesTags::Documentos")]
    async fn create_documento(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<CreateDocumentoRequest>,
    ) -> Result<CreatedDocumento, ApiError> {
        let ctx = authenticated_context(&self.app_data, req, &auth)?;
        let body = body.0;

        let documento = self
            .app_data
            .registry_service
            .create_documento(
                &ctx,
                &id.0,
                NewDocumento {
                    tipo_documento: body.tipo_documento,
                    numero_documento: body.numero_documento,
                    arquivo_path: body.arquivo_path,
                    observacoes: body.observacoes,
                },
            )
            .await?;

        Ok(CreatedDocumento::Created(Json(documento.into())))
    }

    /// Update a document's status or notes (admin)
    #[oai(path = "/documentos/:id", method = "patch", tag = "ClientesTags::Documentos")]
    async fn update_documento(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateDocumentoRequest>,
    ) -> Result<Json<DocumentoResponse>, ApiError> {
        let ctx = authenticated_context(&self.app_data, req, &auth)?;
        let body = body.0;

        let documento = self
            .app_data
            .registry_service
            .update_documento(&ctx, &id.0, body.status, body.observacoes)
            .await?;

        Ok(Json(documento.into()))
    }
}
