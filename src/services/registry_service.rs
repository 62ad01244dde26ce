use std::sync::Arc;

use crate::audit::AuditLogger;
use crate::errors::InternalError;
use crate::errors::internal::RegistryError;
use crate::services::crypto::digits_only;
use crate::services::vehicle_lookup_service::{is_valid_placa, normalize_placa};
use crate::stores::cliente_store::{MASKED_CPF_DIGITS, MASKED_CPF_PREFIX};
use crate::stores::{ClienteStore, DocumentoStore, NewCliente, NewDocumento};
use crate::types::db::{cliente, documento};
use crate::types::internal::audit::EventType;
use crate::types::internal::context::RequestContext;

pub const ACCOUNT_STATUSES: [&str; 4] = ["active", "suspended", "locked", "pending"];

const CPF_DIGITS: usize = 11;

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Full CPF as 11 digits, or a masked one as `*****` plus the last five
fn normalize_cpf(cpf: &str) -> Result<String, RegistryError> {
    let cpf = cpf.trim();
    let (masked, tail) = match cpf.strip_prefix(MASKED_CPF_PREFIX) {
        Some(tail) => (true, tail),
        None => (false, cpf),
    };
    let digits = digits_only(tail);

    match digits.len() {
        MASKED_CPF_DIGITS => Ok(format!("{}{}", MASKED_CPF_PREFIX, digits)),
        CPF_DIGITS if !masked => Ok(digits),
        _ => Err(RegistryError::Validation("CPF inválido".to_string())),
    }
}

/// Validate and normalise a new client
fn validate_cliente(new: NewCliente) -> Result<NewCliente, RegistryError> {
    let nome = new.nome.trim().to_string();
    if nome.is_empty() || new.cpf.trim().is_empty() {
        return Err(RegistryError::Validation(
            "Nome e CPF são obrigatórios".to_string(),
        ));
    }

    let cpf = normalize_cpf(&new.cpf)?;

    let placa_veiculo = match non_blank(new.placa_veiculo) {
        Some(placa) => {
            let placa = normalize_placa(&placa);
            if !is_valid_placa(&placa) {
                return Err(RegistryError::Validation(
                    "Formato de placa inválido. Use o formato ABC1234 ou ABC1D23".to_string(),
                ));
            }
            Some(placa)
        }
        None => None,
    };

    Ok(NewCliente {
        nome,
        email: non_blank(new.email).map(|email| email.to_lowercase()),
        cpf,
        telefone: non_blank(new.telefone),
        endereco: non_blank(new.endereco),
        placa_veiculo,
    })
}

/// Back-office operations over clients and their documents
///
/// Every method checks the caller's role from the request context first.
pub struct RegistryService {
    cliente_store: Arc<ClienteStore>,
    documento_store: Arc<DocumentoStore>,
    audit_logger: Arc<AuditLogger>,
}

impl RegistryService {
    pub fn new(
        cliente_store: Arc<ClienteStore>,
        documento_store: Arc<DocumentoStore>,
        audit_logger: Arc<AuditLogger>,
    ) -> Self {
        Self {
            cliente_store,
            documento_store,
            audit_logger,
        }
    }

    pub async fn list_clientes(&self, ctx: &RequestContext) -> Result<Vec<cliente::Model>, InternalError> {
        ctx.require_admin()?;
        self.cliente_store.list_all().await
    }

    pub async fn create_cliente(
        &self,
        ctx: &RequestContext,
        new: NewCliente,
    ) -> Result<cliente::Model, InternalError> {
        ctx.require_admin()?;
        let new = validate_cliente(new)?;

        let cliente = self.cliente_store.create(new).await?;
        tracing::info!(cliente_id = %cliente.id, "Cliente created");

        self.audit_logger
            .builder(EventType::ClienteCreated)
            .with_context(ctx)
            .resource("cliente", Some(cliente.id.clone()))
            .add_sensitive("cpf", &cliente.cpf)
            .write()
            .await?;

        Ok(cliente)
    }

    pub async fn get_cliente(&self, ctx: &RequestContext, id: &str) -> Result<cliente::Model, InternalError> {
        ctx.require_admin_or_owner(id)?;
        self.cliente_store.get(id).await
    }

    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        id: &str,
        status: &str,
    ) -> Result<cliente::Model, InternalError> {
        ctx.require_admin()?;

        let status = status.trim();
        if !ACCOUNT_STATUSES.contains(&status) {
            return Err(RegistryError::Validation(format!(
                "Status inválido. Use um de: {}",
                ACCOUNT_STATUSES.join(", ")
            ))
            .into());
        }

        let cliente = self.cliente_store.update_status(id, status).await?;

        self.audit_logger
            .builder(EventType::ClienteStatusChanged)
            .with_context(ctx)
            .resource("cliente", Some(cliente.id.clone()))
            .add_field("account_status", status)
            .write()
            .await?;

        Ok(cliente)
    }

    /// Remove a client and, through the foreign key, its documents
    pub async fn delete_cliente(&self, ctx: &RequestContext, id: &str) -> Result<(), InternalError> {
        ctx.require_admin()?;
        self.cliente_store.delete(id).await?;
        tracing::info!(cliente_id = %id, "Cliente deleted");

        self.audit_logger
            .builder(EventType::ClienteDeleted)
            .with_context(ctx)
            .resource("cliente", Some(id.to_string()))
            .write()
            .await
    }

    pub async fn list_documentos(
        &self,
        ctx: &RequestContext,
        cliente_id: &str,
    ) -> Result<Vec<documento::Model>, InternalError> {
        ctx.require_admin_or_owner(cliente_id)?;
        self.cliente_store.get(cliente_id).await?;
        self.documento_store.list_by_cliente(cliente_id).await
    }

    pub async fn create_documento(
        &self,
        ctx: &RequestContext,
        cliente_id: &str,
        new: NewDocumento,
    ) -> Result<documento::Model, InternalError> {
        ctx.require_admin()?;

        let tipo_documento = new.tipo_documento.trim().to_string();
        if tipo_documento.is_empty() {
            return Err(RegistryError::Validation(
                "Tipo de documento é obrigatório".to_string(),
            )
            .into());
        }
        self.cliente_store.get(cliente_id).await?;

        let documento = self
            .documento_store
            .create(
                cliente_id,
                NewDocumento {
                    tipo_documento,
                    numero_documento: non_blank(new.numero_documento),
                    arquivo_path: non_blank(new.arquivo_path),
                    observacoes: non_blank(new.observacoes),
                },
            )
            .await?;

        self.audit_logger
            .builder(EventType::DocumentoCreated)
            .with_context(ctx)
            .resource("documento", Some(documento.id.clone()))
            .add_field("cliente_id", cliente_id)
            .add_field("tipo_documento", &documento.tipo_documento)
            .write()
            .await?;

        Ok(documento)
    }

    pub async fn update_documento(
        &self,
        ctx: &RequestContext,
        id: &str,
        status: Option<String>,
        observacoes: Option<String>,
    ) -> Result<documento::Model, InternalError> {
        ctx.require_admin()?;

        let status = non_blank(status);
        if status.is_none() && observacoes.is_none() {
            return Err(RegistryError::Validation(
                "Informe status ou observacoes".to_string(),
            )
            .into());
        }

        let documento = self.documento_store.update(id, status, observacoes).await?;

        self.audit_logger
            .builder(EventType::DocumentoUpdated)
            .with_context(ctx)
            .resource("documento", Some(documento.id.clone()))
            .add_field("status", &documento.status)
            .write()
            .await?;

        Ok(documento)
    }
}
