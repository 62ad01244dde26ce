use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::RegistryError;
use crate::types::db::documento::{self, ActiveModel, Entity as Documento};

/// Fields for a new document
#[derive(Debug, Clone)]
pub struct NewDocumento {
    pub tipo_documento: String,
    pub numero_documento: Option<String>,
    pub arquivo_path: Option<String>,
    pub observacoes: Option<String>,
}

/// Repository for the documentos table
pub struct DocumentoStore {
    db: DatabaseConnection,
}

impl DocumentoStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Documents of a client, newest first
    pub async fn list_by_cliente(&self, cliente_id: &str) -> Result<Vec<documento::Model>, InternalError> {
        Documento::find()
            .filter(documento::Column::ClienteId.eq(cliente_id))
            .order_by_desc(documento::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_documentos", e))
    }

    /// Insert a document with status `pending`
    ///
    /// The caller checks that the client exists.
    pub async fn create(&self, cliente_id: &str, new: NewDocumento) -> Result<documento::Model, InternalError> {
        let now = Utc::now().timestamp();
        let row = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            cliente_id: Set(cliente_id.to_string()),
            tipo_documento: Set(new.tipo_documento),
            numero_documento: Set(new.numero_documento),
            status: Set("pending".to_string()),
            arquivo_path: Set(new.arquivo_path),
            observacoes: Set(new.observacoes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        row.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_documento", e))
    }

    /// Change status and/or notes; `None` leaves a field untouched
    pub async fn update(
        &self,
        id: &str,
        status: Option<String>,
        observacoes: Option<String>,
    ) -> Result<documento::Model, InternalError> {
        let existing = Documento::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_documento", e))?
            .ok_or_else(|| RegistryError::DocumentoNotFound(id.to_string()))?;

        let mut row: ActiveModel = existing.into();
        if let Some(status) = status {
            row.status = Set(status);
        }
        if let Some(observacoes) = observacoes {
            row.observacoes = Set(Some(observacoes));
        }
        row.updated_at = Set(Utc::now().timestamp());

        row.update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_documento", e))
    }
}
