use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, sea_query::Expr,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::RegistryError;
use crate::types::db::cliente::{self, ActiveModel, Entity as Cliente};

pub(crate) const MASKED_CPF_PREFIX: &str = "*****";
pub(crate) const MASKED_CPF_DIGITS: usize = 5;

/// Validated fields for a new client
#[derive(Debug, Clone)]
pub struct NewCliente {
    pub nome: String,
    pub email: Option<String>,
    pub cpf: String,
    pub telefone: Option<String>,
    pub endereco: Option<String>,
    pub placa_veiculo: Option<String>,
}

/// Repository for the clientes table
pub struct ClienteStore {
    db: DatabaseConnection,
}

impl ClienteStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a client with status `active`
    ///
    /// # Errors
    /// `RegistryError::Duplicate` when the email or CPF is already registered
    pub async fn create(&self, new: NewCliente) -> Result<cliente::Model, InternalError> {
        if let Some(email) = &new.email {
            let existing = Cliente::find()
                .filter(cliente::Column::Email.eq(email.as_str()))
                .one(&self.db)
                .await
                .map_err(|e| InternalError::database("find_cliente_by_email", e))?;
            if existing.is_some() {
                return Err(RegistryError::Duplicate("Email".to_string()).into());
            }
        }

        let existing = Cliente::find()
            .filter(cliente::Column::Cpf.eq(new.cpf.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_cliente_by_cpf", e))?;
        if existing.is_some() {
            return Err(RegistryError::Duplicate("CPF".to_string()).into());
        }

        let now = Utc::now().timestamp();
        let row = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            nome: Set(new.nome),
            email: Set(new.email),
            cpf: Set(new.cpf),
            telefone: Set(new.telefone),
            endereco: Set(new.endereco),
            placa_veiculo: Set(new.placa_veiculo),
            account_status: Set("active".to_string()),
            login_attempts: Set(0),
            last_login_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        row.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                RegistryError::Duplicate("Cliente".to_string()).into()
            } else {
                InternalError::database("create_cliente", e)
            }
        })
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<cliente::Model>, InternalError> {
        Cliente::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_cliente_by_id", e))
    }

    /// Like `find_by_id` but absence is an error
    pub async fn get(&self, id: &str) -> Result<cliente::Model, InternalError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RegistryError::ClienteNotFound(id.to_string()).into())
    }

    /// All clients, newest first
    pub async fn list_all(&self) -> Result<Vec<cliente::Model>, InternalError> {
        Cliente::find()
            .order_by_desc(cliente::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_clientes", e))
    }

    /// Find a client by normalised plate and CPF digits
    ///
    /// Matches a stored full CPF exactly, or a masked one (`*****` followed by
    /// the last five digits) by the trailing digits of the input.
    pub async fn find_by_placa_and_cpf(
        &self,
        placa: &str,
        cpf_digits: &str,
    ) -> Result<Option<cliente::Model>, InternalError> {
        let tail_start = cpf_digits.len().saturating_sub(MASKED_CPF_DIGITS);
        let masked = format!("{}{}", MASKED_CPF_PREFIX, &cpf_digits[tail_start..]);

        Cliente::find()
            .filter(cliente::Column::PlacaVeiculo.eq(placa))
            .filter(
                Condition::any()
                    .add(cliente::Column::Cpf.eq(cpf_digits))
                    .add(cliente::Column::Cpf.eq(masked)),
            )
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_cliente_by_placa_cpf", e))
    }

    /// Reset the failure counter and stamp the login time
    pub async fn record_login_success(&self, id: &str) -> Result<(), InternalError> {
        let now = Utc::now().timestamp();
        Cliente::update_many()
            .col_expr(cliente::Column::LoginAttempts, Expr::value(0))
            .col_expr(cliente::Column::LastLoginAt, Expr::value(now))
            .col_expr(cliente::Column::UpdatedAt, Expr::value(now))
            .filter(cliente::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("record_login_success", e))?;
        Ok(())
    }

    /// Atomically bump the failure counter
    pub async fn increment_login_attempts(&self, id: &str) -> Result<(), InternalError> {
        Cliente::update_many()
            .col_expr(
                cliente::Column::LoginAttempts,
                Expr::col(cliente::Column::LoginAttempts).add(1),
            )
            .filter(cliente::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("increment_login_attempts", e))?;
        Ok(())
    }

    pub async fn update_status(&self, id: &str, status: &str) -> Result<cliente::Model, InternalError> {
        let mut row: ActiveModel = self.get(id).await?.into();
        row.account_status = Set(status.to_string());
        row.updated_at = Set(Utc::now().timestamp());

        row.update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_cliente_status", e))
    }

    /// Delete a client; its documents go with it
    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        let result = Cliente::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_cliente", e))?;

        if result.rows_affected == 0 {
            return Err(RegistryError::ClienteNotFound(id.to_string()).into());
        }
        Ok(())
    }
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    let message = err.to_string().to_lowercase();
    message.contains("unique") || message.contains("duplicate")
}
