use sea_orm::entity::prelude::*;

/// SeaORM entity for auth_attempts table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "auth_attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub identifier: String,
    pub email: Option<String>,
    pub attempt_type: String,
    pub success: bool,
    pub ip_address: Option<String>,
    pub error_message: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
