use sea_orm::entity::prelude::*;

/// SeaORM entity for api_rate_limits table
///
/// (ip_address, endpoint) is unique; the row holds the current window.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "api_rate_limits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ip_address: String,
    pub endpoint: String,
    pub request_count: i32,
    pub window_start: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
