use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clientes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub nome: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    /// Full CPF digits, or `*****` followed by the last five digits
    #[sea_orm(unique)]
    pub cpf: String,
    pub telefone: Option<String>,
    pub endereco: Option<String>,
    /// Upper-case plate without separators
    pub placa_veiculo: Option<String>,
    pub account_status: String,
    pub login_attempts: i32,
    pub last_login_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::documento::Entity")]
    Documento,
}

impl Related<super::documento::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documento.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
