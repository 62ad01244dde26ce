use serde::{Deserialize, Serialize};

/// Kind of account a token was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Cliente,
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cliente => "cliente",
            Self::Admin => "admin",
        }
    }
}

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (cliente id or profile id)
    pub sub: String,

    /// Account kind
    pub tipo: UserType,

    pub email: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID
    pub jti: String,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.tipo == UserType::Admin
    }
}
