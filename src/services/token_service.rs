use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::types::internal::auth::{Claims, UserType};

/// Issues and validates HS256 session tokens
pub struct TokenService {
    jwt_secret: String,
    cliente_ttl: Duration,
    admin_ttl: Duration,
}

impl TokenService {
    /// Client sessions last 24 hours, admin sessions 8 hours
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            cliente_ttl: Duration::hours(24),
            admin_ttl: Duration::hours(8),
        }
    }

    pub fn lifetime(&self, tipo: UserType) -> Duration {
        match tipo {
            UserType::Cliente => self.cliente_ttl,
            UserType::Admin => self.admin_ttl,
        }
    }

    /// Generate a JWT for the given account
    ///
    /// # Returns
    /// The encoded token together with its claims
    pub fn generate_jwt(
        &self,
        sub: &str,
        tipo: UserType,
        email: Option<String>,
    ) -> Result<(String, Claims), InternalError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: sub.to_string(),
            tipo,
            email,
            iat: now,
            exp: now + self.lifetime(tipo).num_seconds(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_encode", e.to_string()))?;

        Ok((token, claims))
    }

    /// Validate a JWT and return the claims
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, InternalError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => CredentialError::ExpiredToken.into(),
            _ => CredentialError::InvalidToken(e.to_string()).into(),
        })
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("cliente_ttl_hours", &self.cliente_ttl.num_hours())
            .field("admin_ttl_hours", &self.admin_ttl.num_hours())
            .finish()
    }
}
