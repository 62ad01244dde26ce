use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::fmt;
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::stores::cliente_store::is_unique_violation;
use crate::types::db::profile::{self, ActiveModel, Entity as Profile};

const TIPO_ADMIN: &str = "admin";

/// Outcome of an admin password check
#[derive(Debug)]
pub enum AdminVerification {
    Verified(profile::Model),
    /// No admin profile with that email
    UnknownProfile,
    WrongPassword,
}

/// Verifies admin email/password pairs
#[async_trait]
pub trait AdminCredentialStore: Send + Sync {
    async fn verify_admin(&self, email: &str, password: &str) -> Result<AdminVerification, InternalError>;
}

/// CredentialStore manages admin profiles and their password hashes
pub struct CredentialStore {
    db: DatabaseConnection,
    password_pepper: String,
}

impl CredentialStore {
    /// Create a new CredentialStore with the given database connection and password pepper
    ///
    /// # Arguments
    /// * `db` - The database connection
    /// * `password_pepper` - The secret key used for password hashing (from SecretManager)
    pub fn new(db: DatabaseConnection, password_pepper: String) -> Self {
        Self { db, password_pepper }
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.password_pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Hash a password with Argon2id, a random salt and the pepper as secret
    pub fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        self.argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| InternalError::crypto("password_hash", e.to_string()))
    }

    /// Register an admin profile
    ///
    /// # Errors
    /// `CredentialError::DuplicateProfile` when the email is already used
    pub async fn create_admin(
        &self,
        nome: &str,
        email: &str,
        telefone: Option<String>,
        password: &str,
    ) -> Result<profile::Model, InternalError> {
        let email = normalize_email(email);

        let existing = Profile::find()
            .filter(profile::Column::Email.eq(email.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_profile_by_email", e))?;
        if existing.is_some() {
            return Err(CredentialError::DuplicateProfile(email).into());
        }

        let password_hash = self.hash_password(password)?;
        let now = Utc::now().timestamp();

        let row = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(Uuid::new_v4().to_string()),
            nome: Set(nome.to_string()),
            email: Set(email.clone()),
            telefone: Set(telefone),
            tipo_usuario: Set(TIPO_ADMIN.to_string()),
            password_hash: Set(Some(password_hash)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        row.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                CredentialError::DuplicateProfile(email).into()
            } else {
                InternalError::database("create_admin_profile", e)
            }
        })
    }

    /// Admin profile by email (case-insensitive)
    pub async fn find_admin_by_email(&self, email: &str) -> Result<Option<profile::Model>, InternalError> {
        Profile::find()
            .filter(profile::Column::Email.eq(normalize_email(email)))
            .filter(profile::Column::TipoUsuario.eq(TIPO_ADMIN))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_admin_by_email", e))
    }
}

#[async_trait]
impl AdminCredentialStore for CredentialStore {
    async fn verify_admin(&self, email: &str, password: &str) -> Result<AdminVerification, InternalError> {
        let Some(profile) = self.find_admin_by_email(email).await? else {
            return Ok(AdminVerification::UnknownProfile);
        };

        // Profiles without a hash cannot log in
        let Some(stored_hash) = profile.password_hash.as_deref() else {
            return Ok(AdminVerification::WrongPassword);
        };

        let parsed_hash = PasswordHash::new(stored_hash)
            .map_err(|e| InternalError::parse("password_hash", e.to_string()))?;

        match self.argon2()?.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(AdminVerification::Verified(profile)),
            Err(_) => Ok(AdminVerification::WrongPassword),
        }
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
