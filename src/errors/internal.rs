use thiserror::Error;

/// Internal error type for store and service operations
///
/// Separates infrastructure errors (Database, Transaction, Parse, Crypto)
/// shared by every store from the domain errors of each area.
///
/// This error type is NOT exposed via API. Endpoints convert it with
/// `ApiError::from_internal_error`.
#[derive(Error, Debug)]
pub enum InternalError {
    // ============================================================
    // Infrastructure Errors (shared by all stores)
    // ============================================================

    /// Database query or operation failed
    #[error("Database error: {operation} failed: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Database transaction failed
    #[error("Transaction error: {operation} failed: {source}")]
    Transaction {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Failed to parse a value (UUID, timestamp, JSON, etc.)
    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    /// Cryptographic operation failed (hashing, signing, etc.)
    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    // ============================================================
    // Domain-Specific Errors
    // ============================================================

    /// Client and admin authentication
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// Vehicle record lookups
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Clients and documents
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// FAQ assistant
    #[error(transparent)]
    Assistant(#[from] AssistantError),

    /// Audit logging failures
    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl InternalError {
    /// Create a database error with context
    pub fn database(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Database {
            operation: operation.into(),
            source,
        }
    }

    /// Create a transaction error with context
    pub fn transaction(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Transaction {
            operation: operation.into(),
            source,
        }
    }

    /// Create a parse error with context
    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    /// Create a crypto error with context
    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Authentication errors
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Required login fields were not sent
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Unknown account, blocked account or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Invalid or malformed JWT
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// JWT has expired
    #[error("Expired token")]
    ExpiredToken,

    /// Valid token without the required role or ownership
    #[error("Insufficient permissions: {0}")]
    Forbidden(String),

    /// Admin profile already registered
    #[error("Profile already exists: {0}")]
    DuplicateProfile(String),
}

/// Vehicle lookup errors
#[derive(Error, Debug)]
pub enum LookupError {
    /// Required request field missing; the message is caller-facing
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Plate does not match the Brazilian format
    #[error("Invalid plate format")]
    InvalidPlate,

    /// Lookup kind outside the supported set
    #[error("Invalid lookup kind: {0}")]
    InvalidKind(String),

    /// Vendor access key is not configured
    #[error("Vendor access key not configured")]
    AccessKeyMissing,

    /// Vendor answered with a non-success status
    #[error("Vendor returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Vendor did not answer within the timeout
    #[error("Vendor request timed out after {0}s")]
    Timeout(u64),

    /// Network failure talking to the vendor
    #[error("Vendor transport error: {0}")]
    Transport(String),

    /// Vendor answered 2xx with an unreadable body
    #[error("Invalid vendor response: {0}")]
    InvalidResponse(String),
}

/// Client and document errors
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Invalid input; the message is caller-facing
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Unique field already taken
    #[error("Duplicate {0}")]
    Duplicate(String),

    #[error("Client not found: {0}")]
    ClienteNotFound(String),

    #[error("Document not found: {0}")]
    DocumentoNotFound(String),
}

/// FAQ assistant errors
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Question is empty or whitespace only
    #[error("Question is required")]
    EmptyQuestion,

    /// Answer provider failed; callers fall back to the static answer
    #[error("Answer provider {provider} failed: {message}")]
    Provider { provider: String, message: String },
}

/// Audit store specific errors
#[derive(Error, Debug)]
pub enum AuditError {
    /// Failed to write audit log entry
    #[error("Failed to write audit log: {0}")]
    LogWriteFailed(String),
}
