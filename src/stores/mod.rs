// Stores layer - Data access and repository pattern
pub mod audit_store;
pub mod cliente_store;
pub mod credential_store;
pub mod documento_store;
pub mod rate_limit_store;

pub use audit_store::AuditStore;
pub use cliente_store::{ClienteStore, NewCliente};
pub use credential_store::{AdminCredentialStore, AdminVerification, CredentialStore};
pub use documento_store::{DocumentoStore, NewDocumento};
pub use rate_limit_store::RateLimitStore;
