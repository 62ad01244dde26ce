pub mod audit_builder;
pub mod audit_logger;

pub use audit_builder::{AuditBuilder, mask_ip, mask_plate};
pub use audit_logger::AuditLogger;
