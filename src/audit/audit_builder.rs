use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::errors::InternalError;
use crate::stores::AuditStore;
use crate::types::internal::audit::{AuditEvent, EventType};
use crate::types::internal::context::RequestContext;

const MASKED_IP_PREFIX_LEN: usize = 10;

/// Keep the first characters of an IP address and mask the rest
pub fn mask_ip(ip: &str) -> String {
    let prefix: String = ip.chars().take(MASKED_IP_PREFIX_LEN).collect();
    format!("{}***", prefix)
}

/// Keep the letter block of a plate and mask the rest
pub fn mask_plate(placa: &str) -> String {
    let prefix: String = placa.chars().take(3).collect();
    format!("{}***", prefix)
}

/// Builder for security audit events
///
/// Provides a fluent API for constructing audit events with type-safe field addition
/// and automatic sensitive data redaction.
///
/// # Example
/// ```no_run
/// # use std::sync::Arc;
/// # use despachante_backend::audit::AuditBuilder;
/// # use despachante_backend::stores::AuditStore;
/// # use despachante_backend::types::internal::context::RequestContext;
/// # async fn example(audit_store: Arc<AuditStore>, ctx: &RequestContext) {
/// AuditBuilder::new(audit_store, "documento_exported")
///     .with_context(ctx)
///     .add_field("documento_id", "abc123")
///     .add_sensitive("cpf", "12345678901")
///     .write()
///     .await
///     .expect("Failed to write audit event");
/// # }
/// ```
pub struct AuditBuilder {
    event_type: EventType,
    resource_type: String,
    resource_id: Option<String>,
    user_id: Option<String>,
    ip_address: Option<String>,
    user_agent: Option<String>,
    data: HashMap<String, serde_json::Value>,
    store: Arc<AuditStore>,
}

impl AuditBuilder {
    /// Create a new AuditBuilder with the specified event type
    ///
    /// The resource type defaults to `api`.
    pub fn new(store: Arc<AuditStore>, event_type: impl Into<EventType>) -> Self {
        Self {
            event_type: event_type.into(),
            resource_type: "api".to_string(),
            resource_id: None,
            user_id: None,
            ip_address: None,
            user_agent: None,
            data: HashMap::new(),
            store,
        }
    }

    /// Populate caller fields from RequestContext
    ///
    /// - token subject -> `user_id`
    /// - `ip_address` -> `ip_address` (or "unknown")
    /// - `user_agent` -> `user_agent`
    /// - request_id and source -> `details`
    pub fn with_context(mut self, ctx: &RequestContext) -> Self {
        self.user_id = ctx.claims.as_ref().map(|claims| claims.sub.clone());
        self.ip_address = Some(ctx.client_ip());
        self.user_agent = ctx.user_agent.clone();

        self.data.insert("request_id".to_string(), json!(ctx.request_id));
        self.data.insert("source".to_string(), json!(ctx.source.as_str()));

        self
    }

    /// Store only a prefix of the caller IP
    pub fn mask_ip_address(mut self) -> Self {
        self.ip_address = self.ip_address.map(|ip| mask_ip(&ip));
        self
    }

    /// Set the resource this event is about
    pub fn resource(mut self, resource_type: impl Into<String>, resource_id: Option<String>) -> Self {
        self.resource_type = resource_type.into();
        self.resource_id = resource_id;
        self
    }

    /// Set the user ID for this audit event
    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }

    /// Add an arbitrary field to the audit event
    ///
    /// The value will be serialized to JSON and stored in the event's details.
    pub fn add_field(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.data.insert(key.into(), json_value);
        }
        self
    }

    /// Add a sensitive field to the audit event with SHA-256 hashing
    ///
    /// Same input always produces the same hash, so events can be correlated
    /// without storing the original value.
    pub fn add_sensitive(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(&value) {
            let value_str = json_value.to_string();

            let mut hasher = Sha256::new();
            hasher.update(value_str.as_bytes());
            let hash_hex = format!("sha256:{:x}", hasher.finalize());

            self.data.insert(key.into(), json!(hash_hex));
        }
        self
    }

    /// Build the audit event without writing to database
    pub fn build(self) -> AuditEvent {
        AuditEvent {
            event_type: self.event_type,
            resource_type: self.resource_type,
            resource_id: self.resource_id,
            user_id: self.user_id,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            data: self.data,
        }
    }

    /// Write the audit event to the database
    pub async fn write(self) -> Result<(), InternalError> {
        let store = self.store.clone();
        let event = self.build();
        store.write_event(event).await
    }
}
