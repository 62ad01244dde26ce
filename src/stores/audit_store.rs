use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, ActiveValue::NotSet,
};

use crate::errors::InternalError;
use crate::errors::internal::AuditError;
use crate::types::db::{auth_attempt, security_audit_log};
use crate::types::internal::audit::{AuditEvent, AuthAttempt};

/// Repository for the append-only security tables
pub struct AuditStore {
    db: DatabaseConnection,
}

impl AuditStore {
    /// Create a new AuditStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Write an audit event to security_audit_logs
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if serialization or database insert fails
    pub async fn write_event(&self, event: AuditEvent) -> Result<(), InternalError> {
        let details = serde_json::to_string(&event.data)
            .map_err(|e| AuditError::LogWriteFailed(format!("Failed to serialize audit data: {}", e)))?;

        let row = security_audit_log::ActiveModel {
            id: NotSet,
            action: Set(event.event_type.to_string()),
            resource_type: Set(event.resource_type),
            resource_id: Set(event.resource_id),
            user_id: Set(event.user_id),
            ip_address: Set(event.ip_address),
            user_agent: Set(event.user_agent),
            details: Set(details),
            created_at: Set(Utc::now().timestamp()),
        };

        row.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("write_audit_event", e))?;

        Ok(())
    }

    /// Append one login attempt
    pub async fn record_auth_attempt(&self, attempt: AuthAttempt) -> Result<(), InternalError> {
        let row = auth_attempt::ActiveModel {
            id: NotSet,
            identifier: Set(attempt.identifier),
            email: Set(attempt.email),
            attempt_type: Set(attempt.attempt_type.as_str().to_string()),
            success: Set(attempt.success),
            ip_address: Set(attempt.ip_address),
            error_message: Set(attempt.error_message),
            created_at: Set(Utc::now().timestamp()),
        };

        row.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("record_auth_attempt", e))?;

        Ok(())
    }

    /// Most recent audit rows, newest first
    pub async fn recent_events(&self, limit: u64) -> Result<Vec<security_audit_log::Model>, InternalError> {
        security_audit_log::Entity::find()
            .order_by_desc(security_audit_log::Column::CreatedAt)
            .order_by_desc(security_audit_log::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("recent_audit_events", e))
    }

    /// Most recent login attempts, newest first
    pub async fn recent_auth_attempts(&self, limit: u64) -> Result<Vec<auth_attempt::Model>, InternalError> {
        auth_attempt::Entity::find()
            .order_by_desc(auth_attempt::Column::CreatedAt)
            .order_by_desc(auth_attempt::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("recent_auth_attempts", e))
    }

    pub async fn count_failed_auth_attempts_since(&self, since: i64) -> Result<u64, InternalError> {
        auth_attempt::Entity::find()
            .filter(auth_attempt::Column::Success.eq(false))
            .filter(auth_attempt::Column::CreatedAt.gte(since))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_failed_auth_attempts", e))
    }

    pub async fn count_events_since(&self, action: &str, since: i64) -> Result<u64, InternalError> {
        security_audit_log::Entity::find()
            .filter(security_audit_log::Column::Action.eq(action))
            .filter(security_audit_log::Column::CreatedAt.gte(since))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_audit_events", e))
    }
}
