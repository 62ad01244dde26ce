use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait,
    ActiveValue::NotSet,
    sea_query::{Expr, OnConflict},
};

use crate::errors::InternalError;
use crate::types::db::api_rate_limit::{self, Entity as ApiRateLimit};

/// Fixed-window request counters per (ip, endpoint)
pub struct RateLimitStore {
    db: DatabaseConnection,
}

impl RateLimitStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Count one request and return the count for the current window
    ///
    /// A single upsert either starts the row, restarts an expired window at 1,
    /// or increments it, so concurrent requests never lose an update.
    pub async fn register_hit(
        &self,
        ip_address: &str,
        endpoint: &str,
        window_secs: i64,
    ) -> Result<i32, InternalError> {
        let now = Utc::now().timestamp();
        let cutoff = now - window_secs;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("rate_limit_begin", e))?;

        let row = api_rate_limit::ActiveModel {
            id: NotSet,
            ip_address: Set(ip_address.to_string()),
            endpoint: Set(endpoint.to_string()),
            request_count: Set(1),
            window_start: Set(now),
            created_at: Set(now),
        };

        ApiRateLimit::insert(row)
            .on_conflict(
                OnConflict::columns([
                    api_rate_limit::Column::IpAddress,
                    api_rate_limit::Column::Endpoint,
                ])
                .value(
                    api_rate_limit::Column::RequestCount,
                    Expr::cust_with_values(
                        "CASE WHEN api_rate_limits.window_start <= ? THEN 1 \
                         ELSE api_rate_limits.request_count + 1 END",
                        [cutoff],
                    ),
                )
                .value(
                    api_rate_limit::Column::WindowStart,
                    Expr::cust_with_values(
                        "CASE WHEN api_rate_limits.window_start <= ? THEN ? \
                         ELSE api_rate_limits.window_start END",
                        [cutoff, now],
                    ),
                )
                .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .map_err(|e| InternalError::database("rate_limit_upsert", e))?;

        let current = ApiRateLimit::find()
            .filter(api_rate_limit::Column::IpAddress.eq(ip_address))
            .filter(api_rate_limit::Column::Endpoint.eq(endpoint))
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("rate_limit_read", e))?
            .ok_or_else(|| InternalError::parse("api_rate_limits", "row missing after upsert"))?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("rate_limit_commit", e))?;

        Ok(current.request_count)
    }
}
