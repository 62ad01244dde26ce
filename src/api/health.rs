use std::sync::Arc;

use chrono::Utc;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::app_data::AppData;
use crate::types::dto::common::HealthResponse;

/// Liveness and database reachability
pub struct HealthApi {
    app_data: Arc<AppData>,
}

impl HealthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

#[derive(Tags)]
enum HealthTags {
    /// Service status
    Health,
}

#[OpenApi]
impl HealthApi {
    /// Service status
    ///
    /// `degraded` when the database does not answer a ping.
    #[oai(path = "/health", method = "get", tag = "HealthTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        let database_ok = match self.app_data.db.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Database ping failed: {}", e);
                false
            }
        };

        Json(HealthResponse {
            status: if database_ok { "healthy" } else { "degraded" }.to_string(),
            database: database_ok,
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}
