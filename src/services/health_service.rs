use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Check the key-value backend and report `ok` or `degraded`.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.stats().health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthResponse::degraded()
        }
    }
}
