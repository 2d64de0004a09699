use axum::{Json, Router, extract::State, routing::get};

use crate::{dao::models::GameStats, services::stats_service, state::SharedState};

/// Routes exposing the persisted statistics.
pub fn router() -> Router<SharedState> {
    Router::new().route("/stats", get(get_stats).delete(clear_stats))
}

/// Persisted statistics.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses((status = 200, description = "Statistics", body = GameStats))
)]
pub async fn get_stats(State(state): State<SharedState>) -> Json<GameStats> {
    Json(stats_service::game_stats(&state).await)
}

/// Forget statistics and the donation flag.
#[utoipa::path(
    delete,
    path = "/stats",
    tag = "stats",
    responses((status = 200, description = "Statistics after the reset", body = GameStats))
)]
pub async fn clear_stats(State(state): State<SharedState>) -> Json<GameStats> {
    Json(stats_service::clear_stats(&state).await)
}
