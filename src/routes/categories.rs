use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::categories::CategorySummary, services::game_service, state::SharedState};

/// Category picker routes.
pub fn router() -> Router<SharedState> {
    Router::new().route("/categories", get(list_categories))
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "game",
    responses((status = 200, description = "Word categories", body = [CategorySummary]))
)]
/// List the word categories a session can be started with.
pub async fn list_categories(State(state): State<SharedState>) -> Json<Vec<CategorySummary>> {
    Json(game_service::categories(&state))
}
