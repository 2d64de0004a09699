use axum::Router;

use crate::state::SharedState;

pub mod categories;
pub mod docs;
pub mod game;
pub mod health;
pub mod settings;
pub mod sse;
pub mod stats;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(sse::router())
        .merge(categories::router())
        .merge(game::router())
        .merge(stats::router())
        .merge(settings::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
