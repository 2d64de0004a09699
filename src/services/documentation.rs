use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI document for the Password Party backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::game_stream,
        crate::routes::categories::list_categories,
        crate::routes::game::get_game,
        crate::routes::game::init_game,
        crate::routes::game::start_round,
        crate::routes::game::mark_current_word,
        crate::routes::game::mark_word_at_index,
        crate::routes::game::next_team_turn,
        crate::routes::game::start_team_round,
        crate::routes::game::time_up,
        crate::routes::game::team_ranking,
        crate::routes::game::winning_teams,
        crate::routes::stats::get_stats,
        crate::routes::stats::clear_stats,
        crate::routes::settings::get_donation,
        crate::routes::settings::set_donation,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::sse::Handshake,
            crate::dto::categories::CategorySummary,
            crate::dto::game::InitGameRequest,
            crate::dto::game::TeamInput,
            crate::dto::game::MarkWordRequest,
            crate::dto::game::GameStateResponse,
            crate::dto::game::RoundView,
            crate::dto::game::TeamGameView,
            crate::dto::game::TeamSummary,
            crate::dto::game::GameModeDto,
            crate::dto::phase::VisibleGamePhase,
            crate::dto::settings::DonationSettings,
            crate::dao::models::GameStats,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events streams"),
        (name = "game", description = "Session, rounds and team turns"),
        (name = "stats", description = "Persisted statistics"),
        (name = "settings", description = "Player settings"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/healthcheck",
            "/sse/game",
            "/categories",
            "/game",
            "/game/init",
            "/game/words/{index}/mark",
            "/game/teams/time-up",
            "/game/teams/winners",
            "/stats",
            "/settings/donation",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
