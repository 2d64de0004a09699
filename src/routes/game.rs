use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use axum_valid::Valid;

use crate::{
    dto::game::{GameStateResponse, InitGameRequest, MarkWordRequest, TeamSummary},
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes driving the session: setup, rounds, marking and team turns.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/game", get(get_game))
        .route("/game/init", post(init_game))
        .route("/game/round", post(start_round))
        .route("/game/words/mark", post(mark_current_word))
        .route("/game/words/{index}/mark", post(mark_word_at_index))
        .route("/game/teams/next", post(next_team_turn))
        .route("/game/teams/round", post(start_team_round))
        .route("/game/teams/time-up", post(time_up))
        .route("/game/teams/ranking", get(team_ranking))
        .route("/game/teams/winners", get(winning_teams))
}

/// Current game state.
#[utoipa::path(
    get,
    path = "/game",
    tag = "game",
    responses(
        (status = 200, description = "Current game state", body = GameStateResponse)
    )
)]
pub async fn get_game(State(state): State<SharedState>) -> Json<GameStateResponse> {
    Json(game_service::current_game(&state).await)
}

/// Start a session. Two or more teams start a team game waiting for its first turn.
#[utoipa::path(
    post,
    path = "/game/init",
    tag = "game",
    request_body = InitGameRequest,
    responses(
        (status = 200, description = "Game initialized", body = GameStateResponse),
        (status = 400, description = "Invalid setup")
    )
)]
pub async fn init_game(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<InitGameRequest>>,
) -> Result<Json<GameStateResponse>, AppError> {
    let response = game_service::init_game(&state, payload).await?;
    Ok(Json(response))
}

/// Draw a new single-mode round. Ignored during a team game.
#[utoipa::path(
    post,
    path = "/game/round",
    tag = "game",
    responses(
        (status = 200, description = "Game state after the request", body = GameStateResponse)
    )
)]
pub async fn start_round(State(state): State<SharedState>) -> Json<GameStateResponse> {
    Json(game_service::start_round(&state).await)
}

/// Mark the word under the cursor and advance.
#[utoipa::path(
    post,
    path = "/game/words/mark",
    tag = "game",
    request_body = MarkWordRequest,
    responses(
        (status = 200, description = "Game state after the mark", body = GameStateResponse)
    )
)]
pub async fn mark_current_word(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<MarkWordRequest>>,
) -> Json<GameStateResponse> {
    Json(game_service::mark_current_word(&state, payload.correct).await)
}

/// Mark the word at `index` without moving the cursor.
#[utoipa::path(
    post,
    path = "/game/words/{index}/mark",
    tag = "game",
    params(("index" = usize, Path, description = "Position of the word in the round (0 to 4)")),
    request_body = MarkWordRequest,
    responses(
        (status = 200, description = "Game state after the mark", body = GameStateResponse)
    )
)]
pub async fn mark_word_at_index(
    State(state): State<SharedState>,
    Path(index): Path<usize>,
    Valid(Json(payload)): Valid<Json<MarkWordRequest>>,
) -> Json<GameStateResponse> {
    Json(game_service::mark_word_at_index(&state, index, payload.correct).await)
}

/// Hand the turn to the next team once a round is completed.
#[utoipa::path(
    post,
    path = "/game/teams/next",
    tag = "game",
    responses(
        (status = 200, description = "Game state after the request", body = GameStateResponse)
    )
)]
pub async fn next_team_turn(State(state): State<SharedState>) -> Json<GameStateResponse> {
    Json(game_service::next_team_turn(&state).await)
}

/// Start the round of the team whose turn it is.
#[utoipa::path(
    post,
    path = "/game/teams/round",
    tag = "game",
    responses(
        (status = 200, description = "Game state after the request", body = GameStateResponse)
    )
)]
pub async fn start_team_round(State(state): State<SharedState>) -> Json<GameStateResponse> {
    Json(game_service::start_team_round(&state).await)
}

/// Cut the playing team's turn short when its clock runs out.
#[utoipa::path(
    post,
    path = "/game/teams/time-up",
    tag = "game",
    responses(
        (status = 200, description = "Game state after the request", body = GameStateResponse)
    )
)]
pub async fn time_up(State(state): State<SharedState>) -> Json<GameStateResponse> {
    Json(game_service::time_up(&state).await)
}

/// Teams by descending score.
#[utoipa::path(
    get,
    path = "/game/teams/ranking",
    tag = "game",
    responses(
        (status = 200, description = "Ranking", body = [TeamSummary]),
        (status = 409, description = "No team game in progress")
    )
)]
pub async fn team_ranking(
    State(state): State<SharedState>,
) -> Result<Json<Vec<TeamSummary>>, AppError> {
    Ok(Json(game_service::team_ranking(&state).await?))
}

/// Teams sharing the best score.
#[utoipa::path(
    get,
    path = "/game/teams/winners",
    tag = "game",
    responses(
        (status = 200, description = "Winners", body = [TeamSummary]),
        (status = 409, description = "No team game in progress")
    )
)]
pub async fn winning_teams(
    State(state): State<SharedState>,
) -> Result<Json<Vec<TeamSummary>>, AppError> {
    Ok(Json(game_service::winning_teams(&state).await?))
}
