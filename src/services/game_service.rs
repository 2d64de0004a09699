use tracing::info;

use crate::{
    dto::{
        categories::CategorySummary,
        game::{GameStateResponse, InitGameRequest, TeamInput, TeamSummary},
    },
    error::ServiceError,
    state::{
        SharedState,
        orchestrator::GameMode,
        team_game::{MAX_TEAMS, MIN_TEAMS, Team},
    },
};

/// Categories offered by the category picker.
pub fn categories(state: &SharedState) -> Vec<CategorySummary> {
    state
        .rounds()
        .available_categories()
        .into_iter()
        .map(Into::into)
        .collect()
}

/// Current game state.
pub async fn current_game(state: &SharedState) -> GameStateResponse {
    state.game().lock().await.snapshot().into()
}

/// Start a new session; two or more teams switch to team mode.
pub async fn init_game(
    state: &SharedState,
    request: InitGameRequest,
) -> Result<GameStateResponse, ServiceError> {
    let InitGameRequest {
        category,
        teams,
        number_of_rounds,
    } = request;

    let teams = build_teams(state, teams)?;
    let rounds = number_of_rounds.unwrap_or(state.config().default_team_rounds());
    let category = category.filter(|name| !name.trim().is_empty());

    info!(
        category = ?category,
        teams = teams.len(),
        rounds,
        "initializing game"
    );

    let mut game = state.game().lock().await;
    game.initialize(category.as_deref(), teams, Some(rounds)).await;
    Ok(game.snapshot().into())
}

/// Draw a new single-mode round.
pub async fn start_round(state: &SharedState) -> GameStateResponse {
    let mut game = state.game().lock().await;
    game.start_new_round();
    game.snapshot().into()
}

/// Mark the word under the cursor.
pub async fn mark_current_word(state: &SharedState, correct: bool) -> GameStateResponse {
    let mut game = state.game().lock().await;
    game.mark_current_word(correct).await;
    game.snapshot().into()
}

/// Mark the word at `index`.
pub async fn mark_word_at_index(
    state: &SharedState,
    index: usize,
    correct: bool,
) -> GameStateResponse {
    let mut game = state.game().lock().await;
    game.mark_word_at_index(index, correct).await;
    game.snapshot().into()
}

/// Hand the turn to the next team.
pub async fn next_team_turn(state: &SharedState) -> GameStateResponse {
    let mut game = state.game().lock().await;
    game.next_team_turn();
    game.snapshot().into()
}

/// Start the round of the team whose turn it is.
pub async fn start_team_round(state: &SharedState) -> GameStateResponse {
    let mut game = state.game().lock().await;
    game.start_team_round();
    game.snapshot().into()
}

/// End the playing team's turn early, keeping its partial score.
pub async fn time_up(state: &SharedState) -> GameStateResponse {
    let mut game = state.game().lock().await;
    game.time_up();
    game.snapshot().into()
}

/// Teams by descending score.
pub async fn team_ranking(state: &SharedState) -> Result<Vec<TeamSummary>, ServiceError> {
    let game = state.game().lock().await;
    ensure_team_mode(game.snapshot().mode)?;
    Ok(game.team_ranking().into_iter().map(Into::into).collect())
}

/// Teams sharing the best score.
pub async fn winning_teams(state: &SharedState) -> Result<Vec<TeamSummary>, ServiceError> {
    let game = state.game().lock().await;
    ensure_team_mode(game.snapshot().mode)?;
    Ok(game.winning_teams().into_iter().map(Into::into).collect())
}

fn ensure_team_mode(mode: GameMode) -> Result<(), ServiceError> {
    match mode {
        GameMode::Teams => Ok(()),
        GameMode::Single => Err(ServiceError::InvalidState(
            "no team game in progress".into(),
        )),
    }
}

/// Assign ids in setup order and fill missing colors from the palette.
fn build_teams(state: &SharedState, inputs: Vec<TeamInput>) -> Result<Vec<Team>, ServiceError> {
    if inputs.is_empty() {
        return Ok(Vec::new());
    }
    if inputs.len() < MIN_TEAMS {
        return Err(ServiceError::InvalidInput(format!(
            "a team game needs at least {MIN_TEAMS} teams (got {})",
            inputs.len()
        )));
    }
    if inputs.len() > MAX_TEAMS {
        return Err(ServiceError::InvalidInput(format!(
            "a team game accepts at most {MAX_TEAMS} teams (got {})",
            inputs.len()
        )));
    }

    let mut used: Vec<String> = inputs
        .iter()
        .filter_map(|team| team.color.clone())
        .collect();

    let mut teams = Vec::with_capacity(inputs.len());
    for (id, input) in (1u32..).zip(inputs) {
        let color = match input.color {
            Some(color) => color,
            None => {
                let color = state.config().first_unused_color(&used);
                used.push(color.clone());
                color
            }
        };
        teams.push(Team::new(id, input.name.trim(), color));
    }

    Ok(teams)
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::{
        config::AppConfig, dao::kv_store::MemoryStore, dto::phase::VisibleGamePhase,
        state::AppState,
    };

    fn test_state() -> SharedState {
        let config = AppConfig::default().with_interstitial_delay(Duration::ZERO);
        AppState::new(config, Arc::new(MemoryStore::new()))
    }

    fn team(name: &str, color: Option<&str>) -> TeamInput {
        TeamInput {
            name: name.into(),
            color: color.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn single_game_starts_playing() {
        let state = test_state();
        let response = init_game(&state, InitGameRequest::default()).await.unwrap();

        assert_eq!(response.phase, VisibleGamePhase::Playing);
        assert_eq!(response.round.unwrap().words.len(), 5);
        assert!(response.teams.is_none());
    }

    #[tokio::test]
    async fn teams_get_ids_and_palette_colors() {
        let state = test_state();
        let request = InitGameRequest {
            category: Some("sports".into()),
            teams: vec![
                team(" Rojos ", None),
                team("Azules", Some("#E74C3C")),
                team("Verdes", None),
            ],
            number_of_rounds: Some(2),
        };

        let response = init_game(&state, request).await.unwrap();
        assert_eq!(response.phase, VisibleGamePhase::TeamTransition);
        assert_eq!(response.category_display_name, "Deportes");

        let teams = response.teams.unwrap();
        assert_eq!(teams.max_rounds, 2);
        let summary: Vec<(u32, &str, &str)> = teams
            .teams
            .iter()
            .map(|team| (team.id, team.name.as_str(), team.color.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, "Rojos", "#3498DB"),
                (2, "Azules", "#E74C3C"),
                (3, "Verdes", "#27AE60"),
            ]
        );
    }

    #[tokio::test]
    async fn single_team_is_rejected() {
        let state = test_state();
        let request = InitGameRequest {
            teams: vec![team("Solo", None)],
            ..Default::default()
        };

        assert!(matches!(
            init_game(&state, request).await,
            Err(ServiceError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn seventh_team_is_rejected() {
        let state = test_state();
        let request = InitGameRequest {
            teams: (1..=7).map(|n| team(&format!("T{n}"), None)).collect(),
            ..Default::default()
        };

        assert!(matches!(
            init_game(&state, request).await,
            Err(ServiceError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn team_round_trip_through_the_service() {
        let state = test_state();
        let request = InitGameRequest {
            teams: vec![team("A", None), team("B", None)],
            number_of_rounds: Some(1),
            ..Default::default()
        };
        init_game(&state, request).await.unwrap();

        for _ in 0..2 {
            let response = start_team_round(&state).await;
            assert_eq!(response.phase, VisibleGamePhase::Playing);
            for index in 0..5 {
                mark_word_at_index(&state, index, index % 2 == 0).await;
            }
            next_team_turn(&state).await;
        }

        let response = current_game(&state).await;
        assert_eq!(response.phase, VisibleGamePhase::TeamGameFinished);
        assert_eq!(winning_teams(&state).await.unwrap().len(), 2);
        assert_eq!(team_ranking(&state).await.unwrap()[0].score, 3);
    }

    #[tokio::test]
    async fn team_queries_need_a_team_game() {
        let state = test_state();
        init_game(&state, InitGameRequest::default()).await.unwrap();

        assert!(matches!(
            team_ranking(&state).await,
            Err(ServiceError::InvalidState(_))
        ));
        assert!(winning_teams(&state).await.is_err());
    }

    #[tokio::test]
    async fn marking_and_new_rounds() {
        let state = test_state();
        init_game(&state, InitGameRequest::default()).await.unwrap();

        let mut response = mark_current_word(&state, true).await;
        assert_eq!(response.round.as_ref().unwrap().current_index, 1);
        for _ in 0..4 {
            response = mark_current_word(&state, false).await;
        }
        assert_eq!(response.phase, VisibleGamePhase::RoundCompleted);
        assert_eq!(response.round.unwrap().score, 1);
        assert_eq!(response.total_rounds, 1);

        let response = start_round(&state).await;
        assert_eq!(response.phase, VisibleGamePhase::Playing);
        assert_eq!(response.round.unwrap().current_index, 0);
    }

    #[tokio::test]
    async fn lists_builtin_categories() {
        let state = test_state();
        let categories = categories(&state);

        assert_eq!(categories.len(), 7);
        assert!(categories.iter().all(|category| category.word_count >= 5));
    }

    #[tokio::test]
    async fn categories_do_not_wait_for_the_game_lock() {
        let state = test_state();
        let _game = state.game().lock().await;

        assert_eq!(categories(&state).len(), 7);
    }

    #[tokio::test]
    async fn time_up_passes_the_turn() {
        let state = test_state();
        let request = InitGameRequest {
            teams: vec![team("A", None), team("B", None)],
            number_of_rounds: Some(2),
            ..Default::default()
        };
        let response = init_game(&state, request).await.unwrap();
        assert_eq!(response.teams.unwrap().turn_limit_secs, 30);

        start_team_round(&state).await;
        mark_current_word(&state, true).await;
        let response = time_up(&state).await;

        assert_eq!(response.phase, VisibleGamePhase::TeamTransition);
        let teams = response.teams.unwrap();
        assert_eq!(teams.current_team.name, "B");
        assert_eq!(teams.teams[0].score, 1);
    }
}
