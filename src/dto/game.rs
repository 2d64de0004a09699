use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::{
        phase::VisibleGamePhase,
        validation::{validate_hex_color, validate_max_chars, validate_not_blank},
    },
    state::{
        orchestrator::{GameMode, GameSnapshot, PhaseSnapshot, RoundSnapshot, TeamsSnapshot},
        team_game::Team,
    },
};

/// Longest team name accepted, counted in characters after trimming.
pub const MAX_TEAM_NAME_LENGTH: usize = 20;

/// Payload used to start a session, in single or team mode.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct InitGameRequest {
    /// Category identifier; omitted for the mixed pool.
    #[serde(default)]
    pub category: Option<String>,
    /// Teams in turn order (at most 6); empty for single mode.
    #[serde(default)]
    #[validate(length(max = 6), nested)]
    pub teams: Vec<TeamInput>,
    /// Rounds each team plays (1 to 5).
    #[serde(default)]
    #[validate(range(min = 1, max = 5))]
    pub number_of_rounds: Option<u32>,
}

/// Incoming team definition.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamInput {
    /// Display name, trimmed before use; 1 to 20 characters.
    pub name: String,
    /// Optional `#RRGGBB` color. If omitted, the backend chooses the first unused color from the
    /// configured palette.
    #[serde(default)]
    pub color: Option<String>,
}

impl Validate for TeamInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_not_blank(&self.name) {
            errors.add("name", e);
        } else if let Err(e) = validate_max_chars(&self.name, MAX_TEAM_NAME_LENGTH) {
            errors.add("name", e);
        }

        if let Some(ref color) = self.color {
            if let Err(e) = validate_hex_color(color) {
                errors.add("color", e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Outcome of the word being marked.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema, Validate)]
pub struct MarkWordRequest {
    pub correct: bool,
}

/// Session mode exposed to clients.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GameModeDto {
    Single,
    Teams,
}

impl From<GameMode> for GameModeDto {
    fn from(value: GameMode) -> Self {
        match value {
            GameMode::Single => GameModeDto::Single,
            GameMode::Teams => GameModeDto::Teams,
        }
    }
}

/// Words of the round on screen and how they were marked.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoundView {
    pub words: Vec<String>,
    /// `true` guessed, `false` missed, `null` not marked yet.
    pub results: Vec<Option<bool>>,
    pub current_word: Option<String>,
    pub current_index: usize,
    pub score: u32,
}

impl From<RoundSnapshot> for RoundView {
    fn from(round: RoundSnapshot) -> Self {
        Self {
            words: round.words,
            results: round.results,
            current_word: round.current_word,
            current_index: round.current_index,
            score: round.score,
        }
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
/// Public projection of a team exposed to REST/SSE clients.
pub struct TeamSummary {
    pub id: u32,
    pub name: String,
    pub score: u32,
    pub color: String,
}

impl From<Team> for TeamSummary {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            score: team.score,
            color: team.color,
        }
    }
}

/// Team turn bookkeeping.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamGameView {
    pub teams: Vec<TeamSummary>,
    pub current_team: TeamSummary,
    pub round_number: u32,
    pub max_rounds: u32,
    /// Seconds each team gets before its turn is cut short.
    pub turn_limit_secs: u64,
}

impl From<TeamsSnapshot> for TeamGameView {
    fn from(game: TeamsSnapshot) -> Self {
        Self {
            teams: game.teams.into_iter().map(Into::into).collect(),
            current_team: game.current_team.into(),
            round_number: game.round_number,
            max_rounds: game.max_rounds,
            turn_limit_secs: game.turn_limit.as_secs(),
        }
    }
}

/// Full game state returned by the game routes and streamed over SSE.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GameStateResponse {
    pub phase: VisibleGamePhase,
    pub mode: GameModeDto,
    pub category: Option<String>,
    pub category_display_name: String,
    /// Single-mode rounds played, persisted ones included.
    pub total_rounds: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<RoundView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<TeamGameView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<GameSnapshot> for GameStateResponse {
    fn from(snapshot: GameSnapshot) -> Self {
        let phase = snapshot.kind().into();
        let (round, error) = match snapshot.phase {
            PhaseSnapshot::Playing(round)
            | PhaseSnapshot::RoundCompleted(round)
            | PhaseSnapshot::ShowingAd(round) => (Some(round.into()), None),
            PhaseSnapshot::Error { message } => (None, Some(message)),
            PhaseSnapshot::Loading
            | PhaseSnapshot::TeamTransition
            | PhaseSnapshot::TeamGameFinished => (None, None),
        };

        Self {
            phase,
            mode: snapshot.mode.into(),
            category: snapshot.category,
            category_display_name: snapshot.category_display_name,
            total_rounds: snapshot.total_rounds,
            round,
            teams: snapshot.teams.map(Into::into),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::team_game::MAX_TEAMS;

    #[test]
    fn init_request_rejects_out_of_range_rounds() {
        let request = InitGameRequest {
            number_of_rounds: Some(6),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = InitGameRequest {
            number_of_rounds: Some(5),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn init_request_validates_nested_teams() {
        let request: InitGameRequest = serde_json::from_str(
            r##"{ "teams": [ { "name": "Rojos", "color": "#E74C3C" }, { "name": "  " } ] }"##,
        )
        .unwrap();
        assert!(request.validate().is_err());

        let request: InitGameRequest =
            serde_json::from_str(r#"{ "teams": [ { "name": "Rojos", "color": "red" } ] }"#)
                .unwrap();
        assert!(request.validate().is_err());
    }

    fn named_teams(count: usize) -> Vec<TeamInput> {
        (1..=count)
            .map(|n| TeamInput {
                name: format!("Equipo {n}"),
                color: None,
            })
            .collect()
    }

    #[test]
    fn init_request_caps_team_count() {
        let request = InitGameRequest {
            teams: named_teams(MAX_TEAMS),
            ..Default::default()
        };
        assert!(request.validate().is_ok());

        let request = InitGameRequest {
            teams: named_teams(MAX_TEAMS + 1),
            ..Default::default()
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("teams"));

        assert!(InitGameRequest::default().validate().is_ok());
    }

    #[test]
    fn team_names_are_capped_in_characters() {
        let at_limit = TeamInput {
            name: format!(" {} ", "ñ".repeat(MAX_TEAM_NAME_LENGTH)),
            color: None,
        };
        assert!(at_limit.validate().is_ok());

        let too_long = TeamInput {
            name: "x".repeat(MAX_TEAM_NAME_LENGTH + 1),
            color: None,
        };
        let errors = too_long.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn error_snapshot_carries_message() {
        let snapshot = GameSnapshot {
            phase: PhaseSnapshot::Error {
                message: "failed to create a new round".into(),
            },
            mode: GameMode::Single,
            category: None,
            category_display_name: "Categoría Mixta".into(),
            total_rounds: 0,
            teams: None,
        };

        let json = serde_json::to_value(GameStateResponse::from(snapshot)).unwrap();
        assert_eq!(json["phase"], "error");
        assert_eq!(json["error"], "failed to create a new round");
        assert!(json.get("round").is_none());
    }
}
