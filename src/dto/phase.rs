use serde::Serialize;
use utoipa::ToSchema;

use crate::state::orchestrator::PhaseKind;

/// Publicly visible game phase exposed to clients (REST/SSE).
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisibleGamePhase {
    /// A session or round is being prepared.
    Loading,
    /// Words are being guessed.
    Playing,
    /// The round is over and its score is shown.
    RoundCompleted,
    /// An interstitial is on screen.
    ShowingAd,
    /// Setup failed.
    Error,
    /// Waiting for the next team to start.
    TeamTransition,
    /// Final team results.
    TeamGameFinished,
}

impl From<PhaseKind> for VisibleGamePhase {
    fn from(value: PhaseKind) -> Self {
        match value {
            PhaseKind::Loading => VisibleGamePhase::Loading,
            PhaseKind::Playing => VisibleGamePhase::Playing,
            PhaseKind::RoundCompleted => VisibleGamePhase::RoundCompleted,
            PhaseKind::ShowingAd => VisibleGamePhase::ShowingAd,
            PhaseKind::Error => VisibleGamePhase::Error,
            PhaseKind::TeamTransition => VisibleGamePhase::TeamTransition,
            PhaseKind::TeamGameFinished => VisibleGamePhase::TeamGameFinished,
        }
    }
}
