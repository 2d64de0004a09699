//! The game orchestrator: the only stateful coordinator of a play session.
//!
//! It owns the current [`Round`] and, in team mode, the [`TeamGame`], and
//! drives them through the phase machine below. Every committed change is
//! published as an owned [`GameSnapshot`] to the registered listeners.
//!
//! ```text
//! loading ─► playing ─► round_completed ─(single)─► loading ─► playing
//!    │          ▲            │    ▲
//!    │          │            │    └── showing_ad (single, every Nth round)
//!    │          │            └─(teams)─► team_transition | team_game_finished
//!    │          └──────────────────────── team_transition ◄─(teams, time up)─ playing
//!    └─► error
//! ```

use std::{mem, sync::Arc, time::Duration};

use tracing::{debug, info, warn};

use crate::{
    dao::{
        models::GameStats,
        stats::StatsStore,
        words::{MIXED_CATEGORY_DISPLAY_NAME, WordCategory},
    },
    services::{interstitial::Interstitial, round_service::RoundService},
    state::{
        ad_gate::AdGate,
        listeners::{Listeners, Subscription},
        round::Round,
        team_game::{DEFAULT_MAX_ROUNDS, MIN_TEAMS, Team, TeamGame},
    },
};

/// Message published when a session cannot be set up.
pub const INITIALIZATION_FAILED: &str = "failed to initialize the game";
/// Message published when no round could be drawn.
pub const ROUND_CREATION_FAILED: &str = "failed to create a new round";
/// Time each team gets per turn unless configured otherwise.
pub const DEFAULT_TEAM_TURN_LIMIT: Duration = Duration::from_secs(30);

/// Discriminant of the orchestrator's phase machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// A session or a round is being prepared.
    Loading,
    /// Words are being guessed.
    Playing,
    /// Every word of the round carries an outcome.
    RoundCompleted,
    /// An interstitial is on screen after a completed round.
    ShowingAd,
    /// Setup failed; `initialize` must be called again.
    Error,
    /// Waiting for the next team to start its turn.
    TeamTransition,
    /// Every team played every round.
    TeamGameFinished,
}

/// Mode the current session was set up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// One group of players, statistics and ads apply.
    Single,
    /// Several teams taking turns.
    Teams,
}

/// Owned view of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSnapshot {
    /// Words in play order.
    pub words: Vec<String>,
    /// Outcome per word; `None` when not marked yet.
    pub results: Vec<Option<bool>>,
    /// Word under the cursor.
    pub current_word: Option<String>,
    /// Cursor position.
    pub current_index: usize,
    /// Words guessed so far.
    pub score: u32,
}

impl From<&Round> for RoundSnapshot {
    fn from(round: &Round) -> Self {
        Self {
            words: round.words().to_vec(),
            results: round.results().to_vec(),
            current_word: round.current_word().map(str::to_string),
            current_index: round.current_index(),
            score: round.score(),
        }
    }
}

/// Owned view of a team game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamsSnapshot {
    /// Teams in setup order with their scores.
    pub teams: Vec<Team>,
    /// Team whose turn it is.
    pub current_team: Team,
    /// Current round, starting at 1.
    pub round_number: u32,
    /// Rounds each team plays.
    pub max_rounds: u32,
    /// Time a team has to guess its words before the turn passes.
    pub turn_limit: Duration,
}

impl TeamsSnapshot {
    fn new(game: &TeamGame, turn_limit: Duration) -> Self {
        Self {
            teams: game.teams().to_vec(),
            current_team: game.current_team().clone(),
            round_number: game.round_number(),
            max_rounds: game.max_rounds(),
            turn_limit,
        }
    }
}

/// Phase together with the data that only exists in that phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseSnapshot {
    /// See [`PhaseKind::Loading`].
    Loading,
    /// See [`PhaseKind::Playing`].
    Playing(RoundSnapshot),
    /// See [`PhaseKind::RoundCompleted`].
    RoundCompleted(RoundSnapshot),
    /// See [`PhaseKind::ShowingAd`].
    ShowingAd(RoundSnapshot),
    /// See [`PhaseKind::Error`].
    Error {
        /// User-facing description of the failure.
        message: String,
    },
    /// See [`PhaseKind::TeamTransition`].
    TeamTransition,
    /// See [`PhaseKind::TeamGameFinished`].
    TeamGameFinished,
}

impl PhaseSnapshot {
    /// Discriminant of this phase.
    pub fn kind(&self) -> PhaseKind {
        match self {
            PhaseSnapshot::Loading => PhaseKind::Loading,
            PhaseSnapshot::Playing(_) => PhaseKind::Playing,
            PhaseSnapshot::RoundCompleted(_) => PhaseKind::RoundCompleted,
            PhaseSnapshot::ShowingAd(_) => PhaseKind::ShowingAd,
            PhaseSnapshot::Error { .. } => PhaseKind::Error,
            PhaseSnapshot::TeamTransition => PhaseKind::TeamTransition,
            PhaseSnapshot::TeamGameFinished => PhaseKind::TeamGameFinished,
        }
    }

    /// Round attached to the phase, if any.
    pub fn round(&self) -> Option<&RoundSnapshot> {
        match self {
            PhaseSnapshot::Playing(round)
            | PhaseSnapshot::RoundCompleted(round)
            | PhaseSnapshot::ShowingAd(round) => Some(round),
            _ => None,
        }
    }
}

/// Immutable copy of the orchestrator state handed to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Current phase and its payload.
    pub phase: PhaseSnapshot,
    /// Mode of the session.
    pub mode: GameMode,
    /// Selected category identifier; `None` for the mixed pool.
    pub category: Option<String>,
    /// Label of the selected category.
    pub category_display_name: String,
    /// Single-mode rounds played, persisted ones included.
    pub total_rounds: u32,
    /// Team game state, in team mode.
    pub teams: Option<TeamsSnapshot>,
}

impl GameSnapshot {
    /// Discriminant of the current phase.
    pub fn kind(&self) -> PhaseKind {
        self.phase.kind()
    }
}

enum Phase {
    Loading,
    Playing(Round),
    RoundCompleted(Round),
    ShowingAd(Round),
    Error(String),
    TeamTransition,
    TeamGameFinished,
}

enum Mode {
    Single,
    Teams(TeamGame),
}

struct SelectedCategory {
    name: Option<String>,
    display_name: String,
}

impl Default for SelectedCategory {
    fn default() -> Self {
        Self {
            name: None,
            display_name: MIXED_CATEGORY_DISPLAY_NAME.to_string(),
        }
    }
}

/// Coordinates rounds, team turns, ads and statistics behind one observable state.
///
/// Methods take `&mut self`: callers must serialise access, which the
/// borrow checker (or the mutex held by the HTTP layer) enforces.
pub struct RoundOrchestrator {
    rounds: RoundService,
    ads: AdGate,
    stats: StatsStore,
    interstitial: Arc<dyn Interstitial>,
    listeners: Listeners<GameSnapshot>,
    phase: Phase,
    mode: Mode,
    category: SelectedCategory,
    total_rounds: u32,
    turn_limit: Duration,
}

impl RoundOrchestrator {
    /// Wire the orchestrator to its collaborators. Starts in `loading`.
    pub fn new(
        rounds: RoundService,
        ads: AdGate,
        stats: StatsStore,
        interstitial: Arc<dyn Interstitial>,
    ) -> Self {
        Self {
            rounds,
            ads,
            stats,
            interstitial,
            listeners: Listeners::new(),
            phase: Phase::Loading,
            mode: Mode::Single,
            category: SelectedCategory::default(),
            total_rounds: 0,
            turn_limit: DEFAULT_TEAM_TURN_LIMIT,
        }
    }

    /// Same orchestrator advertising another per-turn time limit to team clients.
    pub fn with_turn_limit(mut self, turn_limit: Duration) -> Self {
        self.turn_limit = turn_limit;
        self
    }

    /// Register a callback receiving every published snapshot.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&GameSnapshot) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> GameSnapshot {
        let phase = match &self.phase {
            Phase::Loading => PhaseSnapshot::Loading,
            Phase::Playing(round) => PhaseSnapshot::Playing(round.into()),
            Phase::RoundCompleted(round) => PhaseSnapshot::RoundCompleted(round.into()),
            Phase::ShowingAd(round) => PhaseSnapshot::ShowingAd(round.into()),
            Phase::Error(message) => PhaseSnapshot::Error {
                message: message.clone(),
            },
            Phase::TeamTransition => PhaseSnapshot::TeamTransition,
            Phase::TeamGameFinished => PhaseSnapshot::TeamGameFinished,
        };

        let (mode, teams): (GameMode, Option<TeamsSnapshot>) = match &self.mode {
            Mode::Single => (GameMode::Single, None),
            Mode::Teams(game) => (
                GameMode::Teams,
                Some(TeamsSnapshot::new(game, self.turn_limit)),
            ),
        };

        GameSnapshot {
            phase,
            mode,
            category: self.category.name.clone(),
            category_display_name: self.category.display_name.clone(),
            total_rounds: self.total_rounds,
            teams,
        }
    }

    /// Start a session.
    ///
    /// With at least two teams the session runs in team mode and waits in
    /// `team_transition` for the first team; otherwise a single-mode round
    /// starts right away. Unknown categories fall back to the mixed pool.
    pub async fn initialize(
        &mut self,
        category: Option<&str>,
        teams: Vec<Team>,
        max_rounds: Option<u32>,
    ) {
        self.set_phase(Phase::Loading);

        let donated = self.stats.user_donation_status().await;
        self.ads.set_user_donated(donated);
        self.total_rounds = self.stats.game_stats().await.total_rounds_played;
        self.category = self.resolve_category(category);

        if teams.len() >= MIN_TEAMS {
            let max_rounds = max_rounds.unwrap_or(DEFAULT_MAX_ROUNDS);
            match TeamGame::new(teams, max_rounds) {
                Ok(game) => {
                    info!(
                        teams = game.teams().len(),
                        max_rounds,
                        category = ?self.category.name,
                        "team game initialized"
                    );
                    self.mode = Mode::Teams(game);
                    self.set_phase(Phase::TeamTransition);
                }
                Err(err) => {
                    warn!(error = %err, "failed to set up team game");
                    self.mode = Mode::Single;
                    self.set_phase(Phase::Error(INITIALIZATION_FAILED.to_string()));
                }
            }
            return;
        }

        info!(category = ?self.category.name, donated, "single game initialized");
        self.mode = Mode::Single;
        self.begin_round();
    }

    /// Draw a fresh round for the selected category. Ignored in team mode.
    pub fn start_new_round(&mut self) {
        if matches!(self.mode, Mode::Teams(_)) {
            debug!("start_new_round ignored in team mode");
            return;
        }
        self.begin_round();
    }

    /// Start the turn of the current team. Only valid in `team_transition`.
    pub fn start_team_round(&mut self) {
        if !matches!(self.mode, Mode::Teams(_)) || !matches!(self.phase, Phase::TeamTransition) {
            debug!(phase = ?self.kind(), "start_team_round ignored");
            return;
        }
        self.begin_round();
    }

    /// Mark the word under the cursor. Ignored unless `playing`.
    pub async fn mark_current_word(&mut self, correct: bool) {
        let Phase::Playing(round) = &mut self.phase else {
            debug!(phase = ?self.kind(), "mark_current_word ignored");
            return;
        };
        round.mark_current_word(correct);
        self.after_mark().await;
    }

    /// Mark an arbitrary word. Ignored unless `playing`; bad indices are no-ops.
    pub async fn mark_word_at_index(&mut self, index: usize, correct: bool) {
        let Phase::Playing(round) = &mut self.phase else {
            debug!(phase = ?self.kind(), "mark_word_at_index ignored");
            return;
        };
        round.mark_word_at_index(index, correct);
        self.after_mark().await;
    }

    /// Hand the turn to the next team after a completed round.
    pub fn next_team_turn(&mut self) {
        if !matches!(self.phase, Phase::RoundCompleted(_)) {
            debug!(phase = ?self.kind(), "next_team_turn ignored");
            return;
        }
        self.advance_team();
    }

    /// End the current team's turn when its time runs out.
    ///
    /// Words guessed so far are credited to the team, then the turn passes
    /// as with [`RoundOrchestrator::next_team_turn`]. Only valid while a
    /// team round is `playing`.
    pub fn time_up(&mut self) {
        if !matches!((&self.phase, &self.mode), (Phase::Playing(_), Mode::Teams(_))) {
            debug!(phase = ?self.kind(), "time_up ignored");
            return;
        }
        let Phase::Playing(round) = self.take_phase() else {
            return;
        };

        if let Mode::Teams(game) = &mut self.mode {
            let score = round.score();
            game.add_score_to_current_team(score);
            info!(team = %game.current_team().name, score, "team ran out of time");
        }
        self.advance_team();
    }

    fn advance_team(&mut self) {
        let Mode::Teams(game) = &mut self.mode else {
            debug!("team turn change ignored in single mode");
            return;
        };

        game.next_team();
        let finished = game.is_finished();
        debug!(
            team = %game.current_team().name,
            round = game.round_number(),
            finished,
            "team turn advanced"
        );

        if finished {
            self.set_phase(Phase::TeamGameFinished);
        } else {
            self.set_phase(Phase::TeamTransition);
        }
    }

    /// Persist the donation flag and stop showing ads to donors.
    pub async fn set_user_donated(&mut self, donated: bool) {
        self.stats.set_user_donation_status(donated).await;
        self.ads.set_user_donated(donated);
    }

    /// Words of the current round, empty outside a round.
    pub fn current_words(&self) -> Vec<String> {
        self.current_round()
            .map(|round| round.words().to_vec())
            .unwrap_or_default()
    }

    /// Outcomes of the current round, empty outside a round.
    pub fn current_results(&self) -> Vec<Option<bool>> {
        self.current_round()
            .map(|round| round.results().to_vec())
            .unwrap_or_default()
    }

    /// Persisted statistics.
    pub async fn game_stats(&self) -> GameStats {
        self.stats.game_stats().await
    }

    /// Categories players can choose from.
    pub fn available_categories(&self) -> Vec<WordCategory> {
        self.rounds.available_categories()
    }

    /// Teams of the session in setup order; empty in single mode.
    pub fn all_teams(&self) -> Vec<Team> {
        self.team_game()
            .map(|game| game.teams().to_vec())
            .unwrap_or_default()
    }

    /// Teams by descending score; empty in single mode.
    pub fn team_ranking(&self) -> Vec<Team> {
        self.team_game()
            .map(TeamGame::team_ranking)
            .unwrap_or_default()
    }

    /// Teams sharing the best score; empty in single mode.
    pub fn winning_teams(&self) -> Vec<Team> {
        self.team_game()
            .map(TeamGame::winning_teams)
            .unwrap_or_default()
    }

    /// Ad cadence state.
    pub fn ad_gate(&self) -> &AdGate {
        &self.ads
    }

    fn kind(&self) -> PhaseKind {
        match self.phase {
            Phase::Loading => PhaseKind::Loading,
            Phase::Playing(_) => PhaseKind::Playing,
            Phase::RoundCompleted(_) => PhaseKind::RoundCompleted,
            Phase::ShowingAd(_) => PhaseKind::ShowingAd,
            Phase::Error(_) => PhaseKind::Error,
            Phase::TeamTransition => PhaseKind::TeamTransition,
            Phase::TeamGameFinished => PhaseKind::TeamGameFinished,
        }
    }

    fn current_round(&self) -> Option<&Round> {
        match &self.phase {
            Phase::Playing(round) | Phase::RoundCompleted(round) | Phase::ShowingAd(round) => {
                Some(round)
            }
            _ => None,
        }
    }

    fn team_game(&self) -> Option<&TeamGame> {
        match &self.mode {
            Mode::Teams(game) => Some(game),
            Mode::Single => None,
        }
    }

    fn resolve_category(&self, category: Option<&str>) -> SelectedCategory {
        let Some(name) = category else {
            return SelectedCategory::default();
        };

        let display_name = match self.rounds.find_category(name) {
            Some(found) => found.display_name,
            None => {
                warn!(category = name, "unknown category; drawing from every category");
                MIXED_CATEGORY_DISPLAY_NAME.to_string()
            }
        };

        SelectedCategory {
            name: Some(name.to_string()),
            display_name,
        }
    }

    fn begin_round(&mut self) {
        self.set_phase(Phase::Loading);

        match self.rounds.create_new_round(self.category.name.as_deref()) {
            Ok(round) => {
                debug!(words = ?round.words(), "round started");
                self.set_phase(Phase::Playing(round));
            }
            Err(err) => {
                warn!(error = %err, category = ?self.category.name, "failed to create round");
                self.set_phase(Phase::Error(ROUND_CREATION_FAILED.to_string()));
            }
        }
    }

    async fn after_mark(&mut self) {
        let completed = matches!(&self.phase, Phase::Playing(round) if round.is_completed());
        if !completed {
            self.publish();
            return;
        }

        let Phase::Playing(round) = self.take_phase() else {
            return;
        };
        let score = round.score();

        if let Mode::Teams(game) = &mut self.mode {
            game.add_score_to_current_team(score);
            info!(team = %game.current_team().name, score, "team round completed");
            self.set_phase(Phase::RoundCompleted(round));
            return;
        }

        self.stats.update_stats_after_round(score).await;
        self.ads.increment_rounds_played();
        self.total_rounds = self.total_rounds.saturating_add(1);
        info!(score, total_rounds = self.total_rounds, "round completed");
        self.set_phase(Phase::RoundCompleted(round));

        if self.ads.should_show_ad() {
            self.show_ad().await;
        }
    }

    async fn show_ad(&mut self) {
        let Phase::RoundCompleted(round) = self.take_phase() else {
            return;
        };
        self.set_phase(Phase::ShowingAd(round));

        if let Err(err) = self.interstitial.show().await {
            warn!(error = %err, "interstitial failed");
        }

        if let Phase::ShowingAd(round) = self.take_phase() {
            self.set_phase(Phase::RoundCompleted(round));
        }
    }

    /// Move the phase out, leaving `loading` in place until the caller commits.
    fn take_phase(&mut self) -> Phase {
        mem::replace(&mut self.phase, Phase::Loading)
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.publish();
    }

    fn publish(&self) {
        self.listeners.publish(&self.snapshot());
    }
}
