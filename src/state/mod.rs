pub mod ad_gate;
pub mod listeners;
pub mod orchestrator;
pub mod round;
mod sse;
pub mod team_game;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::AppConfig,
    dao::{kv_store::KeyValueStore, stats::StatsStore, words::WordRepository},
    services::{
        interstitial::SimulatedInterstitial, round_service::RoundService, sse_events,
    },
    state::{ad_gate::AdGate, orchestrator::RoundOrchestrator},
};

pub use self::sse::SseHub;

/// Handle shared by every route handler and background task.
pub type SharedState = Arc<AppState>;

const SSE_CAPACITY: usize = 32;

/// Central application state: the running session, its persistence and the SSE fan-out.
pub struct AppState {
    config: AppConfig,
    rounds: RoundService,
    game: Mutex<RoundOrchestrator>,
    stats: StatsStore,
    sse: SseHub,
}

impl AppState {
    /// Build the whole object graph on top of `store` and wrap it in an [`Arc`].
    ///
    /// Every snapshot the orchestrator publishes is forwarded to the SSE hub.
    pub fn new(config: AppConfig, store: Arc<dyn KeyValueStore>) -> SharedState {
        let stats = StatsStore::new(store);
        let sse = SseHub::new(SSE_CAPACITY);
        let rounds = RoundService::new(Arc::new(WordRepository::new()));

        let orchestrator = RoundOrchestrator::new(
            rounds.clone(),
            AdGate::new(config.rounds_between_ads()),
            stats.clone(),
            Arc::new(SimulatedInterstitial::new(config.interstitial_delay())),
        )
        .with_turn_limit(config.team_turn_limit());
        // Lives as long as the orchestrator.
        let _feed = sse_events::forward_game_snapshots(&orchestrator, sse.clone());

        Arc::new(Self {
            config,
            rounds,
            game: Mutex::new(orchestrator),
            stats,
            sse,
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Word catalogue shared with the orchestrator; readable without the game lock.
    pub fn rounds(&self) -> &RoundService {
        &self.rounds
    }

    /// The session orchestrator; holding the lock serialises game requests.
    pub fn game(&self) -> &Mutex<RoundOrchestrator> {
        &self.game
    }

    /// Persisted statistics.
    pub fn stats(&self) -> &StatsStore {
        &self.stats
    }

    /// Broadcast hub used for the game SSE stream.
    pub fn sse(&self) -> &SseHub {
        &self.sse
    }
}
