//! Statistics and donation persistence on top of a [`KeyValueStore`].
//!
//! Every backend failure is absorbed here: reads fall back to defaults and
//! writes are dropped, both with a log line. Callers never see a
//! [`StorageError`](crate::dao::storage::StorageError).

use std::sync::Arc;

use tracing::{info, warn};

use crate::dao::{
    kv_store::KeyValueStore,
    models::GameStats,
    storage::{StorageError, StorageResult},
};

const GAME_STATS_KEY: &str = "game_stats";
const USER_DONATION_KEY: &str = "user_donated";

/// Data access object for the persisted statistics and donation flag.
#[derive(Clone)]
pub struct StatsStore {
    store: Arc<dyn KeyValueStore>,
}

impl StatsStore {
    /// Wrap a key-value backend.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the statistics, or defaults when missing or unreadable.
    pub async fn game_stats(&self) -> GameStats {
        match self.try_game_stats().await {
            Ok(Some(stats)) => stats,
            Ok(None) => GameStats::default(),
            Err(err) => {
                warn!(error = %err, "failed to read game stats; using defaults");
                GameStats::default()
            }
        }
    }

    /// Persist the statistics, logging failures.
    pub async fn save_game_stats(&self, stats: &GameStats) {
        if let Err(err) = self.try_save_game_stats(stats).await {
            warn!(error = %err, "failed to save game stats");
        }
    }

    /// Fold a completed single-mode round into the persisted totals.
    pub async fn update_stats_after_round(&self, score: u32) {
        let mut stats = self.game_stats().await;
        stats.record_round(score);
        self.save_game_stats(&stats).await;
    }

    /// Donation flag; `false` when missing or unreadable.
    pub async fn user_donation_status(&self) -> bool {
        match self.store.get(USER_DONATION_KEY).await {
            Ok(value) => value.as_deref() == Some("true"),
            Err(err) => {
                warn!(error = %err, "failed to read donation status");
                false
            }
        }
    }

    /// Persist the donation flag and mirror it into the statistics.
    pub async fn set_user_donation_status(&self, donated: bool) {
        if let Err(err) = self
            .store
            .set(USER_DONATION_KEY, donated.to_string())
            .await
        {
            warn!(error = %err, donated, "failed to save donation status");
            return;
        }

        let mut stats = self.game_stats().await;
        stats.has_user_donated = donated;
        self.save_game_stats(&stats).await;
    }

    /// Remove both persisted keys.
    pub async fn clear_all_data(&self) {
        match self
            .store
            .remove_many(&[GAME_STATS_KEY, USER_DONATION_KEY])
            .await
        {
            Ok(()) => info!("cleared persisted statistics"),
            Err(err) => warn!(error = %err, "failed to clear persisted statistics"),
        }
    }

    /// Check that the backend answers.
    pub async fn health_check(&self) -> StorageResult<()> {
        self.store.health_check().await
    }

    async fn try_game_stats(&self) -> StorageResult<Option<GameStats>> {
        let Some(raw) = self.store.get(GAME_STATS_KEY).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::corrupted(GAME_STATS_KEY, source))
    }

    async fn try_save_game_stats(&self, stats: &GameStats) -> StorageResult<()> {
        let raw = serde_json::to_string(stats)
            .map_err(|source| StorageError::corrupted(GAME_STATS_KEY, source))?;
        self.store.set(GAME_STATS_KEY, raw).await
    }
}
