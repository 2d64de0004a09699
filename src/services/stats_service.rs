use tracing::info;

use crate::{dao::models::GameStats, dto::settings::DonationSettings, state::SharedState};

/// Persisted statistics.
pub async fn game_stats(state: &SharedState) -> GameStats {
    state.stats().game_stats().await
}

/// Forget statistics and the donation flag.
///
/// The running session keeps its in-memory counters until it is initialised again.
pub async fn clear_stats(state: &SharedState) -> GameStats {
    state.stats().clear_all_data().await;
    state.stats().game_stats().await
}

/// Current donation flag.
pub async fn donation(state: &SharedState) -> DonationSettings {
    DonationSettings {
        donated: state.stats().user_donation_status().await,
    }
}

/// Persist the donation flag and apply it to the running session.
pub async fn set_donation(state: &SharedState, settings: DonationSettings) -> DonationSettings {
    info!(donated = settings.donated, "updating donation status");
    state
        .game()
        .lock()
        .await
        .set_user_donated(settings.donated)
        .await;
    donation(state).await
}
