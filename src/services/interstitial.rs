use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use thiserror::Error;
use tokio::time::sleep;
use tracing::info;

/// Nominal time an interstitial stays on screen.
pub const DEFAULT_INTERSTITIAL_DELAY: Duration = Duration::from_secs(2);

/// Failure reported by an interstitial provider.
#[derive(Debug, Error)]
#[error("interstitial failed: {0}")]
pub struct InterstitialError(pub String);

/// Displays a full-screen ad and resolves once it has been dismissed.
pub trait Interstitial: Send + Sync {
    /// Show the ad; resolves when it is dismissed or fails.
    fn show(&self) -> BoxFuture<'static, Result<(), InterstitialError>>;
}

/// Stand-in provider that only waits for a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedInterstitial {
    delay: Duration,
}

impl Default for SimulatedInterstitial {
    fn default() -> Self {
        Self::new(DEFAULT_INTERSTITIAL_DELAY)
    }
}

impl SimulatedInterstitial {
    /// Provider resolving after `delay`.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Interstitial for SimulatedInterstitial {
    fn show(&self) -> BoxFuture<'static, Result<(), InterstitialError>> {
        let delay = self.delay;
        async move {
            info!(delay_ms = delay.as_millis() as u64, "showing interstitial");
            sleep(delay).await;
            info!("interstitial dismissed");
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn waits_for_the_configured_delay() {
        let started = Instant::now();
        SimulatedInterstitial::default().show().await.unwrap();
        assert!(started.elapsed() >= DEFAULT_INTERSTITIAL_DELAY);
    }
}
