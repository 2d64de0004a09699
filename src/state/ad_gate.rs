/// Number of completed rounds between two interstitials.
pub const DEFAULT_ROUNDS_BETWEEN_ADS: u32 = 3;

/// Decides when an interstitial should be shown after a completed round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdGate {
    rounds_played: u32,
    donated: bool,
    rounds_between_ads: u32,
}

impl Default for AdGate {
    fn default() -> Self {
        Self::new(DEFAULT_ROUNDS_BETWEEN_ADS)
    }
}

impl AdGate {
    /// Build a gate firing every `rounds_between_ads` rounds (clamped to at least 1).
    pub fn new(rounds_between_ads: u32) -> Self {
        Self {
            rounds_played: 0,
            donated: false,
            rounds_between_ads: rounds_between_ads.max(1),
        }
    }

    /// Record one more completed round.
    pub fn increment_rounds_played(&mut self) {
        self.rounds_played = self.rounds_played.saturating_add(1);
    }

    /// Forget every round counted so far.
    pub fn reset_rounds_count(&mut self) {
        self.rounds_played = 0;
    }

    /// Donors never see ads.
    pub fn set_user_donated(&mut self, donated: bool) {
        self.donated = donated;
    }

    /// Whether the donation override is active.
    pub fn has_user_donated(&self) -> bool {
        self.donated
    }

    /// Rounds counted since start or the last reset.
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// True on every positive multiple of the cadence, unless the user donated.
    pub fn should_show_ad(&self) -> bool {
        !self.donated && self.rounds_played > 0 && self.rounds_played % self.rounds_between_ads == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate_at(rounds: u32) -> AdGate {
        let mut gate = AdGate::default();
        for _ in 0..rounds {
            gate.increment_rounds_played();
        }
        gate
    }

    #[test]
    fn fires_on_every_third_round() {
        let expected = [false, false, false, true, false, false, true, false, false, true];
        for (rounds, want) in expected.into_iter().enumerate() {
            assert_eq!(gate_at(rounds as u32).should_show_ad(), want, "rounds = {rounds}");
        }
    }

    #[test]
    fn donation_disables_ads() {
        let mut gate = gate_at(3);
        gate.set_user_donated(true);
        assert!(gate.has_user_donated());
        assert!(!gate.should_show_ad());

        for _ in 0..3 {
            gate.increment_rounds_played();
            assert!(!gate.should_show_ad());
        }

        gate.set_user_donated(false);
        assert!(gate.should_show_ad());
    }

    #[test]
    fn reset_clears_counter() {
        let mut gate = gate_at(3);
        gate.reset_rounds_count();
        assert_eq!(gate.rounds_played(), 0);
        assert!(!gate.should_show_ad());
    }

    #[test]
    fn custom_cadence() {
        let mut gate = AdGate::new(2);
        gate.increment_rounds_played();
        assert!(!gate.should_show_ad());
        gate.increment_rounds_played();
        assert!(gate.should_show_ad());

        let mut every_round = AdGate::new(0);
        every_round.increment_rounds_played();
        assert!(every_round.should_show_ad());
    }
}
