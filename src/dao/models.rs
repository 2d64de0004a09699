use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Cumulative statistics persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStats {
    /// Single-mode rounds completed so far.
    pub total_rounds_played: u32,
    /// Words guessed across every completed round.
    pub total_words_correct: u32,
    /// Mirror of the donation flag.
    pub has_user_donated: bool,
    /// Best single-round score.
    pub best_score: u32,
    /// `total_words_correct / total_rounds_played`.
    pub average_score: f64,
}

impl GameStats {
    /// Fold a completed round into the totals.
    pub fn record_round(&mut self, score: u32) {
        self.total_rounds_played = self.total_rounds_played.saturating_add(1);
        self.total_words_correct = self.total_words_correct.saturating_add(score);
        self.best_score = self.best_score.max(score);
        self.average_score =
            f64::from(self.total_words_correct) / f64::from(self.total_rounds_played);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_updates_every_total() {
        let mut stats = GameStats::default();
        stats.record_round(5);
        stats.record_round(2);

        assert_eq!(stats.total_rounds_played, 2);
        assert_eq!(stats.total_words_correct, 7);
        assert_eq!(stats.best_score, 5);
        assert!((stats.average_score - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn serialized_with_camel_case_keys() {
        let stats = GameStats {
            total_rounds_played: 1,
            total_words_correct: 4,
            has_user_donated: true,
            best_score: 4,
            average_score: 4.0,
        };
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["totalRoundsPlayed"], 1);
        assert_eq!(json["hasUserDonated"], true);
        assert_eq!(json["averageScore"], 4.0);

        let partial: GameStats = serde_json::from_str(r#"{"bestScore":3}"#).unwrap();
        assert_eq!(partial.best_score, 3);
        assert_eq!(partial.total_rounds_played, 0);
    }
}
