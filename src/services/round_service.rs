use std::sync::Arc;

use thiserror::Error;

use crate::{
    dao::words::{WordCategory, WordRepository, WordsError},
    state::round::{Round, RoundError},
};

/// Failures while assembling a fresh round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundBuildError {
    /// Not enough words to sample from.
    #[error(transparent)]
    Words(#[from] WordsError),
    /// The sample could not form a valid round.
    #[error(transparent)]
    Round(#[from] RoundError),
}

/// Builds rounds from word samples.
#[derive(Debug, Clone)]
pub struct RoundService {
    words: Arc<WordRepository>,
}

impl RoundService {
    /// Wrap a shared word repository.
    pub fn new(words: Arc<WordRepository>) -> Self {
        Self { words }
    }

    /// Sample five words from `category` (every category when `None`) into a new round.
    pub fn create_new_round(&self, category: Option<&str>) -> Result<Round, RoundBuildError> {
        let words = self.words.words_for_round(category)?;
        Ok(Round::new(words)?)
    }

    /// Categories players can choose from.
    pub fn available_categories(&self) -> Vec<WordCategory> {
        self.words.categories()
    }

    /// Look a category up by identifier.
    pub fn find_category(&self, name: &str) -> Option<WordCategory> {
        self.words.find_category(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_playable_round() {
        let service = RoundService::new(Arc::new(WordRepository::new()));
        let round = service.create_new_round(Some("sports")).unwrap();
        let sports = service.find_category("sports").unwrap();

        assert_eq!(round.current_index(), 0);
        assert!(round.words().iter().all(|word| sports.words.contains(word)));
    }

    #[test]
    fn reports_short_catalogue() {
        let repository =
            WordRepository::with_categories(vec![WordCategory::new("few", "Few", &["a", "b", "c"])]);
        let service = RoundService::new(Arc::new(repository));

        assert!(matches!(
            service.create_new_round(None),
            Err(RoundBuildError::Words(WordsError::NotEnoughWords { available: 3, .. }))
        ));
    }
}
