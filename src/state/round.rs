use thiserror::Error;

/// Number of words making up a single round.
pub const WORDS_PER_ROUND: usize = 5;

/// Error raised when a round cannot be built from the supplied words.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The word list does not contain exactly [`WORDS_PER_ROUND`] entries.
    #[error("a round requires exactly {WORDS_PER_ROUND} words, got {got}")]
    InvalidWordCount {
        /// Number of words that were supplied.
        got: usize,
    },
}

/// One unit of play: five words, each marked as guessed or missed.
///
/// The cursor only moves through [`Round::mark_current_word`]. Marks applied
/// with [`Round::mark_word_at_index`] leave it untouched, so completion is
/// decided by the results alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    words: Vec<String>,
    results: [Option<bool>; WORDS_PER_ROUND],
    cursor: usize,
}

impl Round {
    /// Build a round from exactly [`WORDS_PER_ROUND`] words.
    pub fn new(words: Vec<String>) -> Result<Self, RoundError> {
        if words.len() != WORDS_PER_ROUND {
            return Err(RoundError::InvalidWordCount { got: words.len() });
        }

        Ok(Self {
            words,
            results: [None; WORDS_PER_ROUND],
            cursor: 0,
        })
    }

    /// Word under the cursor, `None` once every position has been advanced past.
    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.cursor).map(String::as_str)
    }

    /// Position of the cursor in `0..=WORDS_PER_ROUND`.
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    /// Words of the round in play order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Per-word outcome; `None` means the word has not been marked yet.
    pub fn results(&self) -> &[Option<bool>] {
        &self.results
    }

    /// Record the outcome of the word under the cursor and advance.
    ///
    /// Saturates: once the cursor reached the end the call does nothing.
    pub fn mark_current_word(&mut self, correct: bool) {
        if self.cursor < WORDS_PER_ROUND {
            self.results[self.cursor] = Some(correct);
            self.cursor += 1;
        }
    }

    /// Record the outcome of an arbitrary word. Out-of-range indices are ignored.
    pub fn mark_word_at_index(&mut self, index: usize, correct: bool) {
        if let Some(slot) = self.results.get_mut(index) {
            *slot = Some(correct);
        }
    }

    /// True when every word carries an outcome, wherever the cursor is.
    pub fn is_completed(&self) -> bool {
        self.results.iter().all(Option::is_some)
    }

    /// Number of words marked as guessed.
    pub fn score(&self) -> u32 {
        self.results.iter().filter(|result| **result == Some(true)).count() as u32
    }

    /// Clear every outcome and rewind the cursor, keeping the words.
    pub fn reset(&mut self) {
        self.results = [None; WORDS_PER_ROUND];
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> Vec<String> {
        ["perro", "gato", "elefante", "león", "tigre"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn new_round_starts_empty() {
        let round = Round::new(words()).unwrap();

        assert_eq!(round.current_index(), 0);
        assert_eq!(round.current_word(), Some("perro"));
        assert!(round.results().iter().all(Option::is_none));
        assert!(!round.is_completed());
        assert_eq!(round.score(), 0);
    }

    #[test]
    fn rejects_wrong_word_count() {
        let mut short = words();
        short.pop();
        assert_eq!(
            Round::new(short),
            Err(RoundError::InvalidWordCount { got: 4 })
        );

        let mut long = words();
        long.push("oso".into());
        assert_eq!(
            Round::new(long),
            Err(RoundError::InvalidWordCount { got: 6 })
        );

        assert!(Round::new(Vec::new()).is_err());
    }

    #[test]
    fn sequential_marking_completes_and_saturates() {
        let mut round = Round::new(words()).unwrap();
        for _ in 0..WORDS_PER_ROUND {
            round.mark_current_word(true);
        }

        assert_eq!(round.current_index(), 5);
        assert!(round.is_completed());
        assert_eq!(round.current_word(), None);

        round.mark_current_word(false);
        assert_eq!(round.current_index(), 5);
        assert_eq!(round.score(), 5);
    }

    #[test]
    fn score_counts_correct_marks() {
        let mut round = Round::new(words()).unwrap();
        round.mark_current_word(true);
        round.mark_current_word(false);
        round.mark_current_word(true);
        assert_eq!(round.score(), 2);

        let mut missed = Round::new(words()).unwrap();
        for _ in 0..WORDS_PER_ROUND {
            missed.mark_current_word(false);
        }
        assert!(missed.is_completed());
        assert_eq!(missed.score(), 0);
    }

    #[test]
    fn indexed_marks_do_not_move_cursor() {
        let mut round = Round::new(words()).unwrap();
        round.mark_word_at_index(3, true);
        round.mark_word_at_index(42, true);

        assert_eq!(round.current_index(), 0);
        assert_eq!(round.results()[3], Some(true));
        assert_eq!(round.score(), 1);
    }

    #[test]
    fn completion_ignores_cursor_position() {
        let mut round = Round::new(words()).unwrap();
        for index in 0..WORDS_PER_ROUND {
            round.mark_word_at_index(index, index % 2 == 0);
        }

        assert!(round.is_completed());
        assert_eq!(round.current_index(), 0);
        assert_eq!(round.score(), 3);

        // Sequential marking overwrites the slot under the cursor.
        round.mark_current_word(false);
        assert_eq!(round.current_index(), 1);
        assert_eq!(round.score(), 2);
    }

    #[test]
    fn reset_keeps_words() {
        let mut round = Round::new(words()).unwrap();
        round.mark_current_word(true);
        round.mark_word_at_index(4, true);
        round.reset();

        assert_eq!(round.current_index(), 0);
        assert_eq!(round.score(), 0);
        assert!(!round.is_completed());
        assert!(round.results().iter().all(Option::is_none));
        assert_eq!(round.words(), words().as_slice());
    }
}
