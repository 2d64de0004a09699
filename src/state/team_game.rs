use thiserror::Error;

/// Number of rounds played when the caller does not choose one.
pub const DEFAULT_MAX_ROUNDS: u32 = 3;
/// Most rounds a team game can be set up with.
pub const MAX_ROUNDS: u32 = 5;
/// Smallest number of teams a team game accepts.
pub const MIN_TEAMS: usize = 2;
/// Largest number of teams a team game accepts.
pub const MAX_TEAMS: usize = 6;

/// Team taking part in a multi-team session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    /// Identifier assigned at setup (1-based, in setup order).
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Points accumulated during the current game.
    pub score: u32,
    /// Display color as a `#RRGGBB` string.
    pub color: String,
}

impl Team {
    /// Build a team with a zero score.
    pub fn new(id: u32, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
            color: color.into(),
        }
    }
}

/// Reasons a team game cannot be created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamGameError {
    /// Fewer than [`MIN_TEAMS`] teams were supplied.
    #[error("a team game requires at least {MIN_TEAMS} teams, got {got}")]
    NotEnoughTeams {
        /// Number of teams supplied.
        got: usize,
    },
    /// The game would have no rounds to play.
    #[error("a team game requires at least one round")]
    NoRounds,
}

/// Turn rotation and scoring for a multi-team game.
///
/// Teams play in a fixed cyclic order. The round number only moves when the
/// turn wraps back to the first team, and the game is finished as soon as
/// that wrap pushes the round number past `max_rounds`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamGame {
    teams: Vec<Team>,
    current_team_index: usize,
    round_number: u32,
    max_rounds: u32,
    finished: bool,
}

impl TeamGame {
    /// Start a game with the given teams; incoming scores are discarded.
    pub fn new(teams: Vec<Team>, max_rounds: u32) -> Result<Self, TeamGameError> {
        if teams.len() < MIN_TEAMS {
            return Err(TeamGameError::NotEnoughTeams { got: teams.len() });
        }
        if max_rounds == 0 {
            return Err(TeamGameError::NoRounds);
        }

        let teams = teams
            .into_iter()
            .map(|team| Team { score: 0, ..team })
            .collect();

        Ok(Self {
            teams,
            current_team_index: 0,
            round_number: 1,
            max_rounds,
            finished: false,
        })
    }

    /// Team whose turn it is.
    pub fn current_team(&self) -> &Team {
        &self.teams[self.current_team_index]
    }

    /// All teams in setup order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Index of the team whose turn it is.
    pub fn current_team_index(&self) -> usize {
        self.current_team_index
    }

    /// Current round, starting at 1.
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Number of rounds each team plays.
    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Whether every round has been played.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Credit points to the team whose turn it is.
    pub fn add_score_to_current_team(&mut self, points: u32) {
        let team = &mut self.teams[self.current_team_index];
        team.score = team.score.saturating_add(points);
    }

    /// Hand the turn to the next team, moving to the next round on wrap-around.
    pub fn next_team(&mut self) {
        self.current_team_index = (self.current_team_index + 1) % self.teams.len();

        if self.current_team_index == 0 {
            self.round_number += 1;
            if self.round_number > self.max_rounds {
                self.finished = true;
            }
        }
    }

    /// Every team sharing the top score, in setup order.
    pub fn winning_teams(&self) -> Vec<Team> {
        let Some(best) = self.teams.iter().map(|team| team.score).max() else {
            return Vec::new();
        };

        self.teams
            .iter()
            .filter(|team| team.score == best)
            .cloned()
            .collect()
    }

    /// Teams ordered by descending score; ties keep setup order.
    pub fn team_ranking(&self) -> Vec<Team> {
        let mut ranking = self.teams.clone();
        ranking.sort_by(|a, b| b.score.cmp(&a.score));
        ranking
    }

    /// Zero every score and restart from the first team and round.
    pub fn reset(&mut self) {
        for team in &mut self.teams {
            team.score = 0;
        }
        self.current_team_index = 0;
        self.round_number = 1;
        self.finished = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams(names: &[&str]) -> Vec<Team> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| Team::new(index as u32 + 1, *name, "#E74C3C"))
            .collect()
    }

    fn with_scores(scores: &[u32]) -> TeamGame {
        let names = ["A", "B", "C", "D"];
        let mut game = TeamGame::new(teams(&names[..scores.len()]), 3).unwrap();
        for score in scores {
            game.add_score_to_current_team(*score);
            game.next_team();
        }
        game
    }

    #[test]
    fn initial_state() {
        let mut seeded = teams(&["A", "B"]);
        seeded[1].score = 12;
        let game = TeamGame::new(seeded, 3).unwrap();

        assert_eq!(game.current_team_index(), 0);
        assert_eq!(game.current_team().name, "A");
        assert_eq!(game.round_number(), 1);
        assert_eq!(game.max_rounds(), 3);
        assert!(!game.is_finished());
        assert!(game.teams().iter().all(|team| team.score == 0));
    }

    #[test]
    fn rejects_invalid_setup() {
        assert_eq!(
            TeamGame::new(teams(&["A"]), 3),
            Err(TeamGameError::NotEnoughTeams { got: 1 })
        );
        assert_eq!(
            TeamGame::new(teams(&["A", "B"]), 0),
            Err(TeamGameError::NoRounds)
        );
    }

    #[test]
    fn finishes_after_last_wrap() {
        let mut game = TeamGame::new(teams(&["A", "B"]), 3).unwrap();

        for _ in 0..5 {
            game.next_team();
        }
        assert!(!game.is_finished());
        assert_eq!(game.round_number(), 3);
        assert_eq!(game.current_team().name, "B");

        game.next_team();
        assert!(game.is_finished());
        assert_eq!(game.round_number(), 4);
        assert_eq!(game.current_team_index(), 0);
    }

    #[test]
    fn round_only_moves_on_wrap() {
        let mut game = TeamGame::new(teams(&["A", "B", "C"]), 2).unwrap();
        game.next_team();
        game.next_team();
        assert_eq!(game.round_number(), 1);
        game.next_team();
        assert_eq!(game.round_number(), 2);
        assert_eq!(game.current_team().name, "A");
    }

    #[test]
    fn scores_go_to_current_team() {
        let mut game = TeamGame::new(teams(&["A", "B"]), 3).unwrap();
        game.add_score_to_current_team(3);
        game.next_team();
        game.add_score_to_current_team(4);
        game.add_score_to_current_team(1);

        let scores: Vec<u32> = game.teams().iter().map(|team| team.score).collect();
        assert_eq!(scores, vec![3, 5]);
    }

    #[test]
    fn ranking_is_stable_for_ties() {
        let game = with_scores(&[5, 9, 5]);
        let ranking: Vec<(String, u32)> = game
            .team_ranking()
            .into_iter()
            .map(|team| (team.name, team.score))
            .collect();

        assert_eq!(
            ranking,
            vec![("B".into(), 9), ("A".into(), 5), ("C".into(), 5)]
        );
    }

    #[test]
    fn winners_keep_every_tied_team() {
        let game = with_scores(&[10, 10, 3]);
        let winners: Vec<String> = game
            .winning_teams()
            .into_iter()
            .map(|team| team.name)
            .collect();

        assert_eq!(winners, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn reset_keeps_identities() {
        let mut game = with_scores(&[4, 2]);
        game.next_team();
        game.reset();

        assert_eq!(game.current_team_index(), 0);
        assert_eq!(game.round_number(), 1);
        assert!(!game.is_finished());
        assert_eq!(game.max_rounds(), 3);
        let names: Vec<&str> = game.teams().iter().map(|team| team.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(game.teams().iter().all(|team| team.score == 0));
    }
}
