use rand::rngs::StdRng;
use rand::SeedableRng;

use super::difficulty::{Difficulty, SearchConfig};
use super::mcts::{MctsSearcher, SearchReport};
use crate::error::SearchError;
use crate::game::GameState;

/// Anything that can pick a column for the side to move.
pub trait Agent {
    /// Select a legal column for `state.current_player()`.
    fn select_column(&mut self, state: &GameState) -> Result<usize, SearchError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// `StdRng` from a fixed seed for reproducible play, or from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// The computer opponent: an [`MctsSearcher`] at a chosen difficulty.
pub struct MctsAgent {
    searcher: MctsSearcher,
    difficulty: Difficulty,
    rng: StdRng,
    last_report: Option<SearchReport>,
}

impl MctsAgent {
    pub fn new(config: SearchConfig, difficulty: Difficulty, seed: Option<u64>) -> Self {
        MctsAgent {
            searcher: MctsSearcher::new(config),
            difficulty,
            rng: seeded_rng(seed),
            last_report: None,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Statistics from the most recent decision.
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }
}

impl Agent for MctsAgent {
    fn select_column(&mut self, state: &GameState) -> Result<usize, SearchError> {
        let report = self.searcher.search(state, self.difficulty, &mut self.rng)?;
        let column = report.column;
        self.last_report = Some(report);
        Ok(column)
    }

    fn name(&self) -> &str {
        match self.difficulty {
            Difficulty::Easy => "MCTS (easy)",
            Difficulty::Medium => "MCTS (medium)",
            Difficulty::Hard => "MCTS (hard)",
        }
    }
}
