use rand::rngs::StdRng;
use rand::Rng;

use super::agent::{seeded_rng, Agent};
use crate::error::SearchError;
use crate::game::GameState;

/// An agent that selects uniformly at random from legal actions.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent { rng: seeded_rng(None) }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: seeded_rng(Some(seed)),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_column(&mut self, state: &GameState) -> Result<usize, SearchError> {
        let actions = state.legal_actions();
        if actions.is_empty() {
            return Err(SearchError::NoLegalMove);
        }
        let idx = self.rng.random_range(0..actions.len());
        Ok(actions[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}
