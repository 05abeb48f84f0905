mod agent;
mod difficulty;
pub mod mcts;
mod random;

pub use agent::{seeded_rng, Agent, MctsAgent};
pub use difficulty::{Difficulty, LevelConfig, SearchConfig};
pub use mcts::{ColumnStats, MctsSearcher, SearchReport};
pub use random::RandomAgent;
