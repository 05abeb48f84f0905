use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, DifficultyParseError};

/// Strength setting offered to the player.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "beginner")]
    Easy,
    #[default]
    #[serde(alias = "intermediate")]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "beginner" => Ok(Difficulty::Easy),
            "medium" | "intermediate" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(DifficultyParseError(s.to_string())),
        }
    }
}

/// Search budget for one difficulty level.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LevelConfig {
    /// Playouts per decision.
    pub simulations: usize,
    /// UCB1 exploration constant.
    pub exploration: f64,
}

impl LevelConfig {
    fn validate(&self, level: Difficulty) -> Result<(), ConfigError> {
        if self.simulations == 0 {
            return Err(ConfigError::Validation(format!(
                "search.{level}.simulations must be >= 1"
            )));
        }
        if !self.exploration.is_finite() || self.exploration <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "search.{level}.exploration must be finite and > 0"
            )));
        }
        Ok(())
    }
}

/// Per-difficulty search budgets.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub easy: LevelConfig,
    pub medium: LevelConfig,
    pub hard: LevelConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            // Few playouts and a wide exploration term keep Easy beatable.
            easy: LevelConfig {
                simulations: 50,
                exploration: 2.0,
            },
            medium: LevelConfig {
                simulations: 2_500,
                exploration: std::f64::consts::SQRT_2,
            },
            hard: LevelConfig {
                simulations: 5_000,
                exploration: std::f64::consts::SQRT_2,
            },
        }
    }
}

impl SearchConfig {
    pub fn level(&self, difficulty: Difficulty) -> &LevelConfig {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for difficulty in Difficulty::ALL {
            self.level(difficulty).validate(difficulty)?;
        }
        Ok(())
    }
}
