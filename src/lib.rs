//! # Connect Four MCTS
//!
//! Connect Four rules plus a computer opponent driven by Monte Carlo Tree
//! Search with per-difficulty playout budgets.
//!
//! ## Modules
//!
//! - [`game`] — Board, players, four-in-a-row detection, game state
//! - [`ai`] — MCTS search engine, difficulty levels, agents
//! - [`session`] — Human-vs-computer turn order with undo and restart
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod session;
