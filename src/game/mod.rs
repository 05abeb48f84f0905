//! Core Connect Four rules: the board, the two players, four-in-a-row
//! detection and the move-by-move game state.

mod board;
mod player;
pub mod rules;
mod state;

pub use board::{Board, Cell, COLS, ROWS};
pub use player::Player;
pub use rules::GameOutcome;
pub use state::GameState;
