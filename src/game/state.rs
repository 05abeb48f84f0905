use super::board::{Board, COLS};
use super::player::Player;
use super::rules::{self, GameOutcome};
use crate::error::{MoveError, ReplayError};

/// Board plus the side to move. The outcome is derived on construction and
/// refreshed incrementally after each move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    last_move: Option<(usize, usize)>,
    outcome: GameOutcome,
}

impl GameState {
    /// Empty board, Red to move
    pub fn initial() -> Self {
        GameState::from_board(Board::new(), Player::Red)
    }

    /// Wrap an arbitrary position. The outcome comes from a full-board scan.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        GameState {
            board,
            current_player: to_move,
            last_move: None,
            outcome: rules::outcome(&board),
        }
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// `(row, col)` of the disc placed by the last [`GameState::apply_move`].
    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_over()
    }

    /// Legal columns, empty once the game is decided.
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_columns()
    }

    /// Replay 1-based column digits such as `"4453"` from the empty board.
    /// Whitespace between moves is ignored.
    pub fn from_moves(moves: &str) -> Result<GameState, ReplayError> {
        let mut state = GameState::initial();
        for (i, ch) in moves.chars().filter(|c| !c.is_whitespace()).enumerate() {
            let index = i + 1;
            let column = match ch.to_digit(10) {
                Some(d) if (1..=COLS as u32).contains(&d) => d as usize - 1,
                _ => return Err(ReplayError::BadColumn { index, ch }),
            };
            state
                .apply_move_mut(column)
                .map_err(|source| ReplayError::Move {
                    index,
                    column: column + 1,
                    source,
                })?;
        }
        Ok(state)
    }

    /// Apply a move and return the new state
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = *self;
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply a move in place. Only runs through the new disc are checked.
    pub fn apply_move_mut(&mut self, column: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let row = self.board.drop_piece(column, self.current_player)?;

        if rules::wins_through(&self.board, row, column) {
            self.outcome = GameOutcome::Winner(self.current_player);
        } else if self.board.is_full() {
            self.outcome = GameOutcome::Draw;
        }

        self.last_move = Some((row, column));
        self.current_player = self.current_player.other();
        Ok(())
    }

    /// Winning cells for highlighting, empty unless the game was won.
    pub fn winning_line(&self) -> Vec<(usize, usize)> {
        match self.outcome {
            GameOutcome::Winner(player) => rules::winning_line(&self.board, player),
            _ => Vec::new(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
