//! Human-vs-computer game flow: turn order, undo and restart around a
//! [`GameState`] and an [`MctsAgent`].

use tracing::info;

use crate::ai::{Agent, Difficulty, MctsAgent, SearchReport};
use crate::config::AppConfig;
use crate::error::{MoveError, SessionError};
use crate::game::{GameOutcome, GameState, Player};

pub struct GameSession {
    state: GameState,
    human: Player,
    computer: MctsAgent,
    /// States before each human move, newest last.
    undo_stack: Vec<GameState>,
}

impl GameSession {
    pub fn new(config: &AppConfig) -> Self {
        let human = if config.game.human_first {
            Player::Red
        } else {
            Player::Yellow
        };
        GameSession {
            state: GameState::initial(),
            human,
            computer: MctsAgent::new(
                config.search.clone(),
                config.game.difficulty,
                config.game.seed,
            ),
            undo_stack: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn human(&self) -> Player {
        self.human
    }

    pub fn computer(&self) -> Player {
        self.human.other()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.computer.difficulty()
    }

    /// Takes effect from the computer's next move.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!(%difficulty, "difficulty changed");
        self.computer.set_difficulty(difficulty);
    }

    pub fn outcome(&self) -> GameOutcome {
        self.state.outcome()
    }

    pub fn is_human_turn(&self) -> bool {
        !self.state.is_terminal() && self.state.current_player() == self.human
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.state.is_terminal() && self.state.current_player() == self.computer()
    }

    /// Cells to highlight once someone has connected four.
    pub fn winning_line(&self) -> Vec<(usize, usize)> {
        self.state.winning_line()
    }

    /// Statistics behind the computer's latest move.
    pub fn last_search(&self) -> Option<&SearchReport> {
        self.computer.last_report()
    }

    /// Drop the human's disc in `column`; returns the landing row.
    pub fn play_human(&mut self, column: usize) -> Result<usize, SessionError> {
        if !self.is_human_turn() {
            return Err(if self.state.is_terminal() {
                MoveError::GameOver.into()
            } else {
                SessionError::NotHumanTurn
            });
        }
        let before = self.state;
        self.state.apply_move_mut(column)?;
        self.undo_stack.push(before);
        self.log_move(self.human, column);
        Ok(self.landing_row())
    }

    /// Let the computer choose and play its column; returns that column.
    pub fn play_computer(&mut self) -> Result<usize, SessionError> {
        if !self.is_computer_turn() {
            return Err(if self.state.is_terminal() {
                MoveError::GameOver.into()
            } else {
                SessionError::NotComputerTurn
            });
        }
        let column = self.computer.select_column(&self.state)?;
        self.state.apply_move_mut(column)?;
        self.log_move(self.computer(), column);
        Ok(column)
    }

    /// Take back the last human move together with the computer reply that
    /// followed it. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.state = previous;
                info!("undid last move pair");
                true
            }
            None => false,
        }
    }

    pub fn restart(&mut self) {
        self.state = GameState::initial();
        self.undo_stack.clear();
        info!("new game");
    }

    fn landing_row(&self) -> usize {
        self.state.last_move().map_or(0, |(row, _)| row)
    }

    fn log_move(&self, player: Player, column: usize) {
        info!(%player, column, "move played");
        match self.state.outcome() {
            GameOutcome::Winner(winner) => info!(%winner, "game won"),
            GameOutcome::Draw => info!("game drawn"),
            GameOutcome::Ongoing => {}
        }
    }
}
