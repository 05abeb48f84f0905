//! Four-in-a-row detection.
//!
//! [`winner`], [`is_draw`] and [`winning_line`] scan the whole board and are
//! the reference predicates. [`wins_through`] only inspects runs through a
//! single cell and is what move application uses after every drop.

use super::board::{Board, Cell, COLS, ROWS};
use super::player::Player;

/// Discs in a row needed to win.
pub const CONNECT: usize = 4;

/// Row/column steps for the four orientations: horizontal, vertical,
/// rising diagonal (/) and falling diagonal (\).
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Derived state of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Ongoing,
    Winner(Player),
    Draw,
}

impl GameOutcome {
    pub fn is_over(self) -> bool {
        self != GameOutcome::Ongoing
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Winner(player) => Some(player),
            _ => None,
        }
    }
}

fn offset(row: usize, col: usize, dr: isize, dc: isize, steps: isize) -> Option<(usize, usize)> {
    let r = row as isize + dr * steps;
    let c = col as isize + dc * steps;
    if (0..ROWS as isize).contains(&r) && (0..COLS as isize).contains(&c) {
        Some((r as usize, c as usize))
    } else {
        None
    }
}

/// Cells of the window of [`CONNECT`] cells starting at `(row, col)`, if it fits.
fn window(row: usize, col: usize, dr: isize, dc: isize) -> Option<[(usize, usize); CONNECT]> {
    let mut cells = [(0, 0); CONNECT];
    for (i, slot) in cells.iter_mut().enumerate() {
        *slot = offset(row, col, dr, dc, i as isize)?;
    }
    Some(cells)
}

/// First player owning a complete group of four, scanning rows bottom-up,
/// then columns, then orientations.
pub fn winner(board: &Board) -> Option<Player> {
    for row in 0..ROWS {
        for col in 0..COLS {
            let cell = board.get(row, col);
            let Some(player) = Player::from_cell(cell) else {
                continue;
            };
            for &(dr, dc) in &DIRECTIONS {
                if let Some(cells) = window(row, col, dr, dc) {
                    if cells.iter().all(|&(r, c)| board.get(r, c) == cell) {
                        return Some(player);
                    }
                }
            }
        }
    }
    None
}

/// Full board with nobody connected. A win on the last free cell is not a draw.
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && winner(board).is_none()
}

pub fn outcome(board: &Board) -> GameOutcome {
    if let Some(player) = winner(board) {
        GameOutcome::Winner(player)
    } else if board.is_full() {
        GameOutcome::Draw
    } else {
        GameOutcome::Ongoing
    }
}

/// Every cell of the first maximal run of four or more for `player`, for
/// highlighting. Empty when `player` has not won.
pub fn winning_line(board: &Board, player: Player) -> Vec<(usize, usize)> {
    let cell = player.to_cell();
    for row in 0..ROWS {
        for col in 0..COLS {
            if board.get(row, col) != cell {
                continue;
            }
            for &(dr, dc) in &DIRECTIONS {
                // Only start counting at the first cell of a run.
                let starts_run = match offset(row, col, dr, dc, -1) {
                    Some((r, c)) => board.get(r, c) != cell,
                    None => true,
                };
                if !starts_run {
                    continue;
                }
                let run: Vec<(usize, usize)> = (0..)
                    .map_while(|step| offset(row, col, dr, dc, step))
                    .take_while(|&(r, c)| board.get(r, c) == cell)
                    .collect();
                if run.len() >= CONNECT {
                    return run;
                }
            }
        }
    }
    Vec::new()
}

/// Length of the run through `(row, col)` along one orientation, counting
/// the cell itself.
fn run_length(board: &Board, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
    let count_side = |sign: isize| {
        (1..)
            .map_while(|step| offset(row, col, dr, dc, sign * step))
            .take_while(|&(r, c)| board.get(r, c) == cell)
            .count()
    };
    1 + count_side(1) + count_side(-1)
}

/// Whether the disc at `(row, col)` is part of a run of four.
pub fn wins_through(board: &Board, row: usize, col: usize) -> bool {
    let cell = board.get(row, col);
    if cell == Cell::Empty {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| run_length(board, row, col, dr, dc, cell) >= CONNECT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    /// Full board where no orientation ever lines up four.
    const DRAWN: &str = "
        YYRRYYR
        RRYYRRY
        YYRRYYR
        RRYYRRY
        YYRRYYR
        RRYYRRY
    ";

    #[test]
    fn test_empty_board_has_no_winner() {
        let board = Board::new();
        assert_eq!(winner(&board), None);
        assert!(!is_draw(&board));
        assert_eq!(outcome(&board), GameOutcome::Ongoing);
        assert!(winning_line(&board, Player::Red).is_empty());
    }

    #[test]
    fn test_horizontal_win() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            YYY....
            YRRRR..
            ",
        );
        assert_eq!(winner(&b), Some(Player::Red));
        assert_eq!(winning_line(&b, Player::Red), vec![(0, 1), (0, 2), (0, 3), (0, 4)]);
        assert!(winning_line(&b, Player::Yellow).is_empty());
        assert!(wins_through(&b, 0, 3));
    }

    #[test]
    fn test_vertical_win() {
        let b = board(
            "
            .......
            .......
            ...Y...
            ...Y...
            ...Y...
            RRRY...
            ",
        );
        assert_eq!(winner(&b), Some(Player::Yellow));
        assert_eq!(winning_line(&b, Player::Yellow), vec![(0, 3), (1, 3), (2, 3), (3, 3)]);
        assert!(wins_through(&b, 3, 3));
    }

    #[test]
    fn test_rising_diagonal_win() {
        let b = board(
            "
            .......
            .......
            ...R...
            ..RY...
            .RYY...
            RYYR...
            ",
        );
        assert_eq!(winner(&b), Some(Player::Red));
        assert_eq!(winning_line(&b, Player::Red), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert!(wins_through(&b, 3, 3));
    }

    #[test]
    fn test_falling_diagonal_win() {
        let b = board(
            "
            .......
            .......
            ...R...
            ...YR..
            ...YYR.
            ..RYYRR
            ",
        );
        assert_eq!(winner(&b), Some(Player::Red));
        assert_eq!(winning_line(&b, Player::Red), vec![(0, 6), (1, 5), (2, 4), (3, 3)]);
        assert!(wins_through(&b, 0, 6));
    }

    #[test]
    fn test_three_is_not_a_win() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            .......
            RRR.YYY
            ",
        );
        assert_eq!(winner(&b), None);
        assert!(!wins_through(&b, 0, 1));
        assert!(!wins_through(&b, 0, 3));
    }

    #[test]
    fn test_winning_line_reports_runs_longer_than_four() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            YYYYY..
            RRRYRRR
            ",
        );
        assert_eq!(winner(&b), Some(Player::Yellow));
        assert_eq!(
            winning_line(&b, Player::Yellow),
            vec![(1, 0), (1, 1), (1, 2), (1, 3), (1, 4)]
        );
        assert!(winning_line(&b, Player::Red).is_empty());
    }

    #[test]
    fn test_full_board_without_run_is_draw() {
        let b = board(DRAWN);
        assert!(b.is_full());
        assert_eq!(winner(&b), None);
        assert!(is_draw(&b));
        assert_eq!(outcome(&b), GameOutcome::Draw);
    }

    #[test]
    fn test_win_takes_precedence_over_draw_on_full_board() {
        // The drawn board with two cells of column 5 flipped to red.
        let won = board(
            "
            YYRRYYR
            RRYYRRY
            YYRRYRR
            RRYYRRY
            YYRRYRR
            RRYYRRY
            ",
        );
        assert!(won.is_full());
        assert_eq!(winner(&won), Some(Player::Red));
        assert!(!is_draw(&won));
        assert_eq!(outcome(&won), GameOutcome::Winner(Player::Red));
        assert_eq!(
            winning_line(&won, Player::Red),
            vec![(0, 5), (1, 5), (2, 5), (3, 5), (4, 5)]
        );
    }

    #[test]
    fn test_winner_is_mirror_invariant() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..300 {
            let mut b = Board::new();
            let mut player = Player::Red;
            loop {
                let legal = b.legal_columns();
                if legal.is_empty() {
                    break;
                }
                let col = legal[rng.random_range(0..legal.len())];
                let row = b.drop_piece(col, player).unwrap();
                assert_eq!(wins_through(&b, row, col), winner(&b).is_some());
                if winner(&b).is_some() {
                    break;
                }
                player = player.other();
            }
            assert_eq!(winner(&b), winner(&b.mirrored()));
            assert_eq!(is_draw(&b), is_draw(&b.mirrored()));
        }
    }
}
