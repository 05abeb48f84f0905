//! Monte Carlo Tree Search over Connect Four positions.
//!
//! Every decision builds a fresh tree, runs the playout budget of the chosen
//! [`Difficulty`] (selection, expansion, random rollout, backpropagation) and
//! answers with the most-visited root child. Randomness comes only from the
//! caller's RNG, so a seeded generator gives reproducible moves.

mod tree;

use rand::Rng;
use tracing::{debug, trace};

use self::tree::{rollout, SearchTree, ROOT};
use super::difficulty::{Difficulty, SearchConfig};
use crate::error::SearchError;
use crate::game::{Board, GameState, Player};

/// Statistics for one root move after a search.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ColumnStats {
    pub column: usize,
    pub visits: u32,
    /// Average reward for the searching player (win 1, draw 0.5, loss 0).
    pub mean_score: f64,
}

/// Result of one search: the chosen column and the root statistics behind it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SearchReport {
    pub column: usize,
    pub player: Player,
    pub difficulty: Difficulty,
    pub simulations: usize,
    pub columns: Vec<ColumnStats>,
}

#[derive(Debug, Clone, Default)]
pub struct MctsSearcher {
    config: SearchConfig,
}

impl MctsSearcher {
    pub fn new(config: SearchConfig) -> Self {
        MctsSearcher { config }
    }

    /// Pick a column for `ai_player` on `board`.
    pub fn choose_move<R: Rng + ?Sized>(
        &self,
        board: &Board,
        ai_player: Player,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<usize, SearchError> {
        let state = GameState::from_board(*board, ai_player);
        self.search(&state, difficulty, rng).map(|report| report.column)
    }

    /// Run a full search for the side to move in `state`.
    ///
    /// A single legal column is returned straight away. A finished game or a
    /// full board yields [`SearchError::NoLegalMove`].
    pub fn search<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<SearchReport, SearchError> {
        let legal = state.legal_actions();
        let player = state.current_player();

        match legal.as_slice() {
            [] => return Err(SearchError::NoLegalMove),
            [only] => {
                debug!(column = *only, %player, "single legal column, skipping search");
                return Ok(SearchReport {
                    column: *only,
                    player,
                    difficulty,
                    simulations: 0,
                    columns: Vec::new(),
                });
            }
            _ => {}
        }

        let level = self.config.level(difficulty);
        let mut tree = SearchTree::new(*state);

        for _ in 0..level.simulations {
            let selected = tree.select(level.exploration);
            let leaf = tree.expand(selected, rng);
            let outcome = rollout(tree.node(leaf).state, rng);
            tree.backup(leaf, outcome);
        }

        let columns: Vec<ColumnStats> = tree
            .root_stats()
            .into_iter()
            .map(|(column, visits, mean_score)| ColumnStats {
                column,
                visits,
                mean_score,
            })
            .collect();

        // Most visits wins; stats are sorted by column, so the strict
        // comparison keeps the lowest column on ties.
        let mut best: Option<&ColumnStats> = None;
        for stats in &columns {
            if best.map_or(true, |b| stats.visits > b.visits) {
                best = Some(stats);
            }
        }
        let column = best.map(|b| b.column).ok_or(SearchError::NoLegalMove)?;

        for stats in &columns {
            trace!(
                column = stats.column,
                visits = stats.visits,
                mean = stats.mean_score,
                "root child"
            );
        }
        debug!(
            %player,
            %difficulty,
            simulations = level.simulations,
            root_visits = tree.node(ROOT).visits,
            column,
            "search finished"
        );

        Ok(SearchReport {
            column,
            player,
            difficulty,
            simulations: level.simulations,
            columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::LevelConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn single_legal_column_is_returned_without_search() {
        // Drawn pattern with the top of column 4 still open.
        let b = board(
            "
            YYRR.YR
            RRYYRRY
            YYRRYYR
            RRYYRRY
            YYRRYYR
            RRYYRRY
            ",
        );
        let searcher = MctsSearcher::default();
        for difficulty in Difficulty::ALL {
            for seed in 0..5 {
                for player in Player::ALL {
                    let col = searcher
                        .choose_move(&b, player, difficulty, &mut seeded(seed))
                        .unwrap();
                    assert_eq!(col, 4);
                }
            }
        }
        let state = GameState::from_board(b, Player::Yellow);
        let report = searcher.search(&state, Difficulty::Hard, &mut seeded(0)).unwrap();
        assert_eq!(report.simulations, 0);
        assert!(report.columns.is_empty());
    }

    #[test]
    fn no_legal_move_is_an_error() {
        let full = board(
            "
            YYRRYYR
            RRYYRRY
            YYRRYYR
            RRYYRRY
            YYRRYYR
            RRYYRRY
            ",
        );
        let searcher = MctsSearcher::default();
        assert_eq!(
            searcher.choose_move(&full, Player::Red, Difficulty::Easy, &mut seeded(0)),
            Err(SearchError::NoLegalMove)
        );

        let won = board(
            "
            .......
            .......
            .......
            .......
            YYY....
            RRRR...
            ",
        );
        assert_eq!(
            searcher.choose_move(&won, Player::Yellow, Difficulty::Easy, &mut seeded(0)),
            Err(SearchError::NoLegalMove)
        );
    }

    #[test]
    fn same_seed_gives_same_move() {
        let b = board(
            "
            .......
            .......
            .......
            ...Y...
            ..RR...
            .YRYR..
            ",
        );
        let searcher = MctsSearcher::default();
        for difficulty in Difficulty::ALL {
            let state = GameState::from_board(b, Player::Yellow);
            let first = searcher.search(&state, difficulty, &mut seeded(42)).unwrap();
            let second = searcher.search(&state, difficulty, &mut seeded(42)).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn empty_board_hard_opens_in_the_centre() {
        // Recorded for seed 2024.
        let searcher = MctsSearcher::default();
        let col = searcher
            .choose_move(&Board::new(), Player::Yellow, Difficulty::Hard, &mut seeded(2024))
            .unwrap();
        assert_eq!(col, 3);
    }

    #[test]
    fn report_accounts_for_every_simulation() {
        let searcher = MctsSearcher::default();
        let state = GameState::initial();
        let report = searcher.search(&state, Difficulty::Medium, &mut seeded(5)).unwrap();
        assert_eq!(report.simulations, 2_500);
        assert_eq!(report.columns.len(), 7);
        let total: u32 = report.columns.iter().map(|c| c.visits).sum();
        assert_eq!(total as usize, report.simulations);
        let best = report.columns.iter().map(|c| c.visits).max().unwrap();
        let chosen = report.columns.iter().find(|c| c.column == report.column).unwrap();
        assert_eq!(chosen.visits, best);
        assert!(report.columns.iter().all(|c| (0.0..=1.0).contains(&c.mean_score)));
    }

    #[test]
    fn ties_go_to_lowest_column() {
        // Exactly one playout per root child: all visit counts equal 1.
        let config = SearchConfig {
            easy: LevelConfig {
                simulations: 7,
                exploration: 1.0,
            },
            ..SearchConfig::default()
        };
        let searcher = MctsSearcher::new(config);
        for seed in 0..10 {
            let report = searcher
                .search(&GameState::initial(), Difficulty::Easy, &mut seeded(seed))
                .unwrap();
            assert!(report.columns.iter().all(|c| c.visits == 1));
            assert_eq!(report.column, 0);
        }
    }

    #[test]
    fn hard_blocks_open_three() {
        // Red threatens to complete the bottom row at column 3.
        let b = board(
            "
            .......
            .......
            .......
            .......
            ......Y
            RRR...Y
            ",
        );
        let searcher = MctsSearcher::default();
        for seed in [1, 2, 3] {
            let col = searcher
                .choose_move(&b, Player::Yellow, Difficulty::Hard, &mut seeded(seed))
                .unwrap();
            assert_eq!(col, 3, "seed {seed}: expected a block at column 3");
        }
    }

    #[test]
    fn hard_prefers_win_over_block() {
        // Red still threatens column 3, but Yellow can finish column 6 first.
        let b = board(
            "
            .......
            .......
            .......
            ......Y
            ......Y
            RRR..RY
            ",
        );
        let searcher = MctsSearcher::default();
        for seed in [1, 2, 3] {
            let col = searcher
                .choose_move(&b, Player::Yellow, Difficulty::Hard, &mut seeded(seed))
                .unwrap();
            assert_eq!(col, 6, "seed {seed}: expected the winning move at column 6");
        }
    }

    #[test]
    fn takes_immediate_win_for_either_colour() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            YYY....
            RRR...Y
            ",
        );
        let searcher = MctsSearcher::default();
        // Red to move wins at column 3 on the bottom row.
        let col = searcher
            .choose_move(&b, Player::Red, Difficulty::Hard, &mut seeded(9))
            .unwrap();
        assert_eq!(col, 3);
    }
}
