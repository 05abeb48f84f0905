use rand::Rng;

use crate::game::{GameOutcome, GameState, Player};

/// One position in the search tree.
pub(super) struct Node {
    pub state: GameState,
    pub parent: Option<usize>,
    /// Column played from the parent to reach this node.
    pub column: Option<usize>,
    pub children: Vec<usize>,
    /// Legal columns not yet expanded into children.
    pub untried: Vec<usize>,
    pub visits: u32,
    /// Accumulated reward from the point of view of the player who moved
    /// into this node.
    pub score: f64,
}

impl Node {
    fn new(state: GameState, parent: Option<usize>, column: Option<usize>) -> Self {
        Node {
            untried: state.legal_actions(),
            state,
            parent,
            column,
            children: Vec::new(),
            visits: 0,
            score: 0.0,
        }
    }

    /// The player whose disc produced this position.
    pub fn mover(&self) -> Player {
        self.state.current_player().other()
    }

    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score / self.visits as f64
        }
    }
}

/// Arena-backed tree; index 0 is the root. Lives for a single decision.
pub(super) struct SearchTree {
    nodes: Vec<Node>,
}

pub(super) const ROOT: usize = 0;

impl SearchTree {
    pub fn new(root: GameState) -> Self {
        let mut nodes = Vec::with_capacity(1024);
        nodes.push(Node::new(root, None, None));
        SearchTree { nodes }
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    /// Descend from the root by UCB1 until reaching a node that still has
    /// untried columns or is terminal.
    pub fn select(&self, exploration: f64) -> usize {
        let mut current = ROOT;
        loop {
            let node = &self.nodes[current];
            if node.state.is_terminal() || !node.untried.is_empty() || node.children.is_empty() {
                return current;
            }
            current = self.best_child(current, exploration);
        }
    }

    /// Child of `idx` with the highest UCB1 score. Children are always
    /// visited once on creation, so the formula never divides by zero.
    fn best_child(&self, idx: usize, exploration: f64) -> usize {
        let parent = &self.nodes[idx];
        let log_parent = (parent.visits.max(1) as f64).ln();

        let mut best = parent.children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &child_idx in &parent.children {
            let child = &self.nodes[child_idx];
            let visits = child.visits.max(1) as f64;
            let ucb = child.score / visits + exploration * (log_parent / visits).sqrt();
            if ucb > best_score {
                best_score = ucb;
                best = child_idx;
            }
        }
        best
    }

    /// Add one child for a random untried column of `idx` and return it.
    /// Returns `idx` itself when nothing is left to expand.
    pub fn expand<R: Rng + ?Sized>(&mut self, idx: usize, rng: &mut R) -> usize {
        let node = &mut self.nodes[idx];
        if node.untried.is_empty() {
            return idx;
        }
        let pick = rng.random_range(0..node.untried.len());
        let column = node.untried.swap_remove(pick);
        let Ok(child_state) = node.state.apply_move(column) else {
            return idx;
        };

        let child_idx = self.nodes.len();
        self.nodes.push(Node::new(child_state, Some(idx), Some(column)));
        self.nodes[idx].children.push(child_idx);
        child_idx
    }

    /// Credit `outcome` to every node from `leaf` up to the root.
    pub fn backup(&mut self, leaf: usize, outcome: GameOutcome) {
        let mut current = Some(leaf);
        while let Some(idx) = current {
            let node = &mut self.nodes[idx];
            let gained = reward(outcome, node.mover());
            node.visits += 1;
            node.score += gained;
            current = node.parent;
        }
    }

    /// `(column, visits, mean score)` for each root child, sorted by column.
    pub fn root_stats(&self) -> Vec<(usize, u32, f64)> {
        let mut stats: Vec<(usize, u32, f64)> = self.nodes[ROOT]
            .children
            .iter()
            .filter_map(|&idx| {
                let child = &self.nodes[idx];
                child.column.map(|col| (col, child.visits, child.mean_score()))
            })
            .collect();
        stats.sort_by_key(|&(col, _, _)| col);
        stats
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Win 1, draw 0.5, loss 0 for `player`.
pub(super) fn reward(outcome: GameOutcome, player: Player) -> f64 {
    match outcome {
        GameOutcome::Winner(winner) if winner == player => 1.0,
        GameOutcome::Winner(_) => 0.0,
        GameOutcome::Draw | GameOutcome::Ongoing => 0.5,
    }
}

/// Play uniformly random legal moves until the game ends.
pub(super) fn rollout<R: Rng + ?Sized>(mut state: GameState, rng: &mut R) -> GameOutcome {
    while !state.is_terminal() {
        let legal = state.legal_actions();
        let column = legal[rng.random_range(0..legal.len())];
        if state.apply_move_mut(column).is_err() {
            break;
        }
    }
    state.outcome()
}
