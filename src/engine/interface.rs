use tracing::{debug, info, warn};

use super::{GravityRules, GridRules, Rules};
use crate::error::MoveError;
use crate::game::{Board, BoardMove, Cell, GameState, Outcome};
use crate::tree::{self, Evaluation, ExpandResult, GameTree};

/// Size of the explored tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub frontier: usize,
    pub expanded_plies: usize,
    pub max_depth: Option<usize>,
}

/// Engine facade for one game variant.
///
/// Holds the live game position as the root of an incrementally expanded
/// tree. None of the methods may run while another one is in progress; the
/// host serialises calls between expansion steps.
pub struct GameInterface<R: Rules> {
    rules: R,
    tree: GameTree,
    max_depth: Option<usize>,
}

/// Fixed 3×3 three-in-a-row engine.
pub type T3GameInterface = GameInterface<GridRules>;

/// Gravity four-in-a-row engine.
pub type FiarGameInterface = GameInterface<GravityRules>;

impl<R: Rules> GameInterface<R> {
    /// Engine on an empty board that expands until the whole tree is known.
    pub fn new(rules: R) -> Self {
        Self::with_max_depth(rules, None)
    }

    /// Engine that stops expanding `max_depth` plies below the live position.
    pub fn with_max_depth(rules: R, max_depth: Option<usize>) -> Self {
        let state = GameState::initial(rules.empty_board());
        Self::from_state(rules, state, max_depth)
    }

    /// Engine rooted at an arbitrary position.
    pub fn from_state(rules: R, state: GameState, max_depth: Option<usize>) -> Self {
        let outcome = rules.is_terminal(&state);
        info!(variant = rules.name(), ?max_depth, "initialized game interface");
        GameInterface {
            tree: GameTree::new(state, outcome),
            rules,
            max_depth,
        }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn tree(&self) -> &GameTree {
        &self.tree
    }

    /// Live game position.
    pub fn state(&self) -> &GameState {
        self.tree.root().state()
    }

    pub fn board(&self) -> &Board {
        self.state().board()
    }

    pub fn side_to_move(&self) -> Cell {
        self.state().side()
    }

    /// Winner or draw of the live position, `None` while the game runs.
    pub fn outcome(&self) -> Option<Outcome> {
        self.tree.root().outcome()
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            nodes: self.tree.len(),
            frontier: self.tree.frontier().len(),
            expanded_plies: self.tree.expanded_plies(),
            max_depth: self.max_depth,
        }
    }

    /// Expand the tree by one ply. `Done` once every leaf is terminal or the
    /// depth cap is reached.
    pub fn expand_one_level(&mut self) -> ExpandResult {
        if let Some(max_depth) = self.max_depth {
            if self.tree.expanded_plies() >= max_depth {
                debug!(max_depth, "expansion depth cap reached");
                return ExpandResult::Done;
            }
        }

        let result = tree::expand_one_level(&mut self.tree, &self.rules);
        if result == ExpandResult::Done {
            info!(
                variant = self.rules.name(),
                nodes = self.tree.len(),
                plies = self.tree.expanded_plies(),
                "expansion done"
            );
        }
        result
    }

    /// Advance the live position by `mv`. Returns false and changes nothing
    /// if the move is illegal.
    pub fn track_move(&mut self, mv: BoardMove) -> bool {
        match self.try_track_move(mv) {
            Ok(()) => true,
            Err(e) => {
                warn!(%mv, error = %e, "could not track move");
                false
            }
        }
    }

    /// Like [`GameInterface::track_move`] but reports why a move was refused.
    ///
    /// An already expanded child is reused together with its subtree; any
    /// other branch is discarded.
    pub fn try_track_move(&mut self, mv: BoardMove) -> Result<(), MoveError> {
        let next = self.rules.apply(self.state(), mv)?;

        match self.tree.child_for_move(mv) {
            Some(child) => {
                self.tree.reroot(child);
                info!(%mv, nodes = self.tree.len(), "tracked move into expanded subtree");
            }
            None => {
                let outcome = self.rules.is_terminal(&next);
                self.tree = GameTree::new(next, outcome);
                info!(%mv, "tracked move ahead of expansion");
            }
        }

        if let Some(outcome) = self.outcome() {
            info!(?outcome, "game over");
        }
        Ok(())
    }

    /// Score every move of the side to move over the tree explored so far.
    ///
    /// An unexpanded live position is expanded by one ply first so that a
    /// move can always be offered while the game runs.
    pub fn evaluate(&mut self) -> Result<Evaluation, MoveError> {
        if self.is_game_over() {
            return Err(MoveError::NoLegalMoves);
        }
        if self.tree.root().children().is_empty() {
            tree::expand_one_level(&mut self.tree, &self.rules);
        }
        tree::evaluate(&self.tree)
    }

    /// Best move for the side to move. Does not play it.
    pub fn get_best_move(&mut self) -> Result<BoardMove, MoveError> {
        let evaluation = self.evaluate()?;
        info!(
            best_move = %evaluation.best_move,
            score = evaluation.score,
            plies = self.tree.expanded_plies(),
            "identified best move"
        );
        Ok(evaluation.best_move)
    }

    /// Pick the best move and track it in one step.
    pub fn play_best_move(&mut self) -> Result<BoardMove, MoveError> {
        let best_move = self.get_best_move()?;
        self.try_track_move(best_move)?;
        Ok(best_move)
    }

    /// Discard the tree and start over from an empty board.
    pub fn reset(&mut self) {
        info!(variant = self.rules.name(), "resetting game interface");
        let state = GameState::initial(self.rules.empty_board());
        let outcome = self.rules.is_terminal(&state);
        self.tree = GameTree::new(state, outcome);
    }
}

impl GameInterface<GridRules> {
    pub fn tic_tac_toe() -> Self {
        Self::new(GridRules::tic_tac_toe())
    }
}

impl GameInterface<GravityRules> {
    pub fn four_in_a_row() -> Self {
        Self::new(GravityRules::four_in_a_row())
    }
}

impl<R: Rules + Default> Default for GameInterface<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}
