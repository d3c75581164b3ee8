use tracing::{debug, error};

use super::GameTree;
use crate::engine::Rules;
use crate::game::{GameState, Outcome};

/// Result of one expansion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandResult {
    /// No unexpanded, non-terminal leaf is left.
    Done,
    NotDone,
}

/// Expand every frontier node by exactly one ply.
///
/// Children whose position is decided are stored as terminal leaves and never
/// queued. Returns [`ExpandResult::Done`] once the frontier is empty.
pub fn expand_one_level<R: Rules + ?Sized>(tree: &mut GameTree, rules: &R) -> ExpandResult {
    let frontier = tree.take_frontier();
    if frontier.is_empty() {
        return ExpandResult::Done;
    }

    let mut next_frontier = Vec::new();
    let mut created = 0usize;

    for id in frontier {
        let node = tree.node(id);
        if node.is_terminal() {
            continue;
        }

        let children: Vec<(GameState, Option<Outcome>)> = rules
            .legal_moves(node.state())
            .into_iter()
            .filter_map(|mv| match node.state().apply(mv) {
                Ok(state) => {
                    let outcome = rules.is_terminal(&state);
                    Some((state, outcome))
                }
                Err(e) => {
                    error!(%mv, error = %e, "generated move could not be applied");
                    None
                }
            })
            .collect();

        for (state, outcome) in children {
            let child = tree.add_child(id, state, outcome);
            created += 1;
            if outcome.is_none() {
                next_frontier.push(child);
            }
        }
    }

    let result = if next_frontier.is_empty() {
        ExpandResult::Done
    } else {
        ExpandResult::NotDone
    };
    let frontier_len = next_frontier.len();
    tree.finish_ply(next_frontier);

    debug!(
        variant = rules.name(),
        ply = tree.expanded_plies(),
        created,
        frontier = frontier_len,
        nodes = tree.len(),
        "expanded one level"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{GravityRules, GridRules};
    use crate::game::{Board, BoardMove, Cell};

    fn tic_tac_toe_tree() -> (GameTree, GridRules) {
        let rules = GridRules::tic_tac_toe();
        let tree = GameTree::new(GameState::initial(rules.empty_board()), None);
        (tree, rules)
    }

    #[test]
    fn test_first_ply_creates_one_child_per_cell() {
        let (mut tree, rules) = tic_tac_toe_tree();
        assert_eq!(expand_one_level(&mut tree, &rules), ExpandResult::NotDone);
        assert_eq!(tree.len(), 10);
        assert_eq!(tree.frontier().len(), 9);
        assert_eq!(tree.expanded_plies(), 1);
        for &child in tree.root().children() {
            assert_eq!(tree.node(child).last_move().side, Cell::X);
        }
    }

    #[test]
    fn test_second_ply_counts() {
        let (mut tree, rules) = tic_tac_toe_tree();
        expand_one_level(&mut tree, &rules);
        expand_one_level(&mut tree, &rules);
        assert_eq!(tree.len(), 1 + 9 + 72);
        assert_eq!(tree.frontier().len(), 72);
    }

    #[test]
    fn test_full_tic_tac_toe_enumeration() {
        let (mut tree, rules) = tic_tac_toe_tree();
        let mut calls = 0;
        while expand_one_level(&mut tree, &rules) == ExpandResult::NotDone {
            calls += 1;
            assert!(calls < 9, "expansion should finish within 9 plies");
        }
        // 549,946 nodes in the full game tree, root included
        assert_eq!(tree.len(), 549_946);
        assert!(tree.frontier().is_empty());
        for id in tree.ids() {
            let node = tree.node(id);
            if node.children().is_empty() {
                assert!(node.is_terminal(), "every leaf must be terminal when done");
            }
        }
        // Further calls stay done and do not grow the tree
        assert_eq!(expand_one_level(&mut tree, &rules), ExpandResult::Done);
        assert_eq!(tree.len(), 549_946);
    }

    #[test]
    fn test_terminal_children_are_not_queued() {
        let rules = GridRules::tic_tac_toe();
        let mut board = Board::new(3, 3);
        board.set_cell(0, 0, Cell::X);
        board.set_cell(0, 1, Cell::X);
        board.set_cell(1, 0, Cell::O);
        board.set_cell(1, 1, Cell::O);
        let state = GameState::new(board, BoardMove::new(1, 1, Cell::O));
        let mut tree = GameTree::new(state, None);

        expand_one_level(&mut tree, &rules);

        let winning = tree
            .child_for_move(BoardMove::new(0, 2, Cell::X))
            .unwrap();
        assert_eq!(tree.node(winning).outcome(), Some(Outcome::Winner(Cell::X)));
        assert!(!tree.frontier().contains(&winning));
        assert_eq!(tree.frontier().len(), 4);
    }

    #[test]
    fn test_gravity_plies() {
        let rules = GravityRules::four_in_a_row();
        let mut tree = GameTree::new(GameState::initial(rules.empty_board()), None);
        expand_one_level(&mut tree, &rules);
        expand_one_level(&mut tree, &rules);
        assert_eq!(tree.len(), 1 + 7 + 49);
        assert_eq!(tree.frontier().len(), 49);
    }

    #[test]
    fn test_expanding_terminal_root_is_done() {
        let rules = GridRules::tic_tac_toe();
        let tree_state = GameState::initial(rules.empty_board());
        let mut tree = GameTree::new(tree_state, Some(Outcome::Draw));
        assert_eq!(expand_one_level(&mut tree, &rules), ExpandResult::Done);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.expanded_plies(), 0);
    }
}
