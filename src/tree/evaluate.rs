use super::GameTree;
use crate::error::MoveError;
use crate::game::{BoardMove, Outcome};

pub const WIN_SCORE: i32 = 1;
pub const DRAW_SCORE: i32 = 0;
pub const LOSS_SCORE: i32 = -1;

/// Negamax scores of the root's moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub best_move: BoardMove,
    /// Score of `best_move` for the side to move at the root.
    pub score: i32,
    /// Every root move with its score, in enumeration order.
    pub moves: Vec<(BoardMove, i32)>,
}

/// Score every node from the point of view of the side to move there.
///
/// Terminal nodes score a loss (the previous mover completed a line) or a
/// draw. Unexpanded leaves score as a draw until more plies are known.
pub fn negamax_scores(tree: &GameTree) -> Vec<i32> {
    let mut scores = vec![DRAW_SCORE; tree.len()];

    // Children are stored after their parents, so a reverse sweep sees every
    // child before its parent.
    for id in tree.ids().rev() {
        let node = tree.node(id);
        scores[id.index()] = match node.outcome() {
            Some(Outcome::Winner(winner)) if winner == node.state().side() => WIN_SCORE,
            Some(Outcome::Winner(_)) => LOSS_SCORE,
            Some(Outcome::Draw) => DRAW_SCORE,
            None => node
                .children()
                .iter()
                .map(|child| -scores[child.index()])
                .max()
                .unwrap_or(DRAW_SCORE),
        };
    }

    scores
}

/// Pick the root move with the best negamax score. Ties go to the move
/// enumerated first.
pub fn evaluate(tree: &GameTree) -> Result<Evaluation, MoveError> {
    let root = tree.root();
    if root.is_terminal() || root.children().is_empty() {
        return Err(MoveError::NoLegalMoves);
    }

    let scores = negamax_scores(tree);
    let moves: Vec<(BoardMove, i32)> = root
        .children()
        .iter()
        .map(|&child| (tree.node(child).last_move(), -scores[child.index()]))
        .collect();

    let mut best = moves[0];
    for &(mv, score) in &moves[1..] {
        if score > best.1 {
            best = (mv, score);
        }
    }

    Ok(Evaluation {
        best_move: best.0,
        score: best.1,
        moves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{GravityRules, GridRules, Rules};
    use crate::game::{Board, Cell, Coords, GameState};
    use crate::tree::{expand_one_level, ExpandResult};

    fn expand_fully<R: Rules>(tree: &mut GameTree, rules: &R) {
        while expand_one_level(tree, rules) == ExpandResult::NotDone {}
    }

    fn tree_from(cells: &[(u32, u32, Cell)], last: BoardMove) -> GameTree {
        let mut board = Board::new(3, 3);
        for &(row, col, cell) in cells {
            assert!(board.set_cell(row, col, cell));
        }
        GameTree::new(GameState::new(board, last), None)
    }

    #[test]
    fn test_unexpanded_root_has_no_moves() {
        let tree = GameTree::new(GameState::initial(Board::new(3, 3)), None);
        assert_eq!(evaluate(&tree), Err(MoveError::NoLegalMoves));
    }

    #[test]
    fn test_completes_three_in_a_row() {
        let rules = GridRules::tic_tac_toe();
        let mut tree = tree_from(
            &[(0, 0, Cell::X), (0, 1, Cell::X)],
            BoardMove::new(2, 2, Cell::O),
        );
        expand_fully(&mut tree, &rules);

        let eval = evaluate(&tree).unwrap();
        assert_eq!(eval.best_move.coords, Coords::new(0, 2));
        assert_eq!(eval.best_move.side, Cell::X);
        assert_eq!(eval.score, WIN_SCORE);
    }

    #[test]
    fn test_blocks_opponent_line() {
        let rules = GridRules::tic_tac_toe();
        // XX.
        // .O.
        // ...
        let mut tree = tree_from(
            &[(0, 0, Cell::X), (0, 1, Cell::X), (1, 1, Cell::O)],
            BoardMove::new(0, 1, Cell::X),
        );
        expand_fully(&mut tree, &rules);

        let eval = evaluate(&tree).unwrap();
        assert_eq!(eval.best_move, BoardMove::new(0, 2, Cell::O));
        assert_eq!(eval.score, DRAW_SCORE);
        let losing = eval
            .moves
            .iter()
            .filter(|&&(_, score)| score == LOSS_SCORE)
            .count();
        assert_eq!(losing, eval.moves.len() - 1);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let rules = GridRules::tic_tac_toe();
        let mut tree = GameTree::new(GameState::initial(rules.empty_board()), None);
        expand_fully(&mut tree, &rules);

        let eval = evaluate(&tree).unwrap();
        assert_eq!(eval.score, DRAW_SCORE);
        assert_eq!(eval.moves.len(), 9);
        assert!(eval.moves.iter().all(|&(_, score)| score == DRAW_SCORE));
        // Ties go to the first enumerated move
        assert_eq!(eval.best_move, BoardMove::new(0, 0, Cell::X));
    }

    #[test]
    fn test_partial_tree_scores_unknown_as_draw() {
        let rules = GridRules::tic_tac_toe();
        let mut tree = GameTree::new(GameState::initial(rules.empty_board()), None);
        expand_one_level(&mut tree, &rules);

        let scores = negamax_scores(&tree);
        assert!(scores.iter().all(|&s| s == DRAW_SCORE));
    }

    #[test]
    fn test_gravity_takes_vertical_win() {
        let rules = GravityRules::new(4, 4, 3);
        let mut state = GameState::initial(rules.empty_board());
        // X stacks two in column 0, O plays column 3 twice
        for col in [0, 3, 0, 3] {
            let coords = state.board().first_empty_in_column(col).unwrap();
            let side = state.side();
            state = rules.apply(&state, BoardMove { coords, side }).unwrap();
        }
        let mut tree = GameTree::new(state, None);
        expand_one_level(&mut tree, &rules);
        expand_one_level(&mut tree, &rules);

        let eval = evaluate(&tree).unwrap();
        assert_eq!(eval.best_move, BoardMove::new(1, 0, Cell::X));
        assert_eq!(eval.score, WIN_SCORE);
    }
}
