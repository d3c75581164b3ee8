use super::{Board, BoardMove, Cell};
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Cell),
    Draw,
}

/// Immutable position snapshot: the board and the move that produced it.
///
/// Equal boards reached through different move orders are distinct states,
/// so there is no `PartialEq`.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    last_move: BoardMove,
}

impl GameState {
    pub fn new(board: Board, last_move: BoardMove) -> Self {
        GameState { board, last_move }
    }

    /// Create initial game state on `board`, X to move
    pub fn initial(board: Board) -> Self {
        GameState::new(board, BoardMove::opening())
    }

    /// Side to move next
    pub fn side(&self) -> Cell {
        self.last_move.side.other()
    }

    pub fn last_move(&self) -> BoardMove {
        self.last_move
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Win on a line through the last move, or a draw on a full board.
    pub fn outcome(&self, run_length: u32) -> Option<Outcome> {
        match self.board.line_winner(&self.last_move.coords, run_length) {
            Cell::Empty if self.board.is_full() => Some(Outcome::Draw),
            Cell::Empty => None,
            winner => Some(Outcome::Winner(winner)),
        }
    }

    /// Apply a move and return new state (immutable)
    pub fn apply(&self, mv: BoardMove) -> Result<GameState, MoveError> {
        let mut board = self.board.clone();
        board.try_set_cell(mv.coords.row, mv.coords.col, mv.side)?;
        Ok(GameState::new(board, mv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::initial(Board::new(3, 3));
        assert_eq!(state.side(), Cell::X);
        assert_eq!(state.outcome(3), None);
    }

    #[test]
    fn test_apply_move() {
        let state = GameState::initial(Board::new(3, 3));
        let next = state.apply(BoardMove::new(1, 1, Cell::X)).unwrap();

        assert_eq!(next.side(), Cell::O);
        assert_eq!(next.board().get_cell(1, 1), Some(Cell::X));
        assert_eq!(next.last_move(), BoardMove::new(1, 1, Cell::X));
        // The source snapshot is untouched
        assert_eq!(state.board().get_cell(1, 1), Some(Cell::Empty));
    }

    #[test]
    fn test_apply_rejects_occupied() {
        let state = GameState::initial(Board::new(3, 3))
            .apply(BoardMove::new(0, 0, Cell::X))
            .unwrap();
        assert_eq!(
            state.apply(BoardMove::new(0, 0, Cell::O)).unwrap_err(),
            MoveError::CellOccupied { row: 0, col: 0 }
        );
    }

    #[test]
    fn test_win_detection() {
        let mut state = GameState::initial(Board::new(3, 3));
        let moves = [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)];
        for (row, col) in moves {
            let side = state.side();
            state = state.apply(BoardMove::new(row, col, side)).unwrap();
        }
        assert_eq!(state.outcome(3), Some(Outcome::Winner(Cell::X)));
    }

    #[test]
    fn test_draw() {
        let mut state = GameState::initial(Board::new(3, 3));
        // XOX
        // XOO
        // OXX
        let moves = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (1, 2),
            (2, 1),
            (2, 0),
            (2, 2),
        ];
        for (row, col) in moves {
            assert_eq!(state.outcome(3), None);
            let side = state.side();
            state = state.apply(BoardMove::new(row, col, side)).unwrap();
        }
        assert_eq!(state.outcome(3), Some(Outcome::Draw));
    }
}
