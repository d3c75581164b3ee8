use crate::error::MoveError;
use crate::game::{Board, BoardMove, Coords, GameState, Outcome};

/// Game-variant capability consumed by the tree engine.
///
/// Implementors decide which placements are legal; turn order, game-over
/// checks and win detection are shared.
pub trait Rules {
    /// Display name of the variant.
    fn name(&self) -> &'static str;

    /// Number of identical marks in a line that wins.
    fn run_length(&self) -> u32;

    /// Fresh board for a new game.
    fn empty_board(&self) -> Board;

    /// Check that `coords` is a legal placement on `board`.
    fn check_placement(&self, board: &Board, coords: Coords) -> Result<(), MoveError>;

    /// Every legal move for the side to move, in enumeration order. Empty for
    /// terminal states.
    fn legal_moves(&self, state: &GameState) -> Vec<BoardMove>;

    fn is_terminal(&self, state: &GameState) -> Option<Outcome> {
        state.outcome(self.run_length())
    }

    /// Cell a mark aimed at `aim` would actually occupy.
    fn resolve_target(&self, _board: &Board, aim: Coords) -> Coords {
        aim
    }

    /// Validate `mv` against `state` and return the successor state.
    fn apply(&self, state: &GameState, mv: BoardMove) -> Result<GameState, MoveError> {
        if self.is_terminal(state).is_some() {
            return Err(MoveError::GameOver);
        }
        if mv.side != state.side() {
            return Err(MoveError::WrongSide {
                expected: state.side(),
                got: mv.side,
            });
        }
        self.check_placement(state.board(), mv.coords)?;
        state.apply(mv)
    }
}

/// Fixed-grid variant: a mark may go on any empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRules {
    height: u32,
    width: u32,
    run_length: u32,
}

impl GridRules {
    pub fn new(height: u32, width: u32, run_length: u32) -> Self {
        GridRules {
            height,
            width,
            run_length,
        }
    }

    /// 3×3 board, three in a row wins.
    pub fn tic_tac_toe() -> Self {
        GridRules::new(3, 3, 3)
    }
}

impl Default for GridRules {
    fn default() -> Self {
        Self::tic_tac_toe()
    }
}

impl Rules for GridRules {
    fn name(&self) -> &'static str {
        "Tic-Tac-Toe"
    }

    fn run_length(&self) -> u32 {
        self.run_length
    }

    fn empty_board(&self) -> Board {
        Board::new(self.height, self.width)
    }

    fn check_placement(&self, board: &Board, coords: Coords) -> Result<(), MoveError> {
        let Coords { row, col } = coords;
        match board.get_cell(row, col) {
            None => Err(MoveError::OutOfBounds { row, col }),
            Some(cell) if !cell.is_empty() => Err(MoveError::CellOccupied { row, col }),
            Some(_) => Ok(()),
        }
    }

    fn legal_moves(&self, state: &GameState) -> Vec<BoardMove> {
        if self.is_terminal(state).is_some() {
            return Vec::new();
        }

        let board = state.board();
        let side = state.side();
        board
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .filter_map(|(idx, _)| board.get_coords(idx).ok())
            .map(|coords| BoardMove { coords, side })
            .collect()
    }
}

/// Gravity variant: a mark dropped into a column lands on its lowest empty
/// cell, so there is at most one move per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityRules {
    height: u32,
    width: u32,
    run_length: u32,
}

impl GravityRules {
    pub fn new(height: u32, width: u32, run_length: u32) -> Self {
        GravityRules {
            height,
            width,
            run_length,
        }
    }

    /// 6 rows by 7 columns, four in a row wins.
    pub fn four_in_a_row() -> Self {
        GravityRules::new(6, 7, 4)
    }
}

impl Default for GravityRules {
    fn default() -> Self {
        Self::four_in_a_row()
    }
}

impl Rules for GravityRules {
    fn name(&self) -> &'static str {
        "Four in a Row"
    }

    fn run_length(&self) -> u32 {
        self.run_length
    }

    fn empty_board(&self) -> Board {
        Board::new(self.height, self.width)
    }

    fn check_placement(&self, board: &Board, coords: Coords) -> Result<(), MoveError> {
        let Coords { row, col } = coords;
        match board.get_cell(row, col) {
            None => return Err(MoveError::OutOfBounds { row, col }),
            Some(cell) if !cell.is_empty() => return Err(MoveError::CellOccupied { row, col }),
            Some(_) => {}
        }

        let landing = board.first_empty_in_column(col)?;
        if landing.row != row {
            return Err(MoveError::NotLanding {
                row,
                col,
                landing_row: landing.row,
            });
        }
        Ok(())
    }

    fn resolve_target(&self, board: &Board, aim: Coords) -> Coords {
        board.first_empty_in_column(aim.col).unwrap_or(aim)
    }

    fn legal_moves(&self, state: &GameState) -> Vec<BoardMove> {
        if self.is_terminal(state).is_some() {
            return Vec::new();
        }

        let board = state.board();
        let side = state.side();
        // We cannot have more moves than columns
        let mut moves = Vec::with_capacity(board.width() as usize);
        for col in 0..board.width() {
            if let Ok(coords) = board.first_empty_in_column(col) {
                moves.push(BoardMove { coords, side });
            }
        }
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    #[test]
    fn test_grid_moves_on_empty_board() {
        let rules = GridRules::tic_tac_toe();
        let state = GameState::initial(rules.empty_board());
        let moves = rules.legal_moves(&state);
        assert_eq!(moves.len(), 9);
        assert_eq!(moves[0], BoardMove::new(0, 0, Cell::X));
        assert_eq!(moves[8], BoardMove::new(2, 2, Cell::X));
    }

    #[test]
    fn test_grid_moves_skip_occupied() {
        let rules = GridRules::tic_tac_toe();
        let state = GameState::initial(rules.empty_board());
        let state = rules.apply(&state, BoardMove::new(1, 1, Cell::X)).unwrap();
        let moves = rules.legal_moves(&state);
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|mv| mv.side == Cell::O));
        assert!(!moves.iter().any(|mv| mv.coords == Coords::new(1, 1)));
    }

    #[test]
    fn test_apply_rejects_wrong_side() {
        let rules = GridRules::tic_tac_toe();
        let state = GameState::initial(rules.empty_board());
        assert_eq!(
            rules.apply(&state, BoardMove::new(0, 0, Cell::O)).unwrap_err(),
            MoveError::WrongSide {
                expected: Cell::X,
                got: Cell::O
            }
        );
    }

    #[test]
    fn test_apply_rejects_out_of_bounds() {
        let rules = GridRules::tic_tac_toe();
        let state = GameState::initial(rules.empty_board());
        assert_eq!(
            rules.apply(&state, BoardMove::new(3, 0, Cell::X)).unwrap_err(),
            MoveError::OutOfBounds { row: 3, col: 0 }
        );
    }

    #[test]
    fn test_no_moves_after_win() {
        let rules = GridRules::tic_tac_toe();
        let mut state = GameState::initial(rules.empty_board());
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            let side = state.side();
            state = rules.apply(&state, BoardMove::new(row, col, side)).unwrap();
        }
        assert_eq!(rules.is_terminal(&state), Some(Outcome::Winner(Cell::X)));
        assert!(rules.legal_moves(&state).is_empty());
        assert_eq!(
            rules.apply(&state, BoardMove::new(2, 2, Cell::O)).unwrap_err(),
            MoveError::GameOver
        );
    }

    #[test]
    fn test_gravity_moves_one_per_column() {
        let rules = GravityRules::four_in_a_row();
        let state = GameState::initial(rules.empty_board());
        let moves = rules.legal_moves(&state);
        assert_eq!(moves.len(), 7);
        for (col, mv) in moves.iter().enumerate() {
            assert_eq!(mv.coords, Coords::new(5, col as u32));
        }
    }

    #[test]
    fn test_gravity_rejects_floating_mark() {
        let rules = GravityRules::four_in_a_row();
        let state = GameState::initial(rules.empty_board());
        assert_eq!(
            rules.apply(&state, BoardMove::new(2, 3, Cell::X)).unwrap_err(),
            MoveError::NotLanding {
                row: 2,
                col: 3,
                landing_row: 5
            }
        );
    }

    #[test]
    fn test_resolve_target() {
        let mut board = Board::new(6, 7);
        let aim = Coords::new(0, 2);
        assert_eq!(GridRules::tic_tac_toe().resolve_target(&board, aim), aim);

        let rules = GravityRules::four_in_a_row();
        assert_eq!(rules.resolve_target(&board, aim), Coords::new(5, 2));
        for row in 0..6 {
            board.set_cell(row, 2, Cell::X);
        }
        assert_eq!(rules.resolve_target(&board, aim), aim);
    }

    #[test]
    fn test_gravity_full_column_has_no_move() {
        let rules = GravityRules::new(2, 2, 2);
        let mut state = GameState::initial(rules.empty_board());
        for row in [1, 0] {
            let side = state.side();
            state = rules.apply(&state, BoardMove::new(row, 0, side)).unwrap();
        }
        let moves = rules.legal_moves(&state);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].coords, Coords::new(1, 1));
    }

    #[test]
    fn test_gravity_diagonal_four_wins_three_does_not() {
        let rules = GravityRules::four_in_a_row();
        let mut state = GameState::initial(rules.empty_board());
        // X builds the / diagonal from (5, 0) up to (2, 3); O fills beneath.
        let columns = [0, 1, 1, 2, 6, 2, 2, 3, 6, 3, 5, 3, 3];
        for col in columns {
            assert_eq!(rules.is_terminal(&state), None);
            let coords = state.board().first_empty_in_column(col).unwrap();
            let side = state.side();
            state = rules.apply(&state, BoardMove { coords, side }).unwrap();
        }
        assert_eq!(rules.is_terminal(&state), Some(Outcome::Winner(Cell::X)));
    }
}
