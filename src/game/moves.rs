use std::fmt;

use serde::{Deserialize, Serialize};

use super::Cell;

/// Row-major board coordinates. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coords {
    pub row: u32,
    pub col: u32,
}

impl Coords {
    pub fn new(row: u32, col: u32) -> Self {
        Coords { row, col }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A mark placed by `side` at `coords`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardMove {
    pub coords: Coords,
    pub side: Cell,
}

impl BoardMove {
    pub fn new(row: u32, col: u32, side: Cell) -> Self {
        BoardMove {
            coords: Coords { row, col },
            side,
        }
    }

    /// The placeholder "last move" of an empty board. O is recorded as the
    /// last mover so that X opens.
    pub fn opening() -> Self {
        BoardMove::new(0, 0, Cell::O)
    }
}

impl fmt::Display for BoardMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.side.name(), self.coords)
    }
}
