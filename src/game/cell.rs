use std::fmt;

use serde::{Deserialize, Serialize};

/// Content of a board cell. `X` and `O` double as side identifiers.
///
/// The discriminants are the wire values used by the byte view of the board
/// and by the transport record.
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, bytemuck::NoUninit,
)]
pub enum Cell {
    #[default]
    Empty = 0,
    X = 1,
    O = 2,
}

impl Cell {
    /// Get the other side. `Empty` toggles to `X`, the side that opens a game.
    pub fn other(self) -> Cell {
        match self {
            Cell::X => Cell::O,
            Cell::O => Cell::X,
            Cell::Empty => Cell::X,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Get the cell name for display
    pub fn name(self) -> &'static str {
        match self {
            Cell::Empty => "Empty",
            Cell::X => "X",
            Cell::O => "O",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        cell as u8
    }
}

impl TryFrom<u8> for Cell {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::X),
            2 => Ok(Cell::O),
            other => Err(other),
        }
    }
}
