//! Board model: cells, coordinates, line-win detection, gravity lookup and
//! immutable position snapshots.

mod board;
mod cell;
mod moves;
mod state;

pub use board::Board;
pub use cell::Cell;
pub use moves::{BoardMove, Coords};
pub use state::{GameState, Outcome};
