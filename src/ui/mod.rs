//! Terminal UI: play either variant against the engine while it keeps
//! expanding its tree in the background of the event loop.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
