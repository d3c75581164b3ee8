//! # Board Tree
//!
//! Incremental game-tree solver for two perfect-information board games: a
//! 3×3 three-in-a-row game and a gravity-drop four-in-a-row game. The tree is
//! expanded one ply at a time so a single-threaded host can keep answering
//! requests while the search deepens.
//!
//! ## Modules
//!
//! - [`game`]: Board, cells, coordinates, line-win detection, positions
//! - [`engine`]: Rules for each variant and the `GameInterface` facade
//! - [`tree`]: Arena game tree, ply expansion, negamax evaluation
//! - [`host`]: Cooperative scheduler interleaving expansion and requests
//! - [`protocol`]: Move records and host messages
//! - [`ui`]: Terminal front end
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod host;
pub mod protocol;
pub mod tree;
pub mod ui;
