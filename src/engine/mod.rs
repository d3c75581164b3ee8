mod interface;
mod rules;

pub use interface::{FiarGameInterface, GameInterface, T3GameInterface, TreeStats};
pub use rules::{GravityRules, GridRules, Rules};
