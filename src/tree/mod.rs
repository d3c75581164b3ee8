//! Game tree arena, ply-by-ply expansion and negamax evaluation.

mod arena;
mod evaluate;
mod expand;

pub use arena::{GameTree, Node, NodeId};
pub use evaluate::{evaluate, negamax_scores, Evaluation, DRAW_SCORE, LOSS_SCORE, WIN_SCORE};
pub use expand::{expand_one_level, ExpandResult};
