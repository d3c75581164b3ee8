//! Cooperative host loop that interleaves tree expansion with requests.

mod scheduler;

pub use scheduler::{Scheduler, StepOutcome};
