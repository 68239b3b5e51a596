//! Concurrent metric execution and net score aggregation
//!
//! The [`Scorer`] turns resource groups into [`ScoreRecord`]s. Every metric of a group
//! runs as its own task under a per-metric timeout; a failing, panicking or timed-out
//! metric reports its failure value without disturbing its siblings. The record is built
//! only once every metric has settled, and records come back in input order.

mod net_score;
mod score_record;
mod scorer;

pub use net_score::net_score;
pub use score_record::ScoreRecord;
pub use scorer::{Scorer, ScorerOptions};
