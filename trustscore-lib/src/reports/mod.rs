//! Report generation for scored resource groups
//!
//! Scores are kept at full precision until this point; the generators here are where
//! values get rounded for presentation.

mod ndjson;

pub use ndjson::generate as generate_ndjson;
