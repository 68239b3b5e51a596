//! Command-line interface and orchestration for trustscore
//!
//! This module parses the command line, installs logging, loads configuration, and
//! drives one scoring pass end to end:
//!
//! 1. Read the URL file and classify each line into a resource group
//! 2. Report malformed lines on the host's error stream
//! 3. Score every group against the metadata services
//! 4. Write one NDJSON record per model to the host's output stream
//!
//! Configuration is read from `trustscore.toml` (or `--config PATH`) and falls back to
//! the defaults embedded from `default_config.toml`.

mod config;
mod host;
mod logging;
mod run;
mod score;

#[cfg(debug_assertions)]
pub use config::Config;

pub use host::Host;
pub use run::run;
pub use score::{ScoreArgs, score_urls};
