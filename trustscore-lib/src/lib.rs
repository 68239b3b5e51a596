#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for trustscore
//!
//! This library consolidates all functionality for the trustscore tool, which rates
//! machine-learning models (and the datasets and code repositories linked to them)
//! on a set of trustworthiness metrics and emits one NDJSON record per model.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`resources`]: Parsing and classification of the input URL list
//! - [`facts`]: Metadata fetching from the model hub and code hosting services
//! - [`metrics`]: The individual metric computations
//! - [`scoring`]: Concurrent metric execution and net score aggregation
//! - [`reports`]: NDJSON output

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod facts;
pub mod metrics;
pub mod reports;
pub mod resources;
pub mod scoring;

pub use crate::commands::{Host, run};
