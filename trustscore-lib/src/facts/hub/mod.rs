//! Model hub (Hugging Face) API client

mod client;

pub use client::{Client, Commit, DatasetResponse, ModelResponse, OneOrMany, activity_from_commits};
