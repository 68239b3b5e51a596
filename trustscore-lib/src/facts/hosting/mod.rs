//! Code hosting (GitHub) API client

mod client;

pub use client::{Client, Contributor, Repository, Tree, TreeEntry};
