//! GitHub API client
//!
//! Minimal GitHub API client for fetching repository activity and file listings.

use crate::Result;
use crate::facts::api_client::{ApiClient, ApiResult};
use crate::facts::throttler::Throttler;
use crate::resources::RepoSpec;
use chrono::{DateTime, Utc};
use core::time::Duration;
use serde::Deserialize;
use std::sync::Arc;

/// The contributors endpoint is read as a single page of this size
const CONTRIBUTORS_PAGE_SIZE: u8 = 100;

#[derive(Debug, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Contributor {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub contributions: u64,
}

/// `GET /repos/{owner}/{repo}/git/trees/{ref}?recursive=1`
#[derive(Debug, Deserialize)]
pub struct Tree {
    #[serde(default)]
    pub tree: Vec<TreeEntry>,

    /// GitHub stops listing very large trees and sets this flag
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Tree {
    /// Paths of the files (blobs) in the tree; directories are left out.
    #[must_use]
    pub fn into_file_paths(self) -> Vec<String> {
        self.tree.into_iter().filter(|e| e.kind == "blob").map(|e| e.path).collect()
    }
}

/// GitHub API client
#[derive(Debug, Clone)]
pub struct Client {
    api: ApiClient,
}

impl Client {
    /// Create a GitHub client with an optional personal access token.
    pub fn new(token: Option<&str>, base_url: &str, request_timeout: Duration, throttler: Arc<Throttler>) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(base_url, token.map(|t| format!("token {t}")), request_timeout, throttler)?,
        })
    }

    /// Whether this client can answer for a repository on the given host
    #[must_use]
    pub fn serves(repo: &RepoSpec) -> bool {
        repo.host().eq_ignore_ascii_case("github.com")
    }

    fn repo_path(repo: &RepoSpec, suffix: &str) -> String {
        format!("/repos/{}/{}{suffix}", repo.owner(), repo.repo())
    }

    pub async fn repository(&self, repo: &RepoSpec) -> ApiResult<Repository> {
        self.api.get_json(&Self::repo_path(repo, "")).await
    }

    pub async fn contributors(&self, repo: &RepoSpec) -> ApiResult<Vec<Contributor>> {
        self.api
            .get_json(&Self::repo_path(repo, &format!("/contributors?per_page={CONTRIBUTORS_PAGE_SIZE}")))
            .await
    }

    pub async fn tree(&self, repo: &RepoSpec) -> ApiResult<Tree> {
        self.api.get_json(&Self::repo_path(repo, "/git/trees/HEAD?recursive=1")).await
    }
}
