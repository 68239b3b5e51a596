//! Minimal model hub API client for fetching model cards, READMEs, commit history and dataset
//! popularity.

use crate::Result;
use crate::facts::api_client::{ApiClient, ApiResult};
use crate::facts::throttler::Throttler;
use crate::facts::{Activity, DatasetInfo, ModelInfo, RepoFile};
use crate::resources::HubId;
use chrono::{DateTime, Utc};
use core::time::Duration;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Prefix of hub tags that carry the license identifier
const LICENSE_TAG_PREFIX: &str = "license:";

/// `GET /api/models/{id}?blobs=true`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResponse {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub card_data: Option<CardData>,
    #[serde(default)]
    pub siblings: Vec<Sibling>,
}

/// The YAML front matter of a model card, as the hub returns it
#[derive(Debug, Deserialize)]
pub struct CardData {
    #[serde(default)]
    pub license: Option<OneOrMany>,
    #[serde(default, rename = "model-index")]
    pub model_index: Option<serde_json::Value>,
}

/// A YAML or JSON field that may hold a single value or a list of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// The single value, or the first entry of the list.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(s) => Some(s.as_str()),
            Self::Many(v) => v.first().map(String::as_str),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Sibling {
    pub rfilename: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub lfs: Option<LfsPointer>,
}

#[derive(Debug, Deserialize)]
pub struct LfsPointer {
    #[serde(default)]
    pub size: Option<u64>,
}

/// One entry of `GET /api/models/{id}/commits/main`
#[derive(Debug, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub authors: Vec<CommitAuthor>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CommitAuthor {
    pub user: String,
}

/// `GET /api/datasets/{id}`
#[derive(Debug, Deserialize)]
pub struct DatasetResponse {
    #[serde(default)]
    pub downloads: Option<u64>,
}

impl ModelResponse {
    /// The declared license: the model card's `license` field, else a `license:` tag.
    #[must_use]
    pub fn license(&self) -> Option<&str> {
        let from_card = self.card_data.as_ref().and_then(|card| card.license.as_ref()?.first());

        from_card
            .or_else(|| self.tags.iter().find_map(|t| t.strip_prefix(LICENSE_TAG_PREFIX)))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn into_model_info(self) -> ModelInfo {
        let license = self.license().map(str::to_string);
        let has_eval_results = self
            .card_data
            .as_ref()
            .and_then(|card| card.model_index.as_ref())
            .is_some_and(|index| !index.is_null());

        ModelInfo {
            license,
            has_eval_results,
            files: self
                .siblings
                .into_iter()
                .map(|s| {
                    let size = s.size.or_else(|| s.lfs.and_then(|lfs| lfs.size));
                    RepoFile::new(s.rfilename, size)
                })
                .collect(),
        }
    }
}

/// Summarize a commit history into distinct authors and the latest commit date.
#[must_use]
pub fn activity_from_commits(commits: &[Commit]) -> Activity {
    let authors: HashSet<&str> = commits.iter().flat_map(|c| c.authors.iter().map(|a| a.user.as_str())).collect();

    Activity {
        contributors: authors.len() as u64,
        last_activity: commits.iter().filter_map(|c| c.date).max(),
    }
}

impl From<DatasetResponse> for DatasetInfo {
    fn from(value: DatasetResponse) -> Self {
        Self {
            downloads: value.downloads.unwrap_or_default(),
        }
    }
}

/// Model hub API client
#[derive(Debug, Clone)]
pub struct Client {
    api: ApiClient,
}

impl Client {
    /// Create a hub client with an optional access token.
    pub fn new(token: Option<&str>, base_url: &str, request_timeout: Duration, throttler: Arc<Throttler>) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(base_url, token.map(|t| format!("Bearer {t}")), request_timeout, throttler)?,
        })
    }

    pub async fn model(&self, id: &HubId) -> ApiResult<ModelResponse> {
        self.api.get_json(&format!("/api/models/{id}?blobs=true")).await
    }

    pub async fn readme(&self, id: &HubId) -> ApiResult<String> {
        self.api.get_text(&format!("/{id}/raw/main/README.md")).await
    }

    pub async fn commits(&self, id: &HubId) -> ApiResult<Vec<Commit>> {
        self.api.get_json(&format!("/api/models/{id}/commits/main")).await
    }

    pub async fn dataset(&self, id: &HubId) -> ApiResult<DatasetResponse> {
        self.api.get_json(&format!("/api/datasets/{id}")).await
    }
}
