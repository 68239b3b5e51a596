use super::{Activity, DatasetInfo, ModelInfo};
use crate::Result;
use crate::resources::{HubId, RepoSpec};

/// Read-only access to the metadata metrics are computed from.
///
/// [`HttpSource`](super::HttpSource) talks to the real services; tests substitute
/// in-memory implementations.
pub trait MetadataSource: Send + Sync + 'static {
    /// Card and file listing of a model.
    fn model_info(&self, id: &HubId) -> impl Future<Output = Result<ModelInfo>> + Send;

    /// README of a model. A model without a README yields an empty string.
    fn model_readme(&self, id: &HubId) -> impl Future<Output = Result<String>> + Send;

    /// Contributors and recency derived from a model's commit history.
    fn model_activity(&self, id: &HubId) -> impl Future<Output = Result<Activity>> + Send;

    /// Popularity of a dataset.
    fn dataset_info(&self, id: &HubId) -> impl Future<Output = Result<DatasetInfo>> + Send;

    /// Contributors and recency of a code repository.
    fn repo_activity(&self, repo: &RepoSpec) -> impl Future<Output = Result<Activity>> + Send;

    /// Paths of every file in a code repository.
    fn repo_files(&self, repo: &RepoSpec) -> impl Future<Output = Result<Vec<String>>> + Send;
}
