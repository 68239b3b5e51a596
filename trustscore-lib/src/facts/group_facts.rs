use super::{Activity, DatasetInfo, MetadataSource, ModelInfo};
use crate::Result;
use crate::resources::{HubId, RepoSpec, ResourceGroup, ResourceUrl};
use chrono::{DateTime, Utc};
use ohno::{app_err, bail};
use std::sync::Arc;
use tokio::sync::OnceCell;

type Fetched<T> = core::result::Result<T, Arc<ohno::AppError>>;

/// The metadata of one resource group, fetched on first use and shared by every metric
/// scoring that group.
///
/// Concurrent requests for the same document wait on a single fetch. Failures are kept
/// too, so a document that could not be fetched is not requested again for this group.
#[derive(Debug)]
pub struct GroupFacts<S> {
    source: Arc<S>,
    group: ResourceGroup,
    now: DateTime<Utc>,
    model_info: OnceCell<Fetched<ModelInfo>>,
    model_readme: OnceCell<Fetched<String>>,
    activity: OnceCell<Fetched<Activity>>,
    dataset_info: OnceCell<Fetched<DatasetInfo>>,
    repo_files: OnceCell<Fetched<Vec<String>>>,
}

impl<S: MetadataSource> GroupFacts<S> {
    #[must_use]
    pub fn new(source: Arc<S>, group: ResourceGroup, now: DateTime<Utc>) -> Self {
        Self {
            source,
            group,
            now,
            model_info: OnceCell::new(),
            model_readme: OnceCell::new(),
            activity: OnceCell::new(),
            dataset_info: OnceCell::new(),
            repo_files: OnceCell::new(),
        }
    }

    #[must_use]
    pub const fn group(&self) -> &ResourceGroup {
        &self.group
    }

    /// The instant recency is measured against
    #[must_use]
    pub const fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub async fn model_info(&self) -> Result<&ModelInfo> {
        let id = self.model_id()?;
        memoized(&self.model_info, self.source.model_info(id)).await
    }

    pub async fn model_readme(&self) -> Result<&str> {
        let id = self.model_id()?;
        memoized(&self.model_readme, self.source.model_readme(id)).await.map(String::as_str)
    }

    /// Activity of the linked code repository, or of the model itself when no code is linked.
    pub async fn activity(&self) -> Result<&Activity> {
        memoized(&self.activity, async {
            match self.group.code() {
                Some(code) => self.source.repo_activity(repo_spec(code)?).await,
                None => self.source.model_activity(self.model_id()?).await,
            }
        })
        .await
    }

    /// Popularity of the linked dataset, or `None` when the group links no dataset.
    pub async fn dataset_info(&self) -> Result<Option<&DatasetInfo>> {
        let Some(dataset) = self.group.dataset() else {
            return Ok(None);
        };

        memoized(&self.dataset_info, async {
            let Some(id) = dataset.hub_id() else {
                bail!("dataset URL '{dataset}' does not name a hub dataset");
            };
            self.source.dataset_info(id).await
        })
        .await
        .map(Some)
    }

    /// Files of the linked code repository, or `None` when the group links no code.
    pub async fn repo_files(&self) -> Result<Option<&[String]>> {
        let Some(code) = self.group.code() else {
            return Ok(None);
        };

        memoized(&self.repo_files, async { self.source.repo_files(repo_spec(code)?).await })
            .await
            .map(|files| Some(files.as_slice()))
    }

    fn model_id(&self) -> Result<&HubId> {
        let model = self.group.model();
        model.hub_id().ok_or_else(|| app_err!("model URL '{model}' does not name a hub model"))
    }
}

fn repo_spec(code: &ResourceUrl) -> Result<&RepoSpec> {
    code.repo_spec().ok_or_else(|| app_err!("code URL '{code}' does not name a source repository"))
}

async fn memoized<T>(cell: &OnceCell<Fetched<T>>, fetch: impl Future<Output = Result<T>>) -> Result<&T> {
    cell.get_or_init(|| async { fetch.await.map_err(Arc::new) })
        .await
        .as_ref()
        .map_err(|e| app_err!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::parse_line;
    use core::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingSource {
        model_calls: AtomicUsize,
        activity_calls: AtomicUsize,
    }

    impl MetadataSource for CountingSource {
        async fn model_info(&self, _id: &HubId) -> Result<ModelInfo> {
            _ = self.model_calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok(ModelInfo {
                license: Some("mit".to_string()),
                ..ModelInfo::default()
            })
        }

        async fn model_readme(&self, _id: &HubId) -> Result<String> {
            Ok("# readme".to_string())
        }

        async fn model_activity(&self, _id: &HubId) -> Result<Activity> {
            _ = self.activity_calls.fetch_add(1, Ordering::SeqCst);
            bail!("commit history unavailable")
        }

        async fn dataset_info(&self, _id: &HubId) -> Result<DatasetInfo> {
            Ok(DatasetInfo { downloads: 10 })
        }

        async fn repo_activity(&self, _repo: &RepoSpec) -> Result<Activity> {
            Ok(Activity {
                contributors: 7,
                last_activity: None,
            })
        }

        async fn repo_files(&self, _repo: &RepoSpec) -> Result<Vec<String>> {
            Ok(vec!["tests/test_a.py".to_string()])
        }
    }

    fn facts(line: &str) -> (Arc<CountingSource>, GroupFacts<CountingSource>) {
        let source = Arc::new(CountingSource::default());
        let group = parse_line(1, line).unwrap().unwrap();
        (Arc::clone(&source), GroupFacts::new(source, group, Utc::now()))
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_fetch() {
        let (source, facts) = facts(",,https://huggingface.co/org/model");

        let (a, b, c) = tokio::join!(facts.model_info(), facts.model_info(), facts.model_info());
        assert_eq!(a.unwrap().license.as_deref(), Some("mit"));
        assert!(b.is_ok());
        assert!(c.is_ok());
        assert_eq!(source.model_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_are_memoized() {
        let (source, facts) = facts(",,https://huggingface.co/org/model");

        let first = facts.activity().await.unwrap_err();
        let _ = facts.activity().await.unwrap_err();
        assert!(first.to_string().contains("commit history unavailable"));
        assert_eq!(source.activity_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_activity_prefers_code_repository() {
        let (_, facts) = facts("https://github.com/org/code,,https://huggingface.co/org/model");
        assert_eq!(facts.activity().await.unwrap().contributors, 7);
    }

    #[tokio::test]
    async fn test_absent_links_yield_none() {
        let (_, facts) = facts(",,https://huggingface.co/org/model");
        assert!(facts.dataset_info().await.unwrap().is_none());
        assert!(facts.repo_files().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_present_links_are_fetched() {
        let (_, facts) = facts("https://github.com/org/code,https://huggingface.co/datasets/org/data,https://huggingface.co/org/model");
        assert_eq!(facts.dataset_info().await.unwrap().unwrap().downloads, 10);
        assert_eq!(facts.repo_files().await.unwrap().unwrap(), ["tests/test_a.py"]);
    }

    #[tokio::test]
    async fn test_unrecognized_links_are_errors() {
        let (_, facts) = facts("https://example.com/code,https://example.com/data,https://example.com/model");
        assert!(facts.model_info().await.is_err());
        assert!(facts.dataset_info().await.is_err());
        assert!(facts.repo_files().await.is_err());
    }
}
