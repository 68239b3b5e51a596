use super::hosting;
use super::hub::{self, activity_from_commits};
use super::throttler::Throttler;
use super::{Activity, DatasetInfo, MetadataSource, ModelInfo};
use crate::Result;
use crate::resources::{HubId, RepoSpec};
use core::time::Duration;
use ohno::bail;
use std::sync::Arc;

const LOG_TARGET: &str = "    source";

/// Connection settings for [`HttpSource`]
#[derive(Debug, Clone)]
pub struct HttpSourceOptions {
    pub hub_base_url: String,
    pub github_api_url: String,
    pub hub_token: Option<String>,
    pub github_token: Option<String>,
    pub request_timeout: Duration,
    pub max_concurrent_requests: usize,
}

/// [`MetadataSource`] backed by the model hub and GitHub REST APIs
#[derive(Debug)]
pub struct HttpSource {
    hub: hub::Client,
    github: hosting::Client,
}

impl HttpSource {
    pub fn new(options: &HttpSourceOptions) -> Result<Self> {
        let throttler = Throttler::new(options.max_concurrent_requests);

        Ok(Self {
            hub: hub::Client::new(
                options.hub_token.as_deref(),
                &options.hub_base_url,
                options.request_timeout,
                Arc::clone(&throttler),
            )?,
            github: hosting::Client::new(options.github_token.as_deref(), &options.github_api_url, options.request_timeout, throttler)?,
        })
    }

    fn check_served(repo: &RepoSpec) -> Result<()> {
        if !hosting::Client::serves(repo) {
            bail!("no API support for repositories on '{}'", repo.host());
        }
        Ok(())
    }
}

impl MetadataSource for HttpSource {
    async fn model_info(&self, id: &HubId) -> Result<ModelInfo> {
        let info = self.hub.model(id).await.into_result(format_args!("model '{id}'"))?.into_model_info();
        log::debug!(target: LOG_TARGET, "model '{id}': {} file(s), license {:?}", info.files.len(), info.license);
        Ok(info)
    }

    async fn model_readme(&self, id: &HubId) -> Result<String> {
        let readme = self.hub.readme(id).await.into_option(format_args!("README of model '{id}'"))?;
        if readme.is_none() {
            log::debug!(target: LOG_TARGET, "model '{id}' has no README");
        }
        Ok(readme.unwrap_or_default())
    }

    async fn model_activity(&self, id: &HubId) -> Result<Activity> {
        let commits = self.hub.commits(id).await.into_result(format_args!("commit history of model '{id}'"))?;
        Ok(activity_from_commits(&commits))
    }

    async fn dataset_info(&self, id: &HubId) -> Result<DatasetInfo> {
        Ok(self.hub.dataset(id).await.into_result(format_args!("dataset '{id}'"))?.into())
    }

    async fn repo_activity(&self, repo: &RepoSpec) -> Result<Activity> {
        Self::check_served(repo)?;

        let (info, contributors) = tokio::join!(self.github.repository(repo), self.github.contributors(repo));
        let info = info.into_result(format_args!("repository '{repo}'"))?;
        let contributors = contributors.into_result(format_args!("contributors of repository '{repo}'"))?;

        Ok(Activity {
            contributors: contributors.len() as u64,
            last_activity: info.pushed_at,
        })
    }

    async fn repo_files(&self, repo: &RepoSpec) -> Result<Vec<String>> {
        Self::check_served(repo)?;

        let tree = self.github.tree(repo).await.into_result(format_args!("file tree of repository '{repo}'"))?;
        if tree.truncated {
            log::warn!(target: LOG_TARGET, "file listing of '{repo}' is truncated");
        }
        Ok(tree.into_file_paths())
    }
}
