use crate::Result;
use core::fmt::{Display, Formatter};
use ohno::{IntoAppError, bail};
use std::sync::Arc;
use url::Url;

/// A source repository on a code hosting service, reduced to `host/owner/repo`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    url: Arc<Url>,
    host: Arc<str>,
    owner: Arc<str>,
    repo: Arc<str>,
}

impl RepoSpec {
    pub fn parse(url: &Url) -> Result<Self> {
        let segments: Vec<&str> = url.path_segments().map(Iterator::collect).unwrap_or_default();

        let (owner, repo) = match segments.as_slice() {
            [owner, repo, ..] if !owner.is_empty() && !repo.is_empty() => (*owner, repo.trim_end_matches(".git")),
            [_, _, ..] => bail!("repository URL has an empty owner or repository name: {url}"),
            _ => bail!("repository URL does not name an owner and repository: {url}"),
        };

        if repo.is_empty() {
            bail!("repository URL has an empty repository name: {url}");
        }

        let host = url.host_str().unwrap_or_default().trim_start_matches("www.");
        let clean_url = Url::parse(&format!("{}://{host}/{owner}/{repo}", url.scheme())).into_app_err("rebuilding repository URL")?;

        Ok(Self {
            url: Arc::new(clean_url),
            host: Arc::from(host),
            owner: Arc::from(owner),
            repo: Arc::from(repo),
        })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(s: &str) -> Result<RepoSpec> {
        RepoSpec::parse(&Url::parse(s).unwrap())
    }

    #[test]
    fn test_parse_github_url() {
        let spec = spec("https://github.com/huggingface/transformers").unwrap();
        assert_eq!(spec.host(), "github.com");
        assert_eq!(spec.owner(), "huggingface");
        assert_eq!(spec.repo(), "transformers");
        assert_eq!(spec.url().as_str(), "https://github.com/huggingface/transformers");
    }

    #[test]
    fn test_git_suffix_and_deep_path_are_dropped() {
        let spec = spec("https://www.github.com/google-research/bert.git/tree/master/docs").unwrap();
        assert_eq!(spec.host(), "github.com");
        assert_eq!(spec.repo(), "bert");
        assert_eq!(spec.to_string(), "https://github.com/google-research/bert");
    }

    #[test]
    fn test_same_repo_through_different_paths_is_equal() {
        assert_eq!(
            spec("https://gitlab.com/group/project").unwrap(),
            spec("https://gitlab.com/group/project/-/blob/main/README.md").unwrap()
        );
    }

    #[test]
    fn test_rejects_incomplete_urls() {
        let _ = spec("https://github.com/").unwrap_err();
        let _ = spec("https://github.com/openai").unwrap_err();
        let _ = spec("https://github.com//whisper").unwrap_err();
        let _ = spec("https://github.com/openai/").unwrap_err();
        let _ = spec("https://github.com/openai/.git").unwrap_err();
    }
}
