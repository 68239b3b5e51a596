use chrono::{DateTime, Utc};

/// What the model hub reports about a model repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelInfo {
    /// License identifier declared in the model card or tags, as written there
    pub license: Option<String>,

    /// Whether the model card carries structured evaluation results
    pub has_eval_results: bool,

    /// Files in the repository
    pub files: Vec<RepoFile>,
}

/// A file in a model repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFile {
    pub path: String,

    /// Size in bytes, when the hub reported it
    pub size: Option<u64>,
}

impl RepoFile {
    #[must_use]
    pub fn new(path: impl Into<String>, size: Option<u64>) -> Self {
        Self { path: path.into(), size }
    }
}

/// What the model hub reports about a dataset repository
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetInfo {
    pub downloads: u64,
}

/// Who has been working on a repository, and when they last did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Activity {
    /// Number of distinct contributors seen
    pub contributors: u64,

    /// Most recent commit or push
    pub last_activity: Option<DateTime<Utc>>,
}
