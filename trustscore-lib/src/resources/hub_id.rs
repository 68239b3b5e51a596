use core::fmt::{Display, Formatter};
use std::sync::Arc;

/// Path segments that follow a repository id on the hub and never belong to it
const NON_ID_SEGMENTS: &[&str] = &["tree", "blob", "resolve", "raw", "commit", "commits", "discussions", "viewer", "edit"];

/// A repository id on the model hub, either `owner/name` or a legacy bare `name`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HubId {
    owner: Option<Arc<str>>,
    name: Arc<str>,
}

impl HubId {
    #[must_use]
    pub fn new(owner: Option<&str>, name: &str) -> Self {
        Self {
            owner: owner.map(Arc::from),
            name: Arc::from(name),
        }
    }

    /// Extract a repository id from the path segments that follow the repository type prefix.
    ///
    /// Anything after the id (`tree/main`, `blob/main/config.json`, ...) is ignored.
    #[must_use]
    pub fn from_segments(segments: &[&str]) -> Option<Self> {
        let is_id_part = |s: &&str| !s.is_empty() && !NON_ID_SEGMENTS.contains(s);

        match segments {
            [owner, name, ..] if is_id_part(owner) && is_id_part(name) => Some(Self::new(Some(owner), name)),
            [name, ..] if is_id_part(name) => Some(Self::new(None, name)),
            _ => None,
        }
    }

    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// The repository name without its owner, used as the display name of a model
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for HubId {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match &self.owner {
            Some(owner) => write!(f, "{owner}/{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
