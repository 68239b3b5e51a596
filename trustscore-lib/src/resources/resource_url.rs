use super::{HubId, RepoSpec, ResourceKind};
use core::fmt::{Display, Formatter};
use std::sync::Arc;

/// What a classified URL resolves to, when the classifier recognized it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// A model or dataset repository on the model hub
    Hub(HubId),

    /// A repository on a code hosting service
    Repo(RepoSpec),

    /// Nothing usable could be extracted
    Opaque,
}

/// A URL from the input file together with its classification
///
/// Immutable once built by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUrl {
    raw: Arc<str>,
    kind: ResourceKind,
    locator: Locator,
}

impl ResourceUrl {
    #[must_use]
    pub fn new(raw: &str, kind: ResourceKind, locator: Locator) -> Self {
        Self {
            raw: Arc::from(raw),
            kind,
            locator,
        }
    }

    /// The URL exactly as it appeared in the input (trimmed)
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    #[must_use]
    pub const fn locator(&self) -> &Locator {
        &self.locator
    }

    #[must_use]
    pub const fn hub_id(&self) -> Option<&HubId> {
        match &self.locator {
            Locator::Hub(id) => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub const fn repo_spec(&self) -> Option<&RepoSpec> {
        match &self.locator {
            Locator::Repo(spec) => Some(spec),
            _ => None,
        }
    }

    /// Short human-readable name: the hub repository name, the code repository name,
    /// or the last path segment of anything else.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match &self.locator {
            Locator::Hub(id) => id.name(),
            Locator::Repo(spec) => spec.repo(),
            Locator::Opaque => self.raw.trim_end_matches('/').rsplit('/').next().unwrap_or(&self.raw),
        }
    }
}

impl Display for ResourceUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
