use super::{ResourceKind, ResourceUrl};
use strum::Display;

/// Position of a URL within an input line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Slot {
    Code,
    Dataset,
    Model,
}

impl Slot {
    /// The kind a URL in this slot is expected to have
    #[must_use]
    pub const fn expected_kind(self) -> ResourceKind {
        match self {
            Self::Code => ResourceKind::Code,
            Self::Dataset => ResourceKind::Dataset,
            Self::Model => ResourceKind::Model,
        }
    }
}

/// One model plus the dataset and code repository linked to it on the same input line
#[derive(Debug, Clone)]
pub struct ResourceGroup {
    line: usize,
    code: Option<ResourceUrl>,
    dataset: Option<ResourceUrl>,
    model: ResourceUrl,
}

impl ResourceGroup {
    #[must_use]
    pub const fn new(line: usize, code: Option<ResourceUrl>, dataset: Option<ResourceUrl>, model: ResourceUrl) -> Self {
        Self { line, code, dataset, model }
    }

    /// 1-based line number this group was parsed from
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub const fn code(&self) -> Option<&ResourceUrl> {
        self.code.as_ref()
    }

    #[must_use]
    pub const fn dataset(&self) -> Option<&ResourceUrl> {
        self.dataset.as_ref()
    }

    #[must_use]
    pub const fn model(&self) -> &ResourceUrl {
        &self.model
    }

    #[must_use]
    pub const fn url(&self, slot: Slot) -> Option<&ResourceUrl> {
        match slot {
            Slot::Code => self.code.as_ref(),
            Slot::Dataset => self.dataset.as_ref(),
            Slot::Model => Some(&self.model),
        }
    }

    /// Slots holding a URL whose classified kind differs from what the slot expects.
    ///
    /// A mismatch is only diagnostic; the group is scored regardless.
    #[must_use]
    pub fn kind_mismatches(&self) -> Vec<Slot> {
        [Slot::Code, Slot::Dataset, Slot::Model]
            .into_iter()
            .filter(|&slot| self.url(slot).is_some_and(|u| u.kind() != slot.expected_kind()))
            .collect()
    }
}
