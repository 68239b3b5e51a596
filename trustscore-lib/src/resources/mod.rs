//! Parsing and classification of the input URL list
//!
//! Every line of the input file names up to three resources: a code repository, a
//! dataset, and a model, in that order. The classifier turns each line into a
//! [`ResourceGroup`], tagging every URL with the [`ResourceKind`] its host and path
//! identify. Lines that cannot be turned into a group are reported as
//! [`MalformedLine`] values and skipped by the caller.

mod classifier;
mod hub_id;
mod malformed_line;
mod repo_spec;
mod resource_group;
mod resource_kind;
mod resource_url;

pub use classifier::{ParsedInput, classify_url, parse_input, parse_line};
pub use hub_id::HubId;
pub use malformed_line::{MalformedLine, MalformedReason};
pub use repo_spec::RepoSpec;
pub use resource_group::{ResourceGroup, Slot};
pub use resource_kind::ResourceKind;
pub use resource_url::{Locator, ResourceUrl};
