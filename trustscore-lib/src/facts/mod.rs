//! Metadata collection for resource groups
//!
//! Metrics never talk to the network directly. They read from a [`GroupFacts`], a
//! per-group view that fetches each document (model card, README, commit history,
//! dataset card, repository file listing) at most once from a [`MetadataSource`].
//!
//! # Implementation Model
//!
//! [`HttpSource`] is the production source. It combines a model hub client and a
//! GitHub client, both built on a shared `ApiClient` that classifies every response
//! into an [`ApiResult`] (success, not found, rate limited, failed). All requests pass
//! through one [`Throttler`], which bounds concurrency and is paused when a service
//! reports a rate limit, and through `resilient_get`, which retries transient failures
//! with exponential backoff.

mod api_client;
mod group_facts;
pub mod hosting;
mod http_source;
pub mod hub;
mod metadata;
pub(crate) mod resilient_http;
mod source;
mod throttler;

pub use api_client::{ApiClient, ApiResult};
pub use group_facts::GroupFacts;
pub use http_source::{HttpSource, HttpSourceOptions};
pub use metadata::{Activity, DatasetInfo, ModelInfo, RepoFile};
pub use source::MetadataSource;
pub use throttler::Throttler;
