//! Rule-driven monitoring of DJEN judicial publications.
//!
//! Turns a caller-owned list of declarative search rules into a
//! deduplicated, provenance-tagged collection of publication records plus
//! the statistics of the run. Per enabled rule the pipeline is: paginated
//! fetch from the comunica API, exclusion filtering, provenance stamp;
//! then one global duplicate pass over everything.
//!
//! # Example
//!
//! ```rust,ignore
//! use djen_client::{DjenClient, DjenConfig};
//! use monitor::{FetchConfig, NullReporter, PublicationFetcher, SearchEngine};
//!
//! let client = DjenClient::new(DjenConfig::from_env())?;
//! let fetcher = PublicationFetcher::new(client, FetchConfig::default());
//! let report = SearchEngine::new(fetcher).execute(&rules, &NullReporter).await;
//! println!("{} unique publications", report.stats.total_found);
//! ```
//!
//! # Modules
//!
//! - [`rules`] - Search rules, typed query parameters, exclusion sub-rules
//! - [`fetch`] - Pagination against the upstream (pacing, rate-limit backoff)
//! - [`exclusions`] - Post-fetch filtering with per-cause attribution
//! - [`dedup`] - Cross-rule duplicate removal
//! - [`executor`] - The orchestrator callers drive
//! - [`stats`] - Run counters
//! - [`store`] - Rule definitions and execution results on disk
//! - [`progress`] - Fire-and-forget progress reporting
//! - [`testing`] - Reporters and fixtures shared by tests

pub mod dedup;
pub mod error;
pub mod exclusions;
pub mod executor;
pub mod fetch;
pub mod progress;
pub mod rules;
pub mod stats;
pub mod store;
pub mod testing;

pub use dedup::{dedup_key, remove_duplicates};
pub use error::StoreError;
pub use exclusions::{apply_exclusions, ExclusionCounts};
pub use executor::{ExecutionReport, SearchEngine};
pub use fetch::{FetchConfig, PublicationFetcher};
pub use progress::{NullReporter, ProgressReporter, TracingReporter};
pub use rules::{
    ExclusionField, ExclusionRule, ParamValue, Parameters, QueryField, SearchRule,
};
pub use stats::ExecutionStats;
pub use store::{ExecutionRecord, ExecutionStore, JsonResultStore, RuleStore};
