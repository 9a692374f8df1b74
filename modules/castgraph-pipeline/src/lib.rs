//! Enrichment-and-aggregation pipeline for Farcaster casts.
//!
//! Each raw cast is normalized (validated and enriched through an
//! [`EnrichmentOracle`](enrichment_oracle::EnrichmentOracle)) and then fed,
//! in input order and exactly once, to three accumulators: the user
//! registry, the relationship edge list and the engagement aggregates.

pub mod engagement;
pub mod error;
pub mod normalizer;
pub mod output;
pub mod pipeline;
pub mod registry;
pub mod relationships;
pub mod sink;
pub mod stats;

pub use engagement::EngagementAggregates;
pub use error::{PipelineError, Result};
pub use output::{EngagementRow, PipelineOutput, UserRow};
pub use pipeline::{run_pipeline, Pipeline, PipelineState};
pub use registry::UserRegistry;
pub use relationships::EdgeList;
pub use sink::{JsonDirSink, TableSink};
pub use stats::RunStats;
