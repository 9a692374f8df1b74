//! Enrichment oracle: sentiment, emotion and topic extraction over cast text.
//!
//! The pipeline only depends on [`EnrichmentOracle`]. Model-backed providers
//! plug in behind the trait; [`LexiconOracle`] is the deterministic offline
//! default.

pub mod lexicon;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

use std::collections::BTreeSet;

use anyhow::Result;
use async_trait::async_trait;
use castgraph_common::Sentiment;

pub use lexicon::LexiconOracle;

/// The three oracle calls, used to tag failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Sentiment,
    Emotion,
    Topics,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Sentiment => write!(f, "sentiment"),
            Stage::Emotion => write!(f, "emotion"),
            Stage::Topics => write!(f, "topics"),
        }
    }
}

#[async_trait]
pub trait EnrichmentOracle: Send + Sync {
    /// Classify overall polarity of the text.
    async fn sentiment(&self, text: &str) -> Result<Sentiment>;

    /// Return a single emotion label for the text. Callers substitute
    /// `"unknown"` when this fails.
    async fn emotion(&self, text: &str) -> Result<String>;

    /// Extract a set of topic keywords.
    async fn topics(&self, text: &str) -> Result<BTreeSet<String>>;
}
