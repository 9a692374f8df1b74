// Scripted oracle for pipeline tests.
//
// Returns fixed labels for every text, and fails a chosen stage whenever the
// text contains a registered marker. Counts calls per stage so tests can
// assert that each cast was enriched exactly once.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{bail, Result};
use async_trait::async_trait;
use castgraph_common::Sentiment;

use crate::{EnrichmentOracle, Stage};

pub struct MockOracle {
    sentiment: Sentiment,
    emotion: String,
    topics: BTreeSet<String>,
    failures: Vec<(Stage, String)>,
    sentiment_calls: AtomicUsize,
    emotion_calls: AtomicUsize,
    topics_calls: AtomicUsize,
}

impl MockOracle {
    pub fn new() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            emotion: "neutral".to_string(),
            topics: BTreeSet::new(),
            failures: Vec::new(),
            sentiment_calls: AtomicUsize::new(0),
            emotion_calls: AtomicUsize::new(0),
            topics_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = sentiment;
        self
    }

    pub fn with_emotion(mut self, emotion: &str) -> Self {
        self.emotion = emotion.to_string();
        self
    }

    pub fn with_topics(mut self, topics: &[&str]) -> Self {
        self.topics = topics.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Fail `stage` for any text containing `marker`.
    pub fn fail_when(mut self, stage: Stage, marker: &str) -> Self {
        self.failures.push((stage, marker.to_string()));
        self
    }

    pub fn calls(&self, stage: Stage) -> usize {
        match stage {
            Stage::Sentiment => self.sentiment_calls.load(Ordering::SeqCst),
            Stage::Emotion => self.emotion_calls.load(Ordering::SeqCst),
            Stage::Topics => self.topics_calls.load(Ordering::SeqCst),
        }
    }

    fn check(&self, stage: Stage, text: &str) -> Result<()> {
        if let Some((_, marker)) = self
            .failures
            .iter()
            .find(|(s, marker)| *s == stage && text.contains(marker.as_str()))
        {
            bail!("MockOracle: {stage} scripted to fail on {marker:?}");
        }
        Ok(())
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EnrichmentOracle for MockOracle {
    async fn sentiment(&self, text: &str) -> Result<Sentiment> {
        self.sentiment_calls.fetch_add(1, Ordering::SeqCst);
        self.check(Stage::Sentiment, text)?;
        Ok(self.sentiment)
    }

    async fn emotion(&self, text: &str) -> Result<String> {
        self.emotion_calls.fetch_add(1, Ordering::SeqCst);
        self.check(Stage::Emotion, text)?;
        Ok(self.emotion.clone())
    }

    async fn topics(&self, text: &str) -> Result<BTreeSet<String>> {
        self.topics_calls.fetch_add(1, Ordering::SeqCst);
        self.check(Stage::Topics, text)?;
        Ok(self.topics.clone())
    }
}
