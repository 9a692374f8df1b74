//! Pipeline driver.
//!
//! Casts are processed one at a time: normalize, then registry, relationship
//! edges and engagement, in that order, before the next cast is read. The
//! first unrecovered error stops the run; everything accumulated before it
//! stays readable through [`Pipeline::state`].

use std::sync::Arc;

use castgraph_common::RawCast;
use enrichment_oracle::EnrichmentOracle;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::engagement::EngagementAggregates;
use crate::error::Result;
use crate::normalizer::normalize;
use crate::output::PipelineOutput;
use crate::registry::UserRegistry;
use crate::relationships::EdgeList;
use crate::stats::RunStats;

/// The three accumulators, owned by the driver and handed to each stage.
#[derive(Debug, Default)]
pub struct PipelineState {
    pub users: UserRegistry,
    pub edges: EdgeList,
    pub engagement: EngagementAggregates,
}

#[derive(TypedBuilder)]
pub struct Pipeline {
    oracle: Arc<dyn EnrichmentOracle>,
    #[builder(default = Uuid::new_v4())]
    run_id: Uuid,
    #[builder(default, setter(skip))]
    state: PipelineState,
    /// Casts handed to `process` so far, failed ones included.
    #[builder(default, setter(skip))]
    received: usize,
    #[builder(default, setter(skip))]
    stats: RunStats,
}

impl Pipeline {
    pub fn new(oracle: Arc<dyn EnrichmentOracle>) -> Self {
        Self::builder().oracle(oracle).build()
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Normalize one cast and feed it to every accumulator. `position` in
    /// errors is the cast's zero-based input index, counting earlier failures.
    pub async fn process(&mut self, raw: RawCast) -> Result<()> {
        let position = self.received;
        self.received += 1;
        let cast = normalize(position, raw, self.oracle.as_ref()).await?;

        self.state.users.record(&cast);
        let edges = self.state.edges.record(&cast);
        self.stats.observe_edges(edges);
        self.state.engagement.record(&cast);
        self.stats.observe_cast(&cast, self.state.users.len());

        debug!(
            position,
            cast_id = cast.id.as_str(),
            author = cast.author.username.as_str(),
            posted_at = ?cast.posted_at(),
            sentiment = %cast.sentiment,
            emotion = cast.emotion.as_str(),
            topics = cast.topics.len(),
            "Processed cast"
        );
        Ok(())
    }

    /// Process every cast in order, stopping at the first error.
    pub async fn run<I>(&mut self, casts: I) -> Result<()>
    where
        I: IntoIterator<Item = RawCast>,
    {
        info!(run_id = %self.run_id, "Pipeline run starting");

        for raw in casts {
            if let Err(e) = self.process(raw).await {
                warn!(
                    run_id = %self.run_id,
                    processed = self.stats.casts_processed,
                    error = %e,
                    "Pipeline run halted"
                );
                return Err(e);
            }
        }

        info!(
            run_id = %self.run_id,
            casts = self.stats.casts_processed,
            users = self.stats.users,
            edges = self.stats.edges,
            "Pipeline run complete"
        );
        Ok(())
    }

    pub fn finish(self) -> PipelineOutput {
        PipelineOutput {
            run_id: self.run_id,
            users: self.state.users.into_inner(),
            edges: self.state.edges.into_inner(),
            engagement: self.state.engagement.into_inner(),
            stats: self.stats,
        }
    }
}

/// Run a fresh pipeline over `casts` and return its final state.
pub async fn run_pipeline<I>(oracle: Arc<dyn EnrichmentOracle>, casts: I) -> Result<PipelineOutput>
where
    I: IntoIterator<Item = RawCast>,
{
    let mut pipeline = Pipeline::new(oracle);
    pipeline.run(casts).await?;
    Ok(pipeline.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use castgraph_common::{Engagement, RawAuthor, RelationshipType};
    use enrichment_oracle::testing::MockOracle;
    use enrichment_oracle::Stage;

    use crate::error::PipelineError;

    fn raw(id: &str, username: &str, text: &str, likes: u64) -> RawCast {
        RawCast {
            id: Some(id.to_string()),
            author: RawAuthor {
                username: Some(username.to_string()),
                display_name: None,
                profile_image: None,
            },
            text: Some(text.to_string()),
            timestamp: Some(1_000),
            engagement: Engagement {
                likes: Some(likes),
                recasts: Some(0),
                replies: Some(1),
                total: Some(likes + 1),
            },
            embeds: None,
        }
    }

    #[tokio::test]
    async fn feeds_every_accumulator_once_per_cast() {
        let oracle = Arc::new(MockOracle::new());
        let mut pipeline = Pipeline::new(oracle.clone());

        pipeline
            .run(vec![
                raw("1", "alice", "@bob hi", 3),
                raw("2", "bob", "thanks @alice and @carol", 1),
                raw("3", "alice", "callout @dan", 5),
            ])
            .await
            .unwrap();

        let state = pipeline.state();
        assert_eq!(state.users.get("alice").unwrap().msg_count(), 2);
        assert_eq!(state.users.get("bob").unwrap().msg_count(), 1);
        assert_eq!(state.edges.len(), 4);
        assert_eq!(state.engagement.get("alice").unwrap().likes, 8);
        assert_eq!(state.engagement.get("alice").unwrap().replies, 2);
        assert_eq!(oracle.calls(Stage::Sentiment), 3);
        assert_eq!(oracle.calls(Stage::Topics), 3);

        let stats = pipeline.stats();
        assert_eq!(stats.casts_processed, 3);
        assert_eq!(stats.users, 2);
        assert_eq!(stats.by_type, [2, 1, 1]);
    }

    #[tokio::test]
    async fn halts_at_first_failure_and_keeps_earlier_state() {
        let oracle = Arc::new(MockOracle::new().fail_when(Stage::Topics, "boom"));
        let mut pipeline = Pipeline::new(oracle);

        let err = pipeline
            .run(vec![
                raw("1", "alice", "fine", 1),
                raw("2", "bob", "boom @alice", 1),
                raw("3", "carol", "never reached", 1),
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Enrichment { stage: Stage::Topics, .. }));
        let state = pipeline.state();
        assert_eq!(state.users.len(), 1);
        assert!(state.users.get("bob").is_none());
        assert!(state.edges.is_empty());
        assert!(state.engagement.get("carol").is_none());
    }

    #[tokio::test]
    async fn malformed_cast_reports_its_position() {
        let mut missing_text = raw("2", "bob", "", 0);
        missing_text.text = None;

        let mut pipeline = Pipeline::new(Arc::new(MockOracle::new()));
        let err = pipeline
            .run(vec![raw("1", "alice", "ok", 0), missing_text])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::MalformedCast { position: 1, field: "text" }
        ));
    }

    #[tokio::test]
    async fn positions_count_casts_that_failed() {
        let mut anonymous = raw("2", "bob", "hi", 0);
        anonymous.author.username = None;
        let mut no_text = raw("3", "carol", "", 0);
        no_text.text = None;

        let mut pipeline = Pipeline::new(Arc::new(MockOracle::new()));
        pipeline.process(raw("1", "alice", "ok", 0)).await.unwrap();
        let first = pipeline.process(anonymous).await.unwrap_err();
        let second = pipeline.process(no_text).await.unwrap_err();

        assert!(matches!(first, PipelineError::MalformedCast { position: 1, .. }));
        assert!(matches!(
            second,
            PipelineError::MalformedCast { position: 2, field: "text" }
        ));
        assert_eq!(pipeline.stats().casts_processed, 1);
    }

    #[tokio::test]
    async fn emotion_failures_do_not_stop_the_run() {
        let oracle = Arc::new(MockOracle::new().fail_when(Stage::Emotion, "grr"));
        let output = run_pipeline(oracle, vec![raw("1", "a", "grr", 0), raw("2", "b", "ok", 0)])
            .await
            .unwrap();

        assert_eq!(output.stats.casts_processed, 2);
        assert_eq!(output.stats.unknown_emotions, 1);
    }

    #[tokio::test]
    async fn finish_hands_over_tables() {
        let output = run_pipeline(
            Arc::new(MockOracle::new()),
            vec![raw("0xfirst", "alice", "@bob yo callout", 2)],
        )
        .await
        .unwrap();

        assert_eq!(output.users["alice"].fid(), "0xfirst");
        assert_eq!(output.edges[0].kind, RelationshipType::Reply);
        assert_eq!(output.engagement["alice"].total, 3);
    }

    #[tokio::test]
    async fn builder_accepts_explicit_run_id() {
        let run_id = Uuid::new_v4();
        let pipeline = Pipeline::builder()
            .oracle(Arc::new(MockOracle::new()))
            .run_id(run_id)
            .build();
        assert_eq!(pipeline.run_id(), run_id);
    }
}
