//! Raw cast → enriched cast.

use castgraph_common::{CastAuthor, EnrichedCast, RawCast, UNKNOWN_EMOTION};
use enrichment_oracle::{EnrichmentOracle, Stage};
use tracing::warn;

use crate::error::{PipelineError, Result};

/// Validate the required fields of `raw` and attach oracle output.
///
/// Oracle calls run in order: sentiment, emotion, topics. An emotion failure
/// is logged and replaced with `"unknown"`; a sentiment or topics failure
/// aborts this cast.
pub async fn normalize(
    position: usize,
    raw: RawCast,
    oracle: &dyn EnrichmentOracle,
) -> Result<EnrichedCast> {
    let missing = |field| PipelineError::MalformedCast { position, field };

    let id = raw.id.ok_or_else(|| missing("id"))?;
    let username = raw.author.username.ok_or_else(|| missing("author.username"))?;
    let text = raw.text.ok_or_else(|| missing("text"))?;

    let sentiment = oracle
        .sentiment(&text)
        .await
        .map_err(|e| enrichment_failed(Stage::Sentiment, &id, e))?;

    let emotion = match oracle.emotion(&text).await {
        Ok(label) => label,
        Err(e) => {
            warn!(cast_id = id.as_str(), error = %e, "Emotion classification failed, using fallback");
            UNKNOWN_EMOTION.to_string()
        }
    };

    let topics = oracle
        .topics(&text)
        .await
        .map_err(|e| enrichment_failed(Stage::Topics, &id, e))?;

    Ok(EnrichedCast {
        id,
        author: CastAuthor {
            username,
            display_name: raw.author.display_name,
            profile_image: raw.author.profile_image,
        },
        text,
        timestamp: raw.timestamp,
        engagement: raw.engagement,
        embeds: raw.embeds,
        sentiment,
        emotion,
        topics,
    })
}

fn enrichment_failed(stage: Stage, cast_id: &str, err: anyhow::Error) -> PipelineError {
    PipelineError::Enrichment {
        stage,
        cast_id: cast_id.to_string(),
        reason: format!("{err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castgraph_common::{Engagement, RawAuthor, Sentiment};
    use enrichment_oracle::testing::MockOracle;

    fn raw(id: Option<&str>, username: Option<&str>, text: Option<&str>) -> RawCast {
        RawCast {
            id: id.map(String::from),
            author: RawAuthor {
                username: username.map(String::from),
                display_name: Some("Display".into()),
                profile_image: None,
            },
            text: text.map(String::from),
            timestamp: Some(1_742_090_574_000),
            engagement: Engagement {
                likes: Some(2),
                ..Engagement::default()
            },
            embeds: None,
        }
    }

    #[tokio::test]
    async fn attaches_oracle_output() {
        let oracle = MockOracle::new()
            .with_sentiment(Sentiment::Positive)
            .with_emotion("joy")
            .with_topics(&["frame"]);

        let cast = normalize(0, raw(Some("0x1"), Some("alice"), Some("gm")), &oracle)
            .await
            .unwrap();

        assert_eq!(cast.id, "0x1");
        assert_eq!(cast.author.username, "alice");
        assert_eq!(cast.author.display_name.as_deref(), Some("Display"));
        assert_eq!(cast.sentiment, Sentiment::Positive);
        assert_eq!(cast.emotion, "joy");
        assert!(cast.topics.contains("frame"));
        assert_eq!(cast.engagement.likes, Some(2));
    }

    #[tokio::test]
    async fn emotion_failure_falls_back_to_unknown() {
        let oracle = MockOracle::new().fail_when(Stage::Emotion, "gm");

        let cast = normalize(0, raw(Some("0x1"), Some("alice"), Some("gm")), &oracle)
            .await
            .unwrap();

        assert_eq!(cast.emotion, UNKNOWN_EMOTION);
        assert_eq!(oracle.calls(Stage::Topics), 1);
    }

    #[tokio::test]
    async fn sentiment_failure_is_fatal() {
        let oracle = MockOracle::new().fail_when(Stage::Sentiment, "gm");

        let err = normalize(3, raw(Some("0x1"), Some("alice"), Some("gm")), &oracle)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Enrichment { stage: Stage::Sentiment, ref cast_id, .. } if cast_id == "0x1"
        ));
        assert_eq!(oracle.calls(Stage::Emotion), 0);
    }

    #[tokio::test]
    async fn topics_failure_is_fatal() {
        let oracle = MockOracle::new().fail_when(Stage::Topics, "gm");

        let err = normalize(0, raw(Some("0x1"), Some("alice"), Some("gm")), &oracle)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Enrichment { stage: Stage::Topics, .. }));
    }

    #[tokio::test]
    async fn missing_required_fields_are_reported_by_name() {
        let oracle = MockOracle::new();

        let cases = [
            (raw(None, Some("a"), Some("t")), "id"),
            (raw(Some("1"), None, Some("t")), "author.username"),
            (raw(Some("1"), Some("a"), None), "text"),
        ];
        for (cast, expected) in cases {
            match normalize(7, cast, &oracle).await {
                Err(PipelineError::MalformedCast { position, field }) => {
                    assert_eq!(position, 7);
                    assert_eq!(field, expected);
                }
                other => panic!("expected MalformedCast for {expected}, got {other:?}"),
            }
        }
        assert_eq!(oracle.calls(Stage::Sentiment), 0);
    }
}
