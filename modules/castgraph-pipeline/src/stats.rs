use castgraph_common::{EnrichedCast, RelationshipEdge, RelationshipType, Sentiment, UNKNOWN_EMOTION};
use serde::Serialize;

/// Counters for one pipeline run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub casts_processed: u64,
    pub users: usize,
    pub edges: u64,
    pub by_type: [u64; 3],      // Mention, Reply, Callout
    pub by_sentiment: [u64; 3], // Positive, Neutral, Negative
    pub unknown_emotions: u64,
}

impl RunStats {
    pub(crate) fn observe_cast(&mut self, cast: &EnrichedCast, users: usize) {
        self.casts_processed += 1;
        self.users = users;
        let slot = match cast.sentiment {
            Sentiment::Positive => 0,
            Sentiment::Neutral => 1,
            Sentiment::Negative => 2,
        };
        self.by_sentiment[slot] += 1;
        if cast.emotion == UNKNOWN_EMOTION {
            self.unknown_emotions += 1;
        }
    }

    pub(crate) fn observe_edges(&mut self, edges: &[RelationshipEdge]) {
        for edge in edges {
            self.edges += 1;
            let slot = match edge.kind {
                RelationshipType::Mention => 0,
                RelationshipType::Reply => 1,
                RelationshipType::Callout => 2,
            };
            self.by_type[slot] += 1;
        }
    }
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Castgraph Run Complete ===")?;
        writeln!(f, "Casts processed:  {}", self.casts_processed)?;
        writeln!(f, "Users:            {}", self.users)?;
        writeln!(f, "Edges:            {}", self.edges)?;
        writeln!(f, "\nBy relationship:")?;
        writeln!(f, "  Mention: {}", self.by_type[0])?;
        writeln!(f, "  Reply:   {}", self.by_type[1])?;
        writeln!(f, "  Callout: {}", self.by_type[2])?;
        writeln!(f, "\nSentiment:")?;
        writeln!(f, "  Positive: {}", self.by_sentiment[0])?;
        writeln!(f, "  Neutral:  {}", self.by_sentiment[1])?;
        writeln!(f, "  Negative: {}", self.by_sentiment[2])?;
        if self.unknown_emotions > 0 {
            writeln!(f, "\nEmotion fallbacks: {}", self.unknown_emotions)?;
        }
        Ok(())
    }
}
