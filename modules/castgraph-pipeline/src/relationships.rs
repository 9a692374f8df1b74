//! Mention scanning and edge classification.
//!
//! Classification looks at the whole cast text, not at the position of each
//! mention: any mention whose token the text starts with becomes a reply, and
//! otherwise the word "callout" anywhere in the text turns every mention into
//! a callout.

use std::sync::LazyLock;

use castgraph_common::{EnrichedCast, RelationshipEdge, RelationshipType};
use regex::Regex;

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([a-zA-Z0-9_.]+)").expect("valid regex"));

const CALLOUT_MARKER: &str = "callout";

/// Mentioned usernames in left-to-right order, duplicates included.
pub fn mentions(text: &str) -> impl Iterator<Item = &str> {
    MENTION_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn classify_with(text: &str, mentioned: &str, has_callout: bool) -> RelationshipType {
    let leads_with_mention = text
        .strip_prefix('@')
        .is_some_and(|rest| rest.starts_with(mentioned));

    if leads_with_mention {
        RelationshipType::Reply
    } else if has_callout {
        RelationshipType::Callout
    } else {
        RelationshipType::Mention
    }
}

fn contains_callout(text: &str) -> bool {
    text.to_lowercase().contains(CALLOUT_MARKER)
}

/// One edge per mention occurrence, in discovery order.
pub fn extract_edges(cast: &EnrichedCast) -> Vec<RelationshipEdge> {
    let has_callout = contains_callout(&cast.text);
    mentions(&cast.text)
        .map(|mentioned| RelationshipEdge {
            timestamp: cast.timestamp,
            from: cast.author.username.clone(),
            to: mentioned.to_string(),
            kind: classify_with(&cast.text, mentioned, has_callout),
        })
        .collect()
}

/// Append-only list of relationship edges.
#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    edges: Vec<RelationshipEdge>,
}

impl EdgeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the cast's edges and return them.
    pub fn record(&mut self, cast: &EnrichedCast) -> &[RelationshipEdge] {
        let start = self.edges.len();
        self.edges.extend(extract_edges(cast));
        &self.edges[start..]
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn as_slice(&self) -> &[RelationshipEdge] {
        &self.edges
    }

    pub fn into_inner(self) -> Vec<RelationshipEdge> {
        self.edges
    }
}
