use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Emotion label used when the emotion classifier fails on a cast.
pub const UNKNOWN_EMOTION: &str = "unknown";

// --- Raw feed types ---

/// Author block of a cast as delivered by the feed. Every field is optional on
/// the wire; the normalizer decides which ones are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAuthor {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub profile_image: Option<String>,
}

/// Engagement counters attached to a cast. A counter missing from the feed
/// payload stays `None` and counts as zero when aggregated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub likes: Option<u64>,
    pub recasts: Option<u64>,
    pub replies: Option<u64>,
    pub total: Option<u64>,
}

/// A single cast as returned by the feed API, before validation or enrichment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCast {
    pub id: Option<String>,
    #[serde(default)]
    pub author: RawAuthor,
    pub text: Option<String>,
    /// Epoch milliseconds.
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub engagement: Engagement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeds: Option<serde_json::Value>,
}

// --- Enrichment ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Bucket a polarity score in [-1, 1]. Scores within 0.1 of zero are neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.1 {
            Sentiment::Positive
        } else if polarity < -0.1 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Negative => write!(f, "negative"),
        }
    }
}

/// Validated author identity of a normalized cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastAuthor {
    pub username: String,
    pub display_name: Option<String>,
    pub profile_image: Option<String>,
}

/// A cast after validation and enrichment. Built once by the normalizer and
/// handed to each accumulator by shared reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCast {
    pub id: String,
    pub author: CastAuthor,
    pub text: String,
    pub timestamp: Option<i64>,
    pub engagement: Engagement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeds: Option<serde_json::Value>,
    pub sentiment: Sentiment,
    pub emotion: String,
    pub topics: BTreeSet<String>,
}

impl EnrichedCast {
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }
}

// --- Derived views ---

/// One profile per distinct author username.
///
/// `fid` is taken from the id of the first cast seen for the username. Casts
/// and users share that id space in the feed, so the value identifies a post,
/// not an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    fid: String,
    username: String,
    display_name: Option<String>,
    messages: Vec<String>,
    msg_count: u64,
}

impl UserProfile {
    pub fn new(fid: String, username: String, display_name: Option<String>) -> Self {
        Self {
            fid,
            username,
            display_name,
            messages: Vec::new(),
            msg_count: 0,
        }
    }

    /// Append a message. `msg_count` always tracks `messages.len()`.
    pub fn push_message(&mut self, text: impl Into<String>) {
        self.messages.push(text.into());
        self.msg_count += 1;
    }

    pub fn fid(&self) -> &str {
        &self.fid
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn msg_count(&self) -> u64 {
        self.msg_count
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Mention,
    Reply,
    Callout,
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationshipType::Mention => write!(f, "mention"),
            RelationshipType::Reply => write!(f, "reply"),
            RelationshipType::Callout => write!(f, "callout"),
        }
    }
}

/// Directed edge from a cast's author to a user mentioned in its text.
/// `to` is the raw mention token and is never checked against known users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipEdge {
    pub timestamp: Option<i64>,
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: RelationshipType,
}

/// Running engagement totals for one author.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementTotals {
    pub likes: u64,
    pub recasts: u64,
    pub replies: u64,
    pub total: u64,
}

impl EngagementTotals {
    /// Add one cast's counters. Absent counters contribute zero.
    pub fn add(&mut self, engagement: &Engagement) {
        self.likes = self.likes.saturating_add(engagement.likes.unwrap_or(0));
        self.recasts = self.recasts.saturating_add(engagement.recasts.unwrap_or(0));
        self.replies = self.replies.saturating_add(engagement.replies.unwrap_or(0));
        self.total = self.total.saturating_add(engagement.total.unwrap_or(0));
    }
}
