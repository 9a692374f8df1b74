use castgraph_common::{EngagementTotals, RelationshipEdge, UserProfile};
use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

use crate::stats::RunStats;

/// Final state of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub run_id: Uuid,
    pub users: IndexMap<String, UserProfile>,
    pub edges: Vec<RelationshipEdge>,
    pub engagement: IndexMap<String, EngagementTotals>,
    pub stats: RunStats,
}

/// Users table row. Messages are joined with newlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRow {
    pub fid: String,
    pub username: String,
    pub display_name: Option<String>,
    pub messages: String,
}

/// Engagement table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngagementRow {
    pub username: String,
    pub likes: u64,
    pub recasts: u64,
    pub replies: u64,
    pub total: u64,
}

impl PipelineOutput {
    pub fn user_rows(&self) -> Vec<UserRow> {
        self.users
            .iter()
            .map(|(username, profile)| UserRow {
                fid: profile.fid().to_string(),
                username: username.clone(),
                display_name: profile.display_name().map(String::from),
                messages: profile.messages().join("\n"),
            })
            .collect()
    }

    pub fn engagement_rows(&self) -> Vec<EngagementRow> {
        self.engagement
            .iter()
            .map(|(username, totals)| EngagementRow {
                username: username.clone(),
                likes: totals.likes,
                recasts: totals.recasts,
                replies: totals.replies,
                total: totals.total,
            })
            .collect()
    }
}
