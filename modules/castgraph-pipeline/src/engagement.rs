use castgraph_common::{EngagementTotals, EnrichedCast};
use indexmap::IndexMap;

/// Per-author running engagement totals, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct EngagementAggregates {
    totals: IndexMap<String, EngagementTotals>,
}

impl EngagementAggregates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the cast's counters to its author's totals, starting from zero on
    /// first sighting.
    pub fn record(&mut self, cast: &EnrichedCast) {
        self.totals
            .entry(cast.author.username.clone())
            .or_default()
            .add(&cast.engagement);
    }

    pub fn get(&self, username: &str) -> Option<&EngagementTotals> {
        self.totals.get(username)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EngagementTotals)> {
        self.totals.iter().map(|(name, totals)| (name.as_str(), totals))
    }

    pub fn into_inner(self) -> IndexMap<String, EngagementTotals> {
        self.totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castgraph_common::Engagement;
    use crate::test_support::cast;

    fn with_engagement(id: &str, user: &str, engagement: Engagement) -> EnrichedCast {
        let mut c = cast(id, user, "text");
        c.engagement = engagement;
        c
    }

    #[test]
    fn sums_likes_across_casts() {
        let mut aggregates = EngagementAggregates::new();
        aggregates.record(&with_engagement("1", "alice", Engagement { likes: Some(3), ..Default::default() }));
        aggregates.record(&with_engagement("2", "alice", Engagement { likes: Some(5), ..Default::default() }));

        assert_eq!(aggregates.get("alice").unwrap().likes, 8);
    }

    #[test]
    fn missing_counters_contribute_zero() {
        let mut aggregates = EngagementAggregates::new();
        aggregates.record(&with_engagement(
            "1",
            "bob",
            Engagement {
                likes: Some(1),
                recasts: Some(2),
                replies: None,
                total: Some(3),
            },
        ));

        let totals = aggregates.get("bob").unwrap();
        assert_eq!(totals.replies, 0);
        assert_eq!(totals.recasts, 2);
        assert_eq!(totals.total, 3);
    }

    #[test]
    fn first_sighting_with_no_counters_is_all_zero() {
        let mut aggregates = EngagementAggregates::new();
        aggregates.record(&with_engagement("1", "carol", Engagement::default()));
        assert_eq!(aggregates.get("carol"), Some(&EngagementTotals::default()));
        assert_eq!(aggregates.len(), 1);
    }

    #[test]
    fn authors_are_tracked_separately() {
        let mut aggregates = EngagementAggregates::new();
        aggregates.record(&with_engagement("1", "a", Engagement { total: Some(10), ..Default::default() }));
        aggregates.record(&with_engagement("2", "b", Engagement { total: Some(1), ..Default::default() }));

        let names: Vec<&str> = aggregates.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(aggregates.get("a").unwrap().total, 10);
        assert_eq!(aggregates.get("b").unwrap().total, 1);
    }
}
