use castgraph_common::{EnrichedCast, UserProfile};
use indexmap::IndexMap;

/// One profile per author username, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct UserRegistry {
    profiles: IndexMap<String, UserProfile>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the author's profile on first sighting, then append the text.
    ///
    /// Not idempotent: recording the same cast twice stores its text twice.
    pub fn record(&mut self, cast: &EnrichedCast) {
        let username = &cast.author.username;
        let profile = self
            .profiles
            .entry(username.clone())
            .or_insert_with(|| {
                UserProfile::new(
                    cast.id.clone(),
                    username.clone(),
                    cast.author.display_name.clone(),
                )
            });
        profile.push_message(cast.text.as_str());
    }

    pub fn get(&self, username: &str) -> Option<&UserProfile> {
        self.profiles.get(username)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserProfile> {
        self.profiles.values()
    }

    pub fn into_inner(self) -> IndexMap<String, UserProfile> {
        self.profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::cast;

    #[test]
    fn first_cast_seeds_profile() {
        let mut registry = UserRegistry::new();
        registry.record(&cast("0xaaa", "alice", "first"));
        registry.record(&cast("0xbbb", "alice", "second"));

        let profile = registry.get("alice").unwrap();
        assert_eq!(profile.fid(), "0xaaa");
        assert_eq!(profile.username(), "alice");
        assert_eq!(profile.messages(), ["first", "second"]);
        assert_eq!(profile.msg_count(), 2);
    }

    #[test]
    fn display_name_comes_from_first_cast() {
        let mut registry = UserRegistry::new();
        let mut renamed = cast("0x2", "alice", "later");
        renamed.author.display_name = Some("Alice Renamed".into());

        registry.record(&cast("0x1", "alice", "early"));
        registry.record(&renamed);

        assert_eq!(registry.get("alice").unwrap().display_name(), Some("alice (display)"));
    }

    #[test]
    fn replaying_a_cast_double_counts() {
        let mut registry = UserRegistry::new();
        let c = cast("0x1", "bob", "once");
        registry.record(&c);
        registry.record(&c);

        let profile = registry.get("bob").unwrap();
        assert_eq!(profile.msg_count(), 2);
        assert_eq!(profile.messages(), ["once", "once"]);
    }

    #[test]
    fn keeps_first_seen_order() {
        let mut registry = UserRegistry::new();
        for (id, user) in [("1", "carol"), ("2", "alice"), ("3", "carol"), ("4", "bob")] {
            registry.record(&cast(id, user, "x"));
        }
        let order: Vec<&str> = registry.iter().map(|p| p.username()).collect();
        assert_eq!(order, vec!["carol", "alice", "bob"]);
        assert_eq!(registry.len(), 3);
    }
}
