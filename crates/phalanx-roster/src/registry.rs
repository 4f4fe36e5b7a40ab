//! Latest-record-per-name member registry.

use std::collections::{HashMap, HashSet};

use crate::{Member, Source};

/// Holds the most recent record for every member of the party.
///
/// Records are replaced whole on every report; nothing is merged field by
/// field and nothing expires. Members leave only through [`Registry::remove`].
#[derive(Debug, Default, Clone)]
pub struct Registry {
    members: HashMap<String, Member>,
    /// Names that have been reported by the push stream at least once.
    seen_on_a: HashSet<String>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or fully replace the record for `record.name`.
    ///
    /// Returns the record it replaced.
    pub fn merge(&mut self, record: Member) -> Option<Member> {
        if record.source == Source::A {
            self.seen_on_a.insert(record.name.clone());
        }
        let previous = self.members.insert(record.name.clone(), record);
        if previous.is_none() {
            tracing::debug!(members = self.members.len(), "member joined registry");
        }
        previous
    }

    /// Remove a member that left the party.
    pub fn remove(&mut self, name: &str) -> Option<Member> {
        self.seen_on_a.remove(name);
        self.members.remove(name)
    }

    /// Get a member by normalized name.
    pub fn get(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// Iterate over all current records.
    pub fn all(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether some member is only known from the status table, e.g. a
    /// summoned minion the push stream never reports.
    pub fn has_auxiliary(&self) -> bool {
        self.members
            .keys()
            .any(|name| !self.seen_on_a.contains(name))
    }
}
