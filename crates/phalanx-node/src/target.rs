//! Current cast target.

use phalanx_consensus::Formation;
use phalanx_roster::normalize_name;
use phalanx_topology::Place;

/// Result of a request that resolved to a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub name: String,
    /// False when the member already was the target
    pub changed: bool,
}

/// Remembers who heals and buffs go to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSelector {
    current: Option<String>,
}

impl TargetSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Target whoever stands at `place`. An empty place selects nobody.
    pub fn select_place(&mut self, place: Place, formation: &Formation) -> Option<Selection> {
        let name = formation.get(place)?.name.clone();
        Some(self.set(name))
    }

    /// Target a member by name, whether or not they are placed.
    pub fn select_name(&mut self, name: &str) -> Option<Selection> {
        let name = normalize_name(name);
        if name.is_empty() {
            return None;
        }
        Some(self.set(name))
    }

    fn set(&mut self, name: String) -> Selection {
        let changed = self.current.as_deref() != Some(name.as_str());
        if changed {
            self.current = Some(name.clone());
        }
        Selection { name, changed }
    }
}
