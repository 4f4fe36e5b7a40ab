//! The resolved formation: at most one member per place.
//!
//! # Occupancy Invariant
//!
//! A formation maps places to members, so a place can never hold two
//! members. The resolver additionally guarantees that no member is drawn
//! twice and that every place is either a grid slot or an overflow slot.
//! [`Formation::check_occupancy`] verifies both.

use std::collections::BTreeMap;

use phalanx_roster::Member;
use phalanx_topology::{Place, CAPACITY};
use serde::{Deserialize, Serialize};

/// Last formation slot each member held, by normalized name.
pub type PreviousPlaces = BTreeMap<String, Place>;

/// One occupied place, the wire form of a formation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub place: Place,
    pub member: Member,
}

/// Mapping from place to the member drawn there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Slot>", into = "Vec<Slot>")]
pub struct Formation {
    slots: BTreeMap<Place, Member>,
}

impl Formation {
    /// Create an empty formation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `member` at `place`, returning whoever was there before.
    pub fn insert(&mut self, place: Place, member: Member) -> Option<Member> {
        self.slots.insert(place, member)
    }

    /// Member drawn at `place`.
    pub fn get(&self, place: Place) -> Option<&Member> {
        self.slots.get(&place)
    }

    /// Whether some member is drawn at `place`.
    pub fn is_occupied(&self, place: Place) -> bool {
        self.slots.contains_key(&place)
    }

    /// Occupied places in place order.
    pub fn iter(&self) -> impl Iterator<Item = (Place, &Member)> {
        self.slots.iter().map(|(p, m)| (*p, m))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Verify the occupancy invariant.
    pub fn check_occupancy(&self) -> Result<(), OccupancyViolation> {
        if self.slots.len() > CAPACITY {
            return Err(OccupancyViolation::OverCapacity {
                occupied: self.slots.len(),
                capacity: CAPACITY,
            });
        }

        let mut seen: BTreeMap<&str, Place> = BTreeMap::new();
        for (place, member) in &self.slots {
            if !place.is_valid() && !place.is_overflow() {
                return Err(OccupancyViolation::OffGrid {
                    place: *place,
                    name: member.name.clone(),
                });
            }
            if let Some(first) = seen.insert(member.name.as_str(), *place) {
                return Err(OccupancyViolation::DuplicateMember {
                    name: member.name.clone(),
                    places: (first, *place),
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<Slot>> for Formation {
    fn from(slots: Vec<Slot>) -> Self {
        Self {
            slots: slots.into_iter().map(|s| (s.place, s.member)).collect(),
        }
    }
}

impl From<Formation> for Vec<Slot> {
    fn from(formation: Formation) -> Self {
        formation
            .slots
            .into_iter()
            .map(|(place, member)| Slot { place, member })
            .collect()
    }
}

/// Occupancy invariant violation (impossible for resolver output).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OccupancyViolation {
    /// One member drawn at two places
    #[error("member {name} drawn at both {} and {}", .places.0, .places.1)]
    DuplicateMember { name: String, places: (Place, Place) },
    /// A place that is neither a grid slot nor an overflow slot
    #[error("member {name} drawn off the grid at {place}")]
    OffGrid { place: Place, name: String },
    /// More members than the formation can show
    #[error("{occupied} occupied places exceed capacity {capacity}")]
    OverCapacity { occupied: usize, capacity: usize },
}
