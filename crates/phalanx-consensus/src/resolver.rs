//! Full placement recompute.
//!
//! Runs from scratch on every update; nothing is carried between runs except
//! the previous-places map.
//!
//! 1. Members reporting a formation slot claim it; everyone else is unplaced.
//! 2. Contended slots go to the [`select_claimant`] winner, losers become
//!    unplaced.
//! 3. Unplaced members return to their previous slot when it is free.
//! 4. Whoever is left fills the overflow slots in name order. Members past
//!    the last overflow slot are not drawn.
//! 5. Every member now on a formation slot records it as its previous place.
//!    Entries of members not on the grid are kept so they can reclaim their
//!    slot later.

use std::collections::BTreeMap;

use phalanx_roster::Member;
use phalanx_topology::{Place, OVERFLOW_PLACES};

use crate::contention::select_claimant;
use crate::formation::{Formation, PreviousPlaces};

/// Output of one placement run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub formation: Formation,
    pub previous_places: PreviousPlaces,
    /// Members that did not fit into any slot, in name order
    pub omitted: Vec<String>,
}

/// Place every member, given where members were placed before.
pub fn resolve<'a, I>(members: I, previous: &PreviousPlaces) -> Resolution
where
    I: IntoIterator<Item = &'a Member>,
{
    let mut claims: BTreeMap<Place, Vec<&Member>> = BTreeMap::new();
    let mut unplaced: Vec<&Member> = Vec::new();

    for member in members {
        match member.place {
            Some(place) if place.is_valid() => claims.entry(place).or_default().push(member),
            _ => unplaced.push(member),
        }
    }

    let mut formation = Formation::new();
    for (place, claimants) in claims {
        let Some(winner) = select_claimant(&claimants) else {
            continue;
        };
        for loser in claimants.iter().filter(|c| c.name != winner.name) {
            tracing::debug!(
                %place,
                winner = %winner.name,
                loser = %loser.name,
                source = %winner.source,
                "slot contention resolved"
            );
            unplaced.push(*loser);
        }
        formation.insert(place, winner.clone());
    }

    // Stability pass, visited in name order so shared stale entries resolve
    // the same way every run.
    unplaced.sort_by(|a, b| a.name.cmp(&b.name));
    let mut remaining = Vec::with_capacity(unplaced.len());
    for member in unplaced {
        match previous.get(&member.name) {
            Some(&prev) if prev.is_valid() && !formation.is_occupied(prev) => {
                formation.insert(prev, member.clone());
            }
            _ => remaining.push(member),
        }
    }

    let mut previous_places = previous.clone();
    for (place, member) in formation.iter() {
        previous_places.insert(member.name.clone(), place);
    }

    let mut overflow = OVERFLOW_PLACES.iter();
    let mut omitted = Vec::new();
    for member in remaining {
        match overflow.next() {
            Some(&place) => {
                formation.insert(place, member.clone());
            }
            None => omitted.push(member.name.clone()),
        }
    }
    if !omitted.is_empty() {
        tracing::warn!(?omitted, "formation full, members not drawn");
    }

    debug_assert!(formation.check_occupancy().is_ok());

    Resolution {
        formation,
        previous_places,
        omitted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phalanx_roster::{Registry, Source, Timestamp};

    fn report(name: &str, source: Source, at: u64, place: Option<(i32, i32)>) -> Member {
        let member = Member::new(name, source, Timestamp(at));
        match place {
            Some((x, y)) => member.with_place(Place::new(x, y)),
            None => member,
        }
    }

    fn name_at(resolution: &Resolution, x: i32, y: i32) -> Option<&str> {
        resolution
            .formation
            .get(Place::new(x, y))
            .map(|m| m.name.as_str())
    }

    #[test]
    fn empty_roster() {
        let members: Vec<Member> = Vec::new();
        let resolution = resolve(&members, &PreviousPlaces::new());
        assert!(resolution.formation.is_empty());
        assert!(resolution.previous_places.is_empty());
    }

    #[test]
    fn uncontested_members_keep_reported_slots() {
        let members = [
            report("Alice", Source::A, 1, Some((1, 1))),
            report("Bob", Source::A, 2, Some((3, 2))),
        ];
        let resolution = resolve(&members, &PreviousPlaces::new());
        assert_eq!(name_at(&resolution, 1, 1), Some("Alice"));
        assert_eq!(name_at(&resolution, 3, 2), Some("Bob"));
        assert_eq!(
            resolution.previous_places.get("Bob"),
            Some(&Place::new(3, 2))
        );
    }

    #[test]
    fn source_b_claim_wins_over_source_a() {
        let members = [
            report("Ruska", Source::A, 50, Some((2, 2))),
            report("Minion", Source::B, 10, Some((2, 2))),
        ];
        let resolution = resolve(&members, &PreviousPlaces::new());
        assert_eq!(name_at(&resolution, 2, 2), Some("Minion"));
        // Loser falls back to the first overflow slot.
        assert_eq!(name_at(&resolution, 1, 4), Some("Ruska"));
    }

    #[test]
    fn later_report_wins_within_source() {
        let members = [
            report("Alice", Source::A, 10, Some((1, 2))),
            report("Bob", Source::A, 20, Some((1, 2))),
        ];
        let resolution = resolve(&members, &PreviousPlaces::new());
        assert_eq!(name_at(&resolution, 1, 2), Some("Bob"));
    }

    #[test]
    fn stability_returns_member_to_previous_slot() {
        let mut previous = PreviousPlaces::new();
        let first = resolve(
            &[report("Ruska", Source::A, 1, Some((2, 2)))],
            &previous,
        );
        assert_eq!(name_at(&first, 2, 2), Some("Ruska"));
        previous = first.previous_places;

        // Next report has no usable position.
        let second = resolve(&[report("Ruska", Source::A, 2, None)], &previous);
        assert_eq!(name_at(&second, 2, 2), Some("Ruska"));

        let third = resolve(
            &[report("Ruska", Source::A, 3, Some((9, 9)))],
            &second.previous_places,
        );
        assert_eq!(name_at(&third, 2, 2), Some("Ruska"));
    }

    #[test]
    fn stability_yields_to_current_claim() {
        let mut previous = PreviousPlaces::new();
        previous.insert("Ruska".into(), Place::new(2, 2));

        let members = [
            report("Ruska", Source::A, 1, None),
            report("Bob", Source::A, 2, Some((2, 2))),
        ];
        let resolution = resolve(&members, &previous);
        assert_eq!(name_at(&resolution, 2, 2), Some("Bob"));
        assert_eq!(name_at(&resolution, 1, 4), Some("Ruska"));
        // Ruska lost the slot this run; Bob now owns it.
        assert_eq!(
            resolution.previous_places.get("Bob"),
            Some(&Place::new(2, 2))
        );
        assert_eq!(
            resolution.previous_places.get("Ruska"),
            Some(&Place::new(2, 2))
        );
    }

    #[test]
    fn contention_loser_can_use_previous_slot() {
        let mut previous = PreviousPlaces::new();
        previous.insert("Alice".into(), Place::new(1, 1));

        let members = [
            report("Alice", Source::A, 1, Some((3, 3))),
            report("Bob", Source::B, 2, Some((3, 3))),
        ];
        let resolution = resolve(&members, &previous);
        assert_eq!(name_at(&resolution, 3, 3), Some("Bob"));
        assert_eq!(name_at(&resolution, 1, 1), Some("Alice"));
    }

    #[test]
    fn overflow_in_name_order() {
        let members = [
            report("Bob", Source::A, 1, None),
            report("Alice", Source::A, 2, None),
        ];
        let resolution = resolve(&members, &PreviousPlaces::new());
        assert_eq!(name_at(&resolution, 1, 4), Some("Alice"));
        assert_eq!(name_at(&resolution, 2, 4), Some("Bob"));

        let reversed = [members[1].clone(), members[0].clone()];
        assert_eq!(resolve(&reversed, &PreviousPlaces::new()), resolution);
    }

    #[test]
    fn overflow_places_not_remembered() {
        let resolution = resolve(
            &[report("Alice", Source::A, 1, None)],
            &PreviousPlaces::new(),
        );
        assert_eq!(name_at(&resolution, 1, 4), Some("Alice"));
        assert!(resolution.previous_places.is_empty());
    }

    #[test]
    fn excess_members_are_omitted() {
        let names: Vec<String> = (0..10).map(|i| format!("Member{i}")).collect();
        let members: Vec<Member> = names
            .iter()
            .enumerate()
            .map(|(i, n)| report(n, Source::A, i as u64, None))
            .collect();
        let resolution = resolve(&members, &PreviousPlaces::new());

        assert_eq!(resolution.formation.len(), OVERFLOW_PLACES.len());
        assert_eq!(resolution.omitted, vec!["Member7", "Member8", "Member9"]);
    }

    #[test]
    fn absent_members_keep_previous_entry() {
        let mut previous = PreviousPlaces::new();
        previous.insert("Gone".into(), Place::new(3, 1));
        let resolution = resolve(
            &[report("Alice", Source::A, 1, Some((1, 1)))],
            &previous,
        );
        assert_eq!(
            resolution.previous_places.get("Gone"),
            Some(&Place::new(3, 1))
        );
    }

    #[test]
    fn resolves_registry_contents() {
        let mut registry = Registry::new();
        registry.merge(report("Ruska", Source::A, 1, Some((2, 2))));
        registry.merge(report("Ruska", Source::B, 2, Some((2, 2))));
        let resolution = resolve(registry.all(), &PreviousPlaces::new());
        let ruska = resolution.formation.get(Place::new(2, 2)).unwrap();
        assert_eq!(ruska.source, Source::B);
        assert_eq!(resolution.formation.len(), 1);
    }
}
