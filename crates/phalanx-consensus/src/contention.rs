//! Choosing one occupant when several members claim the same slot.
//!
//! # Selection Order
//!
//! ```text
//! winner = argmax_{c ∈ claimants} (c.source outranks A, c.updated_at, -c.name)
//! ```
//!
//! 1. Authority: the status table sees the whole roster, so a Source B
//!    claim beats any Source A claim.
//! 2. Recency: among claims of equal authority the freshest report wins.
//! 3. Name: equal timestamps fall back to the lexicographically smallest
//!    name, so the outcome never depends on iteration order.

use std::cmp::{Ordering, Reverse};

use phalanx_roster::{Member, Source, Timestamp};

/// Select the occupant among members claiming one slot.
///
/// Returns `None` only for an empty claimant list.
pub fn select_claimant<'a>(claimants: &[&'a Member]) -> Option<&'a Member> {
    claimants.iter().copied().max_by(|a, b| compare_claims(a, b))
}

/// Order two claims; the greater claim wins the slot.
pub fn compare_claims(a: &Member, b: &Member) -> Ordering {
    claim_rank(a).cmp(&claim_rank(b))
}

fn claim_rank(member: &Member) -> (bool, Timestamp, Reverse<&str>) {
    (
        member.source.outranks(Source::A),
        member.updated_at,
        Reverse(member.name.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(name: &str, source: Source, at: u64) -> Member {
        Member::new(name, source, Timestamp(at))
    }

    #[test]
    fn empty_claimants_returns_none() {
        assert!(select_claimant(&[]).is_none());
    }

    #[test]
    fn single_claimant_wins() {
        let a = claim("Alice", Source::A, 1);
        assert_eq!(select_claimant(&[&a]).map(|m| m.name.as_str()), Some("Alice"));
    }

    #[test]
    fn source_b_beats_newer_source_a() {
        let stale_b = claim("Minion", Source::B, 1);
        let fresh_a = claim("Ruska", Source::A, 100);
        let winner = select_claimant(&[&fresh_a, &stale_b]).unwrap();
        assert_eq!(winner.name, "Minion");
    }

    #[test]
    fn recency_within_source() {
        let old = claim("Alice", Source::A, 10);
        let new = claim("Bob", Source::A, 20);
        assert_eq!(select_claimant(&[&old, &new]).unwrap().name, "Bob");
        assert_eq!(select_claimant(&[&new, &old]).unwrap().name, "Bob");

        let old = claim("Alice", Source::B, 10);
        let new = claim("Bob", Source::B, 20);
        assert_eq!(select_claimant(&[&new, &old]).unwrap().name, "Bob");
    }

    #[test]
    fn equal_timestamps_prefer_smaller_name() {
        let a = claim("Alice", Source::A, 5);
        let b = claim("Bob", Source::A, 5);
        assert_eq!(select_claimant(&[&a, &b]).unwrap().name, "Alice");
        assert_eq!(select_claimant(&[&b, &a]).unwrap().name, "Alice");
    }

    #[test]
    fn order_of_claimants_does_not_matter() {
        let x = claim("Xeno", Source::A, 3);
        let y = claim("Yara", Source::B, 1);
        let z = claim("Zed", Source::A, 9);
        let orders = [[&x, &y, &z], [&z, &x, &y], [&y, &z, &x]];
        for order in orders {
            assert_eq!(select_claimant(&order).unwrap().name, "Yara");
        }
    }
}
