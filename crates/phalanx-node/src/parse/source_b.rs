//! Party status table rows (Source B).
//!
//! A row looks like
//!
//! ```text
//! | 2.2  +Ruska          mbr   408(445)  100(100)  high  |
//! ```
//!
//! idle marker, `y.x`, optional `+`, name, state code, hp(maxhp), then the
//! sp and ep columns separated by at least two spaces. Either coordinate may
//! be `?`. The sp and ep columns are numeric for the local player and
//! qualitative text for everybody else.

use std::sync::LazyLock;

use phalanx_roster::{normalize_name, Gauge, Member, Source, Timestamp};
use phalanx_topology::Place;
use regex::{Captures, Regex};

use super::{int_field, ParseError};

/// Maximum of a gauge reported as text.
pub const QUALITATIVE_MAX: i32 = 100;

/// Name the table shows for members we cannot see.
const UNSEEN_NAME: &str = "Someone";

static ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\|(?P<idle>.)(?P<y>[1-3?])\.(?P<x>[1-3?])\s+\+?",
        r"(?P<name>[A-Za-z][A-Za-z ]*?)\s+",
        r"(?P<state>[a-z]+(?:\|\d+)?)\s+",
        r"(?P<hp>\d+)\((?P<maxhp>\d+)\)\s+",
        r"(?P<sp>[A-Za-z0-9 .()]+?)\s{2,}",
        r"(?P<ep>[A-Za-z0-9 .()]+?)\s*\|",
    ))
    .expect("status row pattern compiles")
});

/// Value of a qualitative gauge reading, out of [`QUALITATIVE_MAX`].
pub fn qualitative_value(text: &str) -> Option<i32> {
    let value = match text.trim().to_lowercase().as_str() {
        "negative" => 0,
        "very low" => 10,
        "low" => 20,
        "medium" => 40,
        "high" => 60,
        "very high" => 80,
        "full" => 100,
        _ => return None,
    };
    Some(value)
}

/// Parse one status table row received at `at`.
pub fn parse_source_b(row: &str, at: Timestamp) -> Result<Member, ParseError> {
    if row.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    let caps = ROW
        .captures(row)
        .ok_or_else(|| ParseError::NoMatch(row.trim_end().to_string()))?;

    let name = normalize_name(&caps["name"]);
    if name.is_empty() {
        return Err(ParseError::EmptyName);
    }

    let mut member = Member::new(&name, Source::B, at);
    member.place = place(&caps);
    member.hp = Gauge::known(
        int_field("hp", &caps["hp"])?,
        int_field("maxhp", &caps["maxhp"])?,
    );
    member.sp = gauge(&caps["sp"]);
    member.ep = gauge(&caps["ep"]);
    member.flags.idle = !caps["idle"].trim().is_empty();
    member.flags.invisible = name == UNSEEN_NAME;
    member.ambushed = Some(false);
    apply_state(&mut member, &caps["state"])?;

    Ok(member)
}

fn place(caps: &Captures<'_>) -> Option<Place> {
    let x = caps["x"].parse().ok()?;
    let y = caps["y"].parse().ok()?;
    Some(Place::new(x, y))
}

/// `N(M)`, bare `N`, or qualitative text.
fn gauge(column: &str) -> Gauge {
    let column = column.trim();
    if let Some((current, max)) = column.strip_suffix(')').and_then(|c| c.split_once('(')) {
        if let (Ok(current), Ok(max)) = (current.trim().parse(), max.parse()) {
            return Gauge::known(current, max);
        }
    }
    if let Ok(current) = column.parse() {
        return Gauge {
            current: Some(current),
            max: None,
        };
    }
    match qualitative_value(column) {
        Some(value) => Gauge::known(value, QUALITATIVE_MAX),
        None => Gauge::unknown(),
    }
}

/// Fold a state code into the member's flags and counters.
fn apply_state(member: &mut Member, code: &str) -> Result<(), ParseError> {
    let (base, count) = match code.split_once('|') {
        Some((base, count)) => (base, Some(int_field::<u32>("state", count)?)),
        None => (code, None),
    };

    let flags = &mut member.flags;
    match base {
        "form" => flags.formation = true,
        "mbr" => flags.member = true,
        "ent" => flags.entry = true,
        "fol" => flags.following = true,
        "ldr" => flags.leader = true,
        "ld" => flags.linkdead = true,
        "rest" => flags.resting = true,
        "dead" => flags.dead = true,
        "stu" => member.stunned = count.unwrap_or(1),
        // The label shows `unc|N` for a counter of N + 2.
        "unc" => member.unconscious = count.map_or(1, |n| n + 2),
        amb if amb.starts_with("amb") => member.ambushed = Some(true),
        other => {
            tracing::debug!(code = other, name = %member.name, "unrecognized state code");
            flags.unknown = true;
        }
    }
    Ok(())
}
