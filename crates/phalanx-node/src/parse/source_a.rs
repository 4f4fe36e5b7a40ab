//! Party status messages (Source A).
//!
//! One message per member change, fields separated by single spaces in the
//! order of [`SOURCE_A_FIELDS`]. Empty fields are kept as empty tokens. The
//! party name is the only free-text field; when it contains spaces the
//! message simply has more than 30 tokens, so fields are taken positionally
//! from both ends and the middle belongs to the name.

use phalanx_roster::{normalize_name, Gauge, Member, Source, StatusFlags, Timestamp};
use phalanx_topology::Place;

use super::{int_field, ParseError};

/// Field order of a party status message.
pub const SOURCE_A_FIELDS: [&str; 30] = [
    "player",
    "race",
    "gender",
    "level",
    "hp",
    "maxhp",
    "sp",
    "maxsp",
    "ep",
    "maxep",
    "party_name",
    "place_x",
    "place_y",
    "creator",
    "formation",
    "member",
    "entry",
    "following",
    "leader",
    "linkdead",
    "resting",
    "idle",
    "invisible",
    "dead",
    "stunned",
    "unconscious",
    "party_exp",
    "total_party_exp",
    "party_length_in_seconds",
    "party_creation_time",
];

/// Fields before the party name.
const LEADING: usize = 10;
/// Fields after the party name.
const TRAILING: usize = 19;

/// Parse one party status message received at `at`.
pub fn parse_source_a(message: &str, at: Timestamp) -> Result<Member, ParseError> {
    let tokens: Vec<&str> = message.trim_end_matches(['\r', '\n']).split(' ').collect();
    if tokens.len() < SOURCE_A_FIELDS.len() {
        return Err(ParseError::Arity {
            expected: SOURCE_A_FIELDS.len(),
            found: tokens.len(),
        });
    }

    let (leading, rest) = tokens.split_at(LEADING);
    let trailing = &rest[rest.len() - TRAILING..];

    let &[player, _race, _gender, level, hp, maxhp, sp, maxsp, ep, maxep] = leading else {
        return Err(ParseError::Arity {
            expected: SOURCE_A_FIELDS.len(),
            found: tokens.len(),
        });
    };
    let &[place_x, place_y, _creator, formation, member, entry, following, leader, linkdead, resting, idle, invisible, dead, stunned, unconscious, _party_exp, _total_party_exp, _party_length, _party_created] =
        trailing
    else {
        return Err(ParseError::Arity {
            expected: SOURCE_A_FIELDS.len(),
            found: tokens.len(),
        });
    };

    let name = normalize_name(player);
    if name.is_empty() {
        return Err(ParseError::EmptyName);
    }
    int_field::<i32>("level", level)?;

    let place = match (place_x.parse(), place_y.parse()) {
        (Ok(x), Ok(y)) => Some(Place::new(x, y)),
        _ => None,
    };
    let flag = |value: &str| value == "1";

    Ok(Member {
        name,
        hp: Gauge::known(int_field("hp", hp)?, int_field("maxhp", maxhp)?),
        sp: Gauge::known(int_field("sp", sp)?, int_field("maxsp", maxsp)?),
        ep: Gauge::known(int_field("ep", ep)?, int_field("maxep", maxep)?),
        place,
        flags: StatusFlags {
            formation: flag(formation),
            member: flag(member),
            entry: flag(entry),
            following: flag(following),
            leader: flag(leader),
            linkdead: flag(linkdead),
            resting: flag(resting),
            idle: flag(idle),
            invisible: flag(invisible),
            dead: flag(dead),
            unknown: false,
        },
        stunned: int_field("stunned", stunned)?,
        unconscious: int_field("unconscious", unconscious)?,
        ambushed: None,
        updated_at: at,
        source: Source::A,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUSKA: &str =
        "Ruska elf f 50 408 445 100 100 90 90 Party 2 2 Ruska 1 0 0 0 0 0 0 0 0 0 0 0 1000 5000 3600 1700000000";

    fn with_fields(changes: &[(&str, &str)]) -> String {
        let mut tokens: Vec<&str> = RUSKA.split(' ').collect();
        for (field, value) in changes {
            let index = SOURCE_A_FIELDS.iter().position(|f| f == field).unwrap();
            tokens[index] = value;
        }
        tokens.join(" ")
    }

    fn with_field(field: &str, value: &str) -> String {
        with_fields(&[(field, value)])
    }

    #[test]
    fn parses_full_message() {
        let member = parse_source_a(RUSKA, Timestamp(7)).unwrap();
        assert_eq!(member.name, "Ruska");
        assert_eq!(member.hp, Gauge::known(408, 445));
        assert_eq!(member.sp, Gauge::known(100, 100));
        assert_eq!(member.ep, Gauge::known(90, 90));
        assert_eq!(member.place, Some(Place::new(2, 2)));
        assert!(member.flags.formation);
        assert!(!member.flags.member);
        assert!(!member.flags.unknown);
        assert_eq!(member.stunned, 0);
        assert_eq!(member.ambushed, None);
        assert_eq!(member.updated_at, Timestamp(7));
        assert_eq!(member.source, Source::A);
    }

    #[test]
    fn name_is_normalized() {
        let member = parse_source_a(&with_field("player", "rUSKA"), Timestamp(1)).unwrap();
        assert_eq!(member.name, "Ruska");
    }

    #[test]
    fn party_name_with_spaces() {
        let message = RUSKA.replace(" Party ", " The Iron Wall ");
        let member = parse_source_a(&message, Timestamp(1)).unwrap();
        assert_eq!(member.place, Some(Place::new(2, 2)));
        assert!(member.flags.formation);
    }

    #[test]
    fn empty_party_name_keeps_positions() {
        let message = with_field("party_name", "");
        assert!(message.contains(" 90  2 2 "));
        let member = parse_source_a(&message, Timestamp(1)).unwrap();
        assert_eq!(member.place, Some(Place::new(2, 2)));
        assert!(member.flags.formation);
        assert!(!member.flags.member);
    }

    #[test]
    fn too_few_fields() {
        let err = parse_source_a("Ruska elf f 50", Timestamp(1)).unwrap_err();
        assert_eq!(
            err,
            ParseError::Arity {
                expected: 30,
                found: 4
            }
        );
        assert!(parse_source_a("", Timestamp(1)).is_err());
    }

    #[test]
    fn bad_position_means_unknown_place() {
        let message = with_field("place_x", "?");
        let member = parse_source_a(&message, Timestamp(1)).unwrap();
        assert_eq!(member.place, None);

        // Out-of-grid positions are kept; placement decides what they mean.
        let message = with_field("place_y", "5");
        let member = parse_source_a(&message, Timestamp(1)).unwrap();
        assert_eq!(member.place, Some(Place::new(2, 5)));
        assert!(!member.has_valid_place());
    }

    #[test]
    fn mandatory_numbers_drop_record() {
        for field in ["level", "hp", "maxhp", "sp", "maxsp", "ep", "maxep", "stunned", "unconscious"] {
            let err = parse_source_a(&with_field(field, "lots"), Timestamp(1)).unwrap_err();
            assert!(
                matches!(err, ParseError::InvalidNumber { field: f, .. } if f == field),
                "{field} should be mandatory"
            );
        }
    }

    #[test]
    fn booleans_are_exactly_one() {
        let message = with_fields(&[("leader", "1"), ("formation", "2")]);
        let member = parse_source_a(&message, Timestamp(1)).unwrap();
        assert!(member.flags.leader);
        assert!(!member.flags.formation);
    }

    #[test]
    fn stun_counters() {
        let message = with_field("stunned", "3");
        let member = parse_source_a(&message, Timestamp(1)).unwrap();
        assert_eq!(member.stunned, 3);
        assert_eq!(member.state_label(), "stu|3");
    }
}
