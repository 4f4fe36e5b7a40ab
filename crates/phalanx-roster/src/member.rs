//! Member record types.

use phalanx_topology::Place;
use serde::{Deserialize, Serialize};

/// Which update stream produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Source {
    /// Per-member push update. Low latency, coarse position, no auxiliary
    /// entities.
    A,
    /// Full-roster status table. Sees every entity, arrives on demand.
    B,
}

impl Source {
    /// Whether this source wins placement contention over `other`.
    pub fn outranks(self, other: Source) -> bool {
        self == Source::B && other == Source::A
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::A => write!(f, "A"),
            Source::B => write!(f, "B"),
        }
    }
}

/// Monotonic report time in milliseconds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Timestamp(pub u64);

/// A current/maximum pair. `None` means the value is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Gauge {
    pub current: Option<i32>,
    pub max: Option<i32>,
}

impl Gauge {
    /// Fully known gauge.
    pub const fn known(current: i32, max: i32) -> Self {
        Self {
            current: Some(current),
            max: Some(max),
        }
    }

    /// Gauge with nothing known.
    pub const fn unknown() -> Self {
        Self {
            current: None,
            max: None,
        }
    }

    /// `current - max` when both are known.
    pub fn deficit(&self) -> Option<i32> {
        Some(self.current? - self.max?)
    }
}

/// Boolean status flags shared by both sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusFlags {
    pub formation: bool,
    pub member: bool,
    pub entry: bool,
    pub following: bool,
    pub leader: bool,
    pub linkdead: bool,
    pub resting: bool,
    pub idle: bool,
    pub invisible: bool,
    pub dead: bool,
    /// The report carried a state code nobody recognised.
    pub unknown: bool,
}

/// The latest reported status of one party member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Normalized name, the registry key
    pub name: String,
    pub hp: Gauge,
    pub sp: Gauge,
    pub ep: Gauge,
    /// Reported position, if any. May lie outside the formation.
    pub place: Option<Place>,
    pub flags: StatusFlags,
    /// 0 when not stunned
    pub stunned: u32,
    /// 0 when conscious
    pub unconscious: u32,
    /// Only the status table reports ambushes
    pub ambushed: Option<bool>,
    pub updated_at: Timestamp,
    pub source: Source,
}

impl Member {
    /// A record with nothing known except identity and provenance.
    pub fn new(name: &str, source: Source, updated_at: Timestamp) -> Self {
        Self {
            name: normalize_name(name),
            hp: Gauge::unknown(),
            sp: Gauge::unknown(),
            ep: Gauge::unknown(),
            place: None,
            flags: StatusFlags::default(),
            stunned: 0,
            unconscious: 0,
            ambushed: None,
            updated_at,
            source,
        }
    }

    /// Set the reported place.
    pub fn with_place(mut self, place: Place) -> Self {
        self.place = Some(place);
        self
    }

    /// Whether the reported place is a formation slot.
    pub fn has_valid_place(&self) -> bool {
        self.place.is_some_and(|p| p.is_valid())
    }

    /// Short status label shown next to the member.
    ///
    /// Disabling conditions come first, then the most specific party state.
    pub fn state_label(&self) -> String {
        match self.unconscious {
            0 => {}
            1 => return "unc".into(),
            n => return format!("unc|{}", n - 2),
        }
        if self.stunned > 0 {
            return format!("stu|{}", self.stunned);
        }
        if self.ambushed == Some(true) {
            return "amb".into();
        }

        let f = &self.flags;
        let label = if f.unknown {
            "unk"
        } else if f.linkdead {
            "ld"
        } else if f.dead {
            "dead"
        } else if f.resting {
            "rest"
        } else if f.invisible {
            "invis"
        } else if f.formation {
            "form"
        } else if f.member {
            "mbr"
        } else if f.entry {
            ""
        } else if f.following {
            "fol"
        } else if f.leader {
            "ldr"
        } else {
            "unk"
        };
        label.into()
    }
}

/// Canonical form of a member name: trimmed, first letter upper case, the
/// rest lower case.
pub fn normalize_name(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
