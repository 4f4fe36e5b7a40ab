//! Raw host lines to typed records.
//!
//! Every parser here is a pure function from text to a [`Member`] or an
//! explicit [`ParseError`]. Callers log and drop failures; nothing here ever
//! touches engine state.
//!
//! [`Member`]: phalanx_roster::Member

mod inbound;
mod source_a;
mod source_b;

pub use inbound::{Inbound, TargetRequest};
pub use source_a::{parse_source_a, SOURCE_A_FIELDS};
pub use source_b::{parse_source_b, qualitative_value, QUALITATIVE_MAX};

use phalanx_topology::PlaceParseError;
use thiserror::Error;

/// Why an inbound line was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing on the line
    #[error("empty message")]
    Empty,

    /// Too few fields in a party status message
    #[error("expected at least {expected} fields, got {found}")]
    Arity { expected: usize, found: usize },

    /// A mandatory numeric field did not parse
    #[error("invalid {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// A status table row did not have the expected layout
    #[error("status row did not match: '{0}'")]
    NoMatch(String),

    /// Member name missing
    #[error("empty member name")]
    EmptyName,

    /// Line tag not understood
    #[error("unknown message tag: '{0}'")]
    UnknownTag(String),

    /// Bad target coordinates
    #[error("invalid place: {0}")]
    Place(#[from] PlaceParseError),
}

/// Parse a mandatory integer field.
fn int_field<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
