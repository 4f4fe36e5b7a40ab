//! Formation coordinates.
//!
//! A place is an `(x, y)` pair. Columns run left to right (`x`), rows run
//! front to back (`y`). Only `1..=3` on both axes is a real formation slot;
//! the fourth row and column hold members whose position is unknown.

use std::str::FromStr;

use crate::grid::GRID_SIZE;

/// A position in the formation grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Place {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Place {
    /// Create a new place.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this place lies inside the 3x3 formation.
    pub const fn is_valid(&self) -> bool {
        self.x >= 1 && self.x <= GRID_SIZE && self.y >= 1 && self.y <= GRID_SIZE
    }

    /// Whether this place is one of the fixed overflow slots.
    pub fn is_overflow(&self) -> bool {
        crate::grid::OVERFLOW_PLACES.contains(self)
    }
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Error parsing a place from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceParseError {
    /// Wrong number of coordinates
    #[error("expected two coordinates, got {0}")]
    Arity(usize),
    /// A coordinate was not an integer
    #[error("invalid coordinate: '{0}'")]
    Coordinate(String),
}

impl FromStr for Place {
    type Err = PlaceParseError;

    /// Parse `"x y"` (whitespace separated).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let [x, y] = parts.as_slice() else {
            return Err(PlaceParseError::Arity(parts.len()));
        };
        let x = x
            .parse()
            .map_err(|_| PlaceParseError::Coordinate(x.to_string()))?;
        let y = y
            .parse()
            .map_err(|_| PlaceParseError::Coordinate(y.to_string()))?;
        Ok(Self { x, y })
    }
}
