//! Phalanx Formation Topology
//!
//! Geometry of a party formation: a 3x3 grid of slots plus a fixed sequence
//! of overflow slots for members whose position is unknown or invalid.
//!
//! # Layout
//!
//! Members report a coarse `(x, y)` position. Anything inside `1..=3` on both
//! axes is a formation slot; anything else is displayed in an overflow slot.
//! Overflow slots are filled in a fixed order so that the same set of
//! members always lands in the same cells.

mod grid;
mod place;

pub use grid::{valid_places, CAPACITY, GRID_SIZE, GRID_SLOTS, OVERFLOW_PLACES};
pub use place::{Place, PlaceParseError};

// Compile-time assertion: overflow never collides with the formation
const _: () = {
    let mut i = 0;
    while i < OVERFLOW_PLACES.len() {
        assert!(!OVERFLOW_PLACES[i].is_valid());
        i += 1;
    }
};
