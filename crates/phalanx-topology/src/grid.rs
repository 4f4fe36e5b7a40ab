//! The fixed slot layout of a formation.
//!
//! ```text
//!          x=1    x=2    x=3    x=4
//!   y=1   [1,1]  [2,1]  [3,1] | (4,1)
//!   y=2   [1,2]  [2,2]  [3,2] | (4,2)
//!   y=3   [1,3]  [2,3]  [3,3] | (4,3)
//!         -------------------
//!   y=4   (1,4)  (2,4)  (3,4)   (4,4)
//! ```
//!
//! Bracketed cells are formation slots, parenthesised cells are overflow.

use crate::Place;

/// Width and height of the formation.
pub const GRID_SIZE: i32 = 3;

/// Number of formation slots.
pub const GRID_SLOTS: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// Overflow slots in assignment order: the bottom row first, then the side
/// column from the front.
pub const OVERFLOW_PLACES: [Place; 7] = [
    Place::new(1, 4),
    Place::new(2, 4),
    Place::new(3, 4),
    Place::new(4, 4),
    Place::new(4, 1),
    Place::new(4, 2),
    Place::new(4, 3),
];

/// Maximum members a formation can show.
pub const CAPACITY: usize = GRID_SLOTS + OVERFLOW_PLACES.len();

/// All formation slots, row by row.
pub fn valid_places() -> impl Iterator<Item = Place> {
    (1..=GRID_SIZE).flat_map(|y| (1..=GRID_SIZE).map(move |x| Place::new(x, y)))
}
