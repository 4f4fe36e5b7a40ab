//! Formation Placement Consensus
//!
//! Two update streams report where party members stand, and they disagree.
//! This crate turns whatever the registry currently holds into one formation
//! in which every member is drawn exactly once and no slot holds two members.
//!
//! # Core Insight
//!
//! Placement is recomputed from scratch on every update. The only memory
//! carried between runs is where each member last stood on the grid, which
//! is what keeps the display from flickering when a report briefly omits a
//! position.
//!
//! # Precedence
//!
//! 1. The status table (Source B) outranks the push stream (Source A).
//! 2. Within a source, the most recent report wins.
//! 3. A member without a usable position returns to its previous slot if
//!    that slot is free.
//! 4. Everyone else fills the overflow slots alphabetically.

mod contention;
mod formation;
mod resolver;
mod snapshot;

pub use contention::{compare_claims, select_claimant};
pub use formation::{Formation, OccupancyViolation, PreviousPlaces, Slot};
pub use resolver::{resolve, Resolution};
pub use snapshot::{default_render_socket, Snapshot, RENDER_SOCKET_ENV};
