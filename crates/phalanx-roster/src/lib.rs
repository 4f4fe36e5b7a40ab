//! Phalanx Roster
//!
//! Typed member records and the registry holding the latest record for each
//! member.
//!
//! Two streams report on the party. Source A pushes one member at a time
//! whenever that member changes; Source B is a full status table that also
//! lists entities Source A never mentions. Both are parsed into the same
//! [`Member`] type so everything downstream sees one canonical record.

mod clock;
mod member;
mod registry;

pub use clock::ReportClock;
pub use member::{normalize_name, Gauge, Member, Source, StatusFlags, Timestamp};
pub use registry::Registry;
