//! Report timestamps.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::Timestamp;

/// Hands out strictly increasing report timestamps.
///
/// Wall-clock milliseconds are used when they move forward. Two reports in
/// the same millisecond, or a wall clock stepping backwards, still get
/// distinct ordered stamps.
#[derive(Debug, Default)]
pub struct ReportClock {
    last: Option<Timestamp>,
}

impl ReportClock {
    /// Create a clock that has not issued anything yet.
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Stamp a report received now.
    pub fn tick(&mut self) -> Timestamp {
        self.tick_at(current_millis())
    }

    /// Stamp a report received at `wall_ms`.
    pub fn tick_at(&mut self, wall_ms: u64) -> Timestamp {
        let next = match self.last {
            Some(Timestamp(last)) if wall_ms <= last => Timestamp(last + 1),
            _ => Timestamp(wall_ms),
        };
        self.last = Some(next);
        next
    }

    /// The most recent stamp issued.
    pub fn last(&self) -> Option<Timestamp> {
        self.last
    }
}

fn current_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
