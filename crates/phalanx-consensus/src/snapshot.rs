//! Complete point-in-time state sent to the renderer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::formation::{Formation, PreviousPlaces};

/// Environment variable naming the renderer socket.
pub const RENDER_SOCKET_ENV: &str = "PHALANX_RENDER_SOCKET";

/// Socket the renderer listens on when nothing else is configured.
pub fn default_render_socket() -> PathBuf {
    std::env::var_os("XDG_RUNTIME_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join("phalanx-party.sock")
}

/// Everything a renderer needs to redraw, with no reference to earlier
/// snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Publish sequence number. Gaps mean the renderer missed snapshots.
    pub seq: u64,
    pub formation: Formation,
    pub previous_places: PreviousPlaces,
    /// Current cast target
    pub target: Option<String>,
    /// Some member is only known from the status table
    pub auxiliary_present: bool,
}

impl Snapshot {
    /// Encode as one newline-terminated JSON line.
    pub fn to_line(&self) -> serde_json::Result<String> {
        Ok(serde_json::to_string(self)? + "\n")
    }

    /// Decode one JSON line.
    pub fn from_line(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line.trim_end())
    }

    /// Whether `name` is the current target.
    pub fn is_target(&self, name: &str) -> bool {
        self.target.as_deref() == Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phalanx_roster::{Gauge, Member, Source, Timestamp};
    use phalanx_topology::Place;

    fn sample() -> Snapshot {
        let mut ruska = Member::new("Ruska", Source::B, Timestamp(42)).with_place(Place::new(2, 2));
        ruska.hp = Gauge::known(408, 445);
        ruska.sp = Gauge::known(100, 100);
        ruska.ep = Gauge {
            current: Some(60),
            max: Some(100),
        };
        ruska.flags.member = true;
        ruska.ambushed = Some(false);

        let mut alice = Member::new("Alice", Source::A, Timestamp(7));
        alice.stunned = 2;

        let mut formation = Formation::new();
        formation.insert(Place::new(2, 2), ruska);
        formation.insert(Place::new(1, 4), alice);

        let mut previous_places = PreviousPlaces::new();
        previous_places.insert("Ruska".into(), Place::new(2, 2));
        previous_places.insert("Gone".into(), Place::new(1, 1));

        Snapshot {
            seq: 3,
            formation,
            previous_places,
            target: Some("Ruska".into()),
            auxiliary_present: true,
        }
    }

    #[test]
    fn line_round_trip() {
        let snapshot = sample();
        let line = snapshot.to_line().unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);

        let back = Snapshot::from_line(&line).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn empty_round_trip() {
        let snapshot = Snapshot::default();
        let back = Snapshot::from_line(&snapshot.to_line().unwrap()).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn target_marker() {
        let snapshot = sample();
        assert!(snapshot.is_target("Ruska"));
        assert!(!snapshot.is_target("Alice"));
        assert!(!Snapshot::default().is_target("Ruska"));
    }

    #[test]
    fn default_socket_name() {
        assert!(default_render_socket().ends_with("phalanx-party.sock"));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(Snapshot::from_line("not json").is_err());
        assert!(Snapshot::from_line(r#"{"seq":1}"#).is_err());
    }
}
