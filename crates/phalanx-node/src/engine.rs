//! Reconciliation engine.
//!
//! Owns the registry, the last resolved formation and the current target.
//! Every state change triggers a full re-resolve and a new snapshot. The
//! engine is driven by one caller at a time and holds no locks.

use phalanx_consensus::{resolve, Formation, PreviousPlaces, Snapshot};
use phalanx_roster::{Member, Registry, ReportClock};

use crate::error::Result;
use crate::host::HostBridge;
use crate::parse::{parse_source_a, parse_source_b, Inbound, TargetRequest};
use crate::publisher::SnapshotSink;
use crate::target::{Selection, TargetSelector};

/// Party state plus the channels it is reported through.
#[derive(Debug)]
pub struct Engine<S, H> {
    registry: Registry,
    previous_places: PreviousPlaces,
    formation: Formation,
    target: TargetSelector,
    clock: ReportClock,
    seq: u64,
    sink: S,
    host: H,
}

impl<S: SnapshotSink, H: HostBridge> Engine<S, H> {
    /// Create an engine with an empty party.
    pub fn new(sink: S, host: H) -> Self {
        Self {
            registry: Registry::new(),
            previous_places: PreviousPlaces::new(),
            formation: Formation::new(),
            target: TargetSelector::new(),
            clock: ReportClock::new(),
            seq: 0,
            sink,
            host,
        }
    }

    /// Apply one host event.
    ///
    /// Parse failures leave the state untouched. Publish failures are
    /// returned after the state has been updated.
    pub fn handle(&mut self, inbound: Inbound) -> Result<()> {
        match inbound {
            Inbound::SourceA(fields) => {
                let member = parse_source_a(&fields, self.clock.tick())?;
                self.report(member)
            }
            Inbound::SourceB(row) => {
                let member = parse_source_b(&row, self.clock.tick())?;
                self.report(member)
            }
            Inbound::Left(name) => self.member_left(&name),
            Inbound::Target(request) => self.select_target(request),
            Inbound::Reconnect => self.republish(),
        }
    }

    /// Merge a parsed report and publish the new formation.
    pub fn report(&mut self, member: Member) -> Result<()> {
        tracing::debug!(
            name = %member.name,
            source = %member.source,
            place = ?member.place,
            "member report"
        );
        self.registry.merge(member);
        self.reconcile();
        self.republish()
    }

    /// Forget a member entirely, including where they last stood.
    pub fn member_left(&mut self, name: &str) -> Result<()> {
        let removed = self.registry.remove(name).is_some();
        let had_place = self.previous_places.remove(name).is_some();
        if !removed && !had_place {
            tracing::debug!(name, "left: not a known member");
            return Ok(());
        }
        tracing::info!(name, "member left the party");
        self.reconcile();
        self.republish()
    }

    /// Point the cast target at a member.
    ///
    /// The host is told on every selection that names a member. A snapshot
    /// goes out only when the target actually changes.
    pub fn select_target(&mut self, request: TargetRequest) -> Result<()> {
        let selection = match request {
            TargetRequest::Place(place) => self.target.select_place(place, &self.formation),
            TargetRequest::Name(name) => self.target.select_name(&name),
        };
        let Some(Selection { name, changed }) = selection else {
            return Ok(());
        };
        self.host.announce_target(&name)?;
        if !changed {
            tracing::debug!(target_name = %name, "target reselected");
            return Ok(());
        }
        tracing::info!(target_name = %name, "target changed");
        self.republish()
    }

    /// Send the current state with a fresh sequence number.
    pub fn republish(&mut self) -> Result<()> {
        self.seq += 1;
        let snapshot = self.snapshot();
        self.sink.publish(&snapshot)
    }

    /// The current state as the renderer would receive it.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seq: self.seq,
            formation: self.formation.clone(),
            previous_places: self.previous_places.clone(),
            target: self.target.current().map(str::to_owned),
            auxiliary_present: self.registry.has_auxiliary(),
        }
    }

    fn reconcile(&mut self) {
        let resolution = resolve(self.registry.all(), &self.previous_places);
        self.formation = resolution.formation;
        self.previous_places = resolution.previous_places;
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn previous_places(&self) -> &PreviousPlaces {
        &self.previous_places
    }

    pub fn target(&self) -> Option<&str> {
        self.target.current()
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Take the sink back, e.g. to flush it on shutdown.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
