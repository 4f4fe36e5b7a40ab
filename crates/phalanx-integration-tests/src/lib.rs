//! Helpers for end-to-end tests: a renderer bound in a temporary directory
//! and builders for host lines.

use std::io;

use phalanx_consensus::Snapshot;
use phalanx_node::{CommandHost, NodeConfig, PartyNode};
use phalanx_vis::SnapshotReceiver;
use tempfile::TempDir;
use tokio::sync::mpsc;

/// Node whose host commands are captured in memory.
pub type TestNode = PartyNode<CommandHost<Vec<u8>>>;

/// `party` line for a member at `x y`. Pass `"?"` for an unknown position.
pub fn party_line(name: &str, x: &str, y: &str) -> String {
    format!(
        "party {name} elf f 50 408 445 100 100 90 90 Party {x} {y} {name} \
         1 0 0 0 0 0 0 0 0 0 0 0 1000 5000 3600 1700000000"
    )
}

/// `pss` line for a status table row at `y.x`.
pub fn pss_line(name: &str, x: &str, y: &str, state: &str) -> String {
    format!("pss | {y}.{x}  +{name:<14} {state:<6} 408(445)  100(100)  60(100)  |")
}

/// A renderer listening in its own temporary directory.
pub struct RenderHarness {
    receiver: SnapshotReceiver,
    _dir: TempDir,
}

impl RenderHarness {
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let receiver = SnapshotReceiver::bind(dir.path().join("render.sock"))?;
        Ok(Self {
            receiver,
            _dir: dir,
        })
    }

    /// Node configuration pointing at this renderer.
    pub fn node_config(&self) -> NodeConfig {
        NodeConfig {
            render_socket: self.receiver.socket_path().to_path_buf(),
            queue_capacity: 64,
            ..NodeConfig::default()
        }
    }

    /// Connect a node that announces targets as `/heal {name}`.
    pub async fn connect_node(&self) -> phalanx_node::Result<TestNode> {
        PartyNode::connect(self.node_config(), CommandHost::new(Vec::new(), "/heal {name}")).await
    }

    /// Feed `lines` to `node`, shut it down, and collect every snapshot the
    /// renderer received.
    pub async fn session(&self, mut node: TestNode, lines: &[String]) -> io::Result<Session> {
        let input = lines.join("\n") + "\n";
        let (mut tx, mut rx) = mpsc::unbounded_channel::<Snapshot>();

        let (host_output, served) = tokio::join!(
            async move {
                let result = node.run(input.as_bytes()).await;
                let output = node.engine().host().writer().clone();
                node.shutdown().await;
                result.map(|()| output)
            },
            self.receiver.serve_one(&mut tx),
        );
        let host_output = host_output.map_err(io::Error::other)?;
        served?;

        let mut snapshots = Vec::new();
        while let Ok(snapshot) = rx.try_recv() {
            snapshots.push(snapshot);
        }
        Ok(Session {
            snapshots,
            host_output: String::from_utf8_lossy(&host_output).into_owned(),
        })
    }
}

/// What one node session produced.
#[derive(Debug)]
pub struct Session {
    pub snapshots: Vec<Snapshot>,
    pub host_output: String,
}

impl Session {
    pub fn last(&self) -> &Snapshot {
        self.snapshots.last().expect("session produced no snapshots")
    }
}
