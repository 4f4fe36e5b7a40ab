//! Unix socket listener for node snapshots.
//!
//! The node holds a single persistent connection. When it closes, the
//! listener waits for the next one, so a restarted or reconnecting node
//! picks up where the old one left off.

use std::io;
use std::path::{Path, PathBuf};

use phalanx_consensus::Snapshot;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;

/// Consumer of decoded snapshots. Every snapshot replaces the last.
pub trait Renderer {
    fn render(&mut self, snapshot: Snapshot);
}

impl Renderer for mpsc::UnboundedSender<Snapshot> {
    fn render(&mut self, snapshot: Snapshot) {
        if self.send(snapshot).is_err() {
            tracing::debug!("Snapshot consumer is gone");
        }
    }
}

/// Listening end of the snapshot channel.
#[derive(Debug)]
pub struct SnapshotReceiver {
    listener: UnixListener,
    socket_path: PathBuf,
}

impl SnapshotReceiver {
    /// Listen on `path`, replacing a stale socket file.
    pub fn bind(path: impl AsRef<Path>) -> io::Result<Self> {
        let socket_path = path.as_ref().to_path_buf();
        let _ = std::fs::remove_file(&socket_path);
        let listener = UnixListener::bind(&socket_path)?;
        tracing::info!("Renderer listening on {}", socket_path.display());
        Ok(Self {
            listener,
            socket_path,
        })
    }

    /// Serve node connections one after another, forever.
    pub async fn run<R: Renderer>(&self, renderer: &mut R) -> io::Result<()> {
        loop {
            self.serve_one(renderer).await?;
        }
    }

    /// Accept one node connection and read it to the end.
    ///
    /// Returns the number of snapshots rendered.
    pub async fn serve_one<R: Renderer>(&self, renderer: &mut R) -> io::Result<usize> {
        let (stream, _) = self.listener.accept().await?;
        tracing::info!("Node connected");
        match read_connection(stream, renderer).await {
            Ok(count) => {
                tracing::info!(snapshots = count, "Node disconnected");
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Node connection error: {}", e);
                Ok(0)
            }
        }
    }

    /// Get the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for SnapshotReceiver {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

async fn read_connection<R: Renderer>(stream: UnixStream, renderer: &mut R) -> io::Result<usize> {
    let mut lines = BufReader::new(stream).lines();
    let mut last_seq: Option<u64> = None;
    let mut count = 0;

    while let Some(line) = lines.next_line().await? {
        let snapshot = match Snapshot::from_line(&line) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Invalid snapshot line: {}", e);
                continue;
            }
        };
        if let Some(last) = last_seq {
            if snapshot.seq > last + 1 {
                tracing::debug!(missed = snapshot.seq - last - 1, "Skipped snapshots");
            }
        }
        last_seq = Some(snapshot.seq);
        renderer.render(snapshot);
        count += 1;
    }
    Ok(count)
}
