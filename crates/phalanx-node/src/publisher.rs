//! Outbound snapshot channel to the renderer.
//!
//! One persistent Unix socket connection carries newline-delimited JSON
//! snapshots. Publishing never blocks the engine: lines go into a bounded
//! broadcast ring and a writer task drains it. When the renderer falls behind,
//! the oldest queued snapshots are overwritten, which is harmless because
//! every snapshot is complete.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use phalanx_consensus::Snapshot;
use tokio::io::AsyncWriteExt;
use tokio::net::UnixStream;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::error::{Error, Result};

/// Where reconciled snapshots go.
pub trait SnapshotSink {
    /// Queue a snapshot for delivery.
    fn publish(&mut self, snapshot: &Snapshot) -> Result<()>;
}

/// Renderer connection with a drop-oldest queue.
pub struct Publisher {
    path: PathBuf,
    capacity: usize,
    tx: broadcast::Sender<Arc<str>>,
    writer: JoinHandle<()>,
}

impl Publisher {
    /// Connect to the renderer listening on `path`.
    ///
    /// Fails with [`Error::NoRenderer`] if nobody is listening.
    pub async fn connect(path: impl AsRef<Path>, capacity: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let capacity = capacity.max(1);
        let (tx, writer) = open(&path, capacity).await?;
        tracing::info!("Publishing snapshots to {}", path.display());
        Ok(Self {
            path,
            capacity,
            tx,
            writer,
        })
    }

    /// Open a fresh connection, replacing the current one.
    ///
    /// The caller republishes; nothing queued on the old connection is
    /// carried over.
    pub async fn reconnect(&mut self) -> Result<()> {
        let (tx, writer) = open(&self.path, self.capacity).await?;
        self.writer.abort();
        self.tx = tx;
        self.writer = writer;
        tracing::info!("Reconnected to renderer at {}", self.path.display());
        Ok(())
    }

    /// Whether the writer is still delivering.
    pub fn is_connected(&self) -> bool {
        !self.writer.is_finished()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deliver whatever is still queued, then close the connection.
    pub async fn shutdown(self) {
        let Self { tx, writer, .. } = self;
        drop(tx);
        if let Err(e) = writer.await {
            if !e.is_cancelled() {
                tracing::error!("Snapshot writer failed: {}", e);
            }
        }
    }
}

impl SnapshotSink for Publisher {
    fn publish(&mut self, snapshot: &Snapshot) -> Result<()> {
        if !self.is_connected() {
            return Err(Error::RendererDisconnected);
        }
        let line: Arc<str> = snapshot.to_line()?.into();
        self.tx
            .send(line)
            .map(|_| ())
            .map_err(|_| Error::RendererDisconnected)
    }
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("path", &self.path)
            .field("capacity", &self.capacity)
            .field("connected", &self.is_connected())
            .finish()
    }
}

async fn open(path: &Path, capacity: usize) -> Result<(broadcast::Sender<Arc<str>>, JoinHandle<()>)> {
    let stream = UnixStream::connect(path)
        .await
        .map_err(|source| Error::NoRenderer {
            path: path.to_path_buf(),
            source,
        })?;
    let (tx, rx) = broadcast::channel(capacity);
    let writer = tokio::spawn(write_loop(stream, rx));
    Ok((tx, writer))
}

async fn write_loop(mut stream: UnixStream, mut rx: broadcast::Receiver<Arc<str>>) {
    loop {
        let line = match rx.recv().await {
            Ok(line) => line,
            Err(RecvError::Lagged(dropped)) => {
                tracing::warn!(dropped, "Renderer is behind, dropped oldest snapshots");
                continue;
            }
            Err(RecvError::Closed) => break,
        };
        if let Err(e) = stream.write_all(line.as_bytes()).await {
            tracing::error!("Renderer write failed: {}", e);
            return;
        }
    }
    let _ = stream.shutdown().await;
}
