//! Host line dispatcher.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::config::NodeConfig;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::host::HostBridge;
use crate::parse::Inbound;
use crate::publisher::Publisher;

/// A running party node: one engine, one renderer connection.
#[derive(Debug)]
pub struct PartyNode<H> {
    engine: Engine<Publisher, H>,
    config: NodeConfig,
    /// Set after the first failed publish, cleared by a reconnect.
    disconnected: bool,
}

impl<H: HostBridge> PartyNode<H> {
    /// Connect to the renderer and send it an empty formation.
    pub async fn connect(config: NodeConfig, host: H) -> Result<Self> {
        let publisher = Publisher::connect(&config.render_socket, config.queue_capacity).await?;
        let mut engine = Engine::new(publisher, host);
        engine.republish()?;
        Ok(Self {
            engine,
            config,
            disconnected: false,
        })
    }

    /// Dispatch host lines until `input` is exhausted.
    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        tracing::info!("Party node running");
        tracing::info!("  Renderer: {:?}", self.config.render_socket);
        tracing::info!("  Queue: {} snapshots", self.config.queue_capacity);

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            self.dispatch(&line).await;
        }

        tracing::info!("Host input closed");
        Ok(())
    }

    /// Handle one host line. Failures are logged, never propagated.
    pub async fn dispatch(&mut self, line: &str) {
        let inbound = match Inbound::parse(line) {
            Ok(inbound) => inbound,
            Err(e) => {
                tracing::warn!("Dropped host line: {}", e);
                return;
            }
        };

        if inbound == Inbound::Reconnect {
            if let Err(e) = self.engine.sink_mut().reconnect().await {
                tracing::error!("Reconnect failed: {}", e);
                return;
            }
            self.disconnected = false;
        }

        match self.engine.handle(inbound) {
            Ok(()) => {}
            Err(e) if e.is_dropped_input() => tracing::warn!("Dropped host line: {}", e),
            Err(Error::RendererDisconnected) if self.disconnected => {
                tracing::debug!("Renderer still disconnected");
            }
            Err(Error::RendererDisconnected) => {
                self.disconnected = true;
                tracing::error!("Renderer disconnected; send 'reconnect' once it is back");
            }
            Err(e) => tracing::error!("Failed to handle host line: {}", e),
        }
    }

    pub fn engine(&self) -> &Engine<Publisher, H> {
        &self.engine
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Flush queued snapshots and close the renderer connection.
    pub async fn shutdown(self) {
        self.engine.into_sink().shutdown().await;
    }
}
