//! Phalanx Formation Renderer
//!
//! Listen for a party node and redraw the formation on every snapshot.

use phalanx_vis::{SnapshotReceiver, TextRenderer, VisConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phalanx_vis=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = VisConfig::from_env();
    let receiver = SnapshotReceiver::bind(&config.render_socket)?;

    let mut renderer = if config.clear_screen {
        TextRenderer::clearing(std::io::stdout())
    } else {
        TextRenderer::new(std::io::stdout())
    };

    tokio::select! {
        result = receiver.run(&mut renderer) => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Shutting down"),
    }

    Ok(())
}
