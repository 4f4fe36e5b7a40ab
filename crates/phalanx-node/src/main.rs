//! Phalanx Node binary
//!
//! Run by the MUD client as a subprocess: host lines in on stdin, commands
//! out on stdout, logs on stderr.

use phalanx_node::{CommandHost, NodeConfig, PartyNode};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout belongs to the host
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phalanx_node=info,phalanx=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Phalanx Node");

    let config = NodeConfig::from_env()?;
    let host = CommandHost::stdout(config.target_command.clone());

    let mut node = PartyNode::connect(config, host).await?;
    node.run(BufReader::new(tokio::io::stdin())).await?;
    node.shutdown().await;

    Ok(())
}
