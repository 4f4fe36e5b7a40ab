//! Phalanx Node - Party Formation Tracker
//!
//! Reads party status lines from a MUD client on stdin, reconciles the two
//! update streams into one formation and streams snapshots to a renderer
//! over a Unix socket.
//!
//! # Architecture
//!
//! - **Parse**: host lines to tagged events and member records
//! - **Engine**: registry, placement and target state
//! - **Publisher**: drop-oldest snapshot queue over a persistent socket
//! - **Host**: target-change commands written back on stdout
//!
//! # Example
//!
//! ```no_run
//! use phalanx_node::{CommandHost, NodeConfig, PartyNode};
//! use tokio::io::BufReader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NodeConfig::from_env()?;
//!     let host = CommandHost::stdout(config.target_command.clone());
//!     let mut node = PartyNode::connect(config, host).await?;
//!     node.run(BufReader::new(tokio::io::stdin())).await?;
//!     node.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod node;
pub mod parse;
pub mod publisher;
pub mod target;

pub use config::NodeConfig;
pub use engine::Engine;
pub use error::{Error, Result};
pub use host::{CommandHost, HostBridge};
pub use node::PartyNode;
pub use parse::{Inbound, ParseError, TargetRequest};
pub use publisher::{Publisher, SnapshotSink};
pub use target::{Selection, TargetSelector};
