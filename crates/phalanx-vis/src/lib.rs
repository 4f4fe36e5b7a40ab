//! Phalanx Formation Renderer
//!
//! Receiving end of the node's snapshot channel, drawing the party
//! formation as a plain-text grid.
//!
//! # Architecture
//!
//! - **Receiver**: Unix socket listener, one node connection at a time
//! - **Layout**: two text lines per member, overflow column first
//!
//! # Usage
//!
//! ```ignore
//! let receiver = SnapshotReceiver::bind(default_render_socket())?;
//! let mut renderer = TextRenderer::clearing(std::io::stdout());
//! receiver.run(&mut renderer).await?;
//! ```

mod config;
mod layout;
mod receiver;

pub use config::VisConfig;
pub use layout::{cell, render_lines, TextRenderer, CELL_WIDTH};
pub use receiver::{Renderer, SnapshotReceiver};
