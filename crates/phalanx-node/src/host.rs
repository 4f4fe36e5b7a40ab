//! Commands sent back to the host client.
//!
//! The host reads the node's stdout, so anything written here is executed
//! by the client. Logs go to stderr for the same reason.

use std::io::{self, Write};

/// Outbound side of the host connection.
pub trait HostBridge {
    /// Tell the host the cast target changed to `name`.
    fn announce_target(&mut self, name: &str) -> io::Result<()>;
}

/// Writes one templated command line per announcement.
#[derive(Debug)]
pub struct CommandHost<W> {
    writer: W,
    template: String,
}

impl CommandHost<io::Stdout> {
    /// Announce on the process's stdout.
    pub fn stdout(template: impl Into<String>) -> Self {
        Self::new(io::stdout(), template)
    }
}

impl<W: Write> CommandHost<W> {
    /// Announce through `writer`. `{name}` in `template` is replaced by the
    /// target's name.
    pub fn new(writer: W, template: impl Into<String>) -> Self {
        Self {
            writer,
            template: template.into(),
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn render(&self, name: &str) -> String {
        self.template.replace("{name}", name)
    }
}

impl<W: Write> HostBridge for CommandHost<W> {
    fn announce_target(&mut self, name: &str) -> io::Result<()> {
        let line = self.render(name);
        writeln!(self.writer, "{line}")?;
        self.writer.flush()
    }
}
