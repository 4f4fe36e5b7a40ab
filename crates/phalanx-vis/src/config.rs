//! Renderer configuration.

use std::path::PathBuf;

use phalanx_consensus::{default_render_socket, RENDER_SOCKET_ENV};

/// Configuration for the renderer process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisConfig {
    /// Socket the node connects to
    pub render_socket: PathBuf,
    /// Clear the terminal between frames
    pub clear_screen: bool,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            render_socket: default_render_socket(),
            clear_screen: true,
        }
    }
}

impl VisConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            render_socket: var(RENDER_SOCKET_ENV)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.render_socket),
            clear_screen: var("PHALANX_VIS_CLEAR")
                .map(|v| v != "0")
                .unwrap_or(defaults.clear_screen),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_socket_variable_with_node() {
        let config = VisConfig::from_vars(|key| {
            (key == RENDER_SOCKET_ENV).then(|| "/tmp/render.sock".to_string())
        });
        assert_eq!(config.render_socket, PathBuf::from("/tmp/render.sock"));
        assert!(config.clear_screen);
    }

    #[test]
    fn defaults() {
        assert_eq!(VisConfig::from_vars(|_| None), VisConfig::default());
    }

    #[test]
    fn plain_output() {
        let config = VisConfig::from_vars(|key| (key == "PHALANX_VIS_CLEAR").then(|| "0".into()));
        assert!(!config.clear_screen);
    }
}
