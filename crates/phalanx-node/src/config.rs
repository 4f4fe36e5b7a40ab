//! Node configuration.

use std::path::PathBuf;

use phalanx_consensus::{default_render_socket, RENDER_SOCKET_ENV};

use crate::error::{Error, Result};

/// Environment variable for the snapshot queue depth.
pub const QUEUE_CAPACITY_ENV: &str = "PHALANX_QUEUE_CAPACITY";
/// Environment variable for the target-change host command.
pub const TARGET_COMMAND_ENV: &str = "PHALANX_TARGET_COMMAND";

/// Snapshots held for a slow renderer before the oldest are dropped.
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;
/// Host command announcing a new target. `{name}` is replaced.
pub const DEFAULT_TARGET_COMMAND: &str = "/trigger You are now target-healing {name}.";

/// Configuration for a party node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// Renderer socket path
    pub render_socket: PathBuf,
    /// Snapshot queue depth
    pub queue_capacity: usize,
    /// Target-change command template
    pub target_command: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            render_socket: default_render_socket(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            target_command: DEFAULT_TARGET_COMMAND.to_string(),
        }
    }
}

impl NodeConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let render_socket = var(RENDER_SOCKET_ENV)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.render_socket);

        let queue_capacity = match var(QUEUE_CAPACITY_ENV) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(Error::Config(format!(
                        "{QUEUE_CAPACITY_ENV} must be a positive integer, got '{raw}'"
                    )))
                }
            },
            None => defaults.queue_capacity,
        };

        let target_command = match var(TARGET_COMMAND_ENV) {
            Some(template) if !template.contains("{name}") => {
                return Err(Error::Config(format!(
                    "{TARGET_COMMAND_ENV} must contain {{name}}, got '{template}'"
                )))
            }
            Some(template) => template,
            None => defaults.target_command,
        };

        Ok(Self {
            render_socket,
            queue_capacity,
            target_command,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<NodeConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NodeConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config, NodeConfig::default());
        assert_eq!(config.queue_capacity, 16);
        assert!(config.render_socket.ends_with("phalanx-party.sock"));
    }

    #[test]
    fn overrides() {
        let config = config(&[
            (RENDER_SOCKET_ENV, "/tmp/render.sock"),
            (QUEUE_CAPACITY_ENV, "4"),
            (TARGET_COMMAND_ENV, "/heal {name}"),
        ])
        .unwrap();
        assert_eq!(config.render_socket, PathBuf::from("/tmp/render.sock"));
        assert_eq!(config.queue_capacity, 4);
        assert_eq!(config.target_command, "/heal {name}");
    }

    #[test]
    fn rejects_bad_capacity() {
        for raw in ["0", "-1", "many"] {
            assert!(matches!(
                config(&[(QUEUE_CAPACITY_ENV, raw)]),
                Err(Error::Config(_))
            ));
        }
    }

    #[test]
    fn rejects_template_without_name() {
        assert!(matches!(
            config(&[(TARGET_COMMAND_ENV, "/heal")]),
            Err(Error::Config(_))
        ));
    }
}
