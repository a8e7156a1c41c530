use std::env;
use std::time::Duration;

use config::{Config, File};

use crate::error::SystemError;

/// Runtime-tunable parameters. These govern the ambient behaviour of
/// the mailbox and lifecycle machinery; none of them change the actor
/// model's contract, only its timing.
#[derive(Clone, Debug)]
pub struct SystemConfig {
    /// Capacity of the bounded channel the mailbox pump hands envelopes
    /// off to the actor task on; this is the back-pressure point a slow
    /// consumer applies to its own mailbox pump, not a limit on how many
    /// envelopes a sender may have outstanding (the pump's own input
    /// side is unbounded).
    pub mailbox_capacity: usize,
    /// How long the mailbox pump waits for the actor task to accept a
    /// handed-off envelope before rotating it to the back of the queue.
    pub handoff_patience: Duration,
    /// Grace window a `GracefulStop` waits before forwarding the stop
    /// to children.
    pub grace_window: Duration,
}

impl Default for SystemConfig {
    fn default() -> Self {
        SystemConfig {
            mailbox_capacity: 1000,
            handoff_patience: Duration::from_millis(100),
            grace_window: Duration::from_secs(1),
        }
    }
}

impl SystemConfig {
    /// Loads configuration layered over the compiled-in defaults: an
    /// optional file named by `WISP_CONF` (default `config/wisp.toml`),
    /// then environment variables prefixed `WISP_` (e.g.
    /// `WISP_MAILBOX_CAPACITY`).
    pub fn load() -> Result<Self, SystemError> {
        let defaults = SystemConfig::default();
        let cfg_err = |e: config::ConfigError| SystemError::Config(e.to_string());

        let path = env::var("WISP_CONF").unwrap_or_else(|_| "config/wisp.toml".into());

        let cfg = Config::builder()
            .set_default("mailbox_capacity", defaults.mailbox_capacity as i64)
            .map_err(cfg_err)?
            .set_default(
                "handoff_patience_ms",
                defaults.handoff_patience.as_millis() as i64,
            )
            .map_err(cfg_err)?
            .set_default("grace_window_ms", defaults.grace_window.as_millis() as i64)
            .map_err(cfg_err)?
            .add_source(File::with_name(&path).required(false))
            .add_source(config::Environment::with_prefix("WISP"))
            .build()
            .map_err(cfg_err)?;

        Ok(SystemConfig {
            mailbox_capacity: cfg.get_int("mailbox_capacity").map_err(cfg_err)? as usize,
            handoff_patience: Duration::from_millis(
                cfg.get_int("handoff_patience_ms").map_err(cfg_err)? as u64,
            ),
            grace_window: Duration::from_millis(
                cfg.get_int("grace_window_ms").map_err(cfg_err)? as u64,
            ),
        })
    }
}
