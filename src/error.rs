use std::error::Error;
use std::fmt;

use crate::id::Identifier;

/// Failure to spawn an actor: the identifier was already registered.
/// Unreachable in practice for an ordinary `spawn_actor` call, since
/// identifiers are freshly generated per spawn, but a real possibility
/// for `add_remote_actor`, where the caller supplies the identifier.
#[derive(Debug)]
pub enum SpawnError {
    AlreadyExists(Identifier),
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::AlreadyExists(id) => {
                write!(f, "an actor is already registered at {}", id)
            }
        }
    }
}

impl Error for SpawnError {}

/// Failure to restart or respawn an actor, typically because it has
/// already been removed from the registry by the time the strategy
/// runs.
#[derive(Debug)]
pub struct RestartError(pub Identifier);

impl fmt::Display for RestartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot restart unregistered actor {}", self.0)
    }
}

impl Error for RestartError {}

/// Errors surfaced while constructing or tearing down an `ActorSystem`.
#[derive(Debug)]
pub enum SystemError {
    Config(String),
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemError::Config(msg) => write!(f, "system configuration error: {}", msg),
        }
    }
}

impl Error for SystemError {}
