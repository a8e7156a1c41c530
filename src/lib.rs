#![deny(clippy::all)]
#![allow(clippy::large_enum_variant)]

//! A lightweight in-process actor runtime: mailboxes, a lifecycle state
//! machine per actor, and a closed set of supervision strategies for
//! containing and recovering from child failures.

pub mod actor;
pub mod config;
pub mod context;
pub mod envelope;
pub mod error;
pub mod id;
pub mod logging;
pub mod mailbox;
pub mod message;
pub mod properties;
pub mod registry;
pub mod strategy;
pub mod system;
pub mod system_msg;
pub mod testkit;

pub use actor::{props, Actor, ActorProducer, BoxActorProd};
pub use config::SystemConfig;
pub use context::{ActorContext, LifecycleState};
pub use envelope::Envelope;
pub use error::{RestartError, SpawnError, SystemError};
pub use id::Identifier;
pub use message::{Payload, UserMessage};
pub use properties::Properties;
pub use strategy::Strategy;
pub use system::ActorSystem;
pub use system_msg::{Failure, NotPanic, Reason, SystemMsg};
