use std::any::Any;
use std::fmt;

use crate::system_msg::SystemMsg;

/// A user-supplied payload. Messages are opaque values: the receiving
/// actor is responsible for downcasting to whatever concrete type it
/// expects, there is no typed channel between sender and receiver.
pub type UserMessage = Box<dyn Any + Send>;

/// What an actor actually observes when it is scheduled: either a
/// message from another actor/user code, or a control signal from the
/// runtime.
pub enum Payload {
    User(UserMessage),
    System(SystemMsg),
}

impl Payload {
    pub fn user<T: Any + Send>(msg: T) -> Self {
        Payload::User(Box::new(msg))
    }

    /// Attempt to downcast a user payload to `T`. Returns `None` for
    /// system payloads or a mismatched type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Payload::User(msg) => msg.downcast_ref::<T>(),
            Payload::System(_) => None,
        }
    }

    pub fn as_system(&self) -> Option<&SystemMsg> {
        match self {
            Payload::System(msg) => Some(msg),
            Payload::User(_) => None,
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::User(_) => write!(f, "Payload::User(..)"),
            Payload::System(msg) => write!(f, "Payload::System({:?})", msg),
        }
    }
}
