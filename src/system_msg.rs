use std::any::Any;
use std::fmt;

use crate::id::Identifier;

/// Closed set of control signals exchanged between runtime components.
///
/// This set is intentionally closed: adding a new kind of control flow
/// means adding a variant here and a branch in every strategy and in
/// `ActorContext::dispatch_system`, not inventing a new opaque user
/// message that looks like a control signal.
pub enum SystemMsg {
    Start,
    Stop,
    GracefulStop,
    Restart,
    ChildTerminated(Identifier),
    Failure(Failure),
    EscalateFailure(Failure),
    SuspendMailbox,
    ResumeMailbox,
    SuspendMailboxAll,
    ResumeMailboxAll,
    DeleteMailbox,
}

impl fmt::Debug for SystemMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemMsg::Start => write!(f, "Start"),
            SystemMsg::Stop => write!(f, "Stop"),
            SystemMsg::GracefulStop => write!(f, "GracefulStop"),
            SystemMsg::Restart => write!(f, "Restart"),
            SystemMsg::ChildTerminated(id) => write!(f, "ChildTerminated({:?})", id),
            SystemMsg::Failure(fail) => write!(f, "Failure({:?})", fail),
            SystemMsg::EscalateFailure(fail) => write!(f, "EscalateFailure({:?})", fail),
            SystemMsg::SuspendMailbox => write!(f, "SuspendMailbox"),
            SystemMsg::ResumeMailbox => write!(f, "ResumeMailbox"),
            SystemMsg::SuspendMailboxAll => write!(f, "SuspendMailboxAll"),
            SystemMsg::ResumeMailboxAll => write!(f, "ResumeMailboxAll"),
            SystemMsg::DeleteMailbox => write!(f, "DeleteMailbox"),
        }
    }
}

/// Marks a `Failure::reason` as a logical escalation raised deliberately
/// by user code, as opposed to a runtime-caught panic. Strategies branch
/// on its presence; see the not-panic/panic columns in each strategy's
/// `handle_failure`.
pub struct NotPanic(pub Box<dyn Any + Send>);

pub enum Reason {
    Panic(Box<dyn Any + Send>),
    NotPanic(NotPanic),
}

impl Reason {
    pub fn is_panic(&self) -> bool {
        matches!(self, Reason::Panic(_))
    }

    /// Render the reason as a human-readable string when it is (or
    /// contains) one; otherwise a placeholder. Used for logging only.
    pub fn describe(&self) -> String {
        fn describe_any(v: &(dyn Any + Send)) -> String {
            if let Some(s) = v.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = v.downcast_ref::<&str>() {
                (*s).to_string()
            } else {
                "<opaque>".to_string()
            }
        }
        match self {
            Reason::Panic(v) => describe_any(v.as_ref()),
            Reason::NotPanic(NotPanic(v)) => describe_any(v.as_ref()),
        }
    }
}

impl fmt::Debug for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Panic(_) => write!(f, "Reason::Panic({})", self.describe()),
            Reason::NotPanic(_) => write!(f, "Reason::NotPanic({})", self.describe()),
        }
    }
}

/// Describes a crash or logical failure raised by an actor. The culprit
/// actor's producer and properties live in the registry and are looked
/// up by `who` when a strategy needs to respawn it; embedding the raw
/// task handles here would require them to be `Clone + Send` values
/// traveling through a channel, which the registry lookup avoids.
pub struct Failure {
    pub who: Identifier,
    pub reason: Reason,
}

impl Failure {
    pub fn panic(who: Identifier, reason: Box<dyn Any + Send>) -> Self {
        Failure {
            who,
            reason: Reason::Panic(reason),
        }
    }

    pub fn not_panic(who: Identifier, reason: Box<dyn Any + Send>) -> Self {
        Failure {
            who,
            reason: Reason::NotPanic(NotPanic(reason)),
        }
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("who", &self.who)
            .field("reason", &self.reason)
            .finish()
    }
}
