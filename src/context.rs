use std::collections;
use std::sync::{Arc, RwLock};

use slog::Logger;

use crate::actor::BoxActorProd;
use crate::error::SpawnError;
use crate::id::Identifier;
use crate::message::Payload;
use crate::properties::Properties;
use crate::system::ActorSystem;
use crate::system_msg::SystemMsg;

/// Lifecycle state of an actor context. Transitions only ever move
/// forward: `Start` -> (`Stopping`)? -> `Stop`. `Restart` resets a
/// fresh context back to `Start` under the same identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Start,
    Stopping,
    Stop,
}

/// Per-actor mutable state: identity, child set, lifecycle state, and
/// the handle an actor uses to talk back to the runtime. Owned
/// exclusively by the actor's own task; the child set is additionally
/// shared with the registry so supervision can act on it even after
/// this task has ended (e.g. following a panic).
pub struct ActorContext {
    id: Identifier,
    properties: Properties,
    children: Arc<RwLock<collections::HashSet<Identifier>>>,
    state: LifecycleState,
    system: ActorSystem,
    current: Option<Payload>,
    log: Logger,
}

impl ActorContext {
    pub(crate) fn new(
        id: Identifier,
        properties: Properties,
        children: Arc<RwLock<collections::HashSet<Identifier>>>,
        system: ActorSystem,
        log: Logger,
    ) -> Self {
        ActorContext {
            id,
            properties,
            children,
            state: LifecycleState::Start,
            system,
            current: None,
            log,
        }
    }

    pub fn id(&self) -> Identifier {
        self.id
    }

    pub fn parent(&self) -> Option<Identifier> {
        self.properties.parent
    }

    pub fn children(&self) -> Vec<Identifier> {
        self.children.read().unwrap().iter().copied().collect()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn message(&self) -> Option<&Payload> {
        self.current.as_ref()
    }

    pub fn system(&self) -> &ActorSystem {
        &self.system
    }

    pub fn log(&self) -> &Logger {
        &self.log
    }

    /// Spawns a child of this actor. The child's `properties.parent` is
    /// set to this context's identifier regardless of what the caller
    /// passed in.
    pub async fn spawn_actor(
        &mut self,
        producer: BoxActorProd,
        mut properties: Properties,
    ) -> Result<Identifier, SpawnError> {
        properties.parent = Some(self.id);
        self.system.spawn_internal(producer, properties).await
    }

    pub fn send<T: std::any::Any + Send>(&self, msg: T, to: Identifier) {
        self.system.send(msg, to);
    }

    pub async fn stop(&self, id: Identifier) {
        self.system.stop(id).await;
    }

    pub async fn graceful_stop(&self, id: Identifier) {
        self.system.graceful_stop(id).await;
    }

    pub async fn restart(&self, id: Identifier) {
        self.system.restart(id).await;
    }

    pub fn escalate_failure_not_panic(&self, reason: Box<dyn std::any::Any + Send>) {
        self.system.escalate_failure_not_panic(reason, self.id);
    }

    pub fn escalate_failure_panic(&self, reason: Box<dyn std::any::Any + Send>) {
        self.system.escalate_failure_panic(reason, self.id);
    }

    pub(crate) fn take_message(&mut self, payload: Payload) {
        self.current = Some(payload);
    }

    /// Removes the current payload if it is a system message, leaving
    /// user payloads in place for any further inspection by the caller.
    pub(crate) fn take_system(&mut self) -> Option<SystemMsg> {
        match &self.current {
            Some(Payload::System(_)) => match self.current.take() {
                Some(Payload::System(msg)) => Some(msg),
                _ => unreachable!(),
            },
            _ => None,
        }
    }

    /// Drives the lifecycle state machine for a system message, after
    /// the behaviour's own `receive` has already observed it. Returns
    /// `true` when the actor's task loop should end (the context will
    /// never process another envelope — either it has fully stopped, or
    /// a fresh context/task has just been spawned to replace it).
    pub(crate) async fn dispatch_system(&mut self, msg: SystemMsg) -> bool {
        match msg {
            SystemMsg::Start => false,

            SystemMsg::Stop => {
                for child in self.children() {
                    self.system.send_system(child, SystemMsg::Stop).await;
                }
                self.system.delete(self.id).await;
                self.state = LifecycleState::Stop;
                true
            }

            SystemMsg::GracefulStop => {
                tokio::time::sleep(self.system.config().grace_window).await;
                let kids = self.children();
                if kids.is_empty() {
                    self.notify_parent_terminated().await;
                    self.system.delete(self.id).await;
                    self.state = LifecycleState::Stop;
                    true
                } else {
                    for child in kids {
                        self.system.send_system(child, SystemMsg::GracefulStop).await;
                    }
                    self.state = LifecycleState::Stopping;
                    false
                }
            }

            SystemMsg::Restart => {
                for child in self.children() {
                    self.system.send_system(child, SystemMsg::Stop).await;
                }
                let _ = self.system.respawn(self.id).await;
                true
            }

            SystemMsg::ChildTerminated(child) => {
                self.children.write().unwrap().remove(&child);
                if self.state == LifecycleState::Stopping && self.children.read().unwrap().is_empty() {
                    self.notify_parent_terminated().await;
                    self.system.delete(self.id).await;
                    self.state = LifecycleState::Stop;
                    return true;
                }
                false
            }

            SystemMsg::Failure(f) => {
                // Reaching here at all means some child was routed to us
                // as its supervisor; `root_strategy` only ever applies to
                // an actor's own failure when it has no parent, and that
                // case is handled directly by the caller without going
                // through this dispatch (see `ActorSystem::handle_actor_panic`
                // and `ActorSystem::apply_escalation`).
                self.properties
                    .supervision_strategy
                    .handle_failure(&self.system, self.id, f)
                    .await;
                false
            }

            SystemMsg::EscalateFailure(f) => {
                // A deliberate self-escalation (`ctx.escalate_failure_*`)
                // reaching its own actor as a message; always attributed
                // to this actor itself regardless of what `f.who` said.
                self.system.apply_escalation(self.id, f.reason).await;
                false
            }

            SystemMsg::SuspendMailboxAll => {
                for child in self.children() {
                    self.system.send_system(child, SystemMsg::SuspendMailboxAll).await;
                }
                false
            }

            SystemMsg::ResumeMailboxAll => {
                for child in self.children() {
                    self.system.send_system(child, SystemMsg::ResumeMailboxAll).await;
                }
                false
            }

            // Pure mailbox-state signals: the pump already acted on these
            // before handing them to us.
            SystemMsg::SuspendMailbox | SystemMsg::ResumeMailbox | SystemMsg::DeleteMailbox => false,
        }
    }

    async fn notify_parent_terminated(&self) {
        if let Some(parent) = self.properties.parent {
            self.system
                .send_system(parent, SystemMsg::ChildTerminated(self.id))
                .await;
        }
    }
}
