use std::any::Any;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use slog::{trace, warn};
use tokio::sync::mpsc;

use crate::actor::BoxActorProd;
use crate::config::SystemConfig;
use crate::context::ActorContext;
use crate::envelope::Envelope;
use crate::error::{RestartError, SpawnError};
use crate::id::Identifier;
use crate::logging::root_logger;
use crate::mailbox::{spawn_mailbox, MailboxHandle};
use crate::message::Payload;
use crate::properties::Properties;
use crate::registry::{ActorHandle, Registry};
use crate::system_msg::{Failure, Reason, SystemMsg};

/// Top-level facade: owns the registry and schedules actor tasks. Cheap
/// to clone; every clone shares the same registry and configuration.
#[derive(Clone)]
pub struct ActorSystem {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,
    config: SystemConfig,
    log: slog::Logger,
}

impl ActorSystem {
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    pub fn with_config(config: SystemConfig) -> Self {
        ActorSystem {
            inner: Arc::new(Inner {
                registry: Registry::new(),
                config,
                log: root_logger(),
            }),
        }
    }

    pub fn config(&self) -> &SystemConfig {
        &self.inner.config
    }

    pub fn log(&self) -> &slog::Logger {
        &self.inner.log
    }

    /// Spawns a top-level actor (no parent). Failures that reach it
    /// apply its own `root_strategy` to itself, since there is no
    /// parent to escalate to.
    pub async fn spawn_actor(
        &self,
        producer: BoxActorProd,
        properties: Properties,
    ) -> Result<Identifier, SpawnError> {
        self.clone().spawn_internal(producer, properties).await
    }

    pub(crate) async fn spawn_internal(
        &self,
        producer: BoxActorProd,
        properties: Properties,
    ) -> Result<Identifier, SpawnError> {
        let id = Identifier::new();
        let (consumer_tx, consumer_rx) =
            mpsc::channel::<Envelope>(self.inner.config.mailbox_capacity);
        let mailbox = spawn_mailbox(id, &self.inner.config, self.inner.log.clone(), consumer_tx);
        let children = Arc::new(RwLock::new(HashSet::new()));

        let handle = ActorHandle {
            mailbox: mailbox.clone(),
            producer: producer.clone(),
            properties: properties.clone(),
            children: children.clone(),
        };
        self.inner
            .registry
            .add(id, handle)
            .map_err(SpawnError::AlreadyExists)?;

        if let Some(parent) = properties.parent {
            if let Some(parent_handle) = self.inner.registry.find(parent) {
                parent_handle.children.write().unwrap().insert(id);
            }
        }

        self.spawn_actor_task(id, producer, properties, children, consumer_rx);

        trace!(self.inner.log, "actor created"; "actor" => %id);
        // A freshly pumped mailbox starts Suspended; resume it before Start
        // so the first user messages sent right after spawn aren't deferred.
        let _ = mailbox
            .input()
            .send(Envelope::new(Payload::System(SystemMsg::ResumeMailboxAll), id));
        let _ = mailbox.input().send(Envelope::new(Payload::System(SystemMsg::Start), id));
        Ok(id)
    }

    fn spawn_actor_task(
        &self,
        id: Identifier,
        producer: BoxActorProd,
        properties: Properties,
        children: Arc<RwLock<HashSet<Identifier>>>,
        mut consumer_rx: mpsc::Receiver<Envelope>,
    ) {
        let system = self.clone();
        let log = self.inner.log.new(slog::o!("actor" => id.to_string()));

        let join = tokio::spawn(async move {
            let mut behavior = producer.produce();
            let mut ctx = ActorContext::new(id, properties, children, system, log);

            while let Some(env) = consumer_rx.recv().await {
                ctx.take_message(env.payload);
                behavior.receive(&mut ctx).await;

                if let Some(sys_msg) = ctx.take_system() {
                    if ctx.dispatch_system(sys_msg).await {
                        break;
                    }
                }
            }
        });

        let system = self.clone();
        tokio::spawn(async move {
            if let Err(join_err) = join.await {
                if join_err.is_panic() {
                    let reason = join_err.into_panic();
                    system.handle_actor_panic(id, reason).await;
                }
            }
        });
    }

    async fn handle_actor_panic(&self, id: Identifier, reason: Box<dyn Any + Send>) {
        warn!(self.inner.log, "actor panicked"; "actor" => %id);
        let handle = match self.inner.registry.find(id) {
            Some(h) => h,
            None => return,
        };

        self.send_system(id, SystemMsg::SuspendMailbox).await;
        for child in handle.children.read().unwrap().iter().copied().collect::<Vec<_>>() {
            self.send_system(child, SystemMsg::SuspendMailboxAll).await;
        }

        let failure = Failure::panic(id, reason);
        match handle.properties.parent {
            Some(parent) => {
                self.send_system(parent, SystemMsg::Failure(failure)).await;
            }
            None => {
                let root_strategy = handle.properties.root_strategy;
                root_strategy.handle_failure(self, id, failure).await;
            }
        }
    }

    /// Fire-and-forget delivery; a missing identifier is a silent no-op.
    pub fn send<T: Any + Send>(&self, msg: T, to: Identifier) {
        if let Some(handle) = self.inner.registry.find(to) {
            let _ = handle.mailbox.input().send(Envelope::user(msg, to));
        }
    }

    pub(crate) async fn send_system(&self, to: Identifier, msg: SystemMsg) {
        if let Some(handle) = self.inner.registry.find(to) {
            let _ = handle
                .mailbox
                .input()
                .send(Envelope::new(Payload::System(msg), to));
        }
    }

    pub async fn stop(&self, id: Identifier) {
        self.send_system(id, SystemMsg::Stop).await;
    }

    pub async fn graceful_stop(&self, id: Identifier) {
        self.send_system(id, SystemMsg::GracefulStop).await;
    }

    pub async fn restart(&self, id: Identifier) {
        self.send_system(id, SystemMsg::Restart).await;
    }

    /// Queues a deliberate logical failure for `id` to process as its
    /// own next envelope (mirroring the channel-based self-send the
    /// reference implementation uses): processed via
    /// `ActorContext::dispatch_system`'s `EscalateFailure` handling, the
    /// same path a supervisor's `Escalate` strategy drives directly.
    pub fn escalate_failure_not_panic(&self, reason: Box<dyn Any + Send>, id: Identifier) {
        let failure = Failure::not_panic(id, reason);
        let system = self.clone();
        tokio::spawn(async move {
            system.send_system(id, SystemMsg::EscalateFailure(failure)).await;
        });
    }

    pub fn escalate_failure_panic(&self, reason: Box<dyn Any + Send>, id: Identifier) {
        let failure = Failure::panic(id, reason);
        let system = self.clone();
        tokio::spawn(async move {
            system.send_system(id, SystemMsg::EscalateFailure(failure)).await;
        });
    }

    /// Registers an identifier whose endpoint forwards envelopes to a
    /// remote transport. The transport is responsible for serialization
    /// and reconstituting envelopes on the remote peer; to the registry
    /// it is just another mailbox input endpoint.
    pub fn add_remote_actor(
        &self,
        id: Identifier,
        endpoint: mpsc::UnboundedSender<Envelope>,
    ) -> Result<(), SpawnError> {
        let mailbox = MailboxHandle::from_remote(endpoint);
        let handle = ActorHandle {
            mailbox,
            producer: crate::actor::props(crate::testkit::NoopActor::default),
            properties: Properties::new(None),
            children: Arc::new(RwLock::new(HashSet::new())),
        };
        self.inner.registry.add(id, handle).map_err(SpawnError::AlreadyExists)
    }

    /// The children currently registered under `id`, per the registry's
    /// authoritative child set (shared with any live context for `id`).
    pub fn children_of(&self, id: Identifier) -> Vec<Identifier> {
        self.inner
            .registry
            .find(id)
            .map(|h| h.children.read().unwrap().iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, id: Identifier) -> bool {
        self.inner.registry.find(id).is_some()
    }

    pub(crate) async fn stop_children_of(&self, id: Identifier) {
        for child in self.children_of(id) {
            self.stop(child).await;
        }
    }

    pub(crate) fn remove_child(&self, parent: Identifier, child: Identifier) {
        if let Some(handle) = self.inner.registry.find(parent) {
            handle.children.write().unwrap().remove(&child);
        }
    }

    pub(crate) async fn resume_all(&self, id: Identifier) {
        self.send_system(id, SystemMsg::ResumeMailboxAll).await;
    }

    pub(crate) async fn delete(&self, id: Identifier) {
        if let Some(handle) = self.inner.registry.find(id) {
            let _ = handle
                .mailbox
                .input()
                .send(Envelope::new(Payload::System(SystemMsg::DeleteMailbox), id));
        }
        self.inner.registry.remove(id);
    }

    /// Replaces a crashed or restarting actor's behaviour and context
    /// with a fresh instance under the same identifier and mailbox.
    /// Fails if `id` has already been removed from the registry by the
    /// time the strategy runs (e.g. a concurrent `Stop`/`delete`).
    pub(crate) async fn respawn(&self, id: Identifier) -> Result<(), RestartError> {
        let handle = match self.inner.registry.find(id) {
            Some(h) => h,
            None => {
                warn!(self.inner.log, "cannot restart unregistered actor"; "actor" => %id);
                return Err(RestartError(id));
            }
        };

        let (consumer_tx, consumer_rx) =
            mpsc::channel::<Envelope>(self.inner.config.mailbox_capacity);
        handle.mailbox.rebind(consumer_tx);

        self.spawn_actor_task(
            id,
            handle.producer.clone(),
            handle.properties.clone(),
            handle.children.clone(),
            consumer_rx,
        );

        self.send_system(id, SystemMsg::ResumeMailboxAll).await;
        self.send_system(id, SystemMsg::Start).await;
        Ok(())
    }

    /// The `EscalateFailure` handler, reached two ways: as a message an
    /// actor sends itself via `escalate_failure_not_panic`/`_panic`, or as
    /// a direct synchronous call an `Escalate` strategy makes on the
    /// supervisor that inherited a child's failure. Either way the
    /// failure is always attributed to `who` itself — a caller higher up
    /// the tree does not get to pick whose failure this is.
    ///
    /// A panic-flavoured reason simply re-panics inside `who`'s own task,
    /// falling into the same unwind path `spawn_actor_task`'s watchdog
    /// already catches for an ordinary panic. A logical reason suspends
    /// `who` and its children and forwards a plain `Failure` one level up
    /// (or, parentless, applies `who`'s own root strategy to itself).
    pub(crate) async fn apply_escalation(&self, who: Identifier, reason: Reason) {
        let reason = match reason {
            Reason::Panic(payload) => std::panic::resume_unwind(payload),
            Reason::NotPanic(not_panic) => Reason::NotPanic(not_panic),
        };

        let properties = match self.inner.registry.find(who) {
            Some(h) => h.properties,
            None => return,
        };

        self.send_system(who, SystemMsg::SuspendMailbox).await;
        for child in self.children_of(who) {
            self.send_system(child, SystemMsg::SuspendMailboxAll).await;
        }

        let failure = Failure { who, reason };
        match properties.parent {
            Some(parent) => {
                self.send_system(parent, SystemMsg::Failure(failure)).await;
            }
            None => {
                // `Strategy::handle_failure` can call back into
                // `apply_escalation` (the `Escalate` strategy at the
                // root), so this edge must be boxed and type-erased to
                // break the recursive future size.
                let root_strategy = properties.root_strategy;
                let fut: std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>> =
                    Box::pin(root_strategy.handle_failure(self, who, failure));
                fut.await;
            }
        }
    }

    pub fn registry_len(&self) -> usize {
        self.inner.registry.len()
    }

    pub fn registry_is_empty(&self) -> bool {
        self.inner.registry.is_empty()
    }
}

impl Default for ActorSystem {
    fn default() -> Self {
        Self::new()
    }
}
