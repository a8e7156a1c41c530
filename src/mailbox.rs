use std::collections::VecDeque;
use std::sync::{Arc, Mutex as StdMutex};

use slog::{trace, Logger};
use tokio::sync::mpsc;

use crate::config::SystemConfig;
use crate::envelope::Envelope;
use crate::id::Identifier;
use crate::message::Payload;
use crate::system_msg::SystemMsg;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum MailboxState {
    Running,
    Suspended,
}

/// The swappable write-half the pump hands envelopes off to. Respawning
/// an actor replaces the consumer task but keeps the same mailbox pump,
/// so the handle is rebound to the new task's receiver rather than the
/// pump itself being recreated.
type Consumer = Arc<StdMutex<mpsc::Sender<Envelope>>>;

/// A live mailbox: the external-facing input endpoint plus a handle
/// used by the system to rebind the consumer on respawn.
#[derive(Clone)]
pub struct MailboxHandle {
    input: mpsc::UnboundedSender<Envelope>,
    consumer: Consumer,
}

impl MailboxHandle {
    pub fn input(&self) -> mpsc::UnboundedSender<Envelope> {
        self.input.clone()
    }

    pub fn rebind(&self, consumer_tx: mpsc::Sender<Envelope>) {
        *self.consumer.lock().unwrap() = consumer_tx;
    }

    /// Builds a handle whose input endpoint forwards straight to a
    /// remote transport rather than to a local pump task. There is no
    /// local consumer to rebind; the placeholder channel is never read.
    pub fn from_remote(endpoint: mpsc::UnboundedSender<Envelope>) -> Self {
        let (placeholder_tx, _unused_rx) = mpsc::channel::<Envelope>(1);
        MailboxHandle {
            input: endpoint,
            consumer: Arc::new(StdMutex::new(placeholder_tx)),
        }
    }
}

/// Spawns the mailbox pump task and returns a handle to it. `consumer_tx`
/// is the channel half the first actor task will read from.
pub fn spawn_mailbox(
    id: Identifier,
    config: &SystemConfig,
    log: Logger,
    consumer_tx: mpsc::Sender<Envelope>,
) -> MailboxHandle {
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<Envelope>();
    let consumer: Consumer = Arc::new(StdMutex::new(consumer_tx));
    let consumer_for_pump = consumer.clone();
    let patience = config.handoff_patience;

    tokio::spawn(async move {
        let mut state = MailboxState::Suspended;
        let mut pending: VecDeque<Envelope> = VecDeque::new();
        let mut deferred: VecDeque<Envelope> = VecDeque::new();

        loop {
            match pending.front() {
                None => match input_rx.recv().await {
                    Some(env) => enqueue(env, &mut state, &mut pending, &mut deferred),
                    None => break,
                },

                Some(env) if matches!(&env.payload, Payload::System(SystemMsg::DeleteMailbox)) => {
                    let tx = consumer_for_pump.lock().unwrap().clone();
                    let env = pending.pop_front().unwrap();
                    let _ = tx.send(env).await;
                    trace!(log, "mailbox terminating"; "actor" => %id);
                    break;
                }

                Some(_) => {
                    // Race the handoff attempt against new input rather than
                    // blocking on it: a `DeleteMailbox` arriving while the
                    // front envelope is stuck waiting on a slow consumer
                    // must still jump the queue and terminate the pump
                    // immediately, not wait its turn behind the stuck entry.
                    let tx = consumer_for_pump.lock().unwrap().clone();
                    tokio::select! {
                        biased;

                        maybe_env = input_rx.recv() => {
                            match maybe_env {
                                Some(env) => enqueue(env, &mut state, &mut pending, &mut deferred),
                                None => break,
                            }
                        }

                        permit = tx.reserve() => {
                            match permit {
                                Ok(permit) => {
                                    let env = pending.pop_front().unwrap();
                                    permit.send(env);
                                }
                                Err(_) => {
                                    trace!(log, "dropping envelope: consumer closed"; "actor" => %id);
                                    pending.pop_front();
                                }
                            }
                        }

                        _ = tokio::time::sleep(patience) => {
                            // consumer busy past our patience window; don't
                            // let it block everyone else behind it
                            let env = pending.pop_front().unwrap();
                            pending.push_back(env);
                        }
                    }
                }
            }
        }
    });

    MailboxHandle { input: input_tx, consumer }
}

fn enqueue(
    env: Envelope,
    state: &mut MailboxState,
    pending: &mut VecDeque<Envelope>,
    deferred: &mut VecDeque<Envelope>,
) {
    match &env.payload {
        Payload::System(SystemMsg::DeleteMailbox) => {
            // Jumps straight to the front: always wins over whatever is
            // already queued, even a stuck in-flight handoff attempt.
            pending.push_front(env);
        }
        Payload::System(SystemMsg::SuspendMailbox)
        | Payload::System(SystemMsg::SuspendMailboxAll)
        | Payload::System(SystemMsg::GracefulStop) => {
            *state = MailboxState::Suspended;
            pending.push_back(env);
        }
        Payload::System(SystemMsg::ResumeMailbox) | Payload::System(SystemMsg::ResumeMailboxAll) => {
            *state = MailboxState::Running;
            while let Some(d) = deferred.pop_front() {
                pending.push_back(d);
            }
            pending.push_back(env);
        }
        Payload::System(_) => pending.push_back(env),
        Payload::User(_) => match state {
            MailboxState::Running => pending.push_back(env),
            MailboxState::Suspended => deferred.push_back(env),
        },
    }
}
