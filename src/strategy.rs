use crate::id::Identifier;
use crate::system::ActorSystem;
use crate::system_msg::Failure;

/// Closed set of failure-handling policies a parent applies when one of
/// its children reports a `Failure`. Every strategy branches on whether
/// the failure's reason is a logical escalation (`not_panic`) or a real
/// panic; see each arm below and the matching table in the crate's
/// design notes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    RestartOne,
    StopOne,
    RestartAll,
    StopAll,
    Resume,
    Escalate,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::RestartOne
    }
}

impl Strategy {
    /// `supervisor` is the identifier whose `supervision_strategy` (or,
    /// for a parentless actor handling its own crash, `root_strategy`)
    /// this is. It is usually the parent of `failure.who`; for a
    /// root-level actor applying its own root strategy to itself, the
    /// two coincide.
    pub async fn handle_failure(&self, system: &ActorSystem, supervisor: Identifier, failure: Failure) {
        let who = failure.who;
        let not_panic = !failure.reason.is_panic();

        match self {
            Strategy::RestartOne => {
                if not_panic {
                    system.stop_children_of(who).await;
                    system.restart(who).await;
                } else {
                    system.stop_children_of(who).await;
                    let _ = system.respawn(who).await;
                }
            }
            Strategy::StopOne => {
                if not_panic {
                    system.stop(who).await;
                    system.remove_child(supervisor, who);
                } else {
                    system.delete(who).await;
                    system.remove_child(supervisor, who);
                    system.stop_children_of(who).await;
                }
            }
            Strategy::RestartAll => {
                if not_panic {
                    system.stop_children_of(who).await;
                    for sibling in system.children_of(supervisor) {
                        system.restart(sibling).await;
                    }
                } else {
                    let _ = system.respawn(who).await;
                    system.stop_children_of(who).await;
                    for sibling in system.children_of(supervisor) {
                        if sibling != who {
                            system.restart(sibling).await;
                        }
                    }
                }
            }
            Strategy::StopAll => {
                if not_panic {
                    for child in system.children_of(supervisor) {
                        system.stop(child).await;
                        system.remove_child(supervisor, child);
                    }
                } else {
                    system.delete(who).await;
                    system.remove_child(supervisor, who);
                    for sibling in system.children_of(supervisor) {
                        system.stop(sibling).await;
                        system.remove_child(supervisor, sibling);
                    }
                    system.stop_children_of(who).await;
                }
            }
            Strategy::Resume => {
                system.resume_all(who).await;
            }
            Strategy::Escalate => {
                if !not_panic {
                    system.delete(who).await;
                    system.remove_child(supervisor, who);
                }
                // Not a message send: the supervisor applies its own
                // `EscalateFailure` handling to itself, in-process, as if
                // it were the culprit — one level up it is the supervisor
                // that failed to cope, not the original child.
                system.apply_escalation(supervisor, failure.reason).await;
            }
        }
    }
}
