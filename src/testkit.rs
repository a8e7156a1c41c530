//! Test support: a channel-backed probe a behaviour can report observed
//! events through, and a couple of minimal stock behaviours used by the
//! crate's own integration tests. Exported for downstream users writing
//! their own actor test suites, mirroring the separate `riker-testkit`
//! crate's `probe` module in this single-crate workspace.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::actor::Actor;
use crate::context::ActorContext;

/// One half of a channel a test behaviour clones into its closure to
/// report events back to the test thread.
#[derive(Clone)]
pub struct Probe<T>(mpsc::UnboundedSender<T>);

pub struct ProbeReceiver<T>(mpsc::UnboundedReceiver<T>);

impl<T: Send + 'static> Probe<T> {
    pub fn event(&self, value: T) {
        let _ = self.0.send(value);
    }
}

impl<T> ProbeReceiver<T> {
    pub async fn recv(&mut self) -> Option<T> {
        self.0.recv().await
    }

    pub async fn recv_timeout(&mut self, dur: std::time::Duration) -> Option<T> {
        tokio::time::timeout(dur, self.0.recv()).await.ok().flatten()
    }
}

pub fn probe<T: Send + 'static>() -> (Probe<T>, ProbeReceiver<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Probe(tx), ProbeReceiver(rx))
}

/// An actor that does nothing. Used as the placeholder behaviour for
/// registry entries that represent a remote endpoint rather than a
/// locally scheduled task.
#[derive(Default)]
pub struct NoopActor;

#[async_trait]
impl Actor for NoopActor {
    async fn receive(&mut self, _ctx: &mut ActorContext) {}
}
