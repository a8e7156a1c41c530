use std::time::Duration;

use async_trait::async_trait;

use wisp::{props, Actor, ActorContext, ActorSystem, Payload, Properties, Strategy};

struct Flaky {
    probe: wisp::testkit::Probe<u32>,
    count: u32,
}

#[async_trait]
impl Actor for Flaky {
    async fn receive(&mut self, ctx: &mut ActorContext) {
        if let Some(Payload::User(_)) = ctx.message() {
            let text = ctx
                .message()
                .and_then(|p| p.downcast_ref::<String>())
                .cloned();
            if let Some(text) = text {
                if text == "oops" {
                    // a deliberate logical failure, not a panic
                    ctx.escalate_failure_not_panic(Box::new("oops".to_string()));
                    return;
                }
                self.count += 1;
                self.probe.event(self.count);
            }
        }
    }
}

struct NoopSupervisor;

#[async_trait]
impl Actor for NoopSupervisor {
    async fn receive(&mut self, _ctx: &mut ActorContext) {}
}

#[tokio::test]
async fn resume_keeps_the_same_instance_and_mailbox_state() {
    let system = ActorSystem::new();
    let (probe, mut rx) = wisp::testkit::probe::<u32>();

    let parent = system
        .spawn_actor(
            props(|| NoopSupervisor),
            Properties::with_strategies(None, Strategy::Resume, Strategy::Resume),
        )
        .await
        .unwrap();

    let child = system
        .spawn_actor(
            props({
                let probe = probe.clone();
                move || Flaky { probe: probe.clone(), count: 0 }
            }),
            Properties::new(Some(parent)),
        )
        .await
        .unwrap();

    system.send("ping".to_string(), child);
    assert_eq!(rx.recv_timeout(Duration::from_secs(1)).await, Some(1));

    system.send("oops".to_string(), child);
    system.send("ping".to_string(), child);

    // a fresh instance (as `RestartOne` would produce) would report `1`
    // again; the same instance resuming carries its counter forward
    assert_eq!(rx.recv_timeout(Duration::from_secs(1)).await, Some(2));

    assert!(system.contains(child));
    assert!(system.children_of(parent).contains(&child));
}
