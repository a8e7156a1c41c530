use std::time::Duration;

use async_trait::async_trait;

use wisp::{props, Actor, ActorContext, ActorSystem, Payload, Properties, Strategy, SystemMsg};

struct PanicOnCue {
    probe: wisp::testkit::Probe<String>,
}

#[async_trait]
impl Actor for PanicOnCue {
    async fn receive(&mut self, ctx: &mut ActorContext) {
        match ctx.message() {
            Some(Payload::System(SystemMsg::Start)) => self.probe.event("start".to_string()),
            Some(Payload::User(_)) => {
                let text = ctx
                    .message()
                    .and_then(|p| p.downcast_ref::<String>())
                    .cloned();
                if let Some(text) = text {
                    if text == "panic" {
                        panic!("induced failure");
                    }
                    self.probe.event(text);
                }
            }
            _ => {}
        }
    }
}

#[tokio::test]
async fn restart_one_respawns_only_the_failed_child() {
    let system = ActorSystem::new();
    let (probe, mut rx) = wisp::testkit::probe::<String>();

    let parent = system
        .spawn_actor(
            props(|| NoopSupervisor),
            Properties::with_strategies(None, Strategy::RestartOne, Strategy::RestartOne),
        )
        .await
        .unwrap();

    let child = system
        .spawn_actor(
            props({
                let probe = probe.clone();
                move || PanicOnCue { probe: probe.clone() }
            }),
            Properties::new(Some(parent)),
        )
        .await
        .unwrap();

    assert_eq!(rx.recv_timeout(Duration::from_secs(1)).await.as_deref(), Some("start"));

    system.send("panic".to_string(), child);

    // the respawned instance reports its own Start under the same identifier
    assert_eq!(rx.recv_timeout(Duration::from_secs(1)).await.as_deref(), Some("start"));

    assert!(system.contains(child));
    assert!(system.children_of(parent).contains(&child));

    system.send("still alive".to_string(), child);
    assert_eq!(
        rx.recv_timeout(Duration::from_secs(1)).await.as_deref(),
        Some("still alive")
    );
}

struct NoopSupervisor;

#[async_trait]
impl Actor for NoopSupervisor {
    async fn receive(&mut self, _ctx: &mut ActorContext) {}
}
