use std::time::Duration;

use async_trait::async_trait;

use wisp::{props, Actor, ActorContext, ActorSystem, Payload, Properties, Strategy, SystemMsg};

// Three-level tree: grandparent -(RestartOne root strategy)-> parent
// -(Escalate)-> grandchild. The grandchild panics; `parent` gives up on
// it and escalates; `grandparent`, having no parent of its own, applies
// its root strategy to `parent` (the escalating supervisor), restarting
// it rather than touching the grandchild directly.
struct Watcher {
    probe: wisp::testkit::Probe<(&'static str, String)>,
    name: &'static str,
}

#[async_trait]
impl Actor for Watcher {
    async fn receive(&mut self, ctx: &mut ActorContext) {
        match ctx.message() {
            Some(Payload::System(SystemMsg::Start)) => {
                self.probe.event((self.name, "start".to_string()))
            }
            Some(Payload::User(_)) => {
                let text = ctx
                    .message()
                    .and_then(|p| p.downcast_ref::<String>())
                    .cloned();
                if let Some(text) = text {
                    if text == "panic" {
                        panic!("induced failure");
                    }
                }
            }
            _ => {}
        }
    }
}

struct NoopSupervisor;

#[async_trait]
impl Actor for NoopSupervisor {
    async fn receive(&mut self, _ctx: &mut ActorContext) {}
}

#[tokio::test]
async fn escalate_reaches_the_root_and_restarts_the_escalating_supervisor() {
    let system = ActorSystem::new();
    let (probe, mut rx) = wisp::testkit::probe::<(&'static str, String)>();

    let grandparent = system
        .spawn_actor(
            props(|| NoopSupervisor),
            Properties::with_strategies(None, Strategy::RestartOne, Strategy::RestartOne),
        )
        .await
        .unwrap();

    let parent = system
        .spawn_actor(
            props({
                let probe = probe.clone();
                move || Watcher { probe: probe.clone(), name: "parent" }
            }),
            Properties::with_strategies(Some(grandparent), Strategy::Escalate, Strategy::RestartOne),
        )
        .await
        .unwrap();

    let grandchild = system
        .spawn_actor(
            props({
                let probe = probe.clone();
                move || Watcher { probe: probe.clone(), name: "grandchild" }
            }),
            Properties::new(Some(parent)),
        )
        .await
        .unwrap();

    assert_eq!(
        rx.recv_timeout(Duration::from_secs(1)).await,
        Some(("parent", "start".to_string()))
    );
    assert_eq!(
        rx.recv_timeout(Duration::from_secs(1)).await,
        Some(("grandchild", "start".to_string()))
    );

    system.send("panic".to_string(), grandchild);

    // `parent` is respawned under the grandparent's root strategy
    assert_eq!(
        rx.recv_timeout(Duration::from_secs(1)).await,
        Some(("parent", "start".to_string()))
    );

    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(system.contains(parent));
    assert!(system.children_of(grandparent).contains(&parent));
    assert!(!system.contains(grandchild));
    assert!(!system.children_of(parent).contains(&grandchild));
}
