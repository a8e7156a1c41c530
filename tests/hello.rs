use std::time::Duration;

use async_trait::async_trait;

use wisp::{props, Actor, ActorContext, ActorSystem, Payload, Properties, SystemMsg};

struct Recorder {
    probe: wisp::testkit::Probe<String>,
}

#[async_trait]
impl Actor for Recorder {
    async fn receive(&mut self, ctx: &mut ActorContext) {
        match ctx.message() {
            Some(Payload::System(SystemMsg::Start)) => self.probe.event("Start".to_string()),
            Some(Payload::User(_)) => {
                if let Some(text) = ctx.message().and_then(|p| p.downcast_ref::<String>()) {
                    self.probe.event(text.clone());
                }
            }
            _ => {}
        }
    }
}

#[tokio::test]
async fn actor_records_start_then_user_message() {
    let system = ActorSystem::new();
    let (probe, mut rx) = wisp::testkit::probe::<String>();

    let id = system
        .spawn_actor(props(move || Recorder { probe: probe.clone() }), Properties::new(None))
        .await
        .unwrap();

    system.send("hi".to_string(), id);

    let first = rx.recv_timeout(Duration::from_secs(1)).await;
    let second = rx.recv_timeout(Duration::from_secs(1)).await;

    assert_eq!(first.as_deref(), Some("Start"));
    assert_eq!(second.as_deref(), Some("hi"));
}
