use std::sync::Arc;

use async_trait::async_trait;

use crate::context::ActorContext;

/// The behaviour a spawned actor runs. `receive` is invoked once per
/// envelope delivered to this actor, including every system message;
/// the context exposes the current payload via `ctx.message()`.
#[async_trait]
pub trait Actor: Send {
    async fn receive(&mut self, ctx: &mut ActorContext);
}

/// Produces fresh `Actor` instances. Held by the registry alongside an
/// actor's mailbox so a restart or respawn can build a clean instance
/// without the caller re-supplying the constructor.
pub trait ActorProducer: Send + Sync {
    fn produce(&self) -> Box<dyn Actor>;
}

struct ProducerFn<F>(F);

impl<F, A> ActorProducer for ProducerFn<F>
where
    F: Fn() -> A + Send + Sync,
    A: Actor + 'static,
{
    fn produce(&self) -> Box<dyn Actor> {
        Box::new((self.0)())
    }
}

pub type BoxActorProd = Arc<dyn ActorProducer>;

/// Wraps a zero-argument actor constructor as a producer suitable for
/// `ActorSystem::spawn_actor` / `ActorContext::spawn_actor`.
pub fn props<A, F>(factory: F) -> BoxActorProd
where
    A: Actor + 'static,
    F: Fn() -> A + Send + Sync + 'static,
{
    Arc::new(ProducerFn(factory))
}
