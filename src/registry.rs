use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::actor::BoxActorProd;
use crate::id::Identifier;
use crate::mailbox::MailboxHandle;
use crate::properties::Properties;

/// Everything the system needs about a live actor beyond its own task:
/// enough to send it envelopes, to rebuild it on restart, and to act on
/// its children even after its task has exited (a panic).
#[derive(Clone)]
pub struct ActorHandle {
    pub mailbox: MailboxHandle,
    pub producer: BoxActorProd,
    pub properties: Properties,
    pub children: Arc<RwLock<HashSet<Identifier>>>,
}

/// Process-wide, concurrency-safe map from identifier to actor handle.
/// Backed by a sharded map so lookups and inserts for unrelated
/// identifiers never contend with each other.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<DashMap<Identifier, ActorHandle>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Registers `handle` under `id`, failing if `id` is already present
    /// rather than silently overwriting the existing entry.
    pub fn add(&self, id: Identifier, handle: ActorHandle) -> Result<(), Identifier> {
        match self.inner.entry(id) {
            Entry::Occupied(_) => Err(id),
            Entry::Vacant(slot) => {
                slot.insert(handle);
                Ok(())
            }
        }
    }

    pub fn find(&self, id: Identifier) -> Option<ActorHandle> {
        self.inner.get(&id).map(|e| e.value().clone())
    }

    pub fn remove(&self, id: Identifier) {
        self.inner.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
