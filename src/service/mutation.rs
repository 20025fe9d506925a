use std::sync::Arc;

use crate::api::Metrics;
use crate::replication::Replicator;
use crate::store::Store;
use crate::util::Mutation;

/// Where a request entered this node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A client of this node's front-end. Writes are propagated.
    Local,
    /// Another cluster member forwarding its own write. Applied only here.
    Peer,
}

impl Origin {
    fn label(self) -> &'static str {
        match self {
            Origin::Local => "local",
            Origin::Peer => "peer",
        }
    }
}

/// Stateless dispatcher of Get/Set/Delete over the local store.
///
/// Semantics are the same for both origins; the only difference is that a
/// locally originated write is handed to the replicator after it has been
/// applied, which keeps propagation one hop deep.
#[derive(Debug, Clone)]
pub struct CacheService {
    store: Arc<Store>,
    replicator: Replicator,
    metrics: Metrics,
}

impl CacheService {
    pub fn new(store: Arc<Store>, replicator: Replicator, metrics: Metrics) -> Self {
        CacheService {
            store,
            replicator,
            metrics,
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn get(&self, key: &str, origin: Origin) -> Option<String> {
        tracing::debug!(key, origin = origin.label(), "get");
        self.count("get", origin);
        self.store.get(key)
    }

    /// Always succeeds; replication outcome is never reported.
    pub fn set(&self, key: String, value: String, origin: Origin) {
        tracing::debug!(key = %key, origin = origin.label(), "set");
        self.count("set", origin);

        match origin {
            Origin::Local => {
                self.store.set(key.clone(), value.clone());
                self.replicator.replicate(Mutation::Set { key, value });
            }
            Origin::Peer => self.store.set(key, value),
        }
    }

    /// Returns whether the key existed. Only an actual removal is
    /// propagated.
    pub fn delete(&self, key: &str, origin: Origin) -> bool {
        tracing::debug!(key, origin = origin.label(), "delete");
        self.count("delete", origin);

        let removed = self.store.delete(key);
        if removed && origin == Origin::Local {
            self.replicator.replicate(Mutation::Delete {
                key: key.to_string(),
            });
        }
        removed
    }

    fn count(&self, op: &str, origin: Origin) {
        self.metrics
            .cache_ops
            .with_label_values(&[op, origin.label()])
            .inc();
    }
}
