use std::sync::Arc;

use crate::api::Metrics;
use crate::replication::PeerLink;
use crate::util::Mutation;

/// Fans local writes out to every peer link.
///
/// Each call launches one detached task per peer and returns immediately.
/// Nothing ever waits on those tasks: their outcome is recorded in logs and
/// metrics only, and a failed call is never retried.
#[derive(Debug, Clone)]
pub struct Replicator {
    links: Arc<[PeerLink]>,
    metrics: Metrics,
}

impl Replicator {
    pub fn new(links: Vec<PeerLink>, metrics: Metrics) -> Self {
        Replicator {
            links: links.into(),
            metrics,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn replicate(&self, mutation: Mutation) {
        for link in self.links.iter() {
            let link = link.clone();
            let mutation = mutation.clone();
            let metrics = self.metrics.clone();

            tokio::spawn(async move {
                let peer = link.id().to_string();
                let outcome = match link.apply(&mutation).await {
                    Ok(()) => {
                        tracing::debug!(
                            peer = %peer,
                            op = mutation.op(),
                            key = mutation.key(),
                            "replicated"
                        );
                        "ok"
                    }
                    Err(e) => {
                        tracing::warn!(
                            peer = %peer,
                            op = mutation.op(),
                            key = mutation.key(),
                            error = %e,
                            "replication failed"
                        );
                        "error"
                    }
                };
                metrics
                    .replication
                    .with_label_values(&[peer.as_str(), mutation.op(), outcome])
                    .inc();
            });
        }
    }
}
