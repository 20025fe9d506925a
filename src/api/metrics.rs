use std::fmt;

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,
    pub cache_ops: IntCounterVec,
    pub requests: IntCounterVec,
    pub replication: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let cache_ops = IntCounterVec::new(
            Opts::new("cache_ops_total", "Store operations applied"),
            &["op", "origin"],
        )?;
        let requests = IntCounterVec::new(
            Opts::new("http_requests_total", "Front-end requests"),
            &["method", "path", "status"],
        )?;
        let replication = IntCounterVec::new(
            Opts::new("replication_total", "Peer invocations by outcome"),
            &["peer", "op", "outcome"],
        )?;

        registry.register(Box::new(cache_ops.clone()))?;
        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(replication.clone()))?;

        Ok(Self {
            registry,
            cache_ops,
            requests,
            replication,
        })
    }

    /// Text exposition of every registered counter, with its content type.
    pub fn encode(&self) -> Result<(String, Vec<u8>), prometheus::Error> {
        let mut buffer = Vec::new();
        let enc = TextEncoder::new();
        enc.encode(&self.registry.gather(), &mut buffer)?;
        Ok((enc.format_type().to_string(), buffer))
    }
}

impl fmt::Debug for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metrics").finish_non_exhaustive()
    }
}
