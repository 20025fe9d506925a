//! Local key-value storage.
//!
//! The map is never shared across nodes; all cross-node effects go through
//! the peer RPC path in `replication`.

pub mod engine;

pub use engine::Store;
