//! Three-node replicated in-memory key-value cache.
//!
//! Each node owns a local [`store::Store`] and answers clients over HTTP.
//! Writes are applied locally first and then forwarded, without waiting and
//! without retries, to the two other members over a small JSON RPC surface.
//! There is no conflict resolution: every node keeps whichever value it
//! applied last.
//!
//! - **`store`**: the lock-guarded map that is the node's only shared state.
//! - **`service`**: the Get/Set/Delete dispatcher used by clients and peers.
//! - **`replication`**: peer links with a per-call deadline and the fan-out.
//! - **`api`**: axum routers for the front-end and the peer RPC surface.
//! - **`cluster`** / **`config`**: the fixed topology and startup settings.

pub mod api;
pub mod cluster;
pub mod config;
pub mod error;
pub mod node;
pub mod replication;
pub mod service;
pub mod store;
pub mod util;
