//! Best-effort, one-hop propagation of local writes to the two peers.

pub mod handler;
pub mod peer;

pub use handler::Replicator;
pub use peer::PeerLink;
