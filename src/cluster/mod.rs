pub mod state;

pub use state::{NodeId, PeerConfig};
