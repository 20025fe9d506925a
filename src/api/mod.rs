pub mod client;
pub mod internal;
pub mod metrics;
pub mod state;

pub use client::RouterBuilder;
pub use internal::PeerRouterBuilder;
pub use metrics::Metrics;
pub use state::ApiState;
