pub mod mutation;

pub use mutation::{CacheService, Origin};
