use crate::api::Metrics;
use crate::service::CacheService;

#[derive(Clone, Debug)]
pub struct ApiState {
    pub service: CacheService,
    pub metrics: Metrics,
}
