use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::api::ApiState;
use crate::service::Origin;
use crate::util::{
    DeleteReply, DeleteRequest, GetReply, GetRequest, SetReply, SetRequest,
};

/// Peer RPC surface. Writes arriving here are applied locally and never
/// forwarded again.
pub struct PeerRouterBuilder;

impl PeerRouterBuilder {
    pub fn with_state(state: ApiState) -> Router {
        Router::new()
            .route("/cache/get", post(get_cache))
            .route("/cache/set", post(set_cache))
            .route("/cache/delete", post(delete_cache))
            .route("/ping", get(ping))
            .route("/metrics", get(metrics))
            .with_state(state)
    }
}

async fn get_cache(
    State(state): State<ApiState>,
    Json(req): Json<GetRequest>,
) -> Json<GetReply> {
    let value = state.service.get(&req.key, Origin::Peer);
    Json(GetReply {
        key: req.key,
        value,
    })
}

async fn set_cache(
    State(state): State<ApiState>,
    Json(req): Json<SetRequest>,
) -> Json<SetReply> {
    state.service.set(req.key, req.value, Origin::Peer);
    Json(SetReply::default())
}

async fn delete_cache(
    State(state): State<ApiState>,
    Json(req): Json<DeleteRequest>,
) -> Json<DeleteReply> {
    let removed = state.service.delete(&req.key, Origin::Peer);
    Json(DeleteReply {
        num: u32::from(removed),
    })
}

async fn ping() -> Response {
    (StatusCode::OK, "pong").into_response()
}

async fn metrics(State(state): State<ApiState>) -> Response {
    match state.metrics.encode() {
        Ok((content_type, buffer)) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], buffer).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
