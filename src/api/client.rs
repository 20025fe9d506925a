use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{Map, Value};

use crate::api::ApiState;
use crate::error::PayloadError;
use crate::service::Origin;

/// Front-end gateway: `GET /<key>`, `POST /`, `DELETE /<key>`. Any other
/// method on these paths is answered with 405 by the router. The key is the
/// whole path after the leading `/`, slashes included.
pub struct RouterBuilder;

impl RouterBuilder {
    pub fn with_state(state: ApiState) -> Router {
        Router::new()
            .route("/", post(set_entry))
            .route("/*key", get(get_entry).delete(delete_entry))
            .with_state(state)
    }
}

/// Extracts the single `{"<key>":"<value>"}` pair of a write body.
pub fn parse_entry(body: &str) -> Result<(String, String), PayloadError> {
    let object: Map<String, Value> =
        serde_json::from_str(body).map_err(|e| PayloadError::NotAnObject(e.to_string()))?;
    if object.len() != 1 {
        return Err(PayloadError::PairCount(object.len()));
    }

    match object.into_iter().next() {
        Some((key, Value::String(value))) => Ok((key, value)),
        Some((key, _)) => Err(PayloadError::NonStringValue(key)),
        None => Err(PayloadError::PairCount(0)),
    }
}

async fn get_entry(State(state): State<ApiState>, Path(key): Path<String>) -> Response {
    let resp = match state.service.get(&key, Origin::Local) {
        Some(value) => {
            let mut body = Map::new();
            body.insert(key, Value::String(value));
            (StatusCode::OK, Json(Value::Object(body))).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    };
    record(&state, "GET", "/*key", resp.status());
    resp
}

async fn set_entry(State(state): State<ApiState>, body: String) -> Response {
    let resp = match parse_entry(&body) {
        Ok((key, value)) => {
            state.service.set(key, value, Origin::Local);
            StatusCode::OK.into_response()
        }
        Err(e) => {
            tracing::info!(error = %e, "rejected write body");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    };
    record(&state, "POST", "/", resp.status());
    resp
}

async fn delete_entry(State(state): State<ApiState>, Path(key): Path<String>) -> Response {
    let removed = state.service.delete(&key, Origin::Local);
    let body = if removed { "1" } else { "0" };
    record(&state, "DELETE", "/*key", StatusCode::OK);
    (StatusCode::OK, body).into_response()
}

fn record(state: &ApiState, method: &str, path: &str, status: StatusCode) {
    state
        .metrics
        .requests
        .with_label_values(&[method, path, status.as_str()])
        .inc();
}
