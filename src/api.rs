use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{header::HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::engine::MoversEngine;
use crate::error::AppError;
use crate::model::{AnomalyEntry, Direction, RankedList, SetupEntry};

const RET_CODE_OK: i64 = 0;
const RET_CODE_INTERNAL: i64 = 10001;

/// Response envelope mirroring the upstream sentinel style. Transport
/// status is 200 either way; consumers check `retCode`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T: Serialize> {
    pub ret_code: i64,
    pub ret_msg: String,
    pub result: Option<T>,
}

impl<T: Serialize> ApiEnvelope<T> {
    fn ok(result: T) -> Self {
        Self {
            ret_code: RET_CODE_OK,
            ret_msg: "OK".to_string(),
            result: Some(result),
        }
    }

    fn failure(msg: String) -> Self {
        Self {
            ret_code: RET_CODE_INTERNAL,
            ret_msg: msg,
            result: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResult<T: Serialize> {
    pub list: Vec<T>,
}

#[derive(Clone)]
pub struct AppContext {
    engine: Arc<MoversEngine>,
    movers_cache: Arc<ResponseCache<Direction, RankedList>>,
    setups_cache: Arc<ResponseCache<(), Vec<SetupEntry>>>,
    anomalies_cache: Arc<ResponseCache<(), Vec<AnomalyEntry>>>,
}

impl AppContext {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let ttl = Duration::from_secs(config.movers.cache_ttl_secs);
        Ok(Self {
            engine: Arc::new(MoversEngine::new(config)?),
            movers_cache: Arc::new(ResponseCache::new(ttl)),
            setups_cache: Arc::new(ResponseCache::new(ttl)),
            anomalies_cache: Arc::new(ResponseCache::new(ttl)),
        })
    }
}

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/api/movers", get(movers).options(preflight))
        .route("/api/setups", get(setups).options(preflight))
        .route("/api/anomalies", get(anomalies).options(preflight))
        .with_state(ctx)
}

#[derive(Debug, Deserialize)]
pub struct MoversQuery {
    pub dir: Option<String>,
}

async fn movers(State(ctx): State<AppContext>, Query(query): Query<MoversQuery>) -> Response {
    let direction = Direction::from_query(query.dir.as_deref());
    if let Some(cached) = ctx.movers_cache.get(&direction) {
        return ok_response(&*cached);
    }
    match ctx.engine.top_movers(direction).await {
        Ok(listing) => {
            let listing = Arc::new(listing);
            ctx.movers_cache.put(direction, Arc::clone(&listing));
            ok_response(&*listing)
        }
        Err(err) => {
            tracing::error!(dir = direction.as_str(), %err, "movers aggregation failed");
            failure_response(err)
        }
    }
}

async fn setups(State(ctx): State<AppContext>) -> Response {
    if let Some(cached) = ctx.setups_cache.get(&()) {
        return ok_response(&ListResult {
            list: cached.to_vec(),
        });
    }
    match ctx.engine.setup_scan().await {
        Ok(list) => {
            ctx.setups_cache.put((), Arc::new(list.clone()));
            ok_response(&ListResult { list })
        }
        Err(err) => {
            tracing::error!(%err, "setup scan failed");
            failure_response(err)
        }
    }
}

async fn anomalies(State(ctx): State<AppContext>) -> Response {
    if let Some(cached) = ctx.anomalies_cache.get(&()) {
        return ok_response(&ListResult {
            list: cached.to_vec(),
        });
    }
    match ctx.engine.anomaly_scan().await {
        Ok(list) => {
            ctx.anomalies_cache.put((), Arc::new(list.clone()));
            ok_response(&ListResult { list })
        }
        Err(err) => {
            tracing::error!(%err, "anomaly scan failed");
            failure_response(err)
        }
    }
}

/// Pre-flight returns immediately with no body.
async fn preflight() -> Response {
    with_cors(StatusCode::OK.into_response())
}

fn ok_response<T: Serialize>(result: &T) -> Response {
    with_cors(Json(ApiEnvelope::ok(result)).into_response())
}

fn failure_response(err: AppError) -> Response {
    let envelope = ApiEnvelope::<()>::failure(format!("Internal Server Error: {err}"));
    with_cors(Json(envelope).into_response())
}

fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        HeaderName::from_static("access-control-allow-origin"),
        HeaderValue::from_static("*"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-methods"),
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-headers"),
        HeaderValue::from_static("Content-Type"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let env = ApiEnvelope::ok(ListResult { list: vec![1, 2] });
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["retCode"], 0);
        assert_eq!(json["retMsg"], "OK");
        assert_eq!(json["result"]["list"], serde_json::json!([1, 2]));
    }

    #[test]
    fn failure_envelope_has_null_result() {
        let env = ApiEnvelope::<()>::failure("boom".to_string());
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["retCode"], RET_CODE_INTERNAL);
        assert!(json["result"].is_null());
    }

    #[test]
    fn cors_headers_applied() {
        let resp = with_cors(StatusCode::OK.into_response());
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert_eq!(
            resp.headers().get("access-control-allow-methods").unwrap(),
            "GET, OPTIONS"
        );
    }
}
