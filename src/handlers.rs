use std::sync::Arc;

use crate::adapter::Adapter;
use crate::job::{Envelope, JobRequest};

/// Event shape used by HTTP proxy integrations: the job arrives as a JSON string.
#[derive(serde::Deserialize, Default, Debug)]
pub struct ProxyEvent {
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// Which calling convention `invoke` speaks.
#[derive(clap::ValueEnum, serde::Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// The event is the job; only the envelope comes back.
    Queue,
    /// The job is a JSON string in the event's `body`; a proxy response comes back.
    Proxy,
    /// The event is the job; status code and envelope come back.
    Direct,
}

/// Queue-style events: the envelope is the whole reply.
pub async fn handle_queue_event(adapter: &Adapter, event: serde_json::Value) -> Envelope {
    let (_, envelope) = adapter.handle(&JobRequest::from_value(event)).await;
    envelope
}

pub async fn handle_proxy_event(adapter: &Adapter, event: ProxyEvent) -> Result<ProxyResponse, serde_json::Error> {
    let input = event.body.as_deref().map(|body| JobRequest::from_slice(body.as_bytes())).unwrap_or_default();
    let (status_code, envelope) = adapter.handle(&input).await;
    Ok(ProxyResponse {
        status_code,
        body: serde_json::to_string(&envelope)?,
        is_base64_encoded: false,
    })
}

/// Runs one event in the given shape and returns what that platform expects back.
pub async fn invoke(adapter: &Adapter, shape: Shape, event: &[u8]) -> Result<serde_json::Value, serde_json::Error> {
    Ok(match shape {
        Shape::Queue => {
            let event = serde_json::from_slice(event).unwrap_or(serde_json::Value::Null);
            serde_json::to_value(handle_queue_event(adapter, event).await)?
        }
        Shape::Proxy => {
            let event = serde_json::from_slice(event).unwrap_or_else(|e| {
                log::warn!("unparseable proxy event: {}", e);
                ProxyEvent::default()
            });
            serde_json::to_value(handle_proxy_event(adapter, event).await?)?
        }
        Shape::Direct => {
            let (status_code, envelope) = adapter.handle(&JobRequest::from_slice(event)).await;
            serde_json::json!({ "statusCode": status_code, "envelope": envelope })
        }
    })
}

async fn direct_handler(
    axum::extract::State(adapter): axum::extract::State<Arc<Adapter>>,
    body: axum::body::Bytes,
) -> impl axum::response::IntoResponse {
    let (status_code, envelope) = adapter.handle(&JobRequest::from_slice(&body)).await;
    let status_code = axum::http::StatusCode::from_u16(status_code).unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    (status_code, axum::Json(envelope))
}

async fn health_handler() -> impl axum::response::IntoResponse {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

/// Router for the direct HTTP surface.
pub fn router(adapter: Arc<Adapter>) -> axum::Router {
    axum::Router::new()
        .route("/", axum::routing::post(direct_handler))
        .route("/health", axum::routing::get(health_handler))
        .with_state(adapter)
}
