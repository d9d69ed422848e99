//! Route table for the dashboard HTTP API.
//!
//! | Route | Answer |
//! |---|---|
//! | `GET /` | HTML dashboard |
//! | `GET /api/status` | `{connected, mode, endpoint}` |
//! | `GET /api/inputs` | array of inputs |
//! | `POST /api/toggle-mode` | `{mode, message}` |
//! | `POST /api/connect` | `{connected, message, inputs}` |
//! | `GET /api/raw` | last raw device payload as text |
//! | `GET /api/clock` | `{time, weekday}` |
//!
//! Handlers only translate between HTTP and [`IntegrationService`] calls.

use std::convert::Infallible;
use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vmix_integration::{IntegrationService, Mode};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use crate::clock::ClockReading;
use crate::page::{render_dashboard, DashboardView};

/// Largest request body accepted by the JSON endpoints
const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Body of `POST /api/toggle-mode`; an empty body flips the mode
#[derive(Debug, Default, Deserialize)]
pub struct ToggleRequest {
    #[serde(default)]
    pub mode: Option<Mode>,
}

/// Body of `POST /api/connect`
#[derive(Debug, Deserialize)]
pub struct ConnectRequest {
    #[serde(default)]
    pub endpoint: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Custom rejection for request bodies that are not valid JSON for the route
#[derive(Debug)]
struct InvalidBody(String);

impl warp::reject::Reject for InvalidBody {}

/// Body larger than [`MAX_BODY_BYTES`] on a route that reads raw bytes
#[derive(Debug)]
struct BodyTooLarge;

impl warp::reject::Reject for BodyTooLarge {}

/// Build the full filter tree for the dashboard.
pub fn routes(
    service: Arc<IntegrationService>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let index = warp::path::end()
        .and(warp::get())
        .and(with_service(service.clone()))
        .and_then(handle_index);

    let status = warp::path!("api" / "status")
        .and(warp::get())
        .and(with_service(service.clone()))
        .and_then(handle_status);

    let inputs = warp::path!("api" / "inputs")
        .and(warp::get())
        .and(with_service(service.clone()))
        .and_then(handle_inputs);

    // Bodyless POSTs may omit Content-Length; size is checked in the handler
    let toggle = warp::path!("api" / "toggle-mode")
        .and(warp::post())
        .and(warp::body::bytes())
        .and(with_service(service.clone()))
        .and_then(handle_toggle_mode);

    let connect = warp::path!("api" / "connect")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_service(service.clone()))
        .and_then(handle_connect);

    let raw = warp::path!("api" / "raw")
        .and(warp::get())
        .and(with_service(service))
        .and_then(handle_raw_passthrough);

    let clock = warp::path!("api" / "clock")
        .and(warp::get())
        .map(|| warp::reply::json(&ClockReading::now()));

    index
        .or(status)
        .or(inputs)
        .or(toggle)
        .or(connect)
        .or(raw)
        .or(clock)
        .recover(handle_rejection)
}

fn with_service(
    service: Arc<IntegrationService>,
) -> impl Filter<Extract = (Arc<IntegrationService>,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}

async fn handle_index(service: Arc<IntegrationService>) -> Result<Response, Rejection> {
    let status = service.status().await;
    let inputs = if status.connected {
        service.inputs().await.inputs
    } else {
        Vec::new()
    };

    let view = DashboardView {
        clock: ClockReading::now(),
        status,
        inputs,
    };
    Ok(warp::reply::html(render_dashboard(&view)).into_response())
}

async fn handle_status(service: Arc<IntegrationService>) -> Result<Response, Rejection> {
    Ok(warp::reply::json(&service.status().await).into_response())
}

async fn handle_inputs(service: Arc<IntegrationService>) -> Result<Response, Rejection> {
    let result = service.inputs().await;
    Ok(warp::reply::json(&result.inputs).into_response())
}

async fn handle_toggle_mode(
    body: Bytes,
    service: Arc<IntegrationService>,
) -> Result<Response, Rejection> {
    if body.len() as u64 > MAX_BODY_BYTES {
        return Err(warp::reject::custom(BodyTooLarge));
    }

    let request = if body.iter().all(u8::is_ascii_whitespace) {
        ToggleRequest::default()
    } else {
        serde_json::from_slice::<ToggleRequest>(&body)
            .map_err(|e| warp::reject::custom(InvalidBody(e.to_string())))?
    };

    let change = service.toggle_mode(request.mode);
    Ok(warp::reply::json(&change).into_response())
}

async fn handle_connect(
    request: ConnectRequest,
    service: Arc<IntegrationService>,
) -> Result<Response, Rejection> {
    match service.connect(&request.endpoint).await {
        Ok(outcome) => Ok(warp::reply::json(&outcome).into_response()),
        Err(e) => {
            warn!(endpoint = %request.endpoint, error = %e, "Rejected connect request");
            let body = serde_json::json!({
                "connected": false,
                "message": e.to_string(),
                "inputs": [],
            });
            Ok(warp::reply::with_status(warp::reply::json(&body), StatusCode::BAD_REQUEST)
                .into_response())
        }
    }
}

async fn handle_raw_passthrough(service: Arc<IntegrationService>) -> Result<Response, Rejection> {
    let payload = service.raw_passthrough();
    Ok(
        warp::reply::with_header(payload, "content-type", "text/plain; charset=utf-8")
            .into_response(),
    )
}

/// Turn rejections into JSON error responses.
async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(InvalidBody(reason)) = err.find::<InvalidBody>() {
        (StatusCode::BAD_REQUEST, format!("Invalid request body: {}", reason))
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e))
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some()
        || err.find::<BodyTooLarge>().is_some()
    {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large".to_string())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length header required".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        warn!(?err, "Unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    };

    debug!(status = code.as_u16(), %message, "Request rejected");
    let body = warp::reply::json(&ErrorBody { error: &message });
    Ok(warp::reply::with_status(body, code).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmix_integration::IntegrationConfig;

    fn service() -> Arc<IntegrationService> {
        Arc::new(IntegrationService::new(IntegrationConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_toggle_without_body_or_length_flips() {
        let filter = routes(service());

        let response = warp::test::request()
            .method("POST")
            .path("/api/toggle-mode")
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["mode"], "Live");
    }

    #[tokio::test]
    async fn test_toggle_rejects_oversized_body() {
        let filter = routes(service());

        let response = warp::test::request()
            .method("POST")
            .path("/api/toggle-mode")
            .body(vec![b' '; MAX_BODY_BYTES as usize + 1])
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_toggle_rejects_unknown_mode() {
        let filter = routes(service());

        let response = warp::test::request()
            .method("POST")
            .path("/api/toggle-mode")
            .body(r#"{"mode":"Studio"}"#)
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
