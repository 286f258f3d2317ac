//! Thin HTTP surface over the detection pipeline.
//!
//! Exposes the current detection, the annotated MJPEG stream, a bounded
//! detection history, and a simulate entry point that exercises the
//! validation and persistence path without a camera. All heavy lifting
//! happens in the capture and scheduler threads; handlers only read shared
//! state or perform a short storage call.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::detector::{simulate_detection, DetectorContext, LiveSnapshot};
use crate::geo::PostalCodeTable;
use crate::storage::{DetectionEvent, DetectionStore};

/// Rows returned by the history endpoint.
const MAX_HISTORY_SIZE: usize = 10;
/// Poll cadence of the MJPEG stream (~30 fps).
const STREAM_INTERVAL: Duration = Duration::from_millis(33);

/// Application state shared across handlers.
pub struct AppState {
    pub ctx: Arc<DetectorContext>,
    pub table: Arc<PostalCodeTable>,
    pub store: Arc<dyn DetectionStore>,
}

/// Builds the router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/video_feed", get(video_feed_handler))
        .route("/api/postal_code", get(postal_code_handler))
        .route("/api/history", get(history_handler))
        .route("/api/simulate_detection", post(simulate_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the HTTP server until ctrl-c / SIGTERM.
pub async fn run_server(state: Arc<AppState>, bind_addr: &str) -> anyhow::Result<()> {
    let addr: SocketAddr = bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid bind address '{bind_addr}': {e}"))?;

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("server listening on http://{addr}");
    info!("  GET  /health                  - liveness");
    info!("  GET  /video_feed              - annotated MJPEG stream");
    info!("  GET  /api/postal_code         - current detection");
    info!("  GET  /api/history             - recent detections");
    info!("  POST /api/simulate_detection  - operator-simulated detection");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn postal_code_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(current_detection_response(
        &state.ctx.current(),
        &state.table,
    ))
}

/// Shapes the current-detection query response.
fn current_detection_response(live: &LiveSnapshot, table: &PostalCodeTable) -> Value {
    let mut region = None;
    let mut location = None;
    if let Some(code) = &live.code {
        if live.is_valid {
            if let Some(entry) = table.lookup(code) {
                region = Some(entry.region);
                location = Some(entry.location);
            }
        }
    }

    json!({
        "postal_code": live.code,
        "timestamp": live
            .detected_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
        "status": if live.is_detected() { "detected" } else { "scanning" },
        "valid": live.code.as_ref().map(|_| live.is_valid),
        "region": region,
        "location": location,
    })
}

async fn history_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.store.recent_detections(MAX_HISTORY_SIZE) {
        Ok(events) => {
            let history: Vec<Value> = events
                .iter()
                .map(|event| history_entry(event, &state.table))
                .collect();
            Json(json!({ "history": history, "count": history.len() })).into_response()
        }
        Err(err) => {
            error!(error = %err, "failed to read detection history");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}

fn history_entry(event: &DetectionEvent, table: &PostalCodeTable) -> Value {
    let (region, location) = if event.is_valid {
        match table.lookup(&event.code) {
            Some(entry) => (entry.region, entry.location),
            None => ("Unknown", "Unknown"),
        }
    } else {
        ("Non-Tunisia", "Outside database")
    };

    json!({
        "postal_code": event.code,
        "timestamp": event.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        "is_valid": event.is_valid,
        "confidence": event.confidence,
        "region": region,
        "location": location,
    })
}

#[derive(Debug, Deserialize)]
struct SimulateRequest {
    postal_code: String,
}

async fn simulate_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimulateRequest>,
) -> Response {
    match simulate_detection(
        &state.ctx,
        &state.table,
        state.store.as_ref(),
        &request.postal_code,
        None,
    ) {
        Ok(result) => Json(json!({
            "success": true,
            "postal_code": result.code,
            "is_valid": result.is_valid,
            "region": result.region,
            "location": result.location,
            "timestamp": result.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        }))
        .into_response(),
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

/// Continuous annotated-image stream: each published JPEG is sent once as a
/// multipart frame; the stream ends on shutdown.
async fn video_feed_handler(State(state): State<Arc<AppState>>) -> Response {
    let interval = tokio::time::interval(STREAM_INTERVAL);
    let last: Option<Arc<Vec<u8>>> = None;

    let stream = futures::stream::unfold(
        (state, interval, last),
        |(state, mut interval, mut last)| async move {
            loop {
                interval.tick().await;
                if state.ctx.should_shutdown() {
                    return None;
                }
                if let Some(jpeg) = state.ctx.latest_jpeg() {
                    let fresh = !last
                        .as_ref()
                        .is_some_and(|previous| Arc::ptr_eq(previous, &jpeg));
                    if fresh {
                        last = Some(jpeg.clone());
                        let chunk = mjpeg_chunk(&jpeg);
                        return Some((
                            Ok::<_, std::convert::Infallible>(chunk),
                            (state, interval, last),
                        ));
                    }
                }
            }
        },
    );

    (
        [(
            header::CONTENT_TYPE,
            "multipart/x-mixed-replace; boundary=frame",
        )],
        Body::from_stream(stream),
    )
        .into_response()
}

/// Frames one JPEG as a multipart chunk.
fn mjpeg_chunk(jpeg: &[u8]) -> Bytes {
    let mut chunk = Vec::with_capacity(jpeg.len() + 64);
    chunk.extend_from_slice(b"--frame\r\nContent-Type: image/jpeg\r\n\r\n");
    chunk.extend_from_slice(jpeg);
    chunk.extend_from_slice(b"\r\n");
    Bytes::from(chunk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn table() -> PostalCodeTable {
        PostalCodeTable::load()
    }

    #[test]
    fn test_scanning_response_when_no_detection() {
        let live = LiveSnapshot {
            code: None,
            detected_at: None,
            is_valid: true,
        };
        let response = current_detection_response(&live, &table());

        assert_eq!(response["status"], "scanning");
        assert!(response["postal_code"].is_null());
        assert!(response["valid"].is_null());
        assert!(response["region"].is_null());
    }

    #[test]
    fn test_detected_response_resolves_region() {
        let live = LiveSnapshot {
            code: Some("1000".to_string()),
            detected_at: Some(Local::now()),
            is_valid: true,
        };
        let response = current_detection_response(&live, &table());

        assert_eq!(response["status"], "detected");
        assert_eq!(response["postal_code"], "1000");
        assert_eq!(response["valid"], true);
        assert_eq!(response["region"], "Tunis");
        assert_eq!(response["location"], "Tunis RP");
    }

    #[test]
    fn test_invalid_detection_has_no_region() {
        let live = LiveSnapshot {
            code: Some("9999".to_string()),
            detected_at: Some(Local::now()),
            is_valid: false,
        };
        let response = current_detection_response(&live, &table());

        assert_eq!(response["status"], "detected");
        assert_eq!(response["valid"], false);
        assert!(response["region"].is_null());
    }

    #[test]
    fn test_history_entry_labels_invalid_codes() {
        let event = DetectionEvent {
            code: "9999".to_string(),
            timestamp: Local::now(),
            confidence: 50,
            is_valid: false,
            user_id: None,
        };
        let entry = history_entry(&event, &table());
        assert_eq!(entry["region"], "Non-Tunisia");
        assert_eq!(entry["location"], "Outside database");
    }

    #[test]
    fn test_history_entry_resolves_valid_codes() {
        let event = DetectionEvent {
            code: "2035".to_string(),
            timestamp: Local::now(),
            confidence: 95,
            is_valid: true,
            user_id: Some(1),
        };
        let entry = history_entry(&event, &table());
        assert_eq!(entry["region"], "Ariana");
        assert_eq!(entry["confidence"], 95);
    }

    #[test]
    fn test_mjpeg_chunk_framing() {
        let chunk = mjpeg_chunk(&[0xFF, 0xD8, 0xFF]);
        let text = chunk.as_ref();
        assert!(text.starts_with(b"--frame\r\nContent-Type: image/jpeg\r\n\r\n"));
        assert!(text.ends_with(&[0xFF, 0xD8, 0xFF, b'\r', b'\n']));
    }
}
