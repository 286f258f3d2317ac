//! postalcam - live Tunisian postal code detector.
//!
//! Wires the pipeline together: camera capture thread, detection scheduler
//! thread, and the HTTP surface. Both background loops stop cooperatively
//! when the server exits and are joined with a bounded timeout.

use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use postalcam::camera::stream::{run_capture_loop, StreamSettings};
use postalcam::camera::{CameraSettings, FrameGrabber, OpenCvCamera};
use postalcam::config;
use postalcam::detector::{run_detection_loop, DetectorContext, ScanSettings};
use postalcam::geo::PostalCodeTable;
use postalcam::ocr::{RecognitionEngine, TesseractEngine};
use postalcam::paths;
use postalcam::server::{run_server, AppState};
use postalcam::storage::{DetectionStore, SqliteStore};

/// How long to wait for a background loop to stop at shutdown.
const THREAD_JOIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Live Tunisian postal code detector.
#[derive(Parser, Debug)]
#[command(name = "postalcam", version, about)]
struct Cli {
    /// Path to config.json (defaults to the file next to the executable).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Camera device index override.
    #[arg(long)]
    camera: Option<i32>,
    /// HTTP bind address override.
    #[arg(long)]
    bind: Option<String>,
    /// Database file override.
    #[arg(long)]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    std::panic::set_hook(Box::new(|panic_info| {
        error!("panic: {panic_info}");
    }));

    let cli = Cli::parse();
    let mut config = config::load_config(cli.config.as_deref());
    if let Some(camera) = cli.camera {
        config.camera_index = camera;
    }
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    if let Some(db) = cli.db {
        config.db_path = Some(db);
    }

    paths::ensure_directories().context("failed to create data directory")?;

    let table = Arc::new(PostalCodeTable::load());
    info!(codes = table.len(), "postal code reference table loaded");

    let engine: Arc<dyn RecognitionEngine> = match TesseractEngine::locate() {
        Ok(engine) => Arc::new(engine),
        Err(err) => {
            warn!(
                error = %err,
                "tesseract not found; recognition will fail until it is installed"
            );
            Arc::new(TesseractEngine::with_executable(PathBuf::from("tesseract")))
        }
    };

    let db_path = config
        .db_path
        .clone()
        .unwrap_or_else(paths::default_db_path);
    let store: Arc<dyn DetectionStore> = Arc::new(SqliteStore::open(&db_path)?);
    info!(path = %db_path.display(), "detection store ready");

    let ctx = Arc::new(DetectorContext::new());

    let capture = {
        let ctx = ctx.clone();
        let table = table.clone();
        let camera_settings = CameraSettings {
            index: config.camera_index,
            width: config.display_width,
            height: config.display_height,
        };
        let stream_settings = StreamSettings {
            camera_index: config.camera_index,
            width: config.display_width,
            height: config.display_height,
        };
        spawn_loop("postalcam-capture", move || {
            run_capture_loop(ctx, table, stream_settings, move || {
                OpenCvCamera::open(&camera_settings)
                    .map(|camera| Box::new(camera) as Box<dyn FrameGrabber>)
            });
        })?
    };

    let scheduler = {
        let ctx = ctx.clone();
        let engine = engine.clone();
        let table = table.clone();
        let store = store.clone();
        let settings = ScanSettings {
            scan_interval: config.scan_interval(),
            detection_timeout: config.detection_timeout(),
            confidence: config.scan_confidence,
        };
        spawn_loop("postalcam-detect", move || {
            run_detection_loop(ctx, engine, table, store, settings);
        })?
    };

    let state = Arc::new(AppState {
        ctx: ctx.clone(),
        table,
        store,
    });
    let served = run_server(state, &config.bind_addr).await;

    info!("shutting down");
    ctx.request_shutdown();
    join_loop(capture, THREAD_JOIN_TIMEOUT);
    join_loop(scheduler, THREAD_JOIN_TIMEOUT);

    served
}

struct LoopHandle {
    name: &'static str,
    handle: thread::JoinHandle<()>,
    done: mpsc::Receiver<()>,
}

/// Spawns a named loop thread that signals completion over a channel, so
/// shutdown can wait with a bound instead of blocking on `join` forever.
fn spawn_loop(name: &'static str, body: impl FnOnce() + Send + 'static) -> Result<LoopHandle> {
    let (done_tx, done_rx) = mpsc::channel();
    let handle = thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            body();
            let _ = done_tx.send(());
        })
        .with_context(|| format!("failed to spawn {name} thread"))?;

    Ok(LoopHandle {
        name,
        handle,
        done: done_rx,
    })
}

fn join_loop(loop_handle: LoopHandle, timeout: Duration) {
    match loop_handle.done.recv_timeout(timeout) {
        Ok(()) => {
            let _ = loop_handle.handle.join();
            info!(thread = loop_handle.name, "stopped");
        }
        Err(_) => {
            warn!(
                thread = loop_handle.name,
                timeout_s = timeout.as_secs(),
                "did not stop in time, detaching"
            );
        }
    }
}
