//! Detection cycle scheduler.
//!
//! Runs on its own thread, decoupled from frame capture: every
//! `scan_interval` it snapshots the latest frame, runs the preprocessing
//! and recognition pipeline, validates the best candidate against the
//! reference table, updates the live detection, and appends a detection
//! event to storage. A storage failure is logged and the cycle completes;
//! an unexpected cycle failure is logged and followed by a backoff sleep.
//! The loop only ends when the shared shutdown flag is raised.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::detector::state::DetectorContext;
use crate::geo::PostalCodeTable;
use crate::ocr::{scan_frame, RecognitionEngine};
use crate::storage::{DetectionEvent, DetectionStore};

/// Sleep between loop iterations regardless of branch taken.
const IDLE_QUANTUM: Duration = Duration::from_millis(100);
/// Sleep after an unexpected cycle failure.
const ERROR_BACKOFF: Duration = Duration::from_secs(1);
/// Log cadence for uneventful cycles.
const LOG_EVERY_CYCLES: u64 = 5;

/// Timing and persistence parameters for the detection loop.
#[derive(Debug, Clone, Copy)]
pub struct ScanSettings {
    pub scan_interval: Duration,
    pub detection_timeout: Duration,
    /// Stored as-is on every event: the engine exposes no per-result
    /// confidence, so a fixed value is recorded.
    pub confidence: u8,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CycleOutcome {
    /// Scan interval has not elapsed yet.
    Waiting,
    /// Interval elapsed but no frame has been captured so far.
    NoFrame,
    /// A scan ran and found nothing.
    NoCandidates,
    /// A scan ran and a code was accepted.
    Accepted(String),
}

pub(crate) struct CycleState {
    last_scan: Option<Instant>,
    cycle: u64,
}

impl CycleState {
    pub(crate) fn new() -> Self {
        Self {
            last_scan: None,
            cycle: 0,
        }
    }
}

/// Runs detection cycles until shutdown is requested.
pub fn run_detection_loop(
    ctx: Arc<DetectorContext>,
    engine: Arc<dyn RecognitionEngine>,
    table: Arc<PostalCodeTable>,
    store: Arc<dyn DetectionStore>,
    settings: ScanSettings,
) {
    info!(
        interval_ms = settings.scan_interval.as_millis() as u64,
        timeout_s = settings.detection_timeout.as_secs(),
        "detection loop started"
    );

    let mut state = CycleState::new();
    while !ctx.should_shutdown() {
        match run_cycle(&ctx, engine.as_ref(), &table, store.as_ref(), settings, &mut state) {
            Ok(_) => thread::sleep(IDLE_QUANTUM),
            Err(error) => {
                error!(%error, "detection cycle failed");
                thread::sleep(ERROR_BACKOFF);
            }
        }
    }

    info!("detection loop stopped");
}

/// One pass of the scheduler state machine.
pub(crate) fn run_cycle(
    ctx: &DetectorContext,
    engine: &dyn RecognitionEngine,
    table: &PostalCodeTable,
    store: &dyn DetectionStore,
    settings: ScanSettings,
    state: &mut CycleState,
) -> Result<CycleOutcome> {
    // Expiry runs every cycle, before the interval gate.
    if ctx.expire_stale(settings.detection_timeout) {
        info!("live detection expired");
    }

    let now = Instant::now();
    if let Some(last) = state.last_scan {
        if now.duration_since(last) < settings.scan_interval {
            return Ok(CycleOutcome::Waiting);
        }
    }

    state.cycle += 1;

    let Some(frame) = ctx.snapshot_frame() else {
        // Skip the scan but advance the clock, as a scan slot was consumed.
        state.last_scan = Some(now);
        if state.cycle % (LOG_EVERY_CYCLES * 4) == 0 {
            debug!(cycle = state.cycle, "waiting for first camera frame");
        }
        return Ok(CycleOutcome::NoFrame);
    };

    let report = scan_frame(engine, &frame);
    state.last_scan = Some(now);

    let Some(code) = report.accepted_code() else {
        if state.cycle % LOG_EVERY_CYCLES == 0 {
            if report.best_text.is_empty() {
                debug!(cycle = state.cycle, "no text detected");
            } else {
                debug!(
                    cycle = state.cycle,
                    text = %report.best_text,
                    "text found but no postal code"
                );
            }
        }
        return Ok(CycleOutcome::NoCandidates);
    };

    let is_valid = table.contains(code);
    let detected_at = ctx.record_detection(code, is_valid);

    let event = DetectionEvent {
        code: code.to_string(),
        timestamp: detected_at,
        confidence: settings.confidence,
        is_valid,
        user_id: None,
    };
    // Fire-and-forget: in-memory state is authoritative for the UI.
    if let Err(error) = store.record_detection(&event) {
        warn!(%error, code, "failed to persist detection");
    }

    match table.lookup(code) {
        Some(entry) => info!(
            code,
            region = entry.region,
            location = entry.location,
            "valid postal code detected"
        ),
        None => info!(code, "unrecognized postal code detected"),
    }

    Ok(CycleOutcome::Accepted(code.to_string()))
}
