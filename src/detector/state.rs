//! Shared state between the capture loop, the detection scheduler, and the
//! HTTP surface.
//!
//! All cross-thread state lives in one [`DetectorContext`] handed to both
//! loops at startup. Locks are held only across the copy-in/copy-out of a
//! value, never during preprocessing, recognition, or encoding.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use image::RgbImage;

/// The single current best-known detection, subject to timeout expiry.
///
/// Invariant: when `code` is set, `detected_at` and `last_seen` are set.
/// The empty state keeps `is_valid = true` as a neutral default.
#[derive(Debug, Clone)]
struct LiveDetection {
    code: Option<String>,
    detected_at: Option<DateTime<Local>>,
    is_valid: bool,
    last_seen: Option<Instant>,
}

impl LiveDetection {
    fn empty() -> Self {
        Self {
            code: None,
            detected_at: None,
            is_valid: true,
            last_seen: None,
        }
    }
}

/// Read-only copy of the live detection for rendering and query consumers.
#[derive(Debug, Clone)]
pub struct LiveSnapshot {
    pub code: Option<String>,
    pub detected_at: Option<DateTime<Local>>,
    pub is_valid: bool,
}

impl LiveSnapshot {
    pub fn is_detected(&self) -> bool {
        self.code.is_some()
    }
}

/// Shared context for the two long-lived loops and the HTTP handlers.
pub struct DetectorContext {
    frame: Mutex<Option<RgbImage>>,
    live: Mutex<LiveDetection>,
    latest_jpeg: Mutex<Option<Arc<Vec<u8>>>>,
    shutdown: AtomicBool,
}

impl DetectorContext {
    pub fn new() -> Self {
        Self {
            frame: Mutex::new(None),
            live: Mutex::new(LiveDetection::empty()),
            latest_jpeg: Mutex::new(None),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Stores a copy of the most recent captured frame. Called only by the
    /// capture loop.
    pub fn store_frame(&self, frame: &RgbImage) {
        let mut slot = self.frame.lock().unwrap();
        *slot = Some(frame.clone());
    }

    /// Returns a copy of the latest frame, if any has been captured yet.
    pub fn snapshot_frame(&self) -> Option<RgbImage> {
        self.frame.lock().unwrap().clone()
    }

    /// Publishes the latest encoded stream frame.
    pub fn publish_jpeg(&self, jpeg: Vec<u8>) {
        let mut slot = self.latest_jpeg.lock().unwrap();
        *slot = Some(Arc::new(jpeg));
    }

    /// Latest encoded stream frame, shared without copying the payload.
    pub fn latest_jpeg(&self) -> Option<Arc<Vec<u8>>> {
        self.latest_jpeg.lock().unwrap().clone()
    }

    /// Records an accepted detection and returns its timestamp. Called by
    /// the scheduler and by the simulate path.
    pub fn record_detection(&self, code: &str, is_valid: bool) -> DateTime<Local> {
        let now = Local::now();
        let mut live = self.live.lock().unwrap();
        *live = LiveDetection {
            code: Some(code.to_string()),
            detected_at: Some(now),
            is_valid,
            last_seen: Some(Instant::now()),
        };
        now
    }

    /// Snapshot of the live detection for consumers.
    pub fn current(&self) -> LiveSnapshot {
        let live = self.live.lock().unwrap();
        LiveSnapshot {
            code: live.code.clone(),
            detected_at: live.detected_at,
            is_valid: live.is_valid,
        }
    }

    /// Clears the live detection once it has not been refreshed within
    /// `timeout`. Returns true when a detection was expired.
    pub fn expire_stale(&self, timeout: Duration) -> bool {
        self.expire_stale_at(timeout, Instant::now())
    }

    fn expire_stale_at(&self, timeout: Duration, now: Instant) -> bool {
        let mut live = self.live.lock().unwrap();
        match (&live.code, live.last_seen) {
            (Some(_), Some(seen)) if now.duration_since(seen) > timeout => {
                *live = LiveDetection::empty();
                true
            }
            _ => false,
        }
    }

    /// Cooperative shutdown flag, checked by both loops between iterations.
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    pub fn should_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

impl Default for DetectorContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_defaults() {
        let ctx = DetectorContext::new();
        let snapshot = ctx.current();
        assert!(snapshot.code.is_none());
        assert!(snapshot.detected_at.is_none());
        assert!(snapshot.is_valid);
        assert!(!snapshot.is_detected());
    }

    #[test]
    fn test_record_then_read() {
        let ctx = DetectorContext::new();
        ctx.record_detection("1000", true);

        let snapshot = ctx.current();
        assert_eq!(snapshot.code.as_deref(), Some("1000"));
        assert!(snapshot.detected_at.is_some());
        assert!(snapshot.is_valid);
    }

    #[test]
    fn test_detection_expires_after_timeout() {
        let ctx = DetectorContext::new();
        ctx.record_detection("1000", true);
        let seen = ctx.live.lock().unwrap().last_seen.unwrap();

        let timeout = Duration::from_secs(15);

        // Just inside the window: still live.
        assert!(!ctx.expire_stale_at(timeout, seen + timeout));
        assert!(ctx.current().is_detected());

        // Just past the window: cleared back to the neutral empty state.
        assert!(ctx.expire_stale_at(timeout, seen + timeout + Duration::from_millis(1)));
        let snapshot = ctx.current();
        assert!(snapshot.code.is_none());
        assert!(snapshot.is_valid);
    }

    #[test]
    fn test_expiry_noop_when_empty() {
        let ctx = DetectorContext::new();
        assert!(!ctx.expire_stale(Duration::from_secs(15)));
    }

    #[test]
    fn test_frame_snapshot_is_a_copy() {
        let ctx = DetectorContext::new();
        assert!(ctx.snapshot_frame().is_none());

        let frame = RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30]));
        ctx.store_frame(&frame);

        let mut copy = ctx.snapshot_frame().unwrap();
        copy.put_pixel(0, 0, image::Rgb([0, 0, 0]));

        // Mutating the snapshot must not touch the shared slot.
        assert_eq!(
            ctx.snapshot_frame().unwrap().get_pixel(0, 0),
            &image::Rgb([10, 20, 30])
        );
    }

    #[test]
    fn test_invalid_detection_keeps_flag() {
        let ctx = DetectorContext::new();
        ctx.record_detection("1234", false);
        assert!(!ctx.current().is_valid);
    }

    #[test]
    fn test_shutdown_flag() {
        let ctx = DetectorContext::new();
        assert!(!ctx.should_shutdown());
        ctx.request_shutdown();
        assert!(ctx.should_shutdown());
    }
}
