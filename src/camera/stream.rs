//! Frame capture loop.
//!
//! Owns the camera for the process lifetime: reads frames, copies the
//! latest one into the shared slot for the detection scheduler, draws the
//! overlay, and publishes the JPEG-encoded result for stream consumers.
//! Runs independently of the detection cadence so recognition latency never
//! stalls the stream.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use tracing::{debug, error, info, warn};

use crate::camera::{open_with_retry, overlay, FrameGrabber};
use crate::detector::DetectorContext;
use crate::geo::PostalCodeTable;

/// Camera open retry policy.
const OPEN_ATTEMPTS: u32 = 5;
const OPEN_RETRY_DELAY: Duration = Duration::from_secs(1);
/// Target output cadence (~30 fps).
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
/// Pause after a single failed frame read.
const READ_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Stream geometry and labeling.
#[derive(Debug, Clone, Copy)]
pub struct StreamSettings {
    pub camera_index: i32,
    pub width: u32,
    pub height: u32,
}

/// Runs the capture loop until shutdown.
///
/// The camera is opened through `open` with bounded retries; if it never
/// opens, a static error frame is published and the loop ends. A failed
/// frame read is retried after a short sleep and is never fatal.
pub fn run_capture_loop(
    ctx: Arc<DetectorContext>,
    table: Arc<PostalCodeTable>,
    settings: StreamSettings,
    open: impl FnMut() -> Result<Box<dyn FrameGrabber>>,
) {
    let mut camera = match open_with_retry(open, OPEN_ATTEMPTS, OPEN_RETRY_DELAY) {
        Ok(camera) => camera,
        Err(error) => {
            error!(%error, "camera unavailable, publishing error frame");
            let placeholder = overlay::camera_error_frame(settings.width, settings.height);
            match encode_jpeg(&placeholder) {
                Ok(jpeg) => ctx.publish_jpeg(jpeg),
                Err(error) => error!(%error, "failed to encode error frame"),
            }
            return;
        }
    };

    info!("video stream started");
    let mut frames: u64 = 0;

    while !ctx.should_shutdown() {
        let frame = match camera.grab() {
            Ok(frame) => frame,
            Err(error) => {
                warn!(%error, "frame read failed, retrying");
                thread::sleep(READ_RETRY_DELAY);
                continue;
            }
        };

        frames += 1;
        if frames % 100 == 0 {
            debug!(frames, "stream healthy");
        }

        ctx.store_frame(&frame);

        let mut annotated = frame;
        overlay::draw_overlay(&mut annotated, &ctx.current(), &table, settings.camera_index);
        match encode_jpeg(&annotated) {
            Ok(jpeg) => ctx.publish_jpeg(jpeg),
            Err(error) => warn!(%error, "jpeg encode failed"),
        }

        thread::sleep(FRAME_INTERVAL);
    }

    camera.release();
    info!("capture loop stopped");
}

/// Encodes an RGB frame as JPEG for the MJPEG stream.
pub fn encode_jpeg(frame: &RgbImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, 80);
    frame.write_with_encoder(encoder)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use image::Rgb;

    struct SolidCamera {
        released: bool,
    }

    impl FrameGrabber for SolidCamera {
        fn grab(&mut self) -> Result<RgbImage> {
            Ok(RgbImage::from_pixel(64, 48, Rgb([90, 90, 90])))
        }

        fn release(&mut self) {
            self.released = true;
        }
    }

    fn settings() -> StreamSettings {
        StreamSettings {
            camera_index: 0,
            width: 64,
            height: 48,
        }
    }

    #[test]
    fn test_encode_jpeg_produces_jpeg_magic() {
        let jpeg = encode_jpeg(&RgbImage::new(16, 16)).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_loop_publishes_frames_then_stops() {
        let ctx = Arc::new(DetectorContext::new());
        let table = Arc::new(PostalCodeTable::load());

        let loop_ctx = ctx.clone();
        let handle = std::thread::spawn(move || {
            run_capture_loop(loop_ctx, table, settings(), || {
                Ok(Box::new(SolidCamera { released: false }) as Box<dyn FrameGrabber>)
            });
        });

        // Wait for the first published frame, then stop the loop.
        let mut waited = Duration::ZERO;
        while ctx.latest_jpeg().is_none() && waited < Duration::from_secs(5) {
            thread::sleep(Duration::from_millis(10));
            waited += Duration::from_millis(10);
        }
        ctx.request_shutdown();
        handle.join().unwrap();

        assert!(ctx.latest_jpeg().is_some());
        assert!(ctx.snapshot_frame().is_some());
    }

    #[test]
    fn test_unopenable_camera_publishes_error_frame() {
        let ctx = Arc::new(DetectorContext::new());
        let table = Arc::new(PostalCodeTable::load());

        // Single-attempt failure path would still sleep between attempts;
        // always failing keeps this test bounded by the retry policy.
        let loop_ctx = ctx.clone();
        let handle = std::thread::spawn(move || {
            run_capture_loop(loop_ctx, table, settings(), || bail!("no device"));
        });
        handle.join().unwrap();

        // The placeholder is published even though no camera ever opened.
        let jpeg = ctx.latest_jpeg().expect("error frame published");
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        assert!(ctx.snapshot_frame().is_none());
    }
}
