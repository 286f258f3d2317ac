//! Camera device access.
//!
//! The pipeline consumes frames through the [`FrameGrabber`] trait so the
//! capture loop (and its tests) never depend on real hardware. The provided
//! implementation wraps an OpenCV `VideoCapture` device and converts its
//! BGR frames into `image` RGB buffers at the boundary.

pub mod overlay;
pub mod stream;

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use image::{Rgb, RgbImage};
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};
use tracing::{info, warn};

/// A source of camera frames. One `grab` call yields one frame.
pub trait FrameGrabber: Send {
    fn grab(&mut self) -> Result<RgbImage>;

    /// Releases the underlying device. Further `grab` calls are invalid.
    fn release(&mut self);
}

/// Device selection and requested capture geometry.
#[derive(Debug, Clone, Copy)]
pub struct CameraSettings {
    pub index: i32,
    pub width: u32,
    pub height: u32,
}

/// OpenCV-backed camera device.
pub struct OpenCvCamera {
    capture: VideoCapture,
    index: i32,
}

impl OpenCvCamera {
    /// Opens the device and requests the configured frame size.
    pub fn open(settings: &CameraSettings) -> Result<Self> {
        let mut capture = VideoCapture::new(settings.index, videoio::CAP_ANY)
            .map_err(|e| anyhow!("failed to create capture for camera {}: {e}", settings.index))?;

        let _ = capture.set(videoio::CAP_PROP_FRAME_WIDTH, f64::from(settings.width));
        let _ = capture.set(videoio::CAP_PROP_FRAME_HEIGHT, f64::from(settings.height));

        if !capture.is_opened()? {
            bail!("camera {} failed to open", settings.index);
        }

        info!(index = settings.index, "camera opened");
        Ok(Self {
            capture,
            index: settings.index,
        })
    }
}

impl FrameGrabber for OpenCvCamera {
    fn grab(&mut self) -> Result<RgbImage> {
        let mut mat = Mat::default();
        let ok = self.capture.read(&mut mat)?;
        if !ok || mat.rows() == 0 || mat.cols() == 0 {
            bail!("frame read failed on camera {}", self.index);
        }
        bgr_mat_to_rgb(&mat)
    }

    fn release(&mut self) {
        if let Err(error) = self.capture.release() {
            warn!(%error, index = self.index, "camera release failed");
        }
    }
}

/// Converts an 8-bit 3-channel BGR `Mat` into an RGB image buffer.
fn bgr_mat_to_rgb(mat: &Mat) -> Result<RgbImage> {
    if mat.channels() != 3 {
        bail!("expected 3-channel frame, got {}", mat.channels());
    }

    let owned;
    let mat = if mat.is_continuous() {
        mat
    } else {
        owned = mat.try_clone()?;
        &owned
    };

    let width = mat.cols() as u32;
    let height = mat.rows() as u32;
    let data = mat.data_bytes()?;

    let mut image = RgbImage::new(width, height);
    for (i, pixel) in image.pixels_mut().enumerate() {
        let offset = i * 3;
        *pixel = Rgb([data[offset + 2], data[offset + 1], data[offset]]);
    }
    Ok(image)
}

/// Opens a device with a bounded number of attempts and a fixed delay
/// between them.
pub fn open_with_retry<T>(
    mut opener: impl FnMut() -> Result<T>,
    attempts: u32,
    delay: Duration,
) -> Result<T> {
    for attempt in 1..=attempts {
        match opener() {
            Ok(device) => return Ok(device),
            Err(error) => {
                warn!(attempt, attempts, %error, "camera open failed");
                if attempt < attempts {
                    thread::sleep(delay);
                }
            }
        }
    }
    bail!("camera unavailable after {attempts} attempts")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_open_with_retry_returns_first_success() {
        let mut calls = 0;
        let result = open_with_retry(
            || {
                calls += 1;
                if calls < 3 {
                    bail!("not yet")
                } else {
                    Ok(42)
                }
            },
            5,
            Duration::from_millis(1),
        );
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_open_with_retry_gives_up_after_bound() {
        let mut calls = 0;
        let result: Result<()> = open_with_retry(
            || {
                calls += 1;
                bail!("no device")
            },
            4,
            Duration::from_millis(1),
        );
        assert!(result.is_err());
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_open_with_retry_sleeps_between_attempts() {
        let started = Instant::now();
        let _: Result<()> =
            open_with_retry(|| bail!("no device"), 3, Duration::from_millis(20));
        // Two inter-attempt delays for three attempts.
        assert!(started.elapsed() >= Duration::from_millis(40));
    }
}
