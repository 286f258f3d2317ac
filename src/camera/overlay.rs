//! Overlay rendering for the annotated video stream.
//!
//! Draws the current detection banner onto captured frames: the code with
//! its validity status (green for a table-validated code, red for an
//! unrecognized one), the resolved region and locality, and a small live
//! footer. Text uses a system font when one can be loaded; without a font
//! the color-coded banner still renders and text is skipped.

use std::sync::OnceLock;

use ab_glyph::FontVec;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use tracing::{debug, info};

use crate::detector::LiveSnapshot;
use crate::geo::PostalCodeTable;

const VALID_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const INVALID_COLOR: Rgb<u8> = Rgb([255, 60, 60]);
const FOOTER_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const ERROR_TEXT_COLOR: Rgb<u8> = Rgb([255, 80, 80]);

/// Height of the darkened banner strip at the top of the frame.
const BANNER_HEIGHT: u32 = 80;
/// Banner darkening factor (fraction of original luminance kept).
const BANNER_KEEP: f32 = 0.7;

const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn overlay_font() -> Option<&'static FontVec> {
    static FONT: OnceLock<Option<FontVec>> = OnceLock::new();
    FONT.get_or_init(|| {
        for path in FONT_PATHS {
            if let Ok(data) = std::fs::read(path) {
                if let Ok(font) = FontVec::try_from_vec(data) {
                    info!(path, "overlay font loaded");
                    return Some(font);
                }
            }
        }
        debug!("no system font found, overlay text will be skipped");
        None
    })
    .as_ref()
}

/// Annotates a frame with the live detection state and the stream footer.
pub fn draw_overlay(
    frame: &mut RgbImage,
    live: &LiveSnapshot,
    table: &PostalCodeTable,
    camera_index: i32,
) {
    if let Some(code) = &live.code {
        darken_banner(frame, BANNER_HEIGHT, BANNER_KEEP);

        let (color, status, region_line) = if live.is_valid {
            let region_line = table
                .lookup(code)
                .map(|entry| format!("{} - {}", entry.region, entry.location))
                .unwrap_or_else(|| "Tunisia".to_string());
            (VALID_COLOR, "VALID", region_line)
        } else {
            (
                INVALID_COLOR,
                "UNKNOWN",
                "Not in reference table".to_string(),
            )
        };

        draw_label(
            frame,
            &format!("Detected: {code} ({status})"),
            10,
            8,
            24.0,
            color,
        );
        draw_label(frame, &region_line, 10, 44, 18.0, color);
    }

    let footer = format!("Camera {camera_index} - LIVE");
    let footer_y = frame.height().saturating_sub(22) as i32;
    draw_label(frame, &footer, 10, footer_y, 14.0, FOOTER_COLOR);
}

/// Static frame shown when the camera never became available.
pub fn camera_error_frame(width: u32, height: u32) -> RgbImage {
    let mut frame = RgbImage::from_pixel(width, height, Rgb([50, 0, 0]));

    let cx = (width / 2) as i32;
    let cy = (height / 2) as i32;
    draw_label(&mut frame, "CAMERA ERROR", cx - 120, cy - 50, 30.0, ERROR_TEXT_COLOR);
    draw_label(&mut frame, "No camera detected", cx - 100, cy, 20.0, ERROR_TEXT_COLOR);
    draw_label(
        &mut frame,
        "Check camera connection",
        cx - 120,
        cy + 30,
        18.0,
        ERROR_TEXT_COLOR,
    );
    frame
}

/// Darkens the top `rows` of the frame to make banner text readable.
fn darken_banner(frame: &mut RgbImage, rows: u32, keep: f32) {
    let rows = rows.min(frame.height());
    for y in 0..rows {
        for x in 0..frame.width() {
            let pixel = frame.get_pixel_mut(x, y);
            for channel in pixel.0.iter_mut() {
                *channel = (f32::from(*channel) * keep) as u8;
            }
        }
    }
}

fn draw_label(frame: &mut RgbImage, text: &str, x: i32, y: i32, scale: f32, color: Rgb<u8>) {
    if let Some(font) = overlay_font() {
        draw_text_mut(frame, color, x.max(0), y.max(0), scale, font, text);
    }
}
