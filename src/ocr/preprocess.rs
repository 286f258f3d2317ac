//! Frame preprocessing for OCR.
//!
//! A single camera frame is turned into five binarized variants, each
//! targeting a different failure mode of printed-digit recognition:
//! plain global threshold, locally adaptive threshold for uneven lighting,
//! Otsu on a blurred image for bimodal scenes, morphological closing to
//! repair broken digit strokes, and contrast-limited equalization for
//! washed-out frames. The recognition stage tries them in this order.

use image::GrayImage;
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::close;

/// Global binary threshold cutoff.
const BASIC_THRESHOLD: u8 = 127;
/// Adaptive threshold window radius (11x11 window).
const ADAPTIVE_BLOCK_RADIUS: u32 = 5;
/// Adaptive threshold constant offset.
const ADAPTIVE_OFFSET: i32 = 2;
/// Blur strength before Otsu thresholding.
const OTSU_BLUR_SIGMA: f32 = 1.1;
/// CLAHE grid and clip limit.
const CLAHE_GRID: u32 = 8;
const CLAHE_CLIP_LIMIT: f32 = 2.0;

/// One preprocessed derivative of a source frame.
pub struct PreprocessedVariant {
    pub name: &'static str,
    pub image: GrayImage,
}

/// Produces the five recognition variants of a grayscale frame, in the
/// fixed order the recognition stage searches them. All variants are always
/// computed; early exit is the recognition stage's job.
pub fn preprocess_variants(gray: &GrayImage) -> Vec<PreprocessedVariant> {
    let basic = threshold(gray, BASIC_THRESHOLD, ThresholdType::Binary);

    let adaptive = adaptive_mean_threshold(gray, ADAPTIVE_BLOCK_RADIUS, ADAPTIVE_OFFSET);

    let blurred = gaussian_blur_f32(gray, OTSU_BLUR_SIGMA);
    let otsu = threshold(&blurred, otsu_level(&blurred), ThresholdType::Binary);

    let morphological = close(&adaptive, Norm::LInf, 1);

    let equalized = clahe(gray, CLAHE_GRID, CLAHE_GRID, CLAHE_CLIP_LIMIT);
    let enhanced = threshold(&equalized, BASIC_THRESHOLD, ThresholdType::Binary);

    vec![
        PreprocessedVariant {
            name: "basic_threshold",
            image: basic,
        },
        PreprocessedVariant {
            name: "adaptive_threshold",
            image: adaptive,
        },
        PreprocessedVariant {
            name: "otsu_threshold",
            image: otsu,
        },
        PreprocessedVariant {
            name: "morphological",
            image: morphological,
        },
        PreprocessedVariant {
            name: "enhanced_contrast",
            image: enhanced,
        },
    ]
}

/// Local mean threshold with a constant offset: a pixel becomes white when
/// it exceeds the mean of its (2r+1)x(2r+1) neighborhood minus `offset`.
/// The window is clamped at the image borders.
fn adaptive_mean_threshold(gray: &GrayImage, radius: u32, offset: i32) -> GrayImage {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return gray.clone();
    }

    // Summed-area table with a zero row/column of padding.
    let w = width as usize;
    let h = height as usize;
    let mut integral = vec![0u64; (w + 1) * (h + 1)];
    for y in 0..h {
        let mut row_sum = 0u64;
        for x in 0..w {
            row_sum += u64::from(gray.get_pixel(x as u32, y as u32)[0]);
            integral[(y + 1) * (w + 1) + (x + 1)] = integral[y * (w + 1) + (x + 1)] + row_sum;
        }
    }

    let r = radius as i64;
    let mut out = GrayImage::new(width, height);
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let x0 = (x - r).max(0) as usize;
            let y0 = (y - r).max(0) as usize;
            let x1 = ((x + r + 1).min(w as i64)) as usize;
            let y1 = ((y + r + 1).min(h as i64)) as usize;

            let sum = integral[y1 * (w + 1) + x1] + integral[y0 * (w + 1) + x0]
                - integral[y0 * (w + 1) + x1]
                - integral[y1 * (w + 1) + x0];
            let count = ((x1 - x0) * (y1 - y0)) as u64;
            let mean = (sum / count) as i32;

            let pixel = i32::from(gray.get_pixel(x as u32, y as u32)[0]);
            let value = if pixel > mean - offset { 255u8 } else { 0u8 };
            out.put_pixel(x as u32, y as u32, image::Luma([value]));
        }
    }
    out
}

/// Contrast-limited adaptive histogram equalization.
///
/// The image is divided into a `grid_x` x `grid_y` tile grid; each tile gets
/// an equalization lookup table built from its clipped histogram (excess
/// mass redistributed uniformly), and pixels are mapped through a bilinear
/// blend of the four nearest tile tables to avoid visible tile seams.
fn clahe(gray: &GrayImage, grid_x: u32, grid_y: u32, clip_limit: f32) -> GrayImage {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return gray.clone();
    }

    let tile_w = width.div_ceil(grid_x).max(1);
    let tile_h = height.div_ceil(grid_y).max(1);

    // Identity tables cover tiles that fall entirely outside the image.
    let mut luts = vec![std::array::from_fn::<u8, 256, _>(|i| i as u8); (grid_x * grid_y) as usize];

    for ty in 0..grid_y {
        for tx in 0..grid_x {
            let x0 = tx * tile_w;
            let y0 = ty * tile_h;
            if x0 >= width || y0 >= height {
                continue;
            }
            let x1 = (x0 + tile_w).min(width);
            let y1 = (y0 + tile_h).min(height);

            let mut hist = [0u32; 256];
            for y in y0..y1 {
                for x in x0..x1 {
                    hist[gray.get_pixel(x, y)[0] as usize] += 1;
                }
            }

            let area = (x1 - x0) * (y1 - y0);
            let clip = ((clip_limit * area as f32 / 256.0).max(1.0)) as u32;

            let mut excess = 0u32;
            for bin in hist.iter_mut() {
                if *bin > clip {
                    excess += *bin - clip;
                    *bin = clip;
                }
            }
            let bonus = excess / 256;
            let remainder = (excess % 256) as usize;
            for (i, bin) in hist.iter_mut().enumerate() {
                *bin += bonus + u32::from(i < remainder);
            }

            let lut = &mut luts[(ty * grid_x + tx) as usize];
            let mut cdf = 0u64;
            for (value, bin) in hist.iter().enumerate() {
                cdf += u64::from(*bin);
                lut[value] = ((cdf * 255) / u64::from(area)).min(255) as u8;
            }
        }
    }

    let lut_at = |tx: u32, ty: u32| &luts[(ty * grid_x + tx) as usize];

    let mut out = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let value = gray.get_pixel(x, y)[0] as usize;

            // Position relative to tile centers.
            let gx = (x as f32 + 0.5) / tile_w as f32 - 0.5;
            let gy = (y as f32 + 0.5) / tile_h as f32 - 0.5;

            let tx0 = gx.floor().max(0.0) as u32;
            let ty0 = gy.floor().max(0.0) as u32;
            let tx0 = tx0.min(grid_x - 1);
            let ty0 = ty0.min(grid_y - 1);
            let tx1 = (tx0 + 1).min(grid_x - 1);
            let ty1 = (ty0 + 1).min(grid_y - 1);

            let fx = (gx - tx0 as f32).clamp(0.0, 1.0);
            let fy = (gy - ty0 as f32).clamp(0.0, 1.0);

            let top = f32::from(lut_at(tx0, ty0)[value]) * (1.0 - fx)
                + f32::from(lut_at(tx1, ty0)[value]) * fx;
            let bottom = f32::from(lut_at(tx0, ty1)[value]) * (1.0 - fx)
                + f32::from(lut_at(tx1, ty1)[value]) * fx;
            let mapped = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0);

            out.put_pixel(x, y, image::Luma([mapped as u8]));
        }
    }
    out
}
