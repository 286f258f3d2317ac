//! Text recognition engine abstraction and the Tesseract CLI adapter.
//!
//! Recognition runs out of process: the preprocessed image is staged as a
//! temporary PNG and `tesseract` is invoked with a per-profile page
//! segmentation mode and character whitelist, reading plain text from
//! stdout. Keeping the engine behind a trait lets the scan loop and its
//! tests run against scripted engines without a Tesseract install.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{anyhow, Result};
use image::GrayImage;
use tempfile::NamedTempFile;

use super::setup::find_tesseract_executable;

/// One recognition configuration: a page segmentation mode plus an optional
/// digit whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OcrProfile {
    pub name: &'static str,
    pub psm: u8,
    pub digits_only: bool,
}

/// Recognition profiles in the order they are tried against each
/// preprocessed variant. Single-word digit recognition first; the loosest
/// full-page mode last.
pub const OCR_PROFILES: [OcrProfile; 5] = [
    OcrProfile {
        name: "digits_only",
        psm: 8,
        digits_only: true,
    },
    OcrProfile {
        name: "single_block",
        psm: 6,
        digits_only: true,
    },
    OcrProfile {
        name: "single_line",
        psm: 7,
        digits_only: true,
    },
    OcrProfile {
        name: "word_detection",
        psm: 8,
        digits_only: false,
    },
    OcrProfile {
        name: "auto_detection",
        psm: 3,
        digits_only: true,
    },
];

/// A text recognition engine. Implementations may fail on any call; the
/// scan loop treats a failure as an empty result for that attempt.
pub trait RecognitionEngine: Send + Sync {
    fn recognize(&self, image: &GrayImage, profile: &OcrProfile) -> Result<String>;
}

/// Tesseract invoked as a subprocess.
pub struct TesseractEngine {
    executable: PathBuf,
}

impl TesseractEngine {
    /// Locates an installed Tesseract and returns an engine bound to it.
    pub fn locate() -> Result<Self> {
        let executable = find_tesseract_executable()?;
        Ok(Self { executable })
    }

    /// Builds an engine around an explicit executable path.
    pub fn with_executable(executable: PathBuf) -> Self {
        Self { executable }
    }
}

impl RecognitionEngine for TesseractEngine {
    fn recognize(&self, image: &GrayImage, profile: &OcrProfile) -> Result<String> {
        // Stage the image as a temporary PNG for the subprocess.
        let temp_input = NamedTempFile::with_suffix(".png")?;
        image.save(temp_input.path())?;

        let mut command = Command::new(&self.executable);
        command
            .arg(temp_input.path())
            .arg("stdout")
            .arg("-l")
            .arg("eng")
            .arg("--oem")
            .arg("3")
            .arg("--psm")
            .arg(profile.psm.to_string());
        if profile.digits_only {
            command.arg("-c").arg("tessedit_char_whitelist=0123456789");
        }

        let output = command.output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "tesseract failed (profile {}): {}",
                profile.name,
                stderr.trim()
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
