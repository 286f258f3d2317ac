//! Tesseract executable discovery.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, Result};
use tracing::info;

/// Conventional install locations checked after the PATH probe.
const COMMON_PATHS: &[&str] = &[
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
];

/// Locates the Tesseract executable.
///
/// Honors the `TESSERACT_CMD` environment variable, then probes the PATH,
/// then falls back to conventional install locations.
pub fn find_tesseract_executable() -> Result<PathBuf> {
    if let Ok(cmd) = std::env::var("TESSERACT_CMD") {
        let path = PathBuf::from(&cmd);
        if probe(&path) {
            info!(path = %path.display(), "using tesseract from TESSERACT_CMD");
            return Ok(path);
        }
        return Err(anyhow!("TESSERACT_CMD is set but '{}' does not run", cmd));
    }

    let on_path = PathBuf::from("tesseract");
    if probe(&on_path) {
        info!("using tesseract from PATH");
        return Ok(on_path);
    }

    for candidate in COMMON_PATHS {
        let path = PathBuf::from(candidate);
        if path.exists() && probe(&path) {
            info!(path = %path.display(), "using tesseract install");
            return Ok(path);
        }
    }

    Err(anyhow!(
        "tesseract not found; install it or point TESSERACT_CMD at the executable"
    ))
}

fn probe(path: &Path) -> bool {
    Command::new(path)
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}
