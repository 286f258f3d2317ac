//! OCR pipeline: preprocessing variants, recognition profiles, candidate
//! extraction.

pub mod engine;
pub mod extract;
pub mod preprocess;
pub mod setup;

pub use engine::{OcrProfile, RecognitionEngine, TesseractEngine, OCR_PROFILES};
pub use extract::extract_postal_codes;
pub use preprocess::{preprocess_variants, PreprocessedVariant};

use image::RgbImage;
use tracing::debug;

/// What one (variant, profile) recognition attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The engine returned non-empty text.
    Text(String),
    /// The engine ran but returned nothing usable.
    Empty,
    /// The engine itself failed; treated like an empty result.
    Failed(String),
}

/// One entry in the ordered attempt log of a scan.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub variant: &'static str,
    pub profile: &'static str,
    pub outcome: AttemptOutcome,
}

/// Result of scanning one frame across all variants and profiles.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Candidate codes from the winning attempt, best first. Empty when no
    /// attempt produced a candidate.
    pub codes: Vec<String>,
    /// Text of the winning attempt, else the last non-empty text observed.
    pub best_text: String,
    /// Every attempt made, in order. Stops at the winning attempt.
    pub attempts: Vec<Attempt>,
}

impl ScanReport {
    pub fn accepted_code(&self) -> Option<&str> {
        self.codes.first().map(String::as_str)
    }
}

/// Runs recognition over the cartesian product of variants and profiles,
/// stopping at the first attempt whose text yields a candidate.
///
/// The iteration is deliberately flat: variants are the outer dimension,
/// profiles the inner, and a single early return implements the stopping
/// rule. Engine failures are recorded per attempt and never propagate.
pub fn recognize_codes(
    engine: &dyn RecognitionEngine,
    variants: &[PreprocessedVariant],
    profiles: &[OcrProfile],
) -> ScanReport {
    let mut attempts = Vec::new();
    let mut last_text = String::new();

    let pairs = variants
        .iter()
        .flat_map(|variant| profiles.iter().map(move |profile| (variant, profile)));

    for (variant, profile) in pairs {
        let outcome = match engine.recognize(&variant.image, profile) {
            Ok(text) if text.trim().is_empty() => AttemptOutcome::Empty,
            Ok(text) => AttemptOutcome::Text(text),
            Err(error) => AttemptOutcome::Failed(error.to_string()),
        };

        let mut winner = None;
        if let AttemptOutcome::Text(text) = &outcome {
            let codes = extract_postal_codes(text);
            if codes.is_empty() {
                last_text = text.clone();
            } else {
                winner = Some((codes, text.clone()));
            }
        }

        attempts.push(Attempt {
            variant: variant.name,
            profile: profile.name,
            outcome,
        });

        if let Some((codes, best_text)) = winner {
            debug!(
                variant = variant.name,
                profile = profile.name,
                text = %best_text,
                ?codes,
                "recognition hit"
            );
            return ScanReport {
                codes,
                best_text,
                attempts,
            };
        }
    }

    ScanReport {
        codes: Vec::new(),
        best_text: last_text,
        attempts,
    }
}

/// Full scan of one color frame: grayscale, preprocess into the five
/// variants, then search variants x profiles for a postal code.
pub fn scan_frame(engine: &dyn RecognitionEngine, frame: &RgbImage) -> ScanReport {
    let gray = image::imageops::grayscale(frame);
    let variants = preprocess_variants(&gray);
    recognize_codes(engine, &variants, &OCR_PROFILES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use image::GrayImage;
    use std::sync::Mutex;

    /// Engine that replays a fixed script of responses.
    struct ScriptedEngine {
        responses: Mutex<Vec<Result<String, String>>>,
    }

    impl ScriptedEngine {
        fn new(responses: Vec<Result<String, String>>) -> Self {
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    impl RecognitionEngine for ScriptedEngine {
        fn recognize(
            &self,
            _image: &GrayImage,
            _profile: &OcrProfile,
        ) -> anyhow::Result<String> {
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                return Ok(String::new());
            }
            responses.remove(0).map_err(|reason| anyhow!(reason))
        }
    }

    fn test_variants() -> Vec<PreprocessedVariant> {
        preprocess_variants(&GrayImage::new(64, 48))
    }

    #[test]
    fn test_short_circuit_stops_at_third_attempt() {
        // 5 variants x 5 profiles = 25 possible calls; only the 3rd returns
        // text with a valid code.
        let engine = ScriptedEngine::new(vec![
            Ok(String::new()),
            Ok("garbage".to_string()),
            Ok("code 1000".to_string()),
        ]);

        let report = recognize_codes(&engine, &test_variants(), &OCR_PROFILES);

        assert_eq!(report.attempts.len(), 3);
        assert_eq!(report.codes, vec!["1000"]);
        assert_eq!(report.best_text, "code 1000");
        assert_eq!(report.attempts[2].variant, "basic_threshold");
        assert_eq!(report.attempts[2].profile, "single_line");
    }

    #[test]
    fn test_engine_errors_recorded_and_skipped() {
        let engine = ScriptedEngine::new(vec![
            Err("engine crashed".to_string()),
            Ok("2035".to_string()),
        ]);

        let report = recognize_codes(&engine, &test_variants(), &OCR_PROFILES);

        assert_eq!(report.attempts.len(), 2);
        assert!(matches!(
            report.attempts[0].outcome,
            AttemptOutcome::Failed(ref reason) if reason.contains("crashed")
        ));
        assert_eq!(report.codes, vec!["2035"]);
    }

    #[test]
    fn test_exhausted_scan_keeps_last_text() {
        let engine = ScriptedEngine::new(vec![
            Ok(String::new()),
            Ok("rue de la liberte".to_string()),
        ]);

        let report = recognize_codes(&engine, &test_variants(), &OCR_PROFILES);

        // All 25 pairs attempted, none produced a candidate.
        assert_eq!(report.attempts.len(), 25);
        assert!(report.codes.is_empty());
        assert!(report.accepted_code().is_none());
        assert_eq!(report.best_text, "rue de la liberte");
    }

    #[test]
    fn test_empty_and_failed_are_distinguishable() {
        let engine = ScriptedEngine::new(vec![
            Ok(String::new()),
            Err("boom".to_string()),
        ]);

        let report = recognize_codes(&engine, &test_variants(), &OCR_PROFILES);

        assert_eq!(report.attempts[0].outcome, AttemptOutcome::Empty);
        assert!(matches!(report.attempts[1].outcome, AttemptOutcome::Failed(_)));
    }
}
