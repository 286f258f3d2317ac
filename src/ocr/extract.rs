//! Postal code candidate extraction from raw OCR text.
//!
//! Recognized text is noisy: digits come surrounded by punctuation, letters
//! misread from glyphs, and arbitrary whitespace. Extraction normalizes the
//! text, then tries several patterns from strictest to loosest, using the
//! first one that matches anything. A final fallback scans the original
//! text for maximal digit runs and slides a width-4 window over runs that
//! are too long.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// Structural range for Tunisian postal codes, independent of the
/// reference table.
const CODE_MIN: u32 = 1000;
const CODE_MAX: u32 = 9999;

fn exact_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[0-9]{4}\b").unwrap())
}

fn any_four_digits_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]{4}").unwrap())
}

/// Replaces every character that is not an ASCII digit or whitespace with a
/// space, so digit groups become whitespace-separated tokens.
fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Maximal runs of consecutive ASCII digits in `text`, with the byte offset
/// at which each run starts.
fn digit_runs(text: &str) -> Vec<(usize, &str)> {
    let bytes = text.as_bytes();
    let mut runs = Vec::new();
    let mut start = None;

    for (i, b) in bytes.iter().enumerate() {
        match (b.is_ascii_digit(), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, &text[s..i]));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, &text[s..]));
    }
    runs
}

/// Standalone 4-digit token.
fn strategy_exact_token(cleaned: &str) -> Vec<String> {
    exact_token_regex()
        .find_iter(cleaned)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// 4-digit token followed by whitespace or end of string.
fn strategy_token_before_break(cleaned: &str) -> Vec<String> {
    let bytes = cleaned.as_bytes();
    digit_runs(cleaned)
        .into_iter()
        .filter(|(start, run)| {
            let end = start + run.len();
            run.len() == 4 && (end == bytes.len() || bytes[end].is_ascii_whitespace())
        })
        .map(|(_, run)| run.to_string())
        .collect()
}

/// 4-digit run not adjacent to any other digit.
fn strategy_isolated_run(cleaned: &str) -> Vec<String> {
    digit_runs(cleaned)
        .into_iter()
        .filter(|(_, run)| run.len() == 4)
        .map(|(_, run)| run.to_string())
        .collect()
}

/// Any 4 consecutive digits (non-overlapping, left to right).
fn strategy_any_four(cleaned: &str) -> Vec<String> {
    any_four_digits_regex()
        .find_iter(cleaned)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Fallback over the original, non-normalized text: a digit run of exactly
/// length 4 is taken as-is; longer runs are slid over in all width-4
/// windows, keeping windows whose value is structurally in range.
pub(crate) fn fallback_digit_windows(text: &str) -> Vec<String> {
    let mut codes = Vec::new();
    for (_, run) in digit_runs(text) {
        if run.len() == 4 {
            codes.push(run.to_string());
        } else if run.len() > 4 {
            for start in 0..=(run.len() - 4) {
                let window = &run[start..start + 4];
                if in_structural_range(window) {
                    codes.push(window.to_string());
                }
            }
        }
    }
    codes
}

fn in_structural_range(code: &str) -> bool {
    matches!(code.parse::<u32>(), Ok(value) if (CODE_MIN..=CODE_MAX).contains(&value))
}

/// Extracts plausible postal codes from raw recognized text.
///
/// Returns a deduplicated list preserving first-occurrence order; codes are
/// guaranteed to be 4 ASCII digits with value in [1000, 9999]. Never fails;
/// unusable input yields an empty list.
pub fn extract_postal_codes(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let cleaned = normalize(trimmed);

    // Strictest to loosest; first pattern with any match wins.
    let strategies: [fn(&str) -> Vec<String>; 4] = [
        strategy_exact_token,
        strategy_token_before_break,
        strategy_isolated_run,
        strategy_any_four,
    ];

    let mut codes = Vec::new();
    for strategy in strategies {
        codes = strategy(&cleaned);
        if !codes.is_empty() {
            break;
        }
    }

    if codes.is_empty() {
        codes = fallback_digit_windows(trimmed);
    }

    codes.retain(|code| in_structural_range(code));

    let mut seen = HashSet::new();
    codes.retain(|code| seen.insert(code.clone()));
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_code_extracted_once() {
        assert_eq!(extract_postal_codes("1000"), vec!["1000"]);
        assert_eq!(extract_postal_codes("Code postal: 2035"), vec!["2035"]);
    }

    #[test]
    fn test_code_surrounded_by_noise() {
        assert_eq!(extract_postal_codes("TN-4021/B"), vec!["4021"]);
        assert_eq!(extract_postal_codes("..3100.."), vec!["3100"]);
    }

    #[test]
    fn test_no_digits_yields_empty() {
        assert!(extract_postal_codes("").is_empty());
        assert!(extract_postal_codes("   ").is_empty());
        assert!(extract_postal_codes("Sousse centre ville").is_empty());
    }

    #[test]
    fn test_short_runs_yield_empty() {
        assert!(extract_postal_codes("12 345 678").is_empty());
    }

    #[test]
    fn test_below_range_rejected() {
        // "0001" parses to 1, outside the structural range
        assert!(extract_postal_codes("0001").is_empty());
        assert!(extract_postal_codes("0999").is_empty());
    }

    #[test]
    fn test_long_run_non_overlapping_windows() {
        // The loose pattern splits the 8-digit run into "1200" and "0034";
        // the range filter then drops "0034".
        assert_eq!(extract_postal_codes("12000034"), vec!["1200"]);
    }

    #[test]
    fn test_fallback_sliding_windows_in_range() {
        let windows = fallback_digit_windows("12000034");
        assert_eq!(windows, vec!["1200", "2000"]);
    }

    #[test]
    fn test_fallback_exact_run_taken_as_is() {
        assert_eq!(fallback_digit_windows("ab1000cd"), vec!["1000"]);
    }

    #[test]
    fn test_multiple_codes_preserve_order() {
        assert_eq!(
            extract_postal_codes("1000 puis 2035 puis 4021"),
            vec!["1000", "2035", "4021"]
        );
    }

    #[test]
    fn test_duplicates_collapse_to_first_occurrence() {
        assert_eq!(
            extract_postal_codes("1000 2035 1000"),
            vec!["1000", "2035"]
        );
    }

    #[test]
    fn test_idempotent() {
        let input = "zone 3100, 1000, 3100";
        let first = extract_postal_codes(input);
        let second = extract_postal_codes(input);
        assert_eq!(first, second);
        assert_eq!(first, vec!["3100", "1000"]);
    }

    #[test]
    fn test_exact_token_beats_embedded_run() {
        // A standalone token matches the strict pattern, so the 6-digit run
        // is never windowed.
        assert_eq!(extract_postal_codes("4021 123456"), vec!["4021"]);
    }

    #[test]
    fn test_digit_runs_split_on_non_digits() {
        assert_eq!(
            digit_runs("12a345bb6789"),
            vec![(0, "12"), (3, "345"), (8, "6789")]
        );
        assert!(digit_runs("abc").is_empty());
    }
}
