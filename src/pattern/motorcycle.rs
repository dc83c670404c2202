//! Two-part motorcycle plate recognizer
//!
//! Motorcycle plates carry a head line (province + series) above a number
//! line like "452.30". OCR reads the two lines as separate fragments, so the
//! recognizer scans the whole fragment set for both roles and stitches the
//! best pair back together.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::series::{convert_head, strip_separators};
use super::{Candidate, PatternType};
use crate::types::TextFragment;

static NUMBER_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}\.\d{2}$").expect("static regex"));
static STANDARD_HEAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}[A-Z]{1,2}\d*$").expect("static regex"));
static SEPARATOR_HEAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}[-*:]\d{1,2}$").expect("static regex"));
static FOUR_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("static regex"));

/// Province codes a bare four-digit head may start with
const PROVINCE_CODES: &[&str] = &[
    "18", "29", "30", "43", "51", "59", "72", "73", "74", "75", "77", "78", "79", "80", "81",
    "82", "83", "85", "86", "88", "89", "90", "92", "93", "94", "95", "97", "98", "99",
];

/// Scan the normalized fragments for a head and a number line and combine
/// them into one candidate. Emits `MotorcycleFull` when both roles are found,
/// `MotorcyclePartial` (penalized) when only a convertible head is present.
pub fn recognize(fragments: &[TextFragment]) -> Option<Candidate> {
    let mut heads: Vec<&TextFragment> = Vec::new();
    let mut number_lines: Vec<&TextFragment> = Vec::new();

    for fragment in fragments {
        let text = fragment.text.as_str();

        if NUMBER_LINE_RE.is_match(text) {
            debug!("Number line candidate: '{}' (conf {:.2})", text, fragment.confidence);
            number_lines.push(fragment);
            continue;
        }

        let clean = strip_separators(text);

        if STANDARD_HEAD_RE.is_match(&clean) {
            debug!("Head candidate (standard): '{}' (conf {:.2})", text, fragment.confidence);
            heads.push(fragment);
        } else if SEPARATOR_HEAD_RE.is_match(text) {
            debug!("Head candidate (numeric): '{}' (conf {:.2})", text, fragment.confidence);
            heads.push(fragment);
        } else if FOUR_DIGIT_RE.is_match(&clean) && PROVINCE_CODES.contains(&&clean[..2]) {
            debug!("Head candidate (4-digit): '{}' (conf {:.2})", text, fragment.confidence);
            heads.push(fragment);
        }
    }

    // Highest confidence wins each role; the stable sort keeps the earlier
    // fragment in front on exact ties
    heads.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap());
    number_lines.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap());

    debug!("Found {} head and {} number line candidates", heads.len(), number_lines.len());

    let best_head = heads.first()?;

    if let Some(best_number) = number_lines.first() {
        if let Some(converted) = convert_head(&best_head.text) {
            let text = format!("{} {}", converted, best_number.text);
            let confidence = (best_head.confidence + best_number.confidence) / 2.0;
            debug!("Motorcycle plate assembled: '{}' (conf {:.2})", text, confidence);
            return Some(Candidate {
                text,
                confidence,
                kind: PatternType::MotorcycleFull,
            });
        }
    }

    // Head only: still worth reporting, at a reduced confidence
    convert_head(&best_head.text).map(|converted| {
        debug!("Partial motorcycle plate: '{}'", converted);
        Candidate {
            text: converted,
            confidence: best_head.confidence * 0.6,
            kind: PatternType::MotorcyclePartial,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str, confidence: f32) -> TextFragment {
        TextFragment::new(text, confidence, "test")
    }

    #[test]
    fn test_full_plate_from_head_and_number_line() {
        let fragments = vec![fragment("2961", 0.9), fragment("452.30", 0.85)];
        let candidate = recognize(&fragments).unwrap();
        assert_eq!(candidate.text, "29-G1 452.30");
        assert!((candidate.confidence - 0.875).abs() < 1e-6);
        assert_eq!(candidate.kind, PatternType::MotorcycleFull);
    }

    #[test]
    fn test_separator_head_pairs_with_number_line() {
        let fragments = vec![fragment("29-61", 0.8), fragment("123.45", 0.7)];
        let candidate = recognize(&fragments).unwrap();
        assert_eq!(candidate.text, "29-G1 123.45");
        assert_eq!(candidate.kind, PatternType::MotorcycleFull);
    }

    #[test]
    fn test_highest_confidence_head_wins() {
        let fragments = vec![
            fragment("1851", 0.5),
            fragment("2961", 0.9),
            fragment("452.30", 0.85),
        ];
        let candidate = recognize(&fragments).unwrap();
        assert_eq!(candidate.text, "29-G1 452.30");
    }

    #[test]
    fn test_head_only_is_penalized() {
        let fragments = vec![fragment("2961", 0.8)];
        let candidate = recognize(&fragments).unwrap();
        assert_eq!(candidate.text, "29-G1");
        assert!((candidate.confidence - 0.48).abs() < 1e-6);
        assert_eq!(candidate.kind, PatternType::MotorcyclePartial);
    }

    #[test]
    fn test_four_digit_head_requires_known_province() {
        // "12" is not a known province code
        let fragments = vec![fragment("1261", 0.9)];
        assert!(recognize(&fragments).is_none());
    }

    #[test]
    fn test_number_line_alone_yields_nothing() {
        let fragments = vec![fragment("452.30", 0.9)];
        assert!(recognize(&fragments).is_none());
    }

    #[test]
    fn test_no_fragments() {
        assert!(recognize(&[]).is_none());
    }
}
