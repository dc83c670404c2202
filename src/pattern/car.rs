//! Car plate recognizers
//!
//! A car plate reads as one line - province digits, series letters, then a
//! 3-5 digit number. The complete recognizer keeps every fragment that fits
//! so the scorer can weigh them all; the generic recognizer is a one-shot
//! sweep kept as a low-priority safety net.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{Candidate, PatternType};
use crate::types::TextFragment;

static CAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2,3})([A-Z]{1,2})(\d{3,5})$").expect("static regex"));

/// Drop the characters OCR inserts between plate sections
fn strip_layout(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, ' ' | '-')).collect()
}

/// Canonical car layout: `"<province><letters>-<digits>"`
fn format_car(province: &str, letters: &str, digits: &str) -> String {
    format!("{province}{letters}-{digits}")
}

/// Emit one `CarComplete` candidate per fragment matching the full car shape
pub fn recognize_complete(fragments: &[TextFragment]) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for fragment in fragments {
        let clean = strip_layout(&fragment.text);
        if let Some(caps) = CAR_RE.captures(&clean) {
            let text = format_car(&caps[1], &caps[2], &caps[3]);
            debug!("Complete car plate: '{}' (conf {:.2})", text, fragment.confidence);
            candidates.push(Candidate {
                text,
                confidence: fragment.confidence,
                kind: PatternType::CarComplete,
            });
        }
    }

    candidates
}

/// First fragment matching the car shape, emitted without any bonus weight
pub fn recognize_generic(fragments: &[TextFragment]) -> Option<Candidate> {
    for fragment in fragments {
        let clean = strip_layout(&fragment.text);
        if let Some(caps) = CAR_RE.captures(&clean) {
            let text = format_car(&caps[1], &caps[2], &caps[3]);
            debug!("Generic car plate: '{}' (conf {:.2})", text, fragment.confidence);
            return Some(Candidate {
                text,
                confidence: fragment.confidence,
                kind: PatternType::CarGeneric,
            });
        }
    }

    None
}
