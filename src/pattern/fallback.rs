//! Longest-valid fallback recognizer
//!
//! Last resort when no structured recognizer produced anything: pick the
//! fragment that looks most like a plate (long, mixes digits with letters or
//! separators) and try to force it into one of the canonical layouts.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{Candidate, PatternType};
use crate::types::TextFragment;

static CAR_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2,3})([A-Z]{1,2})(\d{3,5})$").expect("static regex"));
static MOTORCYCLE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})([A-Z]{1,2})(\d{1,3})\.(\d{2})$").expect("static regex"));
static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("static regex"));
static LETTER_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]+").expect("static regex"));

/// A fragment is worth a reformat attempt when it is long enough and mixes
/// digits with letters or separators
fn looks_like_plate(text: &str) -> bool {
    text.len() >= 5
        && text.chars().any(|c| c.is_ascii_digit())
        && text.chars().any(|c| c.is_ascii_uppercase() || matches!(c, '-' | '*' | ':' | '.'))
}

/// Force a free-form reading into a canonical layout, if any fits
fn reformat(text: &str) -> Option<String> {
    let clean: String = text.chars().filter(|c| *c != ' ').collect();

    if let Some(caps) = CAR_SHAPE_RE.captures(&clean) {
        return Some(format!("{}{}-{}", &caps[1], &caps[2], &caps[3]));
    }

    if let Some(caps) = MOTORCYCLE_SHAPE_RE.captures(&clean) {
        return Some(format!("{}-{}{} {}.{}", &caps[1], &caps[2], &caps[3], &caps[3], &caps[4]));
    }

    // Mixed content: take the first digit run as province, the first letter
    // run as series, and require a complete trailing number
    let numbers: Vec<&str> = DIGIT_RUN_RE.find_iter(text).map(|m| m.as_str()).collect();
    let letters: Vec<&str> = LETTER_RUN_RE.find_iter(text).map(|m| m.as_str()).collect();

    if numbers.len() >= 2 && !letters.is_empty() {
        let last = numbers[numbers.len() - 1];
        if last.len() >= 3 {
            return Some(format!("{}{}-{}", numbers[0], letters[0], last));
        }
    }

    None
}

/// Reformat the fragment maximizing `text length + confidence`. Confidence is
/// reduced because nothing structural vouched for the reading.
pub fn recognize(fragments: &[TextFragment]) -> Option<Candidate> {
    let mut best: Option<&TextFragment> = None;
    let mut best_rank = f32::NEG_INFINITY;

    for fragment in fragments.iter().filter(|f| looks_like_plate(&f.text)) {
        let rank = fragment.text.len() as f32 + fragment.confidence;
        if rank > best_rank {
            best = Some(fragment);
            best_rank = rank;
        }
    }

    let best = best?;
    reformat(&best.text).map(|text| {
        debug!("Longest valid reading reformatted: '{}' (from '{}')", text, best.text);
        Candidate {
            text,
            confidence: best.confidence * 0.8,
            kind: PatternType::LongestFallback,
        }
    })
}
