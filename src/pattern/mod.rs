//! Plate format recognizers
//!
//! Each recognizer inspects the full set of normalized fragments for one
//! reconstruction pass and emits typed candidates. The driver runs them in a
//! fixed priority order; that order doubles as the scorer's tie-break, so it
//! must not be reshuffled.

pub mod car;
pub mod fallback;
pub mod motorcycle;
pub mod series;

use serde::{Deserialize, Serialize};

use crate::types::TextFragment;

/// Which plate layout a candidate was matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// Motorcycle head plus number line, both recovered
    MotorcycleFull,
    /// Motorcycle head alone, number line missing
    MotorcyclePartial,
    /// Full single-line car plate
    CarComplete,
    /// Car shape found by the generic sweep
    CarGeneric,
    /// Free-form reading forced into a canonical layout
    LongestFallback,
}

/// A canonically formatted plate guess from one recognizer
///
/// Lives only for the duration of one scoring round.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Canonical plate text
    pub text: String,
    /// Source confidence, before any ranking bonus
    pub confidence: f32,
    /// Layout family that produced this guess
    pub kind: PatternType,
}

/// Run every recognizer over the normalized fragment set, in priority order:
/// motorcycle, car-complete per fragment, car-generic, and - only when all of
/// those came up empty - the longest-valid fallback.
pub fn recognize_all(fragments: &[TextFragment]) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    if let Some(candidate) = motorcycle::recognize(fragments) {
        candidates.push(candidate);
    }

    candidates.extend(car::recognize_complete(fragments));

    if let Some(candidate) = car::recognize_generic(fragments) {
        candidates.push(candidate);
    }

    if candidates.is_empty() {
        if let Some(candidate) = fallback::recognize(fragments) {
            candidates.push(candidate);
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str, confidence: f32) -> TextFragment {
        TextFragment::new(text, confidence, "test")
    }

    #[test]
    fn test_priority_order_of_candidates() {
        let fragments = vec![
            fragment("18A12345", 0.9),
            fragment("2961", 0.8),
            fragment("452.30", 0.7),
        ];
        let candidates = recognize_all(&fragments);

        // Motorcycle first, then one car-complete per match, then the
        // generic sweep's duplicate
        assert_eq!(candidates[0].kind, PatternType::MotorcycleFull);
        assert_eq!(candidates[1].kind, PatternType::CarComplete);
        assert_eq!(candidates[2].kind, PatternType::CarGeneric);
        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn test_fallback_only_when_nothing_else_matched() {
        // Structured match present: the fallback stays silent
        let fragments = vec![fragment("18A12345", 0.9)];
        let candidates = recognize_all(&fragments);
        assert!(candidates.iter().all(|c| c.kind != PatternType::LongestFallback));

        // Nothing structured: the fallback speaks
        let fragments = vec![fragment("18A.12345", 0.9)];
        let candidates = recognize_all(&fragments);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].kind, PatternType::LongestFallback);
    }

    #[test]
    fn test_no_match_at_all() {
        assert!(recognize_all(&[fragment("6ARBA6E", 0.9)]).is_empty());
        assert!(recognize_all(&[]).is_empty());
    }
}
