//! Candidate scoring and selection
//!
//! Ranking adds a per-layout bonus on top of the raw confidence: motorcycle
//! plates dominate the target population, so a motorcycle match outranks a
//! car match of equal confidence. The bonuses are plain data so the prior
//! can be recalibrated without touching the selection logic, and they never
//! leak into the returned confidence.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pattern::{Candidate, PatternType};

/// Ranking bonus per layout family
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTable {
    pub motorcycle_full: f32,
    pub motorcycle_partial: f32,
    pub car_complete: f32,
    pub car_generic: f32,
    pub longest_fallback: f32,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            motorcycle_full: 0.30,
            motorcycle_partial: 0.10,
            car_complete: 0.20,
            car_generic: 0.0,
            longest_fallback: 0.0,
        }
    }
}

impl ScoreTable {
    /// Bonus for one layout family
    pub fn bonus(&self, kind: PatternType) -> f32 {
        match kind {
            PatternType::MotorcycleFull => self.motorcycle_full,
            PatternType::MotorcyclePartial => self.motorcycle_partial,
            PatternType::CarComplete => self.car_complete,
            PatternType::CarGeneric => self.car_generic,
            PatternType::LongestFallback => self.longest_fallback,
        }
    }
}

/// Pick the candidate with the highest `confidence + bonus`
///
/// Ties go to the earliest candidate: the recognizers insert in priority
/// order, so insertion order is the tie-break and must stay deterministic.
pub fn select_best<'a>(candidates: &'a [Candidate], table: &ScoreTable) -> Option<&'a Candidate> {
    let mut best: Option<&Candidate> = None;
    let mut best_score = f32::NEG_INFINITY;

    for candidate in candidates {
        let score = candidate.confidence + table.bonus(candidate.kind);
        debug!(
            "Candidate '{}' ({:?}): conf {:.2}, score {:.2}",
            candidate.text, candidate.kind, candidate.confidence, score
        );
        if score > best_score {
            best = Some(candidate);
            best_score = score;
        }
    }

    best
}
