//! Reconstruction orchestrator
//!
//! Drives one pass over the fragments produced for a single plate crop:
//! filter, normalize, recognize, select. Malformed text never raises - every
//! degenerate path collapses to "no result".

use tracing::debug;

use crate::normalize::normalize;
use crate::pattern;
use crate::score::{select_best, ScoreTable};
use crate::types::{ReconstructionResult, TextFragment};

/// Configurable reconstruction pass
#[derive(Debug, Clone)]
pub struct Reconstructor {
    /// Ranking bonuses handed to the selector
    pub score_table: ScoreTable,
    /// Fragments at or below this confidence are dropped before matching
    pub min_confidence: f32,
    /// Fragments shorter than this after normalization are dropped
    pub min_text_len: usize,
}

impl Default for Reconstructor {
    fn default() -> Self {
        Self {
            score_table: ScoreTable::default(),
            min_confidence: 0.1,
            min_text_len: 2,
        }
    }
}

impl Reconstructor {
    /// Create a reconstructor with explicit thresholds
    pub fn new(score_table: ScoreTable, min_confidence: f32, min_text_len: usize) -> Self {
        Self {
            score_table,
            min_confidence,
            min_text_len,
        }
    }

    /// Reconstruct the best plate reading from one crop's fragments
    ///
    /// Returns `None` when the fragment list is empty, every fragment is
    /// filtered out, or no recognizer matched - all of which are normal
    /// outcomes, not errors.
    pub fn reconstruct(&self, fragments: &[TextFragment]) -> Option<ReconstructionResult> {
        debug!("Reconstructing from {} fragments", fragments.len());

        let cleaned: Vec<TextFragment> = fragments
            .iter()
            .filter(|f| f.confidence > self.min_confidence)
            .map(|f| TextFragment {
                text: normalize(&f.text),
                confidence: f.confidence,
                source: f.source.clone(),
            })
            .filter(|f| f.text.len() >= self.min_text_len)
            .collect();

        if cleaned.is_empty() {
            debug!("No usable fragments after filtering");
            return None;
        }

        for fragment in &cleaned {
            debug!("Cleaned fragment: '{}' (conf {:.2})", fragment.text, fragment.confidence);
        }

        let candidates = pattern::recognize_all(&cleaned);
        let best = select_best(&candidates, &self.score_table)?;

        debug!("Best candidate: '{}' ({:?}, conf {:.2})", best.text, best.kind, best.confidence);

        Some(ReconstructionResult {
            text: best.text.clone(),
            confidence: best.confidence,
        })
    }
}

/// Reconstruct with default thresholds and bonuses
pub fn reconstruct_plate(fragments: &[TextFragment]) -> Option<ReconstructionResult> {
    Reconstructor::default().reconstruct(fragments)
}
