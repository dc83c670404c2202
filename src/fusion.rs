//! Cross-detection fusion
//!
//! An image may contain several candidate plate regions. Each region gets a
//! full reconstruction pass; regions compete on the mean of detector and
//! reconstruction confidence, folded deterministically so reruns always
//! agree. When no region produces a reading (or there were no regions at
//! all), a whole-image pass runs with a stricter confidence gate and takes
//! the first reading that reconstructs, variant fusion skipped.

use tracing::{debug, info};

use crate::reconstruct::Reconstructor;
use crate::types::{Detection, ReconstructionResult, TextFragment};

/// Default confidence gate for the whole-image fallback pass
pub const DEFAULT_FALLBACK_MIN_CONFIDENCE: f32 = 0.2;

/// Reconstruct the best plate across all detected regions
///
/// `crop_and_recognize` turns one detection into the fragments read off its
/// preprocessed crop variants; `fallback_recognize` reads the whole image
/// once. Detections are visited in list order and ties on the combined
/// confidence keep the first region encountered.
pub fn fuse_plate_from_detections<C, F>(
    detections: &[Detection],
    mut crop_and_recognize: C,
    mut fallback_recognize: F,
    reconstructor: &Reconstructor,
    fallback_min_confidence: f32,
) -> Option<ReconstructionResult>
where
    C: FnMut(&Detection) -> Vec<TextFragment>,
    F: FnMut() -> Vec<TextFragment>,
{
    let mut best: Option<ReconstructionResult> = None;
    let mut best_combined = f32::NEG_INFINITY;

    for (index, detection) in detections.iter().enumerate() {
        debug!(
            "Region {} ({}, conf {:.2})",
            index, detection.source, detection.confidence
        );

        let fragments = crop_and_recognize(detection);
        let Some(result) = reconstructor.reconstruct(&fragments) else {
            continue;
        };

        let combined = (detection.confidence + result.confidence) / 2.0;
        info!(
            "Region {} read '{}' (combined conf {:.2})",
            index, result.text, combined
        );

        if combined > best_combined {
            best_combined = combined;
            best = Some(ReconstructionResult {
                text: result.text,
                confidence: combined,
            });
        }
    }

    if let Some(result) = best {
        info!("Best region read: '{}' (conf {:.2})", result.text, result.confidence);
        return Some(result);
    }

    // Whole-image fallback: stricter gate, one fragment at a time, first
    // reconstruction wins - later readings are not consulted
    info!("No region produced a reading, falling back to whole-image pass");
    for fragment in fallback_recognize() {
        if fragment.confidence <= fallback_min_confidence {
            continue;
        }
        if let Some(result) = reconstructor.reconstruct(std::slice::from_ref(&fragment)) {
            info!("Fallback read: '{}' (conf {:.2})", result.text, result.confidence);
            return Some(result);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;

    fn detection(source: &str, confidence: f32) -> Detection {
        Detection {
            bbox: BoundingBox::new(0, 0, 100, 40),
            confidence,
            source: source.to_string(),
        }
    }

    fn fragment(text: &str, confidence: f32) -> TextFragment {
        TextFragment::new(text, confidence, "test")
    }

    fn no_fallback() -> Vec<TextFragment> {
        Vec::new()
    }

    #[test]
    fn test_combined_confidence_ranks_regions() {
        // Region a: strong detector, weaker read. Region b: weak detector,
        // stronger read. The combined mean must decide, not the raw read.
        let detections = vec![detection("a", 1.0), detection("b", 0.2)];
        let result = fuse_plate_from_detections(
            &detections,
            |det| match det.source.as_str() {
                "a" => vec![fragment("2961", 0.5), fragment("452.30", 0.5)],
                _ => vec![fragment("18A12345", 0.9)],
            },
            no_fallback,
            &Reconstructor::default(),
            DEFAULT_FALLBACK_MIN_CONFIDENCE,
        )
        .unwrap();

        // a: (1.0 + 0.5) / 2 = 0.75 beats b: (0.2 + 0.9) / 2 = 0.55
        assert_eq!(result.text, "29-G1 452.30");
        assert!((result.confidence - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_combined_ties_keep_first_region() {
        let detections = vec![detection("a", 0.8), detection("b", 0.8)];
        for _ in 0..10 {
            let result = fuse_plate_from_detections(
                &detections,
                |det| match det.source.as_str() {
                    "a" => vec![fragment("2961", 0.6), fragment("452.30", 0.6)],
                    _ => vec![fragment("18A12345", 0.6)],
                },
                no_fallback,
                &Reconstructor::default(),
                DEFAULT_FALLBACK_MIN_CONFIDENCE,
            )
            .unwrap();
            assert_eq!(result.text, "29-G1 452.30");
        }
    }

    #[test]
    fn test_empty_detections_use_fallback() {
        let result = fuse_plate_from_detections(
            &[],
            |_| Vec::new(),
            || vec![fragment("18A12345", 0.9)],
            &Reconstructor::default(),
            DEFAULT_FALLBACK_MIN_CONFIDENCE,
        )
        .unwrap();
        assert_eq!(result.text, "18A-12345");
        assert!((result.confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_fallback_takes_first_reading_even_if_later_scores_higher() {
        // The first fragment reconstructs to a penalized partial head; the
        // second would reconstruct to a far stronger car plate. The fallback
        // still returns the first.
        let result = fuse_plate_from_detections(
            &[],
            |_| Vec::new(),
            || vec![fragment("29-61", 0.5), fragment("18A12345", 0.99)],
            &Reconstructor::default(),
            DEFAULT_FALLBACK_MIN_CONFIDENCE,
        )
        .unwrap();
        assert_eq!(result.text, "29-G1");
        assert!((result.confidence - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_fallback_gate_is_stricter() {
        // 0.15 passes the region gate (0.1) but not the fallback gate (0.2)
        let result = fuse_plate_from_detections(
            &[],
            |_| Vec::new(),
            || vec![fragment("18A12345", 0.15)],
            &Reconstructor::default(),
            DEFAULT_FALLBACK_MIN_CONFIDENCE,
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_regions_without_readings_fall_through() {
        let detections = vec![detection("a", 0.9)];
        let result = fuse_plate_from_detections(
            &detections,
            |_| vec![fragment("~~~", 0.9)],
            || vec![fragment("2961", 0.5), fragment("452.30", 0.5)],
            &Reconstructor::default(),
            DEFAULT_FALLBACK_MIN_CONFIDENCE,
        )
        .unwrap();
        // Fallback fragments run one at a time: the head alone converts, the
        // number line alone does not
        assert_eq!(result.text, "29-G1");
    }

    #[test]
    fn test_everything_failing_is_none() {
        let detections = vec![detection("a", 0.9)];
        let result = fuse_plate_from_detections(
            &detections,
            |_| Vec::new(),
            no_fallback,
            &Reconstructor::default(),
            DEFAULT_FALLBACK_MIN_CONFIDENCE,
        );
        assert!(result.is_none());
    }
}
