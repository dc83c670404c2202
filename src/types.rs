//! Core data types shared across the reconstruction pipeline
//!
//! Fragments and detections are owned by a single reconstruction pass and
//! never mutated; results are handed back to the caller.

use serde::{Deserialize, Serialize};

/// One OCR reading produced from a single preprocessed image variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextFragment {
    /// Raw recognizer output
    pub text: String,
    /// Recognizer confidence (0.0 - 1.0)
    pub confidence: f32,
    /// Which preprocessing variant or fallback pass produced this reading
    pub source: String,
}

impl TextFragment {
    /// Create a new fragment
    pub fn new(text: impl Into<String>, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence,
            source: source.into(),
        }
    }
}

/// Axis-aligned bounding box in pixel coordinates
///
/// Coordinates are signed: detectors derive corners from center points and
/// may produce edges outside the image. Cropping clamps to image bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    /// Create a bounding box from corner coordinates
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Box width in pixels (zero for degenerate boxes)
    pub fn width(&self) -> u32 {
        (self.x2 - self.x1).max(0) as u32
    }

    /// Box height in pixels (zero for degenerate boxes)
    pub fn height(&self) -> u32 {
        (self.y2 - self.y1).max(0) as u32
    }

    /// Expand by `padding` on every side and clamp to an image of the given
    /// dimensions. Returns `(x, y, width, height)` in unsigned coordinates,
    /// or `None` if nothing of the box lies inside the image.
    pub fn padded_and_clamped(&self, padding: u32, img_w: u32, img_h: u32) -> Option<(u32, u32, u32, u32)> {
        let pad = padding as i32;
        let x1 = (self.x1 - pad).max(0).min(img_w as i32);
        let y1 = (self.y1 - pad).max(0).min(img_h as i32);
        let x2 = (self.x2 + pad).max(0).min(img_w as i32);
        let y2 = (self.y2 + pad).max(0).min(img_h as i32);

        if x2 <= x1 || y2 <= y1 {
            return None;
        }

        Some((x1 as u32, y1 as u32, (x2 - x1) as u32, (y2 - y1) as u32))
    }
}

/// One candidate plate region reported by the external detector
///
/// Ordering in a detection list carries no ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    /// Region bounds in pixel coordinates
    pub bbox: BoundingBox,
    /// Detector confidence (0.0 - 1.0)
    pub confidence: f32,
    /// Which detector produced this region
    pub source: String,
}

/// Terminal output of one reconstruction pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionResult {
    /// Canonically formatted plate text
    pub text: String,
    /// Confidence of the winning candidate (ranking bonus never included)
    pub confidence: f32,
}
