//! Detector and recognizer seams, plus the end-to-end plate reader
//!
//! The object detector and the OCR engine are external collaborators; the
//! reader only needs the two trait methods below. `PlateReader` wires them
//! through crop, variant generation and fusion into a single call per image.

use anyhow::{Context, Result};
use image::{DynamicImage, GrayImage};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::fusion::fuse_plate_from_detections;
use crate::preprocess::{crop_detection, ocr_variants};
use crate::reconstruct::Reconstructor;
use crate::types::{Detection, ReconstructionResult, TextFragment};

/// One raw reading from the OCR engine
#[derive(Debug, Clone)]
pub struct OcrText {
    /// Recognized text
    pub text: String,
    /// Recognition confidence (0.0 - 1.0)
    pub confidence: f32,
}

/// External object detector locating candidate plate regions
pub trait RegionDetector {
    /// Detect plate regions in a full image. An empty list is a valid
    /// answer, not a fault.
    fn detect_regions(&self, image: &DynamicImage) -> Result<Vec<Detection>>;
}

/// External OCR engine reading text off one preprocessed image
pub trait TextRecognizer {
    /// Recognize text in a grayscale image. An empty list is a valid
    /// answer, not a fault.
    fn recognize_text(&self, image: &GrayImage) -> Result<Vec<OcrText>>;
}

/// End-to-end plate reading over pluggable detector and recognizer backends
pub struct PlateReader<D, R> {
    detector: D,
    recognizer: R,
    config: EngineConfig,
    reconstructor: Reconstructor,
}

impl<D: RegionDetector, R: TextRecognizer> PlateReader<D, R> {
    /// Create a reader with default configuration
    pub fn new(detector: D, recognizer: R) -> Self {
        Self::with_config(detector, recognizer, EngineConfig::default())
    }

    /// Create a reader with custom configuration
    pub fn with_config(detector: D, recognizer: R, config: EngineConfig) -> Self {
        let reconstructor = Reconstructor::new(
            config.bonuses.clone(),
            config.thresholds.region_min_confidence,
            config.thresholds.min_fragment_len,
        );
        Self {
            detector,
            recognizer,
            config,
            reconstructor,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read the best plate from one image
    ///
    /// Detector failure propagates to the caller; a recognizer failure on a
    /// single variant only costs that variant's fragments. "No plate found"
    /// is `Ok(None)`.
    pub fn read(&self, image: &DynamicImage) -> Result<Option<ReconstructionResult>> {
        let detections = self
            .detector
            .detect_regions(image)
            .context("region detection failed")?;
        info!("Detected {} candidate plate regions", detections.len());

        let result = fuse_plate_from_detections(
            &detections,
            |detection| self.region_fragments(image, detection),
            || self.whole_image_fragments(image),
            &self.reconstructor,
            self.config.thresholds.fallback_min_confidence,
        );

        Ok(result)
    }

    /// Crop one detection, fan out the variants and pool the readings
    fn region_fragments(&self, image: &DynamicImage, detection: &Detection) -> Vec<TextFragment> {
        let Some(crop) = crop_detection(image, &detection.bbox, self.config.preprocess.crop_padding)
        else {
            warn!("Detection box {:?} lies outside the image", detection.bbox);
            return Vec::new();
        };

        self.recognize_variants(&crop, self.config.thresholds.region_min_confidence)
    }

    /// Fallback readings taken over the whole image
    fn whole_image_fragments(&self, image: &DynamicImage) -> Vec<TextFragment> {
        self.recognize_variants(image, self.config.thresholds.fallback_min_confidence)
    }

    /// Run the recognizer over every preprocessing variant of one image,
    /// keeping readings above the given confidence gate
    fn recognize_variants(&self, image: &DynamicImage, min_confidence: f32) -> Vec<TextFragment> {
        let mut fragments = Vec::new();

        for variant in ocr_variants(image, &self.config.preprocess) {
            let readings = match self.recognizer.recognize_text(&variant.image) {
                Ok(readings) => readings,
                Err(err) => {
                    // One bad variant must not sink the pass
                    warn!("Recognizer failed on {} variant: {err:#}", variant.name);
                    continue;
                }
            };

            for reading in readings {
                if reading.confidence > min_confidence {
                    debug!(
                        "OCR reading '{}' (conf {:.2}, {})",
                        reading.text, reading.confidence, variant.name
                    );
                    fragments.push(TextFragment::new(
                        reading.text.trim(),
                        reading.confidence,
                        variant.name,
                    ));
                }
            }
        }

        fragments
    }
}
