//! plate-vision - License plate reconstruction from noisy OCR fragments
//!
//! An object detector proposes plate regions, an OCR engine reads text off
//! several preprocessed renditions of each region, and this crate turns
//! those noisy readings into one canonical plate string: normalization,
//! format pattern matching, numeric-to-letter series conversion, scored
//! candidate selection and cross-region fusion. Detector and recognizer
//! backends stay pluggable behind the [`engine`] traits.

pub mod config;
pub mod engine;
pub mod fusion;
pub mod normalize;
pub mod pattern;
pub mod preprocess;
pub mod reconstruct;
pub mod score;
pub mod types;

pub use config::{load_config, save_config, EngineConfig, ThresholdConfig};
pub use engine::{OcrText, PlateReader, RegionDetector, TextRecognizer};
pub use fusion::fuse_plate_from_detections;
pub use normalize::normalize;
pub use pattern::{Candidate, PatternType};
pub use reconstruct::{reconstruct_plate, Reconstructor};
pub use score::ScoreTable;
pub use types::{BoundingBox, Detection, ReconstructionResult, TextFragment};
