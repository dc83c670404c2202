//! Crop extraction and OCR input variants
//!
//! A detected region is padded, clamped, upscaled when too small for the
//! recognizer, and then fanned out into a fixed set of grayscale variants.
//! Running the recognizer over every variant and pooling the fragments is
//! what gives the reconstruction pass enough raw readings to work with.

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};
use imageproc::contrast::{adaptive_threshold, equalize_histogram, otsu_level, threshold, ThresholdType};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::BoundingBox;

/// Settings for crop extraction and variant generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Padding added around a detection box before cropping, in pixels
    pub crop_padding: u32,
    /// Crops narrower than this are upscaled before recognition
    pub min_width: u32,
    /// Crops shorter than this are upscaled before recognition
    pub min_height: u32,
    /// Upscale factor floor applied whenever a crop is too small
    pub min_upscale: f32,
    /// Neighborhood radius for the adaptive threshold variant
    pub adaptive_block_radius: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            crop_padding: 20,
            min_width: 200,
            min_height: 60,
            min_upscale: 4.0,
            adaptive_block_radius: 5,
        }
    }
}

/// One preprocessed grayscale rendition of a crop
pub struct PlateVariant {
    /// Stable tag naming the transform, used as the fragment source
    pub name: &'static str,
    /// Image handed to the recognizer
    pub image: GrayImage,
}

/// Cut a padded detection region out of the source image
///
/// Returns `None` when the clamped box has no area inside the image.
pub fn crop_detection(
    image: &DynamicImage,
    bbox: &BoundingBox,
    padding: u32,
) -> Option<DynamicImage> {
    let (x, y, w, h) = bbox.padded_and_clamped(padding, image.width(), image.height())?;
    debug!("Cropping region {}x{} at ({}, {})", w, h, x, y);
    Some(image.crop_imm(x, y, w, h))
}

/// Produce the fixed variant set for one crop, in recognition order:
/// plain grayscale, histogram-equalized, Otsu-thresholded, and
/// adaptive-thresholded.
pub fn ocr_variants(crop: &DynamicImage, config: &PreprocessConfig) -> Vec<PlateVariant> {
    let (w, h) = (crop.width(), crop.height());
    if w == 0 || h == 0 {
        return Vec::new();
    }

    // Recognizers need a minimum glyph size; small crops get a hard upscale
    let crop = if h < config.min_height || w < config.min_width {
        let scale = (config.min_height as f32 / h as f32)
            .max(config.min_width as f32 / w as f32)
            .max(config.min_upscale);
        let new_w = (w as f32 * scale) as u32;
        let new_h = (h as f32 * scale) as u32;
        debug!("Upscaling {}x{} crop to {}x{}", w, h, new_w, new_h);
        crop.resize_exact(new_w, new_h, FilterType::CatmullRom)
    } else {
        crop.clone()
    };

    let gray = crop.to_luma8();
    let equalized = equalize_histogram(&gray);
    let otsu = threshold(&gray, otsu_level(&gray), ThresholdType::Binary);
    let adaptive = adaptive_threshold(&gray, config.adaptive_block_radius);

    vec![
        PlateVariant { name: "grayscale", image: gray },
        PlateVariant { name: "equalized", image: equalized },
        PlateVariant { name: "otsu", image: otsu },
        PlateVariant { name: "adaptive", image: adaptive },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            let v = ((x + y) % 256) as u8;
            image::Rgba([v, v, v, 255])
        }))
    }

    #[test]
    fn test_crop_applies_padding() {
        let image = test_image(400, 200);
        let bbox = BoundingBox::new(100, 50, 200, 100);
        let crop = crop_detection(&image, &bbox, 20).unwrap();
        assert_eq!(crop.width(), 140);
        assert_eq!(crop.height(), 90);
    }

    #[test]
    fn test_crop_clamps_at_borders() {
        let image = test_image(400, 200);
        let bbox = BoundingBox::new(-10, -10, 50, 40);
        let crop = crop_detection(&image, &bbox, 20).unwrap();
        assert_eq!(crop.width(), 70);
        assert_eq!(crop.height(), 60);
    }

    #[test]
    fn test_crop_outside_image() {
        let image = test_image(400, 200);
        let bbox = BoundingBox::new(500, 300, 600, 400);
        assert!(crop_detection(&image, &bbox, 20).is_none());
    }

    #[test]
    fn test_variant_set_order_and_count() {
        let image = test_image(400, 100);
        let variants = ocr_variants(&image, &PreprocessConfig::default());
        let names: Vec<&str> = variants.iter().map(|v| v.name).collect();
        assert_eq!(names, ["grayscale", "equalized", "otsu", "adaptive"]);
    }

    #[test]
    fn test_large_crop_keeps_dimensions() {
        let image = test_image(400, 100);
        let variants = ocr_variants(&image, &PreprocessConfig::default());
        for variant in &variants {
            assert_eq!(variant.image.dimensions(), (400, 100));
        }
    }

    #[test]
    fn test_small_crop_upscaled_at_least_four_times() {
        let image = test_image(100, 30);
        let variants = ocr_variants(&image, &PreprocessConfig::default());
        // 100x30 misses both minimums; the 4x floor dominates here
        assert_eq!(variants[0].image.dimensions(), (400, 120));
    }

    #[test]
    fn test_narrow_crop_scale_driven_by_width() {
        let image = test_image(40, 100);
        let variants = ocr_variants(&image, &PreprocessConfig::default());
        // 200/40 = 5x beats the 4x floor
        assert_eq!(variants[0].image.dimensions(), (200, 500));
    }

    #[test]
    fn test_threshold_variants_are_binary() {
        let image = test_image(400, 100);
        let variants = ocr_variants(&image, &PreprocessConfig::default());
        let otsu = &variants[2];
        assert!(otsu.image.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }
}
