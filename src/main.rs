//! plate-vision CLI - replay recorded OCR output through the reconstruction
//! core
//!
//! Takes fragment or detection fixtures captured from a live pipeline and
//! reports what the core reconstructs from them. Useful for debugging why a
//! deployment read a plate the way it did.

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use plate_vision::config::{load_config, EngineConfig};
use plate_vision::fusion::fuse_plate_from_detections;
use plate_vision::reconstruct::Reconstructor;
use plate_vision::types::{BoundingBox, Detection, ReconstructionResult, TextFragment};

/// Replay OCR fragment fixtures through the plate reconstruction core
#[derive(Parser, Debug)]
#[command(name = "plate-vision")]
#[command(about = "Reconstruct license plates from recorded OCR fragments")]
struct Args {
    /// JSON file holding the fragments of a single plate crop
    #[arg(short, long)]
    fragments: Option<PathBuf>,

    /// JSON fixture holding per-detection fragment lists plus optional
    /// whole-image fallback fragments
    #[arg(short, long)]
    detections: Option<PathBuf>,

    /// Engine configuration TOML (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// One detection with the fragments its crop produced
#[derive(Debug, Deserialize)]
struct DetectionFixture {
    bbox: BoundingBox,
    confidence: f32,
    #[serde(default)]
    source: String,
    fragments: Vec<TextFragment>,
}

/// A full fusion fixture: regions plus the whole-image fallback readings
#[derive(Debug, Deserialize)]
struct FusionFixture {
    detections: Vec<DetectionFixture>,
    #[serde(default)]
    fallback_fragments: Vec<TextFragment>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => load_config(path).with_context(|| format!("loading config {path:?}"))?,
        None => EngineConfig::default(),
    };
    let reconstructor = Reconstructor::new(
        config.bonuses.clone(),
        config.thresholds.region_min_confidence,
        config.thresholds.min_fragment_len,
    );

    let result = match (&args.fragments, &args.detections) {
        (Some(path), None) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading fragments {path:?}"))?;
            let fragments: Vec<TextFragment> =
                serde_json::from_str(&content).context("parsing fragments JSON")?;
            info!("Loaded {} fragments", fragments.len());
            reconstructor.reconstruct(&fragments)
        }
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading fixture {path:?}"))?;
            let fixture: FusionFixture =
                serde_json::from_str(&content).context("parsing fixture JSON")?;
            info!(
                "Loaded {} detections, {} fallback fragments",
                fixture.detections.len(),
                fixture.fallback_fragments.len()
            );
            run_fusion(&fixture, &reconstructor, &config)
        }
        _ => bail!("pass exactly one of --fragments or --detections"),
    };

    report(result.as_ref());
    Ok(())
}

/// Replay a fusion fixture through the detection loop
fn run_fusion(
    fixture: &FusionFixture,
    reconstructor: &Reconstructor,
    config: &EngineConfig,
) -> Option<ReconstructionResult> {
    let detections: Vec<Detection> = fixture
        .detections
        .iter()
        .map(|d| Detection {
            bbox: d.bbox,
            confidence: d.confidence,
            source: d.source.clone(),
        })
        .collect();

    // The fusion loop visits detections in list order, so handing out the
    // recorded fragment lists in the same order pairs them back up
    let mut entries = fixture.detections.iter();
    fuse_plate_from_detections(
        &detections,
        |_| entries.next().map(|d| d.fragments.clone()).unwrap_or_default(),
        || fixture.fallback_fragments.clone(),
        reconstructor,
        config.thresholds.fallback_min_confidence,
    )
}

fn report(result: Option<&ReconstructionResult>) {
    match result {
        Some(result) => println!("{} (confidence {:.2})", result.text, result.confidence),
        None => println!("no plate reconstructed"),
    }
}
