//! Batch augmentation over a random sample of dataset images.
//!
//! Each sampled file goes through a fixed chain: a random flip, a center
//! crop, then a Gaussian blur. Per-file failures are logged and counted;
//! they never abort the batch.

pub mod sampler;

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::ops::{self, FlipDirection};

/// Default center-crop ratio for the augmentation chain.
pub const DEFAULT_CROP_RATIO: f32 = 0.8;
/// Default Gaussian blur radius for the augmentation chain.
pub const DEFAULT_BLUR_RADIUS: f32 = 2.0;

/// Where augmented images land.
///
/// Overwriting the source files destroys the originals with no backup, so
/// it has to be requested explicitly; the safe mode mirrors the
/// `<subset>/images/<file>` layout under a separate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Overwrite,
    Directory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct AugmentConfig {
    pub dataset_root: PathBuf,
    pub subsets: Vec<String>,
    pub sample_count: usize,
    pub crop_ratio: f32,
    pub blur_radius: f32,
    pub output: OutputTarget,
    /// Fixed seed for reproducible sampling; generated when absent.
    pub seed: Option<u64>,
}

impl AugmentConfig {
    pub fn new(dataset_root: impl Into<PathBuf>, output: OutputTarget) -> Self {
        Self {
            dataset_root: dataset_root.into(),
            subsets: vec!["train".to_string()],
            sample_count: 100,
            crop_ratio: DEFAULT_CROP_RATIO,
            blur_radius: DEFAULT_BLUR_RADIUS,
            output,
            seed: None,
        }
    }
}

/// Success/failure counts for one augmentation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub augmented: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn absorb(&mut self, other: BatchReport) {
        self.augmented += other.augmented;
        self.failed += other.failed;
    }
}

/// Run the augmentation batch over every configured subset.
pub fn run(config: &AugmentConfig) -> Result<BatchReport> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut total = BatchReport::default();
    for subset in &config.subsets {
        let report = augment_subset(config, subset, &mut rng)?;
        info!(
            subset,
            augmented = report.augmented,
            failed = report.failed,
            "subset complete"
        );
        total.absorb(report);
    }
    Ok(total)
}

/// Augment a random sample of one subset's images.
///
/// Each file is read exactly once and written exactly once; the run never
/// feeds an output back through the chain.
pub fn augment_subset<R: Rng>(
    config: &AugmentConfig,
    subset: &str,
    rng: &mut R,
) -> Result<BatchReport> {
    let subset_dir = config.dataset_root.join(subset);
    let sampled = sampler::sample_images(&subset_dir, config.sample_count, rng)?;
    if sampled.is_empty() {
        info!(subset, "no images found");
        return Ok(BatchReport::default());
    }

    let mut report = BatchReport::default();
    for path in sampled {
        // Flip axis is drawn per image, not once per batch.
        let direction = if rng.gen_bool(0.5) {
            FlipDirection::Horizontal
        } else {
            FlipDirection::Vertical
        };
        match augment_file(&path, subset, direction, config) {
            Ok(target) => {
                info!(path = %target.display(), "augmented");
                report.augmented += 1;
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "augmentation failed");
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

fn augment_file(
    path: &Path,
    subset: &str,
    direction: FlipDirection,
    config: &AugmentConfig,
) -> Result<PathBuf> {
    let img = ops::read_image(path)?;
    let img = ops::flip(&img, direction)?;
    let img = ops::crop_center(&img, config.crop_ratio)?;
    let img = ops::blur(&img, config.blur_radius)?;

    let target = output_path(path, subset, &config.output)?;
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::save_io(&target, e))?;
    }
    img.save(&target).map_err(|e| Error::save(&target, e))?;
    Ok(target)
}

fn output_path(path: &Path, subset: &str, output: &OutputTarget) -> Result<PathBuf> {
    match output {
        OutputTarget::Overwrite => Ok(path.to_path_buf()),
        OutputTarget::Directory(root) => {
            let name = path
                .file_name()
                .ok_or_else(|| Error::InvalidImage(format!("'{}' has no file name", path.display())))?;
            Ok(root.join(subset).join("images").join(name))
        }
    }
}
