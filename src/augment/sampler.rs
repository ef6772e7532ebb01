//! Enumerates and samples dataset images.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::index;

use crate::error::Result;

/// Extensions recognized as dataset images (matched case-insensitively).
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// True if the path carries a recognized image extension.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// List every image file directly under `<subset_dir>/images`, deduplicated
/// and sorted so sampling is deterministic under a fixed seed.
///
/// A missing `images` directory is treated the same as an empty one.
pub fn list_images(subset_dir: &Path) -> Result<Vec<PathBuf>> {
    let images_dir = subset_dir.join("images");
    if !images_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut paths = BTreeSet::new();
    for entry in fs::read_dir(&images_dir)? {
        let path = entry?.path();
        if path.is_file() && is_image_file(&path) {
            paths.insert(path);
        }
    }
    Ok(paths.into_iter().collect())
}

/// Draw `min(count, available)` image paths uniformly without replacement.
///
/// An empty enumeration yields an empty sample, not an error; the caller
/// reports the no-op outcome.
pub fn sample_images<R: Rng>(
    subset_dir: &Path,
    count: usize,
    rng: &mut R,
) -> Result<Vec<PathBuf>> {
    let available = list_images(subset_dir)?;
    if available.is_empty() || count == 0 {
        return Ok(Vec::new());
    }
    let take = count.min(available.len());
    let picked = index::sample(rng, available.len(), take);
    Ok(picked.into_iter().map(|i| available[i].clone()).collect())
}
