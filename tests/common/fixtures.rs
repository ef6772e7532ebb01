use std::fs;
use std::path::Path;

use image::{DynamicImage, ImageBuffer, Rgb};
use tempfile::TempDir;

/// Builds an RGB gradient so neighboring pixels differ; transforms that
/// move or mix pixels are guaranteed to change the buffer.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
}

/// Creates a dataset root with `<subset>/images/` holding `count` PNG
/// images of the given dimensions. PNG keeps pixel comparisons exact.
pub fn dataset_with_images(subset: &str, count: usize, width: u32, height: u32) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let images = dir.path().join(subset).join("images");
    fs::create_dir_all(&images).expect("Failed to create images directory");
    for i in 0..count {
        let img = gradient_image(width, height);
        img.save(images.join(format!("img_{i:02}.png")))
            .expect("Failed to save fixture image");
    }
    dir
}

/// Writes a file with a recognized image extension but garbage contents.
pub fn write_corrupt_image(path: &Path) {
    fs::write(path, b"definitely not an image").expect("Failed to write corrupt file");
}
