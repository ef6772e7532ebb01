//! Pure image transforms.
//!
//! Every function takes an image by reference and returns a new owned
//! image; nothing is mutated in place and no global state is consulted.
//! The only failure mode is an empty input buffer or an out-of-domain
//! parameter, both reported as [`Error::InvalidImage`].

use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageReader, Rgb, RgbImage};
use imageproc::filter::gaussian_blur_f32;
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};

use crate::error::{Error, Result};

/// Sigma of the internal blur used by the unsharp mask in [`sharpen`].
const SHARPEN_SIGMA: f32 = 2.0;

/// Flip axis for [`flip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipDirection {
    Horizontal,
    Vertical,
}

fn ensure_nonempty(img: &DynamicImage) -> Result<()> {
    if img.width() == 0 || img.height() == 0 {
        return Err(Error::InvalidImage("empty image buffer".into()));
    }
    Ok(())
}

fn ensure_factor(factor: f32, what: &str) -> Result<()> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(Error::InvalidImage(format!(
            "{what} {factor} must be a non-negative number"
        )));
    }
    Ok(())
}

/// Decode an image from disk, mapping failures to [`Error::Load`].
pub fn read_image(path: &Path) -> Result<DynamicImage> {
    ImageReader::open(path)
        .map_err(|e| Error::load_io(path, e))?
        .decode()
        .map_err(|e| Error::load(path, e))
}

/// Mirror the image along the chosen axis.
pub fn flip(img: &DynamicImage, direction: FlipDirection) -> Result<DynamicImage> {
    ensure_nonempty(img)?;
    Ok(match direction {
        FlipDirection::Horizontal => img.fliph(),
        FlipDirection::Vertical => img.flipv(),
    })
}

/// Keep the centered sub-rectangle of `ratio` times each dimension.
///
/// New dimensions are rounded down to whole pixels per axis, and the
/// offset is `(dim - new_dim) / 2` in integer division.
pub fn crop_center(img: &DynamicImage, ratio: f32) -> Result<DynamicImage> {
    ensure_nonempty(img)?;
    if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
        return Err(Error::InvalidImage(format!(
            "crop ratio {ratio} outside (0, 1]"
        )));
    }
    let (width, height) = img.dimensions();
    let new_width = (f64::from(width) * f64::from(ratio)) as u32;
    let new_height = (f64::from(height) * f64::from(ratio)) as u32;
    if new_width == 0 || new_height == 0 {
        return Err(Error::InvalidImage(format!(
            "crop ratio {ratio} leaves no pixels of a {width}x{height} image"
        )));
    }
    let left = (width - new_width) / 2;
    let top = (height - new_height) / 2;
    Ok(img.crop_imm(left, top, new_width, new_height))
}

/// Gaussian blur with the given radius; radius zero is an exact no-op.
pub fn blur(img: &DynamicImage, radius: f32) -> Result<DynamicImage> {
    ensure_nonempty(img)?;
    ensure_factor(radius, "blur radius")?;
    if radius == 0.0 {
        return Ok(img.clone());
    }
    Ok(match img {
        DynamicImage::ImageLuma8(gray) => {
            DynamicImage::ImageLuma8(gaussian_blur_f32(gray, radius))
        }
        DynamicImage::ImageRgba8(rgba) => {
            DynamicImage::ImageRgba8(gaussian_blur_f32(rgba, radius))
        }
        other => DynamicImage::ImageRgb8(gaussian_blur_f32(&other.to_rgb8(), radius)),
    })
}

/// Unsharp-style sharpening: `out = orig + (orig - blurred) * (factor - 1)`.
///
/// A factor of 1.0 returns the image unchanged; factors below 1.0 soften
/// toward the blurred version.
pub fn sharpen(img: &DynamicImage, factor: f32) -> Result<DynamicImage> {
    ensure_nonempty(img)?;
    ensure_factor(factor, "sharpen factor")?;
    if factor == 1.0 {
        return Ok(img.clone());
    }
    let rgb = img.to_rgb8();
    let blurred = gaussian_blur_f32(&rgb, SHARPEN_SIGMA);
    let (width, height) = rgb.dimensions();
    let mut out = RgbImage::new(width, height);
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let soft = blurred.get_pixel(x, y);
        let mut channels = [0u8; 3];
        for c in 0..3 {
            let orig = f32::from(pixel[c]);
            let value = orig + (orig - f32::from(soft[c])) * (factor - 1.0);
            channels[c] = value.clamp(0.0, 255.0) as u8;
        }
        out.put_pixel(x, y, Rgb(channels));
    }
    Ok(DynamicImage::ImageRgb8(out))
}

/// Rotate about the center, expanding the canvas to fit and filling the
/// new corners with black. Multiples of 90 degrees take an exact,
/// lossless path.
pub fn rotate(img: &DynamicImage, degrees: i32) -> Result<DynamicImage> {
    ensure_nonempty(img)?;
    let angle = degrees.rem_euclid(360);
    match angle {
        0 => Ok(img.clone()),
        90 => Ok(img.rotate90()),
        180 => Ok(img.rotate180()),
        270 => Ok(img.rotate270()),
        _ => {
            let rgb = img.to_rgb8();
            let (width, height) = rgb.dimensions();
            let theta = (angle as f32).to_radians();
            let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
            let new_width = (width as f32 * cos + height as f32 * sin).ceil() as u32;
            let new_height = (width as f32 * sin + height as f32 * cos).ceil() as u32;

            // Center the source on the expanded canvas, then rotate the
            // whole canvas so nothing is clipped.
            let mut canvas = RgbImage::from_pixel(new_width, new_height, Rgb([0, 0, 0]));
            image::imageops::overlay(
                &mut canvas,
                &rgb,
                i64::from((new_width - width) / 2),
                i64::from((new_height - height) / 2),
            );
            let rotated =
                rotate_about_center(&canvas, theta, Interpolation::Bilinear, Rgb([0, 0, 0]));
            Ok(DynamicImage::ImageRgb8(rotated))
        }
    }
}

/// Desaturate to luminance, then re-expand to the source channel count
/// so the display path keeps a uniform format. Alpha survives.
pub fn grayscale(img: &DynamicImage) -> Result<DynamicImage> {
    ensure_nonempty(img)?;
    Ok(if img.color().has_alpha() {
        DynamicImage::ImageRgba8(DynamicImage::ImageLumaA8(img.to_luma_alpha8()).to_rgba8())
    } else {
        DynamicImage::ImageRgb8(DynamicImage::ImageLuma8(img.to_luma8()).to_rgb8())
    })
}

/// Scale every channel multiplicatively, clamped to the valid range.
pub fn brightness(img: &DynamicImage, factor: f32) -> Result<DynamicImage> {
    ensure_nonempty(img)?;
    ensure_factor(factor, "brightness factor")?;
    if factor == 1.0 {
        return Ok(img.clone());
    }
    let rgb = img.to_rgb8();
    let mut out = RgbImage::new(rgb.width(), rgb.height());
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let mut channels = [0u8; 3];
        for c in 0..3 {
            channels[c] = (f32::from(pixel[c]) * factor).clamp(0.0, 255.0) as u8;
        }
        out.put_pixel(x, y, Rgb(channels));
    }
    Ok(DynamicImage::ImageRgb8(out))
}

/// Scale each channel's deviation from the mean luminance, clamped.
pub fn contrast(img: &DynamicImage, factor: f32) -> Result<DynamicImage> {
    ensure_nonempty(img)?;
    ensure_factor(factor, "contrast factor")?;
    if factor == 1.0 {
        return Ok(img.clone());
    }
    let gray = img.to_luma8();
    let sum: u64 = gray.pixels().map(|p| u64::from(p[0])).sum();
    let mean = sum as f32 / (u64::from(gray.width()) * u64::from(gray.height())) as f32;

    let rgb = img.to_rgb8();
    let mut out = RgbImage::new(rgb.width(), rgb.height());
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let mut channels = [0u8; 3];
        for c in 0..3 {
            let value = mean + (f32::from(pixel[c]) - mean) * factor;
            channels[c] = value.clamp(0.0, 255.0) as u8;
        }
        out.put_pixel(x, y, Rgb(channels));
    }
    Ok(DynamicImage::ImageRgb8(out))
}
