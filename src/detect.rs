//! Detection collaborator seam.
//!
//! The model itself is a black box behind [`Detector`]; this crate only
//! fixes the calling convention (frame in, display pair out) and provides
//! the box-drawing utility a real backend plugs its results into.

use image::{DynamicImage, Rgb};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::error::{Error, Result};

const BOX_COLOR: Rgb<u8> = Rgb([255, 64, 64]);

/// One detected object in frame coordinates.
#[derive(Debug, Clone)]
pub struct Detection {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub label: String,
    pub confidence: f32,
}

/// Display pair handed back to the viewer: the frame as given and the
/// frame with detections drawn on top.
#[derive(Clone)]
pub struct DetectionOutput {
    pub original: DynamicImage,
    pub annotated: DynamicImage,
}

pub trait Detector {
    /// Run detection on one frame. `is_stream` distinguishes live-feed
    /// frames from still images so a backend can trade accuracy for
    /// latency.
    fn detect(&self, frame: &DynamicImage, is_stream: bool) -> Result<DetectionOutput>;
}

/// Draw hollow boxes for each detection onto a copy of the frame.
pub fn draw_detections(frame: &DynamicImage, detections: &[Detection]) -> DynamicImage {
    let mut canvas = frame.to_rgb8();
    for det in detections {
        let rect = Rect::at(det.x, det.y).of_size(det.width.max(1), det.height.max(1));
        draw_hollow_rect_mut(&mut canvas, rect, BOX_COLOR);
    }
    DynamicImage::ImageRgb8(canvas)
}

/// No-model stand-in: the annotated frame is the frame itself.
pub struct PassthroughDetector;

impl Detector for PassthroughDetector {
    fn detect(&self, frame: &DynamicImage, _is_stream: bool) -> Result<DetectionOutput> {
        if frame.width() == 0 || frame.height() == 0 {
            return Err(Error::Detection("empty frame".into()));
        }
        Ok(DetectionOutput {
            original: frame.clone(),
            annotated: frame.clone(),
        })
    }
}

/// Annotates every frame with a fixed set of boxes. Useful for wiring and
/// display tests without a model.
pub struct StaticDetector {
    pub detections: Vec<Detection>,
}

impl Detector for StaticDetector {
    fn detect(&self, frame: &DynamicImage, _is_stream: bool) -> Result<DetectionOutput> {
        if frame.width() == 0 || frame.height() == 0 {
            return Err(Error::Detection("empty frame".into()));
        }
        Ok(DetectionOutput {
            original: frame.clone(),
            annotated: draw_detections(frame, &self.detections),
        })
    }
}
