//! Toolkit-agnostic viewer controller.
//!
//! Owns the adjustment stack and the detection collaborator; a front-end
//! wires buttons to the transitions and shows the returned display pair.
//! Errors are returned for the front-end to surface as a status line;
//! session state survives a failed operation.

use std::path::Path;

use image::DynamicImage;

use crate::adjust::{AdjustState, Adjustment, AdjustmentStack};
use crate::detect::{DetectionOutput, Detector};
use crate::error::{Error, Result};
use crate::ops;

pub struct ViewerSession<D: Detector> {
    stack: AdjustmentStack,
    detector: D,
}

impl<D: Detector> ViewerSession<D> {
    pub fn new(detector: D) -> Self {
        Self {
            stack: AdjustmentStack::new(),
            detector,
        }
    }

    /// Load a still image and run detection on it.
    pub fn load_image(&mut self, path: &Path) -> Result<DetectionOutput> {
        let img = ops::read_image(path)?;
        self.stack.load(img)?;
        self.refresh()
    }

    /// Apply one adjustment press, then re-run detection.
    pub fn apply(&mut self, op: Adjustment) -> Result<DetectionOutput> {
        self.stack.apply(op)?;
        self.refresh()
    }

    /// Drop all adjustments, then re-run detection on the original.
    pub fn reset(&mut self) -> Result<DetectionOutput> {
        self.stack.reset()?;
        self.refresh()
    }

    /// Run detection on the current processed image.
    pub fn refresh(&self) -> Result<DetectionOutput> {
        let processed = self
            .stack
            .processed()
            .ok_or_else(|| Error::InvalidImage("no image loaded".into()))?;
        self.detector.detect(processed, false)
    }

    /// Run detection on one live-feed frame; the adjustment stack is not
    /// involved in stream processing.
    pub fn feed_frame(&self, frame: &DynamicImage) -> Result<DetectionOutput> {
        self.detector.detect(frame, true)
    }

    pub fn state(&self) -> &AdjustState {
        self.stack.state()
    }

    pub fn has_image(&self) -> bool {
        self.stack.has_image()
    }
}
