//! Cumulative manual adjustments against a pristine original.
//!
//! Every transition re-derives the processed image from the untouched
//! original with all current parameters applied in a fixed order
//! (rotate, grayscale, sharpen, brightness, contrast). Pressing a factor
//! button therefore tracks the displayed factor linearly instead of
//! compounding on the already-processed image.

use image::DynamicImage;

use crate::error::{Error, Result};
use crate::ops;

/// Increment applied per press of a factor button.
pub const FACTOR_STEP: f32 = 0.5;
/// Upper bound for sharpen/brightness/contrast factors.
pub const FACTOR_MAX: f32 = 3.0;
/// Rotation applied per press of the rotate button, in degrees.
pub const ROTATE_STEP: i32 = 90;

/// One user-facing adjustment button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Rotate,
    Grayscale,
    Sharpen,
    Brightness,
    Contrast,
}

/// Current adjustment parameters; identity values display the original.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustState {
    /// Degrees in `[0, 360)`, stepped by [`ROTATE_STEP`].
    pub rotation_degrees: i32,
    pub sharpen: f32,
    pub brightness: f32,
    pub contrast: f32,
    pub grayscale: bool,
}

impl AdjustState {
    pub fn identity() -> Self {
        Self {
            rotation_degrees: 0,
            sharpen: 1.0,
            brightness: 1.0,
            contrast: 1.0,
            grayscale: false,
        }
    }

    fn step(&mut self, op: Adjustment) {
        match op {
            Adjustment::Rotate => {
                self.rotation_degrees = (self.rotation_degrees + ROTATE_STEP).rem_euclid(360);
            }
            Adjustment::Grayscale => self.grayscale = !self.grayscale,
            Adjustment::Sharpen => self.sharpen = (self.sharpen + FACTOR_STEP).min(FACTOR_MAX),
            Adjustment::Brightness => {
                self.brightness = (self.brightness + FACTOR_STEP).min(FACTOR_MAX);
            }
            Adjustment::Contrast => self.contrast = (self.contrast + FACTOR_STEP).min(FACTOR_MAX),
        }
    }
}

impl Default for AdjustState {
    fn default() -> Self {
        Self::identity()
    }
}

/// State machine over a loaded original and its derived processed image.
///
/// Transitions are synchronous; a failed transition leaves both the state
/// and the processed image untouched.
#[derive(Default)]
pub struct AdjustmentStack {
    original: Option<DynamicImage>,
    processed: Option<DynamicImage>,
    state: AdjustState,
}

impl AdjustmentStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new original, resetting all adjustments.
    pub fn load(&mut self, img: DynamicImage) -> Result<()> {
        if img.width() == 0 || img.height() == 0 {
            return Err(Error::InvalidImage("empty image buffer".into()));
        }
        self.processed = Some(img.clone());
        self.original = Some(img);
        self.state = AdjustState::identity();
        Ok(())
    }

    /// Apply one adjustment press and re-derive the processed image.
    pub fn apply(&mut self, op: Adjustment) -> Result<&DynamicImage> {
        let original = self
            .original
            .as_ref()
            .ok_or_else(|| Error::InvalidImage("no image loaded".into()))?;
        let mut next = self.state;
        next.step(op);
        let derived = derive(original, &next)?;
        self.state = next;
        Ok(self.processed.insert(derived))
    }

    /// Restore the identity state; processed becomes a byte-identical copy
    /// of the original.
    pub fn reset(&mut self) -> Result<&DynamicImage> {
        let original = self
            .original
            .as_ref()
            .ok_or_else(|| Error::InvalidImage("no image loaded".into()))?;
        self.state = AdjustState::identity();
        let copy = original.clone();
        Ok(self.processed.insert(copy))
    }

    pub fn state(&self) -> &AdjustState {
        &self.state
    }

    pub fn processed(&self) -> Option<&DynamicImage> {
        self.processed.as_ref()
    }

    pub fn original(&self) -> Option<&DynamicImage> {
        self.original.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.original.is_some()
    }
}

fn derive(original: &DynamicImage, state: &AdjustState) -> Result<DynamicImage> {
    let mut img = if state.rotation_degrees != 0 {
        ops::rotate(original, state.rotation_degrees)?
    } else {
        original.clone()
    };
    if state.grayscale {
        img = ops::grayscale(&img)?;
    }
    if state.sharpen != 1.0 {
        img = ops::sharpen(&img, state.sharpen)?;
    }
    if state.brightness != 1.0 {
        img = ops::brightness(&img, state.brightness)?;
    }
    if state.contrast != 1.0 {
        img = ops::contrast(&img, state.contrast)?;
    }
    Ok(img)
}
