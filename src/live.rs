//! Cooperative live feed.
//!
//! Frames are pulled one at a time from a [`FrameSource`], handed to a
//! synchronous callback, and the task yields between frames so a display
//! loop stays responsive. A [`StopSignal`] is checked at every iteration
//! boundary; frames are never queued or dropped behind the caller's back.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use image::DynamicImage;

use crate::augment::sampler;
use crate::error::{Error, Result};
use crate::ops;

/// Black-box frame producer (camera, video decoder, frame folder).
pub trait FrameSource {
    /// Next frame, or `None` once the source is exhausted. An unavailable
    /// source reports [`Error::Device`].
    fn next_frame(&mut self) -> Result<Option<DynamicImage>>;
}

/// Cloneable cancellation flag for an in-flight feed.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FeedSummary {
    pub frames: u64,
}

/// Drive the feed until the source is exhausted, the stop signal fires,
/// or the per-frame callback fails.
///
/// Each iteration reads exactly one frame and processes it synchronously;
/// a slow callback simply delays the next read.
pub async fn run_feed<S, F>(mut source: S, stop: StopSignal, mut on_frame: F) -> Result<FeedSummary>
where
    S: FrameSource,
    F: FnMut(DynamicImage) -> Result<()>,
{
    let mut summary = FeedSummary::default();
    while !stop.is_triggered() {
        let Some(frame) = source.next_frame()? else {
            break;
        };
        on_frame(frame)?;
        summary.frames += 1;
        tokio::task::yield_now().await;
    }
    Ok(summary)
}

/// Frame source over the image files of a directory, in sorted order.
///
/// Stands in for a camera or video decoder, which stay external
/// collaborators.
pub struct ImageFolderSource {
    frames: std::vec::IntoIter<PathBuf>,
}

impl ImageFolderSource {
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::Device(format!(
                "frame directory '{}' does not exist",
                dir.display()
            )));
        }
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && sampler::is_image_file(path))
            .collect();
        paths.sort();
        if paths.is_empty() {
            return Err(Error::Device(format!(
                "no frames found under '{}'",
                dir.display()
            )));
        }
        Ok(Self {
            frames: paths.into_iter(),
        })
    }
}

impl FrameSource for ImageFolderSource {
    fn next_frame(&mut self) -> Result<Option<DynamicImage>> {
        match self.frames.next() {
            Some(path) => ops::read_image(&path).map(Some),
            None => Ok(None),
        }
    }
}
