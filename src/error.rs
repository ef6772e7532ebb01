use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the toolset.
///
/// Per-file failures inside a batch (`Load`/`Save`) are logged and counted
/// by the augmentation pipeline instead of aborting it; everything else
/// propagates to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Empty buffer or out-of-domain transform parameter.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// File unreadable or not a decodable image.
    #[error("failed to load '{path}': {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Write failed or the target directory could not be created.
    #[error("failed to save '{path}': {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Detection collaborator failure.
    #[error("detection failed: {0}")]
    Detection(String),

    /// Camera/video/frame source unavailable.
    #[error("frame source unavailable: {0}")]
    Device(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn load(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Error::Load {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn load_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::load(path, image::ImageError::IoError(source))
    }

    pub(crate) fn save(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Error::Save {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn save_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::save(path, image::ImageError::IoError(source))
    }
}

/// Convenience Result type for toolset operations.
pub type Result<T> = std::result::Result<T, Error>;
