pub mod adjust;
pub mod augment;
pub mod detect;
pub mod error;
pub mod live;
pub mod ops;
pub mod train;
pub mod viewer;

pub use adjust::{AdjustState, Adjustment, AdjustmentStack};
pub use augment::{AugmentConfig, BatchReport, OutputTarget};
pub use detect::{Detection, DetectionOutput, Detector, PassthroughDetector, StaticDetector};
pub use error::{Error, Result};
pub use live::{FeedSummary, FrameSource, ImageFolderSource, StopSignal, run_feed};
pub use ops::FlipDirection;
pub use train::{DatasetDescriptor, TrainParams, Trainer};
pub use viewer::ViewerSession;

#[cfg(feature = "gui")]
pub mod gui;
