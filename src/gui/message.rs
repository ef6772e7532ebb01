use std::path::PathBuf;

use crate::adjust::Adjustment;

#[derive(Debug, Clone)]
pub enum Message {
    OpenImage,
    ImagePicked(Option<PathBuf>),
    Apply(Adjustment),
    Reset,
}
