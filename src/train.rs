//! Training collaborator seam.
//!
//! The model backend is a black box behind [`Trainer`]; this crate fixes
//! the dataset descriptor and the static run parameters, and validates
//! the on-disk layout before a run is handed off.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::augment::sampler;
use crate::error::{Error, Result};

/// Dataset partitions a detection run expects.
pub const SUBSETS: [&str; 3] = ["train", "valid", "test"];

/// Dataset layout: `<root>/<subset>/images` plus per-subset `labels`.
#[derive(Debug, Clone)]
pub struct DatasetDescriptor {
    pub root: PathBuf,
    pub config_yaml: PathBuf,
    pub classes: Vec<String>,
}

impl DatasetDescriptor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let config_yaml = root.join("data.yaml");
        Self {
            root,
            config_yaml,
            classes: Vec::new(),
        }
    }

    pub fn with_classes(mut self, classes: Vec<String>) -> Self {
        self.classes = classes;
        self
    }

    /// Check the subset layout and count images and labels per subset.
    pub fn validate(&self) -> Result<DatasetSummary> {
        if !self.root.is_dir() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("dataset root '{}' does not exist", self.root.display()),
            )));
        }
        let mut subsets = Vec::new();
        for subset in SUBSETS {
            let dir = self.root.join(subset);
            if !dir.is_dir() {
                continue;
            }
            let images = sampler::list_images(&dir)?.len();
            let labels_dir = dir.join("labels");
            let labels = if labels_dir.is_dir() {
                fs::read_dir(&labels_dir)?
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| {
                        entry.path().extension().and_then(|e| e.to_str()) == Some("txt")
                    })
                    .count()
            } else {
                0
            };
            subsets.push(SubsetSummary {
                name: subset.to_string(),
                images,
                labels,
            });
        }
        if subsets.is_empty() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no dataset subsets under '{}'", self.root.display()),
            )));
        }
        Ok(DatasetSummary { subsets })
    }
}

#[derive(Debug, Clone)]
pub struct SubsetSummary {
    pub name: String,
    pub images: usize,
    pub labels: usize,
}

#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub subsets: Vec<SubsetSummary>,
}

/// Static run parameters; tuning them is out of scope.
#[derive(Debug, Clone)]
pub struct TrainParams {
    pub image_size: u32,
    pub epochs: u32,
    pub batch: u32,
    pub run_name: String,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self {
            image_size: 416,
            epochs: 200,
            batch: 32,
            run_name: "vehicle-detect".to_string(),
        }
    }
}

/// Trained weights handed back by a backend.
#[derive(Debug, Clone)]
pub struct TrainedWeights {
    pub path: PathBuf,
}

pub trait Trainer {
    fn train(&self, dataset: &DatasetDescriptor, params: &TrainParams) -> Result<TrainedWeights>;
}
