mod common;

use std::collections::HashMap;
use std::path::PathBuf;

use common::fixtures::{dataset_with_images, write_corrupt_image};
use image::GenericImageView;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use roadsight::augment::{self, AugmentConfig, OutputTarget, sampler};

fn overwrite_config(root: PathBuf) -> AugmentConfig {
    AugmentConfig {
        seed: Some(42),
        sample_count: 3,
        ..AugmentConfig::new(root, OutputTarget::Overwrite)
    }
}

fn dimensions_by_file(subset_dir: &std::path::Path) -> HashMap<PathBuf, (u32, u32)> {
    sampler::list_images(subset_dir)
        .expect("listing images")
        .into_iter()
        .map(|path| {
            let dims = image::open(&path).expect("opening image").dimensions();
            (path, dims)
        })
        .collect()
}

#[test]
fn overwrites_exactly_the_sampled_files() -> anyhow::Result<()> {
    let dataset = dataset_with_images("train", 5, 40, 30);
    let subset_dir = dataset.path().join("train");
    let before = dimensions_by_file(&subset_dir);

    let config = overwrite_config(dataset.path().to_path_buf());
    let report = augment::run(&config)?;
    assert_eq!(report.augmented, 3);
    assert_eq!(report.failed, 0);

    // Crop ratio 0.8 shrinks 40x30 to 32x24, so processed files are
    // recognizable by their dimensions.
    let after = dimensions_by_file(&subset_dir);
    assert_eq!(after.len(), 5);
    let changed = after.iter().filter(|(_, dims)| **dims == (32, 24)).count();
    let untouched = after
        .iter()
        .filter(|(path, dims)| before.get(*path) == Some(dims))
        .count();
    assert_eq!(changed, 3);
    assert_eq!(untouched, 2);
    Ok(())
}

#[test]
fn corrupt_file_is_counted_without_aborting_the_batch() -> anyhow::Result<()> {
    let dataset = dataset_with_images("train", 4, 40, 30);
    let images_dir = dataset.path().join("train").join("images");
    write_corrupt_image(&images_dir.join("zz_broken.png"));

    let mut config = overwrite_config(dataset.path().to_path_buf());
    config.sample_count = 5;
    let report = augment::run(&config)?;
    assert_eq!(report.augmented, 4);
    assert_eq!(report.failed, 1);
    Ok(())
}

#[test]
fn directory_output_leaves_sources_untouched() -> anyhow::Result<()> {
    let dataset = dataset_with_images("train", 3, 50, 40);
    let subset_dir = dataset.path().join("train");
    let before = dimensions_by_file(&subset_dir);
    let out = tempfile::TempDir::new()?;

    let config = AugmentConfig {
        seed: Some(7),
        sample_count: 3,
        ..AugmentConfig::new(
            dataset.path().to_path_buf(),
            OutputTarget::Directory(out.path().to_path_buf()),
        )
    };
    let report = augment::run(&config)?;
    assert_eq!(report.augmented, 3);

    // Sources keep their original dimensions.
    assert_eq!(dimensions_by_file(&subset_dir), before);

    // Mirror layout under the output root, with cropped dimensions.
    let mirrored = sampler::list_images(&out.path().join("train"))?;
    assert_eq!(mirrored.len(), 3);
    for path in mirrored {
        assert_eq!(image::open(&path)?.dimensions(), (40, 32));
    }
    Ok(())
}

#[test]
fn empty_subset_reports_nothing_and_touches_nothing() -> anyhow::Result<()> {
    let dataset = tempfile::TempDir::new()?;
    std::fs::create_dir_all(dataset.path().join("train").join("images"))?;

    let config = overwrite_config(dataset.path().to_path_buf());
    let report = augment::run(&config)?;
    assert_eq!(report, augment::BatchReport::default());
    Ok(())
}

#[test]
fn injected_rng_drives_the_whole_subset_run() -> anyhow::Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let dataset = dataset_with_images("train", 6, 20, 20);
    let config = AugmentConfig {
        sample_count: 6,
        ..AugmentConfig::new(dataset.path().to_path_buf(), OutputTarget::Overwrite)
    };
    let report = augment::augment_subset(&config, "train", &mut rng)?;
    assert_eq!(report.augmented, 6);
    assert_eq!(report.failed, 0);
    Ok(())
}
