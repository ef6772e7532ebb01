mod common;

use std::fs;

use common::fixtures::{dataset_with_images, gradient_image};
use roadsight::train::{DatasetDescriptor, TrainParams};

#[test]
fn validate_counts_images_and_labels_per_subset() -> anyhow::Result<()> {
    let dataset = dataset_with_images("train", 4, 20, 20);
    let valid_images = dataset.path().join("valid").join("images");
    fs::create_dir_all(&valid_images)?;
    gradient_image(20, 20).save(valid_images.join("v0.jpg"))?;

    let labels = dataset.path().join("train").join("labels");
    fs::create_dir_all(&labels)?;
    for i in 0..4 {
        fs::write(labels.join(format!("img_{i:02}.txt")), "0 0.5 0.5 0.2 0.2")?;
    }
    fs::write(labels.join("classes.yaml"), "names: [car]")?;

    let summary = DatasetDescriptor::new(dataset.path()).validate()?;
    assert_eq!(summary.subsets.len(), 2);

    let train = summary.subsets.iter().find(|s| s.name == "train").unwrap();
    assert_eq!(train.images, 4);
    assert_eq!(train.labels, 4); // .yaml file is not a label

    let valid = summary.subsets.iter().find(|s| s.name == "valid").unwrap();
    assert_eq!(valid.images, 1);
    assert_eq!(valid.labels, 0);
    Ok(())
}

#[test]
fn missing_root_or_subsets_fail_validation() -> anyhow::Result<()> {
    let missing = DatasetDescriptor::new("/nope/dataset");
    assert!(missing.validate().is_err());

    let empty = tempfile::TempDir::new()?;
    assert!(DatasetDescriptor::new(empty.path()).validate().is_err());
    Ok(())
}

#[test]
fn default_params_match_the_standard_run() {
    let params = TrainParams::default();
    assert_eq!(params.image_size, 416);
    assert_eq!(params.epochs, 200);
    assert_eq!(params.batch, 32);
}
