mod common;

use common::fixtures::gradient_image;
use roadsight::adjust::Adjustment;
use roadsight::detect::{Detection, PassthroughDetector, StaticDetector};
use roadsight::error::Error;
use roadsight::viewer::ViewerSession;

fn saved_image(width: u32, height: u32) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("input.png");
    gradient_image(width, height).save(&path).expect("save image");
    (dir, path)
}

#[test]
fn load_runs_detection_on_the_still_image() -> anyhow::Result<()> {
    let (_dir, path) = saved_image(40, 30);
    let mut session = ViewerSession::new(PassthroughDetector);

    let output = session.load_image(&path)?;
    assert_eq!(output.original.as_bytes(), output.annotated.as_bytes());
    assert_eq!(output.original.width(), 40);
    assert!(session.has_image());
    Ok(())
}

#[test]
fn apply_feeds_the_processed_image_to_the_detector() -> anyhow::Result<()> {
    let (_dir, path) = saved_image(40, 30);
    let mut session = ViewerSession::new(PassthroughDetector);
    session.load_image(&path)?;

    let output = session.apply(Adjustment::Rotate)?;
    assert_eq!(
        (output.original.width(), output.original.height()),
        (30, 40)
    );
    assert_eq!(session.state().rotation_degrees, 90);

    let output = session.reset()?;
    assert_eq!(
        (output.original.width(), output.original.height()),
        (40, 30)
    );
    Ok(())
}

#[test]
fn static_detector_draws_boxes_on_the_annotated_copy() -> anyhow::Result<()> {
    let (_dir, path) = saved_image(60, 60);
    let detector = StaticDetector {
        detections: vec![Detection {
            x: 10,
            y: 10,
            width: 20,
            height: 15,
            label: "car".to_string(),
            confidence: 0.9,
        }],
    };
    let mut session = ViewerSession::new(detector);

    let output = session.load_image(&path)?;
    assert_ne!(output.original.as_bytes(), output.annotated.as_bytes());
    // Box corner takes the marker color.
    assert_eq!(
        output.annotated.to_rgb8()[(10, 10)],
        image::Rgb([255, 64, 64])
    );
    Ok(())
}

#[test]
fn feed_frames_bypass_the_adjustment_stack() -> anyhow::Result<()> {
    let session = ViewerSession::new(PassthroughDetector);
    let frame = gradient_image(20, 20);
    let output = session.feed_frame(&frame)?;
    assert_eq!(output.original.as_bytes(), frame.as_bytes());
    assert!(!session.has_image());
    Ok(())
}

#[test]
fn missing_file_is_a_load_error_and_session_stays_usable() -> anyhow::Result<()> {
    let (_dir, path) = saved_image(20, 20);
    let mut session = ViewerSession::new(PassthroughDetector);

    let result = session.load_image(std::path::Path::new("/nope/missing.png"));
    assert!(matches!(result, Err(Error::Load { .. })));
    assert!(!session.has_image());

    session.load_image(&path)?;
    assert!(session.has_image());
    Ok(())
}

#[test]
fn refresh_without_an_image_fails() {
    let session = ViewerSession::new(PassthroughDetector);
    assert!(session.refresh().is_err());
}
