use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use roadsight::augment::{self, AugmentConfig, OutputTarget};
use roadsight::detect::PassthroughDetector;
use roadsight::live::{ImageFolderSource, StopSignal, run_feed};
use roadsight::train::{DatasetDescriptor, TrainParams};
use roadsight::viewer::ViewerSession;

#[derive(Parser)]
#[command(name = "roadsight")]
#[command(about = "Vehicle detection toolset: dataset augmentation, viewer, training driver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Augment a random sample of dataset images (flip, center crop, blur)
    Augment {
        /// Dataset root containing <subset>/images directories
        #[arg(value_name = "DATASET")]
        dataset: PathBuf,

        /// Comma-separated subset names to augment
        #[arg(long, default_value = "train", value_delimiter = ',')]
        subsets: Vec<String>,

        /// Number of images to sample per subset
        #[arg(short = 'n', long, default_value_t = 100)]
        samples: usize,

        /// Center-crop ratio in (0, 1]
        #[arg(long, default_value_t = augment::DEFAULT_CROP_RATIO)]
        crop_ratio: f32,

        /// Gaussian blur radius
        #[arg(long, default_value_t = augment::DEFAULT_BLUR_RADIUS)]
        blur_radius: f32,

        /// Replace the source images in place (destructive, no backup)
        #[arg(long, conflicts_with = "out")]
        overwrite: bool,

        /// Write augmented images under this directory instead
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Fixed RNG seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run detection over the image files of a directory as a live feed
    Feed {
        /// Directory holding frames as image files
        #[arg(value_name = "DIR")]
        frames: PathBuf,
    },

    /// Load a still image, run detection, and save the annotated result
    View {
        /// Path to the input image
        #[arg(value_name = "IMAGE")]
        image: Option<PathBuf>,
    },

    /// Validate the dataset layout and report the training plan
    Train {
        /// Dataset root containing <subset>/images and <subset>/labels
        #[arg(value_name = "DATASET")]
        dataset: PathBuf,

        #[arg(long, default_value_t = 416)]
        image_size: u32,

        #[arg(long, default_value_t = 200)]
        epochs: u32,

        #[arg(long, default_value_t = 32)]
        batch: u32,

        #[arg(long, default_value = "vehicle-detect")]
        run_name: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Cli::parse();

    match args.command {
        Command::Augment {
            dataset,
            subsets,
            samples,
            crop_ratio,
            blur_radius,
            overwrite,
            out,
            seed,
        } => {
            let output = match (overwrite, out) {
                (true, _) => OutputTarget::Overwrite,
                (false, Some(dir)) => OutputTarget::Directory(dir),
                (false, None) => anyhow::bail!(
                    "augmentation replaces source pixels; pass --overwrite to acknowledge \
                     or --out DIR to write elsewhere"
                ),
            };
            let config = AugmentConfig {
                dataset_root: dataset,
                subsets,
                sample_count: samples,
                crop_ratio,
                blur_radius,
                output,
                seed,
            };
            let report = augment::run(&config)?;
            println!(
                "Augmented {} image(s), {} failure(s)",
                report.augmented, report.failed
            );
        }

        Command::Feed { frames } => {
            let source = ImageFolderSource::open(&frames)?;
            let session = ViewerSession::new(PassthroughDetector);
            let stop = StopSignal::new();

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?;
            let summary = runtime.block_on(async {
                let ctrl_c_stop = stop.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        ctrl_c_stop.trigger();
                    }
                });
                run_feed(source, stop, |frame| {
                    let output = session.feed_frame(&frame)?;
                    info!(
                        width = output.annotated.width(),
                        height = output.annotated.height(),
                        "frame processed"
                    );
                    Ok(())
                })
                .await
            })?;
            println!("Feed finished after {} frame(s)", summary.frames);
        }

        Command::View { image } => {
            #[cfg(feature = "gui")]
            {
                roadsight::gui::run(image).map_err(|e| anyhow::anyhow!("gui failed: {e}"))?;
            }
            #[cfg(not(feature = "gui"))]
            {
                let image = image.context(
                    "built without the gui feature; pass IMAGE to run detection headless",
                )?;
                let mut session = ViewerSession::new(PassthroughDetector);
                let output = session.load_image(&image)?;
                let target = image.with_extension("annotated.png");
                output
                    .annotated
                    .save(&target)
                    .with_context(|| format!("failed to save '{}'", target.display()))?;
                println!("Annotated image saved to {}", target.display());
            }
        }

        Command::Train {
            dataset,
            image_size,
            epochs,
            batch,
            run_name,
        } => {
            let descriptor = DatasetDescriptor::new(&dataset);
            let summary = descriptor.validate()?;
            let params = TrainParams {
                image_size,
                epochs,
                batch,
                run_name,
            };
            println!("Dataset {} is ready for training:", dataset.display());
            for subset in &summary.subsets {
                println!(
                    "  {:<6} {:>6} image(s) {:>6} label file(s)",
                    subset.name, subset.images, subset.labels
                );
            }
            println!(
                "Plan: imgsz={} epochs={} batch={} run={}",
                params.image_size, params.epochs, params.batch, params.run_name
            );
            println!("No training backend is bundled; hand the descriptor to a Trainer impl.");
        }
    }

    Ok(())
}
