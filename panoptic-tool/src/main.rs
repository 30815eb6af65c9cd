use anyhow::{bail, ensure, Context, Result};
use futures::{StreamExt, TryStreamExt};
use log::info;
use panoptic_dl::{
    config::Config,
    stream::{EvaluateStream, InferenceStream, TrainingStream},
};
use std::{path::PathBuf, str::FromStr, sync::Arc};
use structopt::StructOpt;

#[derive(Debug, Clone, StructOpt)]
/// Inspect the panoptic input pipeline streams
struct Args {
    #[structopt(long, default_value = "panoptic.json5")]
    /// configuration file
    pub config_file: PathBuf,
    #[structopt(long, default_value = "evaluate")]
    /// pipeline mode: train, evaluate or inference
    pub mode: Mode,
    #[structopt(long)]
    /// stop after this many batches; mandatory in train mode, where the
    /// stream never ends on its own
    pub max_steps: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Train,
    Evaluate,
    Inference,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<Self> {
        let mode = match text {
            "train" => Self::Train,
            "evaluate" => Self::Evaluate,
            "inference" => Self::Inference,
            _ => bail!(
                "unknown mode '{}', expected train, evaluate or inference",
                text
            ),
        };
        Ok(mode)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let Args {
        config_file,
        mode,
        max_steps,
    } = Args::from_args();

    let config = Arc::new(
        Config::open(&config_file)
            .with_context(|| format!("failed to load config file '{}'", config_file.display()))?,
    );
    let limit = max_steps.unwrap_or(usize::MAX);

    match mode {
        Mode::Train => {
            ensure!(
                max_steps.is_some(),
                "train mode requires --max-steps, the stream never ends on its own"
            );

            let mut stream = TrainingStream::new(config).await?.stream().take(limit);
            let mut step = 0;
            while let Some(batch) = stream.try_next().await? {
                info!(
                    "step {}\tbatch size {}\tmax boxes {}",
                    step,
                    batch.batch_size(),
                    batch.max_boxes()
                );
                step += 1;
            }
        }
        Mode::Evaluate => {
            let mut stream = EvaluateStream::new(config).await?.stream().take(limit);
            let mut step = 0;
            while let Some(batch) = stream.try_next().await? {
                info!(
                    "step {}\tboxes {}\tlabel shape {:?}",
                    step,
                    batch.max_boxes(),
                    batch.labels.shape()
                );
                step += 1;
            }
        }
        Mode::Inference => {
            let mut stream = InferenceStream::new(config).await?.stream().take(limit);
            let mut step = 0;
            while let Some(batch) = stream.try_next().await? {
                info!(
                    "step {}\tfile '{}'",
                    step,
                    batch.image_files[0].display()
                );
                step += 1;
            }
        }
    }

    Ok(())
}
