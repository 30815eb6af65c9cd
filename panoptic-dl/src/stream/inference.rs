use super::{InferenceBatch, NUM_DECODE_WORKERS};
use crate::{
    common::*,
    config::{Config, PreprocessConfig},
    dataset::FileListDataset,
    processor::{resize_image, DecodedInferenceExample},
};

/// The inference pipeline: image-only decode, singleton batches carrying
/// the source path and the raw raster; no labels, no boxes.
#[derive(Debug)]
pub struct InferenceStream {
    config: Arc<Config>,
    dataset: Arc<FileListDataset>,
}

impl InferenceStream {
    pub async fn new(config: Arc<Config>) -> Result<Self> {
        let dataset =
            FileListDataset::load(&config.dataset.dataset_dir, &config.dataset.file_list).await?;

        Ok(Self {
            config,
            dataset: Arc::new(dataset),
        })
    }

    pub fn stream(&self) -> Pin<Box<dyn Stream<Item = Result<InferenceBatch>> + Send>> {
        let PreprocessConfig {
            image_height,
            image_width,
            ..
        } = self.config.preprocess;
        let target_size = HW::from_hw([image_height.get(), image_width.get()]);

        let records: Vec<_> = self.dataset.records().to_vec();

        let stream = stream::iter(records.into_iter().map(anyhow::Ok)).try_par_then(
            NUM_DECODE_WORKERS,
            move |record| async move {
                let example =
                    tokio::task::spawn_blocking(move || DecodedInferenceExample::load(&record))
                        .await??;
                anyhow::Ok(example)
            },
        );

        // only the normalized copy is resized; the raw raster passes through
        let stream = stream.try_par_then(None, move |example| {
            let target_size = target_size.clone();

            async move {
                let image = resize_image(&example.image, &target_size);
                anyhow::Ok(DecodedInferenceExample { image, ..example })
            }
        });

        let stream =
            stream.and_then(|example| future::ready(InferenceBatch::from_examples(vec![example])));

        Box::pin(stream)
    }
}
