use super::{ExampleBatch, NUM_DECODE_WORKERS};
use crate::{
    common::*,
    config::{Config, PreprocessConfig},
    dataset::FileListDataset,
    processor::{resize_image, resize_label, DecodedExample, FormattedExample},
};

/// The evaluation pipeline: one pass over the file list in order,
/// singleton batches, no flip, no shuffle, no repetition.
#[derive(Debug)]
pub struct EvaluateStream {
    config: Arc<Config>,
    dataset: Arc<FileListDataset>,
}

impl EvaluateStream {
    pub async fn new(config: Arc<Config>) -> Result<Self> {
        let dataset =
            FileListDataset::load(&config.dataset.dataset_dir, &config.dataset.file_list).await?;

        Ok(Self {
            config,
            dataset: Arc::new(dataset),
        })
    }

    pub fn stream(&self) -> Pin<Box<dyn Stream<Item = Result<ExampleBatch>> + Send>> {
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
                    tokio::task::spawn_blocking(move || DecodedExample::load(&record)).await??;
                anyhow::Ok(example)
            },
        );

        let stream = stream.try_par_then(None, move |example| {
            let target_size = target_size.clone();

            async move {
                let DecodedExample {
                    image, label, boxes, ..
                } = example;

                let image = resize_image(&image, &target_size);
                let label = resize_label(&label, &target_size);

                anyhow::Ok(FormattedExample::new(image, label, boxes))
            }
        });

        let stream =
            stream.and_then(|example| future::ready(ExampleBatch::from_examples(vec![example])));

        Box::pin(stream)
    }
}
