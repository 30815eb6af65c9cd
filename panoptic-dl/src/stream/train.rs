use super::{shuffle, ExampleBatch, NUM_DECODE_WORKERS, SHUFFLE_BUFFER_SIZE};
use crate::{
    common::*,
    config::{Config, PreprocessConfig},
    dataset::FileListDataset,
    processor::{
        random_flip_left_right, resize_image, resize_label, DecodedExample, FormattedExample,
    },
};

/// The training pipeline: decode and parse 30 examples in flight, resize,
/// random flip, padded batches, bounded shuffle, epoch repetition.
#[derive(Debug)]
pub struct TrainingStream {
    config: Arc<Config>,
    dataset: Arc<FileListDataset>,
}

impl TrainingStream {
    pub async fn new(config: Arc<Config>) -> Result<Self> {
        let dataset =
            FileListDataset::load(&config.dataset.dataset_dir, &config.dataset.file_list).await?;

        Ok(Self {
            config,
            dataset: Arc::new(dataset),
        })
    }

    /// The stream restarts from the file list on every epoch and never
    /// signals end-of-data; the consumer stops by step count.
    pub fn stream(&self) -> Pin<Box<dyn Stream<Item = Result<ExampleBatch>> + Send>> {
        let config = self.config.clone();
        let dataset = self.dataset.clone();

        let stream = stream::iter(0u64..)
            .flat_map(move |epoch| epoch_stream(config.clone(), dataset.clone(), epoch));

        Box::pin(stream)
    }
}

fn epoch_stream(
    config: Arc<Config>,
    dataset: Arc<FileListDataset>,
    epoch: u64,
) -> Pin<Box<dyn Stream<Item = Result<ExampleBatch>> + Send>> {
    let PreprocessConfig {
        image_height,
        image_width,
        random_flip,
        random_seed,
    } = config.preprocess;
    let batch_size = config.training.batch_size.get();
    let target_size = HW::from_hw([image_height.get(), image_width.get()]);

    let records: Vec<_> = dataset.records().to_vec();

    // decode images and parse annotations, 30 examples in flight
    let stream = stream::iter(records.into_iter().enumerate().map(anyhow::Ok)).try_par_then(
        NUM_DECODE_WORKERS,
        move |(index, record)| async move {
            let example =
                tokio::task::spawn_blocking(move || DecodedExample::load(&record)).await??;
            anyhow::Ok((index, example))
        },
    );

    // resize, flip and reshape to canonical form
    let stream = stream.try_par_then(None, move |(index, example)| {
        let target_size = target_size.clone();

        async move {
            let DecodedExample {
                image, label, boxes, ..
            } = example;

            let image = resize_image(&image, &target_size);
            let label = resize_label(&label, &target_size);

            let (image, label, boxes) = if random_flip {
                let mut rng = example_rng(random_seed, epoch, index);
                random_flip_left_right(image, label, boxes, &mut rng)
            } else {
                (image, label, boxes)
            };

            anyhow::Ok(FormattedExample::new(image, label, boxes))
        }
    });

    // padded batches; a short final batch is dropped
    let stream = stream
        .chunks(batch_size)
        .map(|results| results.into_iter().try_collect::<_, Vec<_>, _>())
        .try_filter(move |chunk| future::ready(chunk.len() == batch_size))
        .and_then(|chunk| future::ready(ExampleBatch::from_examples(chunk)));

    // decorrelate neighboring batches
    let rng = StdRng::seed_from_u64(random_seed.wrapping_add(epoch));
    Box::pin(shuffle(stream, SHUFFLE_BUFFER_SIZE, rng))
}

/// One rng per example, derived from the seed, the epoch and the example
/// index: runs are reproducible by construction while epochs still differ.
fn example_rng(seed: u64, epoch: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(seed ^ (epoch << 32) ^ index as u64)
}
