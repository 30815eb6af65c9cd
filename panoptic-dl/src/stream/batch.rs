use crate::{
    common::*,
    processor::{image_to_array, DecodedInferenceExample, FormattedExample},
};
use ndarray::{Array, Dimension, RemoveAxis};
use num_traits::Zero;

/// One batch of training/evaluation examples, zero-padded along the box
/// dimension.
#[derive(Debug, Clone)]
pub struct ExampleBatch {
    /// (batch, height, width, 3).
    pub images: Array4<f32>,
    /// (batch, height, width).
    pub labels: Array3<i32>,
    /// (batch, max boxes, 4).
    pub boxes: Array3<f32>,
    /// (batch, max boxes, 1).
    pub classes: Array3<i32>,
    /// (batch, max boxes, 1).
    pub weights: Array3<f32>,
    /// (batch, 1).
    pub num_boxes: Array2<i32>,
}

impl ExampleBatch {
    /// Stack examples along a new batch axis, padding box-sized arrays to
    /// the longest box list in the batch.
    pub fn from_examples(examples: Vec<FormattedExample>) -> Result<Self> {
        ensure!(!examples.is_empty(), "cannot assemble an empty batch");

        let (images, labels, boxes, classes, weights, num_boxes) = examples
            .into_iter()
            .map(|example| {
                let FormattedExample {
                    image,
                    label,
                    boxes,
                    classes,
                    weights,
                    num_boxes,
                } = example;
                (image, label, boxes, classes, weights, num_boxes)
            })
            .unzip_n_vec();

        let max_boxes = boxes.iter().map(|array| array.nrows()).fold(0, usize::max);

        let boxes: Vec<_> = boxes
            .into_iter()
            .map(|array| pad_rows(array, max_boxes))
            .collect();
        let classes: Vec<_> = classes
            .into_iter()
            .map(|array| pad_rows(array, max_boxes))
            .collect();
        let weights: Vec<_> = weights
            .into_iter()
            .map(|array| pad_rows(array, max_boxes))
            .collect();

        Ok(Self {
            images: stack_new_axis(&images)?,
            labels: stack_new_axis(&labels)?,
            boxes: stack_new_axis(&boxes)?,
            classes: stack_new_axis(&classes)?,
            weights: stack_new_axis(&weights)?,
            num_boxes: stack_new_axis(&num_boxes)?,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.images.shape()[0]
    }

    pub fn max_boxes(&self) -> usize {
        self.boxes.shape()[1]
    }
}

/// One batch of inference examples: normalized images plus the source path
/// and raw raster per example.
#[derive(Debug, Clone)]
pub struct InferenceBatch {
    /// (batch, height, width, 3).
    pub images: Array4<f32>,
    pub image_files: Vec<PathBuf>,
    pub raw_images: Vec<DynamicImage>,
}

impl InferenceBatch {
    pub fn from_examples(examples: Vec<DecodedInferenceExample>) -> Result<Self> {
        ensure!(!examples.is_empty(), "cannot assemble an empty batch");

        let (images, image_files, raw_images) = examples
            .into_iter()
            .map(|example| {
                let DecodedInferenceExample {
                    image,
                    image_file,
                    raw_image,
                } = example;
                (image_to_array(&image), image_file, raw_image)
            })
            .unzip_n_vec();

        Ok(Self {
            images: stack_new_axis(&images)?,
            image_files,
            raw_images,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.images.shape()[0]
    }
}

fn stack_new_axis<A, D>(arrays: &[Array<A, D>]) -> Result<Array<A, D::Larger>>
where
    A: Clone,
    D: Dimension,
    D::Larger: RemoveAxis,
{
    let views: Vec<_> = arrays.iter().map(|array| array.view()).collect();
    Ok(ndarray::stack(Axis(0), &views)?)
}

fn pad_rows<A>(array: Array2<A>, rows: usize) -> Array2<A>
where
    A: Copy + Zero,
{
    if array.nrows() == rows {
        return array;
    }

    let mut padded = Array2::zeros((rows, array.ncols()));
    padded.slice_mut(s![..array.nrows(), ..]).assign(&array);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::LabelMap;
    use image::Luma;
    use ndarray::arr2;

    fn example(num_boxes: usize) -> FormattedExample {
        let image = Rgb32FImage::new(4, 2);
        let label = LabelMap::from_fn(4, 2, |_, _| Luma([5]));
        let boxes = (0..num_boxes)
            .map(|index| Label {
                rect: TLBR::from_tlbr([r64(0.0), r64(0.0), r64(0.5), r64(0.1 * (index + 1) as f64)]),
                class: index as i32,
                weight: r64(1.0),
            })
            .collect();

        FormattedExample::new(image, label, boxes)
    }

    #[test]
    fn batch_pads_boxes_to_the_longest_list() {
        let batch = ExampleBatch::from_examples(vec![example(1), example(3)]).unwrap();

        assert_eq!(batch.batch_size(), 2);
        assert_eq!(batch.max_boxes(), 3);
        assert_eq!(batch.images.dim(), (2, 2, 4, 3));
        assert_eq!(batch.labels.dim(), (2, 2, 4));
        assert_eq!(batch.boxes.dim(), (2, 3, 4));
        assert_eq!(batch.classes.dim(), (2, 3, 1));
        assert_eq!(batch.weights.dim(), (2, 3, 1));
        assert_eq!(batch.num_boxes, arr2(&[[1], [3]]));

        // rows past the true count are zero-padded
        for column in 0..4 {
            assert_eq!(batch.boxes[[0, 1, column]], 0.0);
            assert_eq!(batch.boxes[[0, 2, column]], 0.0);
        }
        assert_eq!(batch.weights[[0, 1, 0]], 0.0);
        assert_eq!(batch.weights[[1, 2, 0]], 1.0);
    }

    #[test]
    fn zero_box_example_batches_with_the_dummy_record() {
        let batch = ExampleBatch::from_examples(vec![example(0)]).unwrap();

        assert_eq!(batch.num_boxes, arr2(&[[1]]));
        assert_eq!(batch.classes, ndarray::arr3(&[[[-1]]]));
        assert_eq!(batch.boxes[[0, 0, 2]], 0.1);
        assert_eq!(batch.boxes[[0, 0, 3]], 0.1);
    }

    #[test]
    fn empty_batch_fails() {
        assert!(ExampleBatch::from_examples(vec![]).is_err());
    }
}
