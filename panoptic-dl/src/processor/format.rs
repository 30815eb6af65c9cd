use super::LabelMap;
use crate::{common::*, dataset::BoxLabel};

/// The placeholder annotation substituted when an example has no boxes, so
/// batch shapes never collapse along the box dimension.
pub fn dummy_box() -> BoxLabel {
    Label {
        rect: TLBR::from_tlbr([r64(0.0), r64(0.0), r64(0.1), r64(0.1)]),
        class: -1,
        weight: r64(0.0),
    }
}

/// A fully transformed example in canonical shapes, ready for batching.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedExample {
    /// (height, width, 3) in [-1, 1).
    pub image: Array3<f32>,
    /// (height, width) instance/semantic ids.
    pub label: Array2<i32>,
    /// (boxes, 4) normalized TLBR coordinates.
    pub boxes: Array2<f32>,
    /// (boxes, 1) class ids.
    pub classes: Array2<i32>,
    /// (boxes, 1) loss weights.
    pub weights: Array2<f32>,
    /// Length-1 vector holding the substituted-or-true box count.
    pub num_boxes: Array1<i32>,
}

impl FormattedExample {
    pub fn new(image: Rgb32FImage, label: LabelMap, boxes: Vec<BoxLabel>) -> Self {
        // the box count is only known per example, at runtime
        let boxes = if boxes.is_empty() {
            vec![dummy_box()]
        } else {
            boxes
        };
        let num_boxes = boxes.len() as i32;

        let (rects, classes, weights) = box_arrays(&boxes);

        Self {
            image: image_to_array(&image),
            label: label_to_array(&label),
            boxes: rects,
            classes,
            weights,
            num_boxes: Array1::from_elem(1, num_boxes),
        }
    }
}

/// Interleaved RGB rows map directly onto a (height, width, 3) array.
pub fn image_to_array(image: &Rgb32FImage) -> Array3<f32> {
    let (width, height) = image.dimensions();
    Array3::from_shape_vec((height as usize, width as usize, 3), image.as_raw().clone()).unwrap()
}

fn label_to_array(label: &LabelMap) -> Array2<i32> {
    let (width, height) = label.dimensions();
    let ids = label.as_raw().iter().map(|&id| i32::from(id)).collect();
    Array2::from_shape_vec((height as usize, width as usize), ids).unwrap()
}

fn box_arrays(boxes: &[BoxLabel]) -> (Array2<f32>, Array2<i32>, Array2<f32>) {
    let count = boxes.len();
    let mut rects = Array2::zeros((count, 4));
    let mut classes = Array2::zeros((count, 1));
    let mut weights = Array2::zeros((count, 1));

    for (index, annotation) in boxes.iter().enumerate() {
        let [t, l, b, r] = annotation.rect.tlbr();
        rects[[index, 0]] = t.raw() as f32;
        rects[[index, 1]] = l.raw() as f32;
        rects[[index, 2]] = b.raw() as f32;
        rects[[index, 3]] = r.raw() as f32;
        classes[[index, 0]] = annotation.class;
        weights[[index, 0]] = annotation.weight.raw() as f32;
    }

    (rects, classes, weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use ndarray::arr2;

    fn blank_inputs(width: u32, height: u32) -> (Rgb32FImage, LabelMap) {
        let image = Rgb32FImage::new(width, height);
        let label = LabelMap::from_fn(width, height, |_, _| Luma([0]));
        (image, label)
    }

    #[test]
    fn empty_boxes_get_one_dummy_record() {
        let (image, label) = blank_inputs(2, 2);
        let formatted = FormattedExample::new(image, label, vec![]);

        assert_eq!(formatted.num_boxes.as_slice().unwrap(), &[1]);
        assert_eq!(formatted.boxes, arr2(&[[0.0, 0.0, 0.1, 0.1]]));
        assert_eq!(formatted.classes, arr2(&[[-1]]));
        assert_eq!(formatted.weights, arr2(&[[0.0]]));
    }

    #[test]
    fn real_boxes_keep_the_true_count() {
        let (image, label) = blank_inputs(2, 2);
        let boxes = vec![
            Label {
                rect: TLBR::from_tlbr([r64(0.0), r64(0.0), r64(0.5), r64(0.5)]),
                class: 4,
                weight: r64(2.0),
            },
            Label {
                rect: TLBR::from_tlbr([r64(0.25), r64(0.25), r64(1.0), r64(0.75)]),
                class: 9,
                weight: r64(1.0),
            },
        ];

        let formatted = FormattedExample::new(image, label, boxes);

        assert_eq!(formatted.num_boxes.as_slice().unwrap(), &[2]);
        assert_eq!(formatted.boxes.dim(), (2, 4));
        assert_eq!(formatted.classes, arr2(&[[4], [9]]));
        assert_eq!(formatted.weights, arr2(&[[2.0], [1.0]]));
        assert_eq!(formatted.boxes.row(1).to_vec(), vec![0.25, 0.25, 1.0, 0.75]);
    }

    #[test]
    fn image_array_is_height_major() {
        let image = Rgb32FImage::from_fn(3, 2, |x, y| Rgb([x as f32, y as f32, 0.0]));
        let label = LabelMap::from_fn(3, 2, |x, y| Luma([(x + 10 * y) as u16]));

        let formatted = FormattedExample::new(image, label, vec![dummy_box()]);

        assert_eq!(formatted.image.dim(), (2, 3, 3));
        assert_eq!(formatted.image[[0, 2, 0]], 2.0);
        assert_eq!(formatted.image[[1, 0, 1]], 1.0);
        assert_eq!(formatted.label.dim(), (2, 3));
        assert_eq!(formatted.label[[1, 2]], 12);
    }
}
