use super::LabelMap;
use crate::{common::*, dataset::BoxLabel};

/// Flip decision threshold on the per-example uniform draw.
const FLIP_THRESHOLD: f64 = 0.5;

/// Mirror image, label map and boxes across the vertical axis.
pub fn flip_left_right(
    image: &Rgb32FImage,
    label: &LabelMap,
    boxes: &[BoxLabel],
) -> (Rgb32FImage, LabelMap, Vec<BoxLabel>) {
    let image = imageops::flip_horizontal(image);
    let label = imageops::flip_horizontal(label);
    let boxes = boxes
        .iter()
        .map(|annotation| Label {
            rect: annotation.rect.flip_left_right(),
            class: annotation.class,
            weight: annotation.weight,
        })
        .collect();

    (image, label, boxes)
}

/// Draw once per example and flip all three artifacts together or not at
/// all; independent draws would tear boxes away from pixels.
pub fn random_flip_left_right(
    image: Rgb32FImage,
    label: LabelMap,
    boxes: Vec<BoxLabel>,
    rng: &mut StdRng,
) -> (Rgb32FImage, LabelMap, Vec<BoxLabel>) {
    let draw: f64 = rng.gen();
    if draw > FLIP_THRESHOLD {
        flip_left_right(&image, &label, &boxes)
    } else {
        (image, label, boxes)
    }
}
