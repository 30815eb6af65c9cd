use super::LabelMap;
use crate::common::*;

/// Resize the image to the target size with bilinear filtering.
///
/// `imageops` clamps float samples to the unit range, so the [-1, 1)
/// image shifts into [0, 1) around the filter; bilinear filtering is
/// affine, so the result is unchanged. Boxes need no update here: they
/// are normalized by the original size before any resize happens.
pub fn resize_image(image: &Rgb32FImage, size: &HW<usize>) -> Rgb32FImage {
    let mut shifted = image.clone();
    for value in shifted.iter_mut() {
        *value = (*value + 1.0) / 2.0;
    }

    let mut resized = imageops::resize(
        &shifted,
        size.w() as u32,
        size.h() as u32,
        FilterType::Triangle,
    );
    for value in resized.iter_mut() {
        *value = *value * 2.0 - 1.0;
    }

    resized
}

/// Resize a label map with nearest-neighbor sampling; interpolating
/// between ids would invent ids that exist nowhere in the mask.
pub fn resize_label(label: &LabelMap, size: &HW<usize>) -> LabelMap {
    imageops::resize(label, size.w() as u32, size.h() as u32, FilterType::Nearest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::collections::HashSet;

    #[test]
    fn bilinear_resize_hits_the_target_shape() {
        let image = Rgb32FImage::new(4, 4);
        let resized = resize_image(&image, &HW::from_hw([2usize, 6]));
        assert_eq!(resized.dimensions(), (6, 2));
    }

    #[test]
    fn bilinear_resize_keeps_negative_intensities() {
        let image = Rgb32FImage::from_pixel(4, 4, Rgb([-0.5, 0.25, -1.0]));
        let resized = resize_image(&image, &HW::from_hw([8usize, 2]));

        for pixel in resized.pixels() {
            assert!((pixel.0[0] + 0.5).abs() < 1e-6);
            assert!((pixel.0[1] - 0.25).abs() < 1e-6);
            assert!((pixel.0[2] + 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn nearest_resize_introduces_no_new_ids() {
        let label = LabelMap::from_fn(8, 8, |x, y| Luma([[0u16, 9, 17][((x + y) % 3) as usize]]));
        let original: HashSet<u16> = label.as_raw().iter().copied().collect();

        for size in [
            HW::from_hw([3usize, 5]),
            HW::from_hw([8usize, 8]),
            HW::from_hw([13usize, 21]),
        ] {
            let resized = resize_label(&label, &size);
            assert_eq!(resized.dimensions(), (size.w() as u32, size.h() as u32));
            let ids: HashSet<u16> = resized.as_raw().iter().copied().collect();
            assert!(ids.is_subset(&original));
        }
    }
}
