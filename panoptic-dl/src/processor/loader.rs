use crate::{
    common::*,
    dataset::{load_annotations, BoxLabel, FileRecord},
};

/// A single-channel map of raw instance/semantic ids. Ids are not
/// intensities; 8-bit sources widen without value scaling.
pub type LabelMap = ImageBuffer<Luma<u16>, Vec<u16>>;

/// The assumed global mean when centering intensities from [0, 1) to
/// [-1, 1).
const INTENSITY_MEAN: f32 = 0.5;

/// A decoded training/evaluation example before spatial transforms.
#[derive(Debug, Clone)]
pub struct DecodedExample {
    pub image: Rgb32FImage,
    pub label: LabelMap,
    pub boxes: Vec<BoxLabel>,
    /// Image size before any resize. Box normalization divides by this,
    /// never by the target size.
    pub orig_size: HW<usize>,
}

impl DecodedExample {
    pub fn load(record: &FileRecord) -> Result<Self> {
        let raster = read_raster(&record.image_file)?;
        let image = normalize_image(&raster);
        let orig_size = HW::from_hw([image.height() as usize, image.width() as usize]);

        let label = read_label_map(&record.label_file)?;
        let boxes = load_annotations(&record.boxes_file, &orig_size)?;

        Ok(Self {
            image,
            label,
            boxes,
            orig_size,
        })
    }
}

/// A decoded inference example. The raw decoded raster rides along
/// untouched for downstream visualization.
#[derive(Debug, Clone)]
pub struct DecodedInferenceExample {
    pub image: Rgb32FImage,
    pub image_file: PathBuf,
    pub raw_image: DynamicImage,
}

impl DecodedInferenceExample {
    pub fn load(record: &FileRecord) -> Result<Self> {
        let raw_image = read_raster(&record.image_file)?;
        let image = normalize_image(&raw_image);

        Ok(Self {
            image,
            image_file: record.image_file.clone(),
            raw_image,
        })
    }
}

/// Decode a raster, guessing the format from the content; image files
/// carry JPEG bytes behind a `.png` name.
fn read_raster(path: &Path) -> Result<DynamicImage> {
    image::io::Reader::open(path)
        .with_context(|| format!("failed to open '{}'", path.display()))?
        .with_guessed_format()
        .with_context(|| {
            format!(
                "failed to determine the image file format: '{}'",
                path.display()
            )
        })?
        .decode()
        .with_context(|| format!("failed to decode image file '{}'", path.display()))
}

/// Convert a decoded raster to 3-channel floats in [-1, 1). The RGB
/// conversion broadcasts greyscale sources across the three channels.
fn normalize_image(raster: &DynamicImage) -> Rgb32FImage {
    let rgb = raster.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut image = Rgb32FImage::new(width, height);
    for (src, dst) in rgb.pixels().zip(image.pixels_mut()) {
        for channel in 0..3 {
            let value = f32::from(src.0[channel]) / f32::from(u8::MAX);
            dst.0[channel] = (value - INTENSITY_MEAN) / INTENSITY_MEAN;
        }
    }

    image
}

fn read_label_map(path: &Path) -> Result<LabelMap> {
    let raster = read_raster(path)?;

    let label = match raster {
        DynamicImage::ImageLuma8(map) => LabelMap::from_fn(map.width(), map.height(), |x, y| {
            Luma([u16::from(map.get_pixel(x, y).0[0])])
        }),
        DynamicImage::ImageLuma16(map) => map,
        other => bail!(
            "label mask '{}' must be single-channel, but found {:?}",
            path.display(),
            other.color()
        ),
    };

    Ok(label)
}
