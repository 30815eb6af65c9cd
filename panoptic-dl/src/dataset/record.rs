use crate::common::*;

pub const IMAGE_DIR: &str = "images";
pub const LABEL_DIR: &str = "panoptic_proc";
pub const BOXES_DIR: &str = "panoptic_txt_weights";

const IMAGE_EXT: &str = ".png";
const LABEL_SUFFIX: &str = "_gtFine_instanceIds.png";
const BOXES_SUFFIX: &str = "_gtFine_instanceIds.txt";

/// An example identifier, one line of the input file list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExampleId(String);

impl ExampleId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Drop the trailing `_`-delimited token; label and box annotation
    /// files carry this shorter prefix in their names.
    pub fn strip(&self) -> Result<String> {
        let tokens: Vec<_> = self.0.split('_').collect();
        ensure!(
            tokens.len() >= 3,
            "malformed example identifier '{}': expected at least 3 '_'-delimited tokens",
            self.0
        );
        Ok(tokens[..tokens.len() - 1].join("_"))
    }
}

/// The per-example file paths derived from the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRecord {
    pub id: ExampleId,
    /// JPEG bytes behind a `.png` name, a quirk of the dataset packaging;
    /// the decoder guesses the format from the content.
    pub image_file: PathBuf,
    pub label_file: PathBuf,
    pub boxes_file: PathBuf,
}

impl FileRecord {
    pub fn resolve(dataset_dir: &Path, id: ExampleId) -> Result<Self> {
        let stripped = id.strip()?;

        let image_file = dataset_dir
            .join(IMAGE_DIR)
            .join(format!("{}{}", id.as_str(), IMAGE_EXT));
        let label_file = dataset_dir
            .join(LABEL_DIR)
            .join(format!("{}{}", stripped, LABEL_SUFFIX));
        let boxes_file = dataset_dir
            .join(BOXES_DIR)
            .join(format!("{}{}", stripped, BOXES_SUFFIX));

        Ok(Self {
            id,
            image_file,
            label_file,
            boxes_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_drops_last_token() {
        let id = ExampleId::new("aachen_000000_000019_leftImg8bit");
        assert_eq!(id.strip().unwrap(), "aachen_000000_000019");
    }

    #[test]
    fn strip_keeps_prefix_of_three_token_identifiers() {
        let id = ExampleId::new("city_000001_000001");
        assert_eq!(id.strip().unwrap(), "city_000001");
    }

    #[test]
    fn strip_rejects_short_identifiers() {
        assert!(ExampleId::new("city_000001").strip().is_err());
        assert!(ExampleId::new("city").strip().is_err());
    }

    #[test]
    fn resolve_derives_the_fixed_layout() {
        let record = FileRecord::resolve(
            Path::new("/data"),
            ExampleId::new("city_000001_000001"),
        )
        .unwrap();

        assert_eq!(
            record.image_file,
            PathBuf::from("/data/images/city_000001_000001.png")
        );
        assert_eq!(
            record.label_file,
            PathBuf::from("/data/panoptic_proc/city_000001_gtFine_instanceIds.png")
        );
        assert_eq!(
            record.boxes_file,
            PathBuf::from("/data/panoptic_txt_weights/city_000001_gtFine_instanceIds.txt")
        );
    }

    #[test]
    fn resolve_four_token_identifier() {
        let record = FileRecord::resolve(
            Path::new("/data"),
            ExampleId::new("aachen_000000_000019_leftImg8bit"),
        )
        .unwrap();

        assert_eq!(
            record.image_file,
            PathBuf::from("/data/images/aachen_000000_000019_leftImg8bit.png")
        );
        assert_eq!(
            record.label_file,
            PathBuf::from("/data/panoptic_proc/aachen_000000_000019_gtFine_instanceIds.png")
        );
        assert_eq!(
            record.boxes_file,
            PathBuf::from("/data/panoptic_txt_weights/aachen_000000_000019_gtFine_instanceIds.txt")
        );
    }
}
