use crate::common::*;

pub static CONFIG_VERSION: Lazy<VersionReq> = Lazy::new(|| VersionReq::parse("0.1.0").unwrap());

/// Pipeline configuration, loaded from a JSON5 file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_version")]
    pub version: Version,
    pub dataset: DatasetConfig,
    pub preprocess: PreprocessConfig,
    pub training: TrainingConfig,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        let config = json5::from_str(&text)?;
        Ok(config)
    }
}

/// Dataset location options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// The directory holding `images/`, `panoptic_proc/` and
    /// `panoptic_txt_weights/`.
    pub dataset_dir: PathBuf,
    /// Newline-delimited list of example identifiers.
    pub file_list: PathBuf,
}

/// Per-example preprocessing options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Target height after resize.
    pub image_height: NonZeroUsize,
    /// Target width after resize.
    pub image_width: NonZeroUsize,
    /// Enable the synchronized random horizontal flip. Training only; the
    /// evaluation and inference streams never flip.
    pub random_flip: bool,
    /// Seed for every flip and shuffle decision.
    pub random_seed: u64,
}

/// Batch assembly options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Training batch size; evaluation and inference always batch by 1.
    pub batch_size: NonZeroUsize,
}

pub fn deserialize_version<'de, D>(deserializer: D) -> Result<Version, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let version = Version::parse(&text).map_err(|err| {
        D::Error::custom(format!(
            "failed to parse version number '{}': {:?}",
            text, err
        ))
    })?;

    if !CONFIG_VERSION.matches(&version) {
        return Err(D::Error::custom(format!(
            "incompatible version: get '{}', but it is incompatible with requirement '{}'",
            version, &*CONFIG_VERSION,
        )));
    }

    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_loads_json5() {
        let text = r#"{
            version: "0.1.0",
            dataset: {
                dataset_dir: "/data",
                file_list: "/data/train.txt",
            },
            preprocess: {
                image_height: 512,
                image_width: 1024,
                random_flip: true,
                random_seed: 42,
            },
            training: {
                batch_size: 4,
            },
        }"#;

        let config: Config = json5::from_str(text).unwrap();
        assert_eq!(config.dataset.dataset_dir, PathBuf::from("/data"));
        assert_eq!(config.preprocess.image_height.get(), 512);
        assert_eq!(config.preprocess.image_width.get(), 1024);
        assert!(config.preprocess.random_flip);
        assert_eq!(config.training.batch_size.get(), 4);
    }

    #[test]
    fn config_rejects_incompatible_version() {
        let text = r#"{
            version: "0.2.0",
            dataset: { dataset_dir: "/data", file_list: "/data/train.txt" },
            preprocess: { image_height: 2, image_width: 2, random_flip: false, random_seed: 0 },
            training: { batch_size: 1 },
        }"#;

        assert!(json5::from_str::<Config>(text).is_err());
    }

    #[test]
    fn config_rejects_zero_batch_size() {
        let text = r#"{
            version: "0.1.0",
            dataset: { dataset_dir: "/data", file_list: "/data/train.txt" },
            preprocess: { image_height: 2, image_width: 2, random_flip: false, random_seed: 0 },
            training: { batch_size: 0 },
        }"#;

        assert!(json5::from_str::<Config>(text).is_err());
    }
}
