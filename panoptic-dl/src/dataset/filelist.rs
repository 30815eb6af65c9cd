use super::{ExampleId, FileRecord};
use crate::common::*;

/// The materialized example list: one record per non-blank line of the
/// file list.
#[derive(Debug, Clone)]
pub struct FileListDataset {
    records: Vec<Arc<FileRecord>>,
}

impl FileListDataset {
    pub async fn load(
        dataset_dir: impl AsRef<Path>,
        file_list: impl AsRef<Path>,
    ) -> Result<Self> {
        let dataset_dir = dataset_dir.as_ref();
        let file_list = file_list.as_ref();

        let text = tokio::fs::read_to_string(file_list)
            .await
            .with_context(|| format!("failed to read file list '{}'", file_list.display()))?;

        let records: Vec<_> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                let record = FileRecord::resolve(dataset_dir, ExampleId::new(line))?;
                anyhow::Ok(Arc::new(record))
            })
            .try_collect()?;

        ensure!(
            !records.is_empty(),
            "no examples found in '{}'",
            file_list.display()
        );

        info!(
            "loaded {} examples from '{}'",
            records.len(),
            file_list.display()
        );

        Ok(Self { records })
    }

    pub fn records(&self) -> &[Arc<FileRecord>] {
        &self.records
    }
}
