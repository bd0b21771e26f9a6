use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::schema::SummaryRecord;
use crate::util::py_list;

/// Renders one record as a text block.
///
/// Layout:
///     {username}
///     Pets:{count}: {names}
///     Pluses:{count}: {names}
///     <blank line>
///
pub fn format_record(record: &SummaryRecord) -> String {
    format!(
        "{}\nPets:{}: {}\nPluses:{}: {}\n\n",
        record.username,
        record.pet_count(),
        py_list(&record.pets),
        record.plus_count(),
        py_list(&record.pluses),
    )
}

/// Append-only text sink.
///
/// Opened once per run. Every block is flushed before the next
/// member is fetched, so an interrupted run leaves a prefix of
/// complete blocks. Nothing is ever deduplicated or rewritten.
pub struct OutputSink {
    file: File,
    path: PathBuf,
}

impl OutputSink {
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .with_context(|| format!("failed to open {} for appending", path.display()))?;

        Ok(Self {
            file,
            path,
        })
    }

    pub async fn append(&mut self, record: &SummaryRecord) -> anyhow::Result<()> {
        let block = format_record(record);

        self.file
            .write_all(block.as_bytes())
            .await
            .with_context(|| format!("failed to write to {}", self.path.display()))?;
        self.file
            .flush()
            .await
            .with_context(|| format!("failed to flush {}", self.path.display()))?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(username: &str, pets: &[&str], pluses: &[&str]) -> SummaryRecord {
        SummaryRecord {
            username: username.to_string(),
            pets: pets.iter().map(|s| s.to_string()).collect(),
            pluses: pluses.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn formats_a_single_pet_block() {
        let block = format_record(&record("Zezima", &["Baby mole"], &[]));
        assert_eq!(block, "Zezima\nPets:1: ['Baby mole']\nPluses:0: []\n\n");
    }

    #[test]
    fn formats_names_with_apostrophes() {
        let block = format_record(&record(
            "Woox",
            &["Lil' zik", "Olmlet"],
            &["Metamorphic dust", "Guardian's eye"],
        ));
        assert_eq!(
            block,
            "Woox\nPets:2: [\"Lil' zik\", 'Olmlet']\nPluses:2: ['Metamorphic dust', \"Guardian's eye\"]\n\n"
        );
    }

    #[tokio::test]
    async fn appends_to_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");
        std::fs::write(&path, "earlier run\n\n").unwrap();

        let mut sink = OutputSink::open(&path).await.unwrap();
        sink.append(&record("Zezima", &[], &[])).await.unwrap();
        drop(sink);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "earlier run\n\nZezima\nPets:0: []\nPluses:0: []\n\n");
    }

    #[tokio::test]
    async fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("output.txt");

        assert!(OutputSink::open(&path).await.is_err());
    }
}
