//! Flat-file record store
//!
//! Records live in a CSV file (`exercise_log.csv`, header row + data rows),
//! the catalog in a newline-delimited text file. Single-user: there is no
//! owner column. Concurrent sessions against the same files race
//! (last writer wins); a single interactive session is assumed.

use crate::catalog::{self, CatalogAdd, DEFAULT_EXERCISES};
use crate::csv;
use crate::records::SetRecord;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Catalog filename under the root folder
pub const OPTIONS_FILENAME: &str = "exercise_options.txt";

/// Record store over flat files in the root folder
pub struct FileStore {
    records_path: PathBuf,
    catalog_path: PathBuf,
}

impl FileStore {
    /// Store files under `root` (must already exist)
    pub fn new(root: &Path) -> Self {
        Self {
            records_path: root.join(csv::EXPORT_FILENAME),
            catalog_path: root.join(OPTIONS_FILENAME),
        }
    }

    pub async fn load(&self) -> Result<Vec<SetRecord>> {
        if !self.records_path.exists() {
            return Ok(Vec::new());
        }
        let text = tokio::fs::read_to_string(&self.records_path).await?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        csv::parse_portable_text(&text)
    }

    /// Append rows to the log file, writing the header first on creation
    ///
    /// Genuinely additive: existing rows are never rewritten here.
    pub async fn append(&self, records: &[SetRecord]) -> Result<()> {
        let mut chunk = String::new();
        if !self.records_path.exists() {
            chunk.push_str(&csv::header_line());
            chunk.push('\n');
        }
        for record in records {
            chunk.push_str(&csv::format_row(record));
            chunk.push('\n');
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.records_path)
            .await?;
        file.write_all(chunk.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    pub async fn delete_at(&self, index: usize) -> Result<()> {
        let mut records = self.load().await?;
        if index >= records.len() {
            return Err(Error::NotFound(format!("no record at index {}", index)));
        }
        records.remove(index);
        tokio::fs::write(&self.records_path, csv::to_portable_text(&records)).await?;
        Ok(())
    }

    pub async fn delete_all(&self) -> Result<()> {
        tokio::fs::write(&self.records_path, csv::to_portable_text(&[])).await?;
        Ok(())
    }

    pub async fn catalog(&self) -> Result<Vec<String>> {
        self.seed_catalog_if_missing().await?;
        let text = tokio::fs::read_to_string(&self.catalog_path).await?;
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub async fn catalog_add(&self, name: &str) -> Result<CatalogAdd> {
        let name = catalog::normalize_name(name)?;
        if self.catalog().await?.contains(&name) {
            return Ok(CatalogAdd::AlreadyExists);
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.catalog_path)
            .await?;
        file.write_all(format!("{}\n", name).as_bytes()).await?;
        file.flush().await?;
        Ok(CatalogAdd::Added)
    }

    async fn seed_catalog_if_missing(&self) -> Result<()> {
        if self.catalog_path.exists() {
            return Ok(());
        }
        let mut seed = DEFAULT_EXERCISES.join("\n");
        seed.push('\n');
        tokio::fs::write(&self.catalog_path, seed).await?;
        info!("Seeded default exercise catalog: {}", self.catalog_path.display());
        Ok(())
    }
}
