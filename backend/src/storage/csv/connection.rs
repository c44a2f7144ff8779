use anyhow::{Context, Result};
use csv::{Reader, ReaderBuilder, Writer};
use log::{debug, info, warn};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::storage::traits::StorageKey;

/// CsvConnection manages the data directory and the snapshot file of each key
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: Arc<PathBuf>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: Arc::new(base_path),
        })
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the snapshot file path for a storage key
    pub fn file_path(&self, key: StorageKey) -> PathBuf {
        self.base_directory.join(format!("{}.csv", key.name()))
    }

    /// Open a CSV reader over a key's snapshot, `None` when it was never written
    pub fn open_reader(&self, key: StorageKey) -> Result<Option<Reader<File>>> {
        let path = self.file_path(key);
        match File::open(&path) {
            Ok(file) => Ok(Some(ReaderBuilder::new().has_headers(true).from_reader(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to open {}", path.display())),
        }
    }

    /// Replace a key's snapshot with `records`
    ///
    /// Rows go to a temporary file first which is then renamed over the
    /// original, so readers see either the old or the new snapshot.
    pub fn write_records<T: Serialize>(&self, key: StorageKey, records: &[T]) -> Result<()> {
        let path = self.file_path(key);
        let temp_path = path.with_extension("csv.tmp");

        {
            let temp_file = File::create(&temp_path)
                .with_context(|| format!("Failed to create {}", temp_path.display()))?;
            let mut csv_writer = Writer::from_writer(BufWriter::new(temp_file));
            for record in records {
                csv_writer.serialize(record)?;
            }
            csv_writer.flush()?;
        }

        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }

    /// Path an unreadable snapshot is moved to, `<name>.csv.corrupt`
    pub fn set_aside_path(&self, key: StorageKey) -> PathBuf {
        self.file_path(key).with_extension("csv.corrupt")
    }

    /// Move a key's unreadable snapshot out of the way before it is overwritten
    ///
    /// Returns the new location, or `None` when there was no file. An older
    /// set-aside copy of the same key is replaced.
    pub fn set_aside(&self, key: StorageKey) -> Result<Option<PathBuf>> {
        let path = self.file_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let aside = self.set_aside_path(key);
        fs::rename(&path, &aside)
            .with_context(|| format!("Failed to move {} to {}", path.display(), aside.display()))?;

        warn!("Moved unreadable {} to {}", path.display(), aside.display());
        Ok(Some(aside))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Row {
        name: String,
        value: f64,
    }

    #[test]
    fn test_new_creates_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let connection = CsvConnection::new(&nested).unwrap();

        assert!(nested.exists());
        assert_eq!(connection.base_directory(), nested.as_path());
    }

    #[test]
    fn test_file_paths_are_fixed_per_key() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        assert_eq!(connection.file_path(StorageKey::Goals), temp_dir.path().join("goals.csv"));
        assert_eq!(connection.file_path(StorageKey::Expenses), temp_dir.path().join("expenses.csv"));
        assert_eq!(
            connection.file_path(StorageKey::CustomCategories),
            temp_dir.path().join("custom_categories.csv")
        );
    }

    #[test]
    fn test_open_reader_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        assert!(connection.open_reader(StorageKey::Goals).unwrap().is_none());
    }

    #[test]
    fn test_write_then_read_records() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let rows = vec![
            Row { name: "a".to_string(), value: 1.5 },
            Row { name: "b, with comma".to_string(), value: 2.0 },
        ];

        connection.write_records(StorageKey::Expenses, &rows).unwrap();

        let mut reader = connection.open_reader(StorageKey::Expenses).unwrap().unwrap();
        let loaded: Vec<Row> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(loaded, rows);
        assert!(!temp_dir.path().join("expenses.csv.tmp").exists());
    }

    #[test]
    fn test_set_aside_keeps_the_unreadable_file() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        assert!(connection.set_aside(StorageKey::Goals).unwrap().is_none());

        fs::write(connection.file_path(StorageKey::Goals), "broken").unwrap();
        let aside = connection.set_aside(StorageKey::Goals).unwrap();

        assert_eq!(aside, Some(temp_dir.path().join("goals.csv.corrupt")));
        assert!(!connection.file_path(StorageKey::Goals).exists());
        assert_eq!(fs::read_to_string(temp_dir.path().join("goals.csv.corrupt")).unwrap(), "broken");
    }
}
