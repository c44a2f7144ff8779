//! CSV storage for user-registered expense categories (`custom_categories.csv`).
//! Only custom names are stored; the default list is never written.

use anyhow::Result;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use super::connection::CsvConnection;
use crate::storage::traits::{CategoryStorage, StorageKey};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoryRecord {
    name: String,
}

#[derive(Clone)]
pub struct CategoryRepository {
    connection: CsvConnection,
}

impl CategoryRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_names(&self) -> Result<Vec<String>> {
        let Some(mut reader) = self.connection.open_reader(StorageKey::CustomCategories)? else {
            return Ok(Vec::new());
        };

        let mut names = Vec::new();
        for row in reader.deserialize::<CategoryRecord>() {
            names.push(row?.name);
        }
        Ok(names)
    }
}

impl CategoryStorage for CategoryRepository {
    fn load_custom_categories(&self) -> Vec<String> {
        match self.read_names() {
            Ok(names) => {
                debug!("Loaded {} custom categories", names.len());
                names
            }
            Err(e) => {
                warn!("Category snapshot is unreadable, using defaults only: {:#}", e);
                if let Err(e) = self.connection.set_aside(StorageKey::CustomCategories) {
                    error!("Failed to set aside category snapshot: {:#}", e);
                }
                Vec::new()
            }
        }
    }

    fn save_custom_categories(&self, names: &[String]) -> Result<()> {
        let records: Vec<CategoryRecord> = names
            .iter()
            .map(|name| CategoryRecord { name: name.clone() })
            .collect();
        self.connection.write_records(StorageKey::CustomCategories, &records)
    }
}
