//! JSON file storage

use crate::models::ExportRecord;
use crate::storage::ResultStore;
use crate::{Result, ScrapeError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed result store writing pretty-printed JSON
///
/// The storage directory is created on construction; creation is
/// idempotent, and nothing touches the filesystem before the composition
/// root builds the store.
pub struct JsonStorage {
    storage_dir: PathBuf,
}

impl JsonStorage {
    /// Creates a store rooted at the given directory, creating it if needed
    pub fn new(storage_dir: impl AsRef<Path>) -> Result<Self> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        debug!("JSON storage initialized at: {}", storage_dir.display());
        Ok(Self { storage_dir })
    }

    /// Resolves a record name to its full path, appending `.json` if absent
    ///
    /// An absolute name is used as-is.
    fn filepath(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() {
            return Err(ScrapeError::InvalidInput(
                "Filename cannot be empty".to_string(),
            ));
        }

        let name = if name.ends_with(".json") {
            name.to_string()
        } else {
            format!("{}.json", name)
        };

        Ok(self.storage_dir.join(name))
    }
}

impl ResultStore for JsonStorage {
    fn save(&self, record: &ExportRecord, name: &str) -> Result<PathBuf> {
        let filepath = self.filepath(name)?;

        if let Some(parent) = filepath.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&filepath, json)?;

        info!("Results exported to: {}", filepath.display());
        Ok(filepath)
    }

    fn load(&self, name: &str) -> Result<ExportRecord> {
        let filepath = self.filepath(name)?;

        if !filepath.exists() {
            return Err(ScrapeError::NotFound(filepath.display().to_string()));
        }

        let content = std::fs::read_to_string(&filepath)?;
        let record = serde_json::from_str(&content)?;

        info!("Results loaded from: {}", filepath.display());
        Ok(record)
    }

    fn exists(&self, name: &str) -> bool {
        self.filepath(name).map(|p| p.exists()).unwrap_or(false)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let filepath = self.filepath(name)?;

        if !filepath.exists() {
            return Err(ScrapeError::NotFound(filepath.display().to_string()));
        }

        std::fs::remove_file(&filepath)?;
        info!("File deleted: {}", filepath.display());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in std::fs::read_dir(&self.storage_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScrapeOutcome, ScrapeSummary};
    use tempfile::TempDir;

    fn sample_record() -> ExportRecord {
        let outcomes = vec![
            ScrapeOutcome::ok("https://reddit.com/r/rust", 4),
            ScrapeOutcome::failed("https://medium.com/x", "Connection failed"),
        ];
        let summary = ScrapeSummary::from_outcomes(&outcomes);
        ExportRecord {
            results: outcomes,
            summary,
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path()).unwrap();

        let path = storage.save(&sample_record(), "results").unwrap();
        assert!(path.ends_with("results.json"));

        let loaded = storage.load("results").unwrap();
        assert_eq!(loaded.results.len(), 2);
        assert_eq!(loaded.summary.total_urls, 2);
        assert_eq!(loaded.summary.successful, 1);
    }

    #[test]
    fn test_extension_appended_once() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path()).unwrap();

        let path = storage.save(&sample_record(), "results.json").unwrap();
        assert!(path.ends_with("results.json"));
        assert!(!path.display().to_string().ends_with(".json.json"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path()).unwrap();

        let result = storage.save(&sample_record(), "");
        assert!(matches!(result, Err(ScrapeError::InvalidInput(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path()).unwrap();

        let result = storage.load("nope");
        assert!(matches!(result, Err(ScrapeError::NotFound(_))));
    }

    #[test]
    fn test_exists_and_delete() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path()).unwrap();

        assert!(!storage.exists("results"));
        storage.save(&sample_record(), "results").unwrap();
        assert!(storage.exists("results"));

        storage.delete("results").unwrap();
        assert!(!storage.exists("results"));
        assert!(matches!(
            storage.delete("results"),
            Err(ScrapeError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_sorted() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path()).unwrap();

        storage.save(&sample_record(), "zebra").unwrap();
        storage.save(&sample_record(), "apple").unwrap();

        assert_eq!(storage.list().unwrap(), vec!["apple.json", "zebra.json"]);
    }

    #[test]
    fn test_init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data");

        JsonStorage::new(&nested).unwrap();
        JsonStorage::new(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
