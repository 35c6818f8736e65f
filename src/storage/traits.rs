//! Storage trait for exported results

use crate::models::ExportRecord;
use crate::Result;
use std::path::PathBuf;

/// Trait for result persistence backends
///
/// The persisted record is the export wire contract: all accumulated
/// outcomes plus their summary, serialized as UTF-8 text with stable
/// field names.
pub trait ResultStore: Send + Sync {
    /// Persists an export record under the given name
    ///
    /// # Arguments
    ///
    /// * `record` - The outcomes and summary to persist
    /// * `name` - Target name (a file extension is added if missing)
    ///
    /// # Returns
    ///
    /// The location the record was written to
    fn save(&self, record: &ExportRecord, name: &str) -> Result<PathBuf>;

    /// Loads a previously persisted export record
    fn load(&self, name: &str) -> Result<ExportRecord>;

    /// Returns true if a record exists under the given name
    fn exists(&self, name: &str) -> bool;

    /// Deletes a persisted record
    fn delete(&self, name: &str) -> Result<()>;

    /// Lists all persisted record names, sorted
    fn list(&self) -> Result<Vec<String>>;
}
