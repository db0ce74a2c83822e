use std::sync::Arc;

use super::types::{CleanArgs, StorageKind};
use crate::storage::{MemoryStorage, SqliteStorage, Storage, StorageError};

impl CleanArgs {
    /// Opens the storage backend selected on the command line.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the sqlite database cannot be opened
    pub fn open_storage(&self) -> Result<Arc<dyn Storage>, StorageError> {
        Ok(match self.db_type {
            StorageKind::Memory => Arc::new(MemoryStorage::new()),
            StorageKind::Sqlite => Arc::new(SqliteStorage::open(&self.db_name)?),
        })
    }
}
