pub mod store;
pub mod tables;

use redb::{Database, ReadableTable};
use std::path::Path;
use std::sync::Arc;

use crate::constants::SCHEMA_VERSION;
use crate::error::StoreError;

pub use store::{RecordStore, RedbStore};

/// Database handle type (Arc-wrapped for sharing across handlers)
pub type Db = Arc<Database>;

/// Open or create the redb database at the given path
///
/// Creates all required tables and stamps the schema version on first run.
/// A file written by another schema generation is refused.
pub fn open_database(path: impl AsRef<Path>) -> Result<Db, StoreError> {
    tracing::info!("Opening database at: {:?}", path.as_ref());

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                StoreError::Database(redb::Error::Io(e))
            })?;
        }
    }

    let db = Database::create(path)?;

    let write_txn = db.begin_write()?;
    {
        // Create tables if they don't exist by opening them
        let _ = write_txn.open_table(tables::USERS)?;
        let _ = write_txn.open_table(tables::USERS_BY_EMAIL)?;

        let mut meta = write_txn.open_table(tables::META)?;
        let found = meta
            .get(tables::META_SCHEMA_VERSION)?
            .map(|v| v.value());
        match found {
            None => {
                meta.insert(tables::META_SCHEMA_VERSION, SCHEMA_VERSION)?;
                meta.insert(tables::META_NEXT_ID, 1)?;
            }
            Some(version) if version != SCHEMA_VERSION => {
                tracing::error!(
                    "Database schema version {} is not supported (expected {})",
                    version,
                    SCHEMA_VERSION
                );
                return Err(StoreError::SchemaMismatch {
                    found: version,
                    expected: SCHEMA_VERSION,
                });
            }
            Some(_) => {}
        }
    }
    write_txn.commit()?;

    tracing::info!("Database initialized successfully");

    Ok(Arc::new(db))
}
