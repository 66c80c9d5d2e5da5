//! Record store: the port the service talks to and its redb adapter.

use async_trait::async_trait;
use redb::{ReadableTable, WriteTransaction};

use crate::db::{tables, Db};
use crate::error::StoreError;
use crate::models::{User, UserId, UserRecord};

const BINCODE_CONFIG: bincode::config::Configuration = bincode::config::standard();

/// Persistence port for user records.
///
/// Every mutating call is atomic: a failed uniqueness or existence check
/// leaves the collection exactly as it was.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every stored record; callers must not rely on the order.
    async fn list_all(&self) -> Result<Vec<User>, StoreError>;

    async fn find(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Exact lookup on the unique email index.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Insert a record and return its new id.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] if `email` is already indexed.
    async fn create(&self, name: &str, email: &str) -> Result<UserId, StoreError>;

    /// Replace name and email of an existing record.
    ///
    /// Fails with [`StoreError::NotFound`] for an unknown id and with
    /// [`StoreError::DuplicateEmail`] when `email` belongs to a different id.
    async fn update(&self, id: UserId, name: &str, email: &str) -> Result<(), StoreError>;

    /// Remove a record. Deleting an unknown id is a no-op.
    async fn delete(&self, id: UserId) -> Result<(), StoreError>;
}

/// [`RecordStore`] backed by the embedded redb file
#[derive(Clone)]
pub struct RedbStore {
    db: Db,
}

impl RedbStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

fn encode(record: &UserRecord) -> Result<Vec<u8>, StoreError> {
    Ok(bincode::serde::encode_to_vec(record, BINCODE_CONFIG)?)
}

fn decode(bytes: &[u8]) -> Result<UserRecord, StoreError> {
    let (record, _) = bincode::serde::decode_from_slice(bytes, BINCODE_CONFIG)?;
    Ok(record)
}

/// Take the next id from the counter in `meta` and advance it
fn next_id(write_txn: &WriteTransaction) -> Result<UserId, StoreError> {
    let mut meta = write_txn.open_table(tables::META)?;
    let id = meta
        .get(tables::META_NEXT_ID)?
        .map(|v| v.value())
        .unwrap_or(1);
    meta.insert(tables::META_NEXT_ID, id + 1)?;
    Ok(id)
}

#[async_trait]
impl RecordStore for RedbStore {
    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let db = self.db.clone();

        tokio::task::spawn_blocking(move || -> Result<Vec<User>, StoreError> {
            let read_txn = db.begin_read()?;
            let users = read_txn.open_table(tables::USERS)?;

            let mut result = Vec::new();
            for entry in users.iter()? {
                let (id, bytes) = entry?;
                result.push(User::from_record(id.value(), decode(bytes.value())?));
            }

            Ok(result)
        })
        .await?
    }

    async fn find(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let db = self.db.clone();

        tokio::task::spawn_blocking(move || -> Result<Option<User>, StoreError> {
            let read_txn = db.begin_read()?;
            let users = read_txn.open_table(tables::USERS)?;

            let record = users
                .get(id)?
                .map(|bytes| decode(bytes.value()))
                .transpose()?;

            Ok(record.map(|r| User::from_record(id, r)))
        })
        .await?
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let db = self.db.clone();
        let email = email.to_string();

        tokio::task::spawn_blocking(move || -> Result<Option<User>, StoreError> {
            let read_txn = db.begin_read()?;
            let by_email = read_txn.open_table(tables::USERS_BY_EMAIL)?;
            let users = read_txn.open_table(tables::USERS)?;

            let Some(id) = by_email.get(email.as_str())?.map(|v| v.value()) else {
                return Ok(None);
            };

            let record = users
                .get(id)?
                .map(|bytes| decode(bytes.value()))
                .transpose()?;

            Ok(record.map(|r| User::from_record(id, r)))
        })
        .await?
    }

    async fn create(&self, name: &str, email: &str) -> Result<UserId, StoreError> {
        let db = self.db.clone();
        let record = UserRecord {
            name: name.to_string(),
            email: email.to_string(),
        };

        let id = tokio::task::spawn_blocking(move || -> Result<UserId, StoreError> {
            let write_txn = db.begin_write()?;
            let id;
            {
                let mut by_email = write_txn.open_table(tables::USERS_BY_EMAIL)?;
                if by_email.get(record.email.as_str())?.is_some() {
                    tracing::info!("Email already registered");
                    return Err(StoreError::DuplicateEmail);
                }

                id = next_id(&write_txn)?;
                let bytes = encode(&record)?;

                let mut users = write_txn.open_table(tables::USERS)?;
                users.insert(id, bytes.as_slice())?;
                by_email.insert(record.email.as_str(), id)?;
            }
            write_txn.commit()?;

            Ok(id)
        })
        .await??;

        tracing::info!("User {} created", id);

        Ok(id)
    }

    async fn update(&self, id: UserId, name: &str, email: &str) -> Result<(), StoreError> {
        let db = self.db.clone();
        let record = UserRecord {
            name: name.to_string(),
            email: email.to_string(),
        };

        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let write_txn = db.begin_write()?;
            {
                let mut users = write_txn.open_table(tables::USERS)?;
                let current = users
                    .get(id)?
                    .map(|bytes| decode(bytes.value()))
                    .transpose()?
                    .ok_or(StoreError::NotFound)?;

                let mut by_email = write_txn.open_table(tables::USERS_BY_EMAIL)?;
                let owner = by_email.get(record.email.as_str())?.map(|v| v.value());
                if owner.is_some_and(|owner| owner != id) {
                    tracing::info!("Email of user {} collides with another user", id);
                    return Err(StoreError::DuplicateEmail);
                }

                if current.email != record.email {
                    by_email.remove(current.email.as_str())?;
                    by_email.insert(record.email.as_str(), id)?;
                }

                let bytes = encode(&record)?;
                users.insert(id, bytes.as_slice())?;
            }
            write_txn.commit()?;

            Ok(())
        })
        .await??;

        tracing::info!("User {} updated", id);

        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        let db = self.db.clone();

        let existed = tokio::task::spawn_blocking(move || -> Result<bool, StoreError> {
            let write_txn = db.begin_write()?;
            let existed;
            {
                let mut users = write_txn.open_table(tables::USERS)?;
                let removed = users
                    .remove(id)?
                    .map(|bytes| decode(bytes.value()))
                    .transpose()?;

                existed = removed.is_some();
                if let Some(record) = removed {
                    let mut by_email = write_txn.open_table(tables::USERS_BY_EMAIL)?;
                    by_email.remove(record.email.as_str())?;
                }
            }
            write_txn.commit()?;

            Ok(existed)
        })
        .await??;

        if existed {
            tracing::info!("User {} deleted", id);
        } else {
            tracing::debug!("Delete of unknown user {} ignored", id);
        }

        Ok(())
    }
}
