//! # Slot Backends
//!
//! Implementations of [`SnapshotStorage`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Backend         Where the "@RocketShoes:cart" slot lives              │
//! │  ───────         ──────────────────────────────────────                 │
//! │  MemoryStorage   HashMap inside the process (tests, throwaway runs)    │
//! │  FileStorage     <dir>/%40RocketShoes%3Acart.json                      │
//! │                  written to a per-write .tmp, renamed over the old file│
//! │  SqliteStorage   storage_slots row (rocketshoes-db)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use rocketshoes_core::StorageError;
use rocketshoes_db::{Database, DbConfig, DbError};

use crate::config::StorageBackend;
use crate::ports::SnapshotStorage;

// =============================================================================
// Memory
// =============================================================================

/// Slots held in memory. Clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with one slot already written.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        MemoryStorage {
            slots: Arc::new(RwLock::new(slots)),
        }
    }
}

#[async_trait]
impl SnapshotStorage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// File
// =============================================================================

/// Sequence for temp file names, unique within the process.
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// One JSON file per slot inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Slots live in `dir`, created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `key`.
    ///
    /// Bytes outside `[A-Za-z0-9._-]` are percent-encoded so any key maps
    /// to a portable file name and distinct keys never collide.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len() + 5);
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("%{:02X}", byte));
            }
        }
        name.push_str(".json");
        self.dir.join(name)
    }

    /// Scratch file for one write of `path`. Concurrent writers (tasks or
    /// processes) never share one.
    fn tmp_path(path: &Path) -> PathBuf {
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".{}.{}.tmp", std::process::id(), seq));
        path.with_file_name(name)
    }
}

#[async_trait]
impl SnapshotStorage for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Backend(format!("{}: {}", path.display(), e))),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key);
        let tmp = Self::tmp_path(&path);

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&tmp, value).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!(path = %path.display(), bytes = value.len(), "Slot file written");
        Ok(())
    }
}

// =============================================================================
// SQLite
// =============================================================================

/// Slots in the `storage_slots` table.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    /// Opens (and migrates) the database file at `path`.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let db = Database::new(DbConfig::new(path)).await.map_err(backend)?;
        Ok(SqliteStorage { db })
    }

    /// A private in-memory database.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let db = Database::new(DbConfig::in_memory())
            .await
            .map_err(backend)?;
        Ok(SqliteStorage { db })
    }

    pub fn from_database(db: Database) -> Self {
        SqliteStorage { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

fn backend(err: DbError) -> StorageError {
    StorageError::Backend(err.to_string())
}

#[async_trait]
impl SnapshotStorage for SqliteStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.db.slots().get(key).await.map_err(backend)
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db.slots().put(key, value).await.map_err(backend)
    }
}

// =============================================================================
// Factory
// =============================================================================

/// Opens `backend` at `path`.
///
/// `path` is the database file for `sqlite` and the slot directory for
/// `file`; `memory` ignores it.
pub async fn open_storage(
    backend: StorageBackend,
    path: &Path,
) -> Result<Arc<dyn SnapshotStorage>, StorageError> {
    info!(backend = %backend, path = %path.display(), "Opening cart storage");

    let storage: Arc<dyn SnapshotStorage> = match backend {
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::File => Arc::new(FileStorage::new(path)),
        StorageBackend::Sqlite => Arc::new(SqliteStorage::open(path).await?),
    };

    Ok(storage)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rocketshoes_core::CART_STORAGE_KEY;

    async fn exercise(storage: &dyn SnapshotStorage) {
        assert_eq!(storage.read(CART_STORAGE_KEY).await.unwrap(), None);

        storage.write(CART_STORAGE_KEY, "[]").await.unwrap();
        storage.write(CART_STORAGE_KEY, r#"[{"id":1}]"#).await.unwrap();

        assert_eq!(
            storage.read(CART_STORAGE_KEY).await.unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
        assert_eq!(storage.read("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_storage() {
        exercise(&MemoryStorage::new()).await;
    }

    #[tokio::test]
    async fn test_memory_storage_clones_share_slots() {
        let storage = MemoryStorage::with_slot("k", "v");
        let clone = storage.clone();

        clone.write("k", "w").await.unwrap();
        assert_eq!(storage.read("k").await.unwrap().as_deref(), Some("w"));
    }

    #[tokio::test]
    async fn test_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        exercise(&FileStorage::new(dir.path().join("slots"))).await;
    }

    #[tokio::test]
    async fn test_file_storage_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.write(CART_STORAGE_KEY, "[]").await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["%40RocketShoes%3Acart.json".to_string()]);
    }

    #[tokio::test]
    async fn test_file_storage_concurrent_writes() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let writes = (0..16).map(|n| {
            let storage = storage.clone();
            tokio::spawn(async move {
                storage
                    .write(CART_STORAGE_KEY, &format!(r#"[{{"id":{}}}]"#, n))
                    .await
            })
        });
        for handle in writes.collect::<Vec<_>>() {
            handle.await.unwrap().unwrap();
        }

        let value = storage.read(CART_STORAGE_KEY).await.unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&value).unwrap();
        assert!(parsed[0]["id"].as_u64().unwrap() < 16);

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["%40RocketShoes%3Acart.json".to_string()]);
    }

    #[test]
    fn test_tmp_paths_are_unique_per_write() {
        let storage = FileStorage::new("/slots");
        let path = storage.slot_path(CART_STORAGE_KEY);

        let a = FileStorage::tmp_path(&path);
        let b = FileStorage::tmp_path(&path);
        assert_ne!(a, b);
        assert_eq!(a.parent(), path.parent());
        assert!(a.to_string_lossy().ends_with(".tmp"));
    }

    #[test]
    fn test_slot_paths_do_not_collide() {
        let storage = FileStorage::new("/slots");

        assert_ne!(storage.slot_path("a:b"), storage.slot_path("a_b"));
        assert_ne!(storage.slot_path("a/b"), storage.slot_path("a%2Fb"));
        assert_eq!(
            storage.slot_path("plain-key_1.x"),
            PathBuf::from("/slots/plain-key_1.x.json")
        );
    }

    #[tokio::test]
    async fn test_sqlite_storage() {
        exercise(&SqliteStorage::in_memory().await.unwrap()).await;
    }

    #[tokio::test]
    async fn test_sqlite_storage_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cart.db");

        let storage = SqliteStorage::open(&path).await.unwrap();
        storage.write(CART_STORAGE_KEY, "[]").await.unwrap();
        storage.database().close().await;

        let reopened = SqliteStorage::open(&path).await.unwrap();
        assert_eq!(
            reopened.read(CART_STORAGE_KEY).await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_open_storage_by_backend() {
        let dir = tempfile::tempdir().unwrap();

        for backend in [StorageBackend::Memory, StorageBackend::File, StorageBackend::Sqlite] {
            let path = dir.path().join(format!("{}-slot", backend));
            let storage = open_storage(backend, &path).await.unwrap();
            exercise(storage.as_ref()).await;
        }
    }
}
