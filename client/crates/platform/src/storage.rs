//! Client-Local Key-Value Storage
//!
//! The browser-profile storage the engine was designed around is modeled as
//! an injected string map. Reads and writes are synchronous; a write must be
//! visible to the next read in the same task.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use kernel::error::app_error::{AppResult, ResultExt};
use kernel::error::kind::ErrorKind;

/// String key-value store abstraction
///
/// `set` is deliberately infallible from the caller's point of view:
/// a storage fault must never block the like flow. Implementations log
/// and carry on.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Process-local store, used by tests and as a last-resort fallback
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

/// JSON-file-backed store, the profile-storage analog for a native client
///
/// The whole map is cached in memory; every write goes through the cache
/// first so read-after-write holds even when the disk write fails.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store, creating an empty one if the file does not exist.
    ///
    /// A corrupted file is treated as empty rather than fatal, so a bad
    /// state file cannot brick the client.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "State file is corrupted, starting empty"
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(e).map_app_err(ErrorKind::Storage, "Failed to read state file");
            }
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let raw = match serde_json::to_string_pretty(entries) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize state");
                return;
            }
        };

        if let Err(e) = std::fs::write(&self.path, raw) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to write state file"
            );
        }
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kv-store-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store_read_after_write() {
        let store = MemoryStore::new();
        assert_eq!(store.get("visitor_id"), None);

        store.set("visitor_id", "abc");
        assert_eq!(store.get("visitor_id"), Some("abc".to_string()));

        store.set("visitor_id", "def");
        assert_eq!(store.get("visitor_id"), Some("def".to_string()));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let path = temp_path("roundtrip");
        let _ = std::fs::remove_file(&path);

        {
            let store = FileStore::open(&path).unwrap();
            assert_eq!(store.get("last_like"), None);
            store.set("last_like", "1700000000000");
        }

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("last_like"), Some("1700000000000".to_string()));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_corrupted_file_starts_empty() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("anything"), None);

        let _ = std::fs::remove_file(&path);
    }
}
