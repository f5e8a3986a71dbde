//! # File Stores
//!
//! Read/write capabilities handed to the applier. `DiskStore` resolves paths
//! against a tree root; `MemoryStore` keeps everything in a map.

use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Text file access used by the applier.
///
/// Implementations are shared across per-file tasks.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Reads the whole file as UTF-8 text.
    ///
    /// Missing or undecodable files map to [`AppError::FileNotFound`].
    async fn read(&self, path: &Path) -> AppResult<String>;

    /// Overwrites the whole file.
    async fn write(&self, path: &Path, content: &str) -> AppResult<()>;
}

/// Files on disk, relative to `root`.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Creates a store rooted at `root`. Absolute patch paths bypass the root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The tree root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait]
impl FileStore for DiskStore {
    async fn read(&self, path: &Path) -> AppResult<String> {
        let full = self.resolve(path);
        tracing::debug!("reading {:?}", full);
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|source| AppError::FileNotFound {
                path: path.to_owned(),
                source,
            })
    }

    async fn write(&self, path: &Path, content: &str) -> AppResult<()> {
        let full = self.resolve(path);
        tracing::debug!("writing {} bytes to {:?}", content.len(), full);
        tokio::fs::write(&full, content).await?;
        Ok(())
    }
}

/// In-memory files, keyed by the exact path given.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<PathBuf, String>>,
    writes: Mutex<Vec<PathBuf>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds or replaces a file.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        lock(&self.files).insert(path.into(), content.into());
    }

    /// Current content of a file.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        lock(&self.files).get(path.as_ref()).cloned()
    }

    /// Paths written so far, in write order.
    pub fn writes(&self) -> Vec<PathBuf> {
        lock(&self.writes).clone()
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn read(&self, path: &Path) -> AppResult<String> {
        self.get(path).ok_or_else(|| AppError::FileNotFound {
            path: path.to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not in memory store"),
        })
    }

    async fn write(&self, path: &Path, content: &str) -> AppResult<()> {
        lock(&self.files).insert(path.to_owned(), content.to_owned());
        lock(&self.writes).push(path.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_disk_store_resolves_against_root() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/a.cpp"), "int a;").unwrap();

        let store = DiskStore::new(dir.path());
        let content = store.read(Path::new("src/a.cpp")).await.unwrap();
        assert_eq!(content, "int a;");

        store.write(Path::new("src/a.cpp"), "int b;").await.unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("src/a.cpp")).unwrap(), "int b;");
    }

    #[tokio::test]
    async fn test_disk_store_missing_file() {
        let dir = tempdir().unwrap();
        let store = DiskStore::new(dir.path());
        let err = store.read(Path::new("nope.cpp")).await.unwrap_err();
        match err {
            AppError::FileNotFound { path, .. } => assert_eq!(path, PathBuf::from("nope.cpp")),
            other => panic!("expected FileNotFound, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_disk_store_rejects_non_utf8() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bin.dat"), [0xff, 0xfe, 0x00]).unwrap();
        let store = DiskStore::new(dir.path());
        let err = store.read(Path::new("bin.dat")).await.unwrap_err();
        assert!(matches!(err, AppError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_memory_store_tracks_writes() {
        let store = MemoryStore::new();
        store.insert("a.cpp", "x");
        store.write(Path::new("a.cpp"), "y").await.unwrap();
        assert_eq!(store.get("a.cpp").as_deref(), Some("y"));
        assert_eq!(store.writes(), vec![PathBuf::from("a.cpp")]);
    }
}
