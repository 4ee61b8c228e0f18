use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// Slot the finished report is stored under
pub const REPORT_KEY: &str = "interviewReport";

/// Client-local durable key/value storage for structured text
#[async_trait]
pub trait HandoffStore: Send + Sync {
    async fn put(&self, key: &str, value: String) -> Result<()>;

    async fn get(&self, key: &str) -> Result<Option<String>>;
}

/// Stores each key as `<dir>/<key>.json`
pub struct FileHandoffStore {
    dir: PathBuf,
}

impl FileHandoffStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl HandoffStore for FileHandoffStore {
    async fn put(&self, key: &str, value: String) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let path = self.path_for(key);
        tokio::fs::write(&path, value)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Stored {} at {}", key, path.display());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

/// In-process store (embedding and tests)
#[derive(Default)]
pub struct MemoryHandoffStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryHandoffStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HandoffStore for MemoryHandoffStore {
    async fn put(&self, key: &str, value: String) -> Result<()> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }
}
