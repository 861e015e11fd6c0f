//! Key-value blob storage
//!
//! Each key holds one UTF-8 string (a JSON document in practice).
//! [`DirBlobStore`] keeps every key in its own file and uses file locking
//! plus temp-file-and-rename so readers never see a half-written blob.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use fs2::FileExt;

/// Storage for whole string values under fixed keys
pub trait BlobStore: Send + Sync {
    /// Returns the value for `key`, or `None` if it was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value for `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Blob store backed by one `{key}.json` file per key
pub struct DirBlobStore {
    dir: PathBuf,
}

impl DirBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the file path for a key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStore for DirBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let mut file = File::open(&path)
            .with_context(|| format!("Failed to open blob: {}", path.display()))?;

        file.lock_shared()
            .with_context(|| format!("Failed to acquire read lock on {}", path.display()))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .with_context(|| format!("Failed to read blob: {}", path.display()))?;

        // Lock is released when file is dropped
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive().with_context(|| {
                format!("Failed to acquire write lock on {}", temp_path.display())
            })?;

            file.write_all(value.as_bytes())
                .with_context(|| format!("Failed to write blob: {}", temp_path.display()))?;
            file.flush().context("Failed to flush blob")?;
        }

        fs::rename(&temp_path, &path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

/// In-memory blob store, mostly for tests
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let blobs = self.blobs.lock().map_err(|_| anyhow!("Blob store lock poisoned"))?;
        Ok(blobs.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut blobs = self.blobs.lock().map_err(|_| anyhow!("Blob store lock poisoned"))?;
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
