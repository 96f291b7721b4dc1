use crate::stores::blob::BlobStore;
use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Blob store keeping one `<key>.json` file per key under a data directory
pub struct FileStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Open (and create if needed) the data directory
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .context(format!("Failed to create data directory: {}", dir.display()))?;

        Ok(FileStore {
            dir,
            lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            bail!("Invalid blob key: {:?}", key);
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| anyhow!("File store lock poisoned"))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        let _guard = self.guard()?;

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(format!("Failed to read blob: {}", path.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");
        let _guard = self.guard()?;

        // write-then-rename so a crash never leaves a half-written blob
        let mut file = fs::File::create(&tmp_path)
            .context(format!("Failed to create temp blob: {}", tmp_path.display()))?;
        file.write_all(value.as_bytes())
            .context("Failed to write blob")?;
        file.sync_all().context("Failed to flush blob")?;
        drop(file);

        fs::rename(&tmp_path, &path)
            .context(format!("Failed to replace blob: {}", path.display()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let _guard = self.guard()?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context(format!("Failed to remove blob: {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf()).unwrap();

        assert!(store.get("portal_users").unwrap().is_none());

        store.set("portal_users", r#"[{"id":"1"}]"#).unwrap();
        assert_eq!(
            store.get("portal_users").unwrap().as_deref(),
            Some(r#"[{"id":"1"}]"#)
        );
        assert!(temp_dir.path().join("portal_users.json").exists());

        store.remove("portal_users").unwrap();
        assert!(store.get("portal_users").unwrap().is_none());
        assert!(store.remove("portal_users").is_ok());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();

        {
            let store = FileStore::new(temp_dir.path().to_path_buf()).unwrap();
            store.set("portal_results", "[]").unwrap();
        }

        let store = FileStore::new(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get("portal_results").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_creates_nested_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let store = FileStore::new(nested.clone()).unwrap();
        store.set("k", "v").unwrap();
        assert_eq!(store.dir(), nested.as_path());
        assert!(nested.join("k.json").exists());
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf()).unwrap();

        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("a/b").is_err());
        assert!(store.remove("").is_err());
    }
}
