use crate::{AuthError, Result as AuthErrorResult, SessionStorage};

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use log::{debug, warn};
use tempfile::NamedTempFile;

const SCOPE_FILENAME: &str = "session.json";
const RUNTIME_SUBDIR: &str = "qualitas";

type Items = BTreeMap<String, String>;

/// Storage scope backed by a single JSON document on disk.
///
/// Writes go through a uniquely named temp file, fsync, then rename, so a
/// crash never leaves a half-written scope behind.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
    // Serialises read-modify-write cycles on this instance
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Scope under the user runtime dir, which the OS clears at the end of
    /// the login session. Falls back to the temp dir.
    pub fn in_runtime_dir() -> Self {
        let base = dirs::runtime_dir().unwrap_or_else(std::env::temp_dir);
        Self::in_dir(base.join(RUNTIME_SUBDIR))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SCOPE_FILENAME)
    }

    fn read_items(&self) -> AuthErrorResult<Items> {
        let path = self.path();
        if !path.exists() {
            return Ok(Items::new());
        }

        let contents = fs::read_to_string(&path).map_err(|e| AuthError::storage(path.clone(), e))?;

        match serde_json::from_str::<Items>(&contents) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!("[STORAGE] Session scope corrupted at {path:?}, starting empty: {e}");
                Ok(Items::new())
            }
        }
    }

    fn write_items(&self, items: &Items) -> AuthErrorResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| AuthError::storage(self.dir.clone(), e))?;

        let final_path = self.path();
        let json = serde_json::to_string_pretty(items)?;

        let mut temp =
            NamedTempFile::new_in(&self.dir).map_err(|e| AuthError::storage(self.dir.clone(), e))?;

        temp.write_all(json.as_bytes())
            .map_err(|e| AuthError::storage(temp.path().to_path_buf(), e))?;

        temp.as_file()
            .sync_all()
            .map_err(|e| AuthError::storage(temp.path().to_path_buf(), e))?;

        temp.persist(&final_path)
            .map_err(|e| AuthError::storage(final_path.clone(), e.error))?;

        debug!("[STORAGE] Wrote {} item(s) to {final_path:?}", items.len());
        Ok(())
    }

    fn modify(&self, f: impl FnOnce(&mut Items)) -> AuthErrorResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.read_items()?;
        f(&mut items);
        self.write_items(&items)
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> AuthErrorResult<Option<String>> {
        Ok(self.read_items()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> AuthErrorResult<()> {
        self.modify(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> AuthErrorResult<()> {
        self.modify(|items| {
            items.remove(key);
        })
    }

    fn clear(&self) -> AuthErrorResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::storage(path, e)),
        }
    }
}
