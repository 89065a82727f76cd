//! Session-scoped key/value storage.
//!
//! A scope survives process restarts within one user session and is
//! wiped by a full logout.

mod file_storage;
mod memory_storage;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

use crate::Result as AuthErrorResult;

pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> AuthErrorResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> AuthErrorResult<()>;

    fn remove_item(&self, key: &str) -> AuthErrorResult<()>;

    /// Remove every key in the scope
    fn clear(&self) -> AuthErrorResult<()>;
}
