//! Client-local persisted selection state
//!
//! Selections (viewed week, selected semester) are explicit state objects
//! owned by the command layer. They persist through the `KeyValueStore`
//! port so tests can swap the on-disk store for an in-memory one.

pub(crate) mod file;
#[cfg(test)]
pub(crate) mod memory;
pub(crate) mod semester;
pub(crate) mod week;

use crate::error::AppError;

/// Durable string key/value storage
pub(crate) trait KeyValueStore {
    /// Value stored under `key`, if any. Unreadable storage reads as absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`. Returns once the write is durable.
    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), AppError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        (**self).remove(key)
    }
}

pub(crate) use file::FileStore;
#[cfg(test)]
pub(crate) use memory::MemoryStore;
pub(crate) use semester::SemesterSelection;
pub(crate) use week::WeekWindow;
