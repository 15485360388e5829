//! Persistent key-value storage for storefront state.
//!
//! The storefront keeps exactly one value in storage: the serialized cart
//! under the configured key. Browsers provide this as origin-scoped local
//! storage; [`MemoryStorage`] is the in-process equivalent.
//!
//! # Concurrency
//!
//! Every cart mutation reads the whole value, modifies it, and writes the
//! whole value back, without locking. Two handles over the same storage (two
//! tabs) are not reconciled: the last writer wins.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

pub mod cart;

pub use cart::{CartStore, parse_quantity};

/// Errors from a key-value store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Writing the value would exceed the store's capacity.
    #[error("storage quota exceeded writing '{key}': need {needed} bytes, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    /// The store cannot be accessed at all (e.g. disabled by privacy settings).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string-to-string persistent store.
///
/// Methods take `&self`: stores are shared handles, mirroring browser
/// local storage where every script on the page sees the same data.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::QuotaExceeded` if the value does not fit, or
    /// `StorageError::Unavailable` if the store cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

/// In-memory key-value store.
///
/// Clones share the same underlying data, so two storefronts built over
/// clones of one `MemoryStorage` behave like two tabs of the same site.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<MemoryStorageInner>>,
}

#[derive(Debug, Default)]
struct MemoryStorageInner {
    items: HashMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStorage {
    /// Create an empty, unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that holds at most `quota` bytes of keys and values.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        let storage = Self::default();
        storage.inner.borrow_mut().quota = Some(quota);
        storage
    }

    /// Create a store that refuses every read and write, like local storage
    /// blocked by the browser's privacy settings.
    #[must_use]
    pub fn disabled() -> Self {
        let storage = Self::default();
        storage.inner.borrow_mut().disabled = true;
        storage
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().items.is_empty()
    }
}

impl MemoryStorageInner {
    fn check_available(&self) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Unavailable("access denied".to_string()));
        }
        Ok(())
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let inner = self.inner.borrow();
        inner.check_available()?;
        Ok(inner.items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        inner.check_available()?;
        if let Some(quota) = inner.quota {
            let needed = inner.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }
        inner.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_replace() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.get_item("k").unwrap(), None);

        storage.set_item("k", "v1").unwrap();
        storage.set_item("k", "v2").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_disabled_store_refuses_access() {
        let storage = MemoryStorage::disabled();
        assert!(matches!(
            storage.get_item("k"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(matches!(
            storage.set_item("k", "v"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_clones_share_data() {
        let tab_a = MemoryStorage::new();
        let tab_b = tab_a.clone();
        tab_a.set_item("k", "from a").unwrap();
        assert_eq!(tab_b.get_item("k").unwrap().as_deref(), Some("from a"));
    }

    #[test]
    fn test_quota_exceeded() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "12345").unwrap();

        let err = storage.set_item("k", "1234567890").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { needed: 11, quota: 10, .. }));

        // The failed write leaves the previous value in place
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("12345"));
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let storage = MemoryStorage::with_quota(6);
        storage.set_item("k", "12345").unwrap();
        storage.set_item("k", "54321").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("54321"));
    }
}
