//! Key-value persistence with an explicit fallback order.
//!
//! The host device may inject its own store (`window.rabbit.creationStorage`);
//! when it does, it is tried first and `localStorage` acts as the secondary
//! backend that every write is mirrored to.

pub mod host;
pub mod local;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use host::HostStore;
pub use local::LocalStore;
pub use memory::MemoryStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage backend is unavailable")]
    Unavailable,
    #[error("storage backend failed: {0}")]
    Backend(String),
    #[error("operation not supported by this backend")]
    Unsupported,
}

#[async_trait(?Send)]
pub trait KeyValueStore {
    fn name(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Lists stored keys. Backends that cannot enumerate return `Unsupported`.
    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        Err(StorageError::Unsupported)
    }
}

/// Uniform get/set/remove over a primary and a secondary backend.
///
/// None of the operations fail: backend errors are logged and absorbed.
pub struct StorageAdapter {
    primary: Option<Box<dyn KeyValueStore>>,
    secondary: Box<dyn KeyValueStore>,
}

impl StorageAdapter {
    pub fn new(
        primary: Option<Box<dyn KeyValueStore>>,
        secondary: Box<dyn KeyValueStore>,
    ) -> Self {
        Self { primary, secondary }
    }

    /// Host store first when present, then `localStorage`, or an in-memory
    /// map when the browser refuses local storage (private windows).
    pub fn browser() -> Self {
        let primary = HostStore::detect().map(|store| Box::new(store) as Box<dyn KeyValueStore>);
        let secondary: Box<dyn KeyValueStore> = match LocalStore::open() {
            Some(store) => Box::new(store),
            None => {
                log::warn!("localStorage unavailable, cache will not survive a reload");
                Box::new(MemoryStore::default())
            }
        };

        log::info!(
            "Storage: primary={}, secondary={}",
            primary.as_ref().map(|p| p.name()).unwrap_or("none"),
            secondary.name()
        );
        Self::new(primary, secondary)
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        if let Some(primary) = &self.primary {
            match primary.get(key).await {
                Ok(value) => return value,
                Err(e) => log::warn!("{} get({key}) failed, falling back: {e}", primary.name()),
            }
        }
        self.get_secondary(key).await
    }

    /// Reads only the secondary backend.
    pub async fn get_secondary(&self, key: &str) -> Option<String> {
        match self.secondary.get(key).await {
            Ok(value) => value,
            Err(e) => {
                log::warn!("{} get({key}) failed: {e}", self.secondary.name());
                None
            }
        }
    }

    pub async fn set(&self, key: &str, value: &str) {
        if let Some(primary) = &self.primary {
            if let Err(e) = primary.set(key, value).await {
                log::warn!("{} set({key}) failed: {e}", primary.name());
            }
        }
        if let Err(e) = self.secondary.set(key, value).await {
            log::warn!("{} set({key}) failed: {e}", self.secondary.name());
        }
    }

    pub async fn remove(&self, key: &str) {
        if let Some(primary) = &self.primary {
            if let Err(e) = primary.remove(key).await {
                log::warn!("{} remove({key}) failed: {e}", primary.name());
            }
        }
        if let Err(e) = self.secondary.remove(key).await {
            log::warn!("{} remove({key}) failed: {e}", self.secondary.name());
        }
    }

    /// Removes every secondary key starting with `prefix` and mirrors each
    /// removal to the primary. Returns how many keys were found.
    pub async fn clear_prefix(&self, prefix: &str) -> usize {
        let keys: Vec<String> = match self.secondary.keys().await {
            Ok(keys) => keys.into_iter().filter(|k| k.starts_with(prefix)).collect(),
            Err(e) => {
                log::warn!("{} cannot list keys: {e}", self.secondary.name());
                return 0;
            }
        };

        for key in &keys {
            if let Err(e) = self.secondary.remove(key).await {
                log::warn!("{} remove({key}) failed: {e}", self.secondary.name());
            }
        }
        if let Some(primary) = &self.primary {
            for key in &keys {
                if let Err(e) = primary.remove(key).await {
                    log::warn!("{} remove({key}) failed: {e}", primary.name());
                }
            }
        }

        log::info!("Cleared {} cached keys with prefix '{prefix}'", keys.len());
        keys.len()
    }
}

// Identity comparison, so a shared adapter can travel through yew context.
impl PartialEq for StorageAdapter {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}
