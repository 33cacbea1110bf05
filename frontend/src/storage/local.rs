use super::{KeyValueStore, StorageError};
use async_trait::async_trait;
use wasm_bindgen::JsValue;
use web_sys::{window, Storage};

/// `window.localStorage`.
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    pub fn open() -> Option<Self> {
        window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .map(|storage| Self { storage })
    }
}

fn js_error(err: JsValue) -> StorageError {
    StorageError::Backend(format!("{err:?}"))
}

#[async_trait(?Send)]
impl KeyValueStore for LocalStore {
    fn name(&self) -> &'static str {
        "localStorage"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(js_error)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(js_error)
    }

    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        let len = self.storage.length().map_err(js_error)?;
        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Some(key) = self.storage.key(index).map_err(js_error)? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
