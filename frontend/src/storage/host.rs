use super::{KeyValueStore, StorageError};
use async_trait::async_trait;
use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::window;

/// The store some host devices expose at `window.rabbit.creationStorage`.
///
/// Its `getItem`/`setItem`/`removeItem` may return plain values or promises.
pub struct HostStore {
    store: JsValue,
}

impl HostStore {
    /// Returns the host store when the page runs inside a host that provides one.
    pub fn detect() -> Option<Self> {
        let window = window()?;
        let rabbit = Reflect::get(&window, &"rabbit".into()).ok()?;
        if !rabbit.is_object() {
            return None;
        }
        let store = Reflect::get(&rabbit, &"creationStorage".into()).ok()?;
        if !store.is_object() {
            return None;
        }
        Some(Self { store })
    }

    async fn call(&self, method: &str, args: &[&str]) -> Result<JsValue, StorageError> {
        let function = Reflect::get(&self.store, &method.into())
            .map_err(js_error)?
            .dyn_into::<Function>()
            .map_err(|_| StorageError::Unavailable)?;

        let js_args: Array = args.iter().map(|a| JsValue::from_str(a)).collect();
        let result = function.apply(&self.store, &js_args).map_err(js_error)?;

        match result.dyn_into::<Promise>() {
            Ok(promise) => JsFuture::from(promise).await.map_err(js_error),
            Err(value) => Ok(value),
        }
    }
}

fn js_error(err: JsValue) -> StorageError {
    StorageError::Backend(format!("{err:?}"))
}

#[async_trait(?Send)]
impl KeyValueStore for HostStore {
    fn name(&self) -> &'static str {
        "creationStorage"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self.call("getItem", &[key]).await?;
        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }
        value
            .as_string()
            .map(Some)
            .ok_or_else(|| StorageError::Backend(format!("non-string value under '{key}'")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.call("setItem", &[key, value]).await.map(|_| ())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.call("removeItem", &[key]).await.map(|_| ())
    }
}
