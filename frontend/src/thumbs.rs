//! Warms the browser Cache Storage with playlist thumbnails.

use js_sys::{Array, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Cache, CacheStorage};

pub const THUMBNAIL_CACHE: &str = "yt-thumbs-v1";
pub const WARM_LIMIT: usize = 40;

fn cache_storage() -> Option<CacheStorage> {
    let window = window()?;
    // `caches` is missing on insecure origins.
    if !Reflect::has(&window, &"caches".into()).unwrap_or(false) {
        return None;
    }
    window.caches().ok()
}

fn describe(err: JsValue) -> String {
    format!("{err:?}")
}

/// Thumbnail URLs worth prefetching, at most [`WARM_LIMIT`].
pub fn urls_to_warm<'a, I>(thumbnails: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    thumbnails
        .into_iter()
        .flatten()
        .filter(|url| !url.is_empty())
        .take(WARM_LIMIT)
        .map(str::to_string)
        .collect()
}

pub async fn warm(urls: Vec<String>) {
    if urls.is_empty() {
        return;
    }
    let Some(caches) = cache_storage() else {
        return;
    };

    let result = async {
        let cache: Cache = JsFuture::from(caches.open(THUMBNAIL_CACHE)).await?.into();
        let requests: Array = urls.iter().map(|u| JsValue::from_str(u)).collect();
        JsFuture::from(cache.add_all_with_str_sequence(&requests)).await
    }
    .await;

    match result {
        Ok(_) => log::debug!("Warmed {} thumbnails", urls.len()),
        Err(e) => log::warn!("Thumbnail warm-up failed: {}", describe(e)),
    }
}

pub async fn clear() {
    let Some(caches) = cache_storage() else {
        return;
    };
    if let Err(e) = JsFuture::from(caches.delete(THUMBNAIL_CACHE)).await {
        log::warn!("Could not delete thumbnail cache: {}", describe(e));
    }
}
