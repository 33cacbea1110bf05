//! Last-known playlist data, one JSON value per field under versioned keys.

use crate::models::{PlaylistMeta, VideoEntry};
use crate::storage::StorageAdapter;
use serde::de::DeserializeOwned;
use std::rc::Rc;
use thiserror::Error;

pub const CACHE_KEY_PREFIX: &str = "pl_";
const CACHE_VERSION: &str = "v1";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("cached value under '{key}' is malformed: {reason}")]
    Malformed { key: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CachedPlaylist {
    pub meta: Option<PlaylistMeta>,
    pub videos: Vec<VideoEntry>,
}

pub fn meta_key(playlist_id: &str) -> String {
    format!("{CACHE_KEY_PREFIX}{playlist_id}_meta_{CACHE_VERSION}")
}

pub fn videos_key(playlist_id: &str) -> String {
    format!("{CACHE_KEY_PREFIX}{playlist_id}_videos_{CACHE_VERSION}")
}

fn decode<T: DeserializeOwned>(key: &str, raw: Option<String>) -> Result<Option<T>, CacheError> {
    match raw {
        None => Ok(None),
        Some(raw) => serde_json::from_str::<Option<T>>(&raw).map_err(|e| CacheError::Malformed {
            key: key.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn absent_if_malformed<T>(result: Result<Option<T>, CacheError>) -> Option<T> {
    result.unwrap_or_else(|e| {
        log::warn!("{e}; treating as absent");
        None
    })
}

#[derive(Clone, PartialEq)]
pub struct PlaylistCache {
    storage: Rc<StorageAdapter>,
}

impl PlaylistCache {
    pub fn new(storage: Rc<StorageAdapter>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &StorageAdapter {
        &self.storage
    }

    pub async fn load(&self, playlist_id: &str) -> CachedPlaylist {
        let meta_key = meta_key(playlist_id);
        let videos_key = videos_key(playlist_id);

        let (meta_raw, videos_raw) =
            futures::join!(self.storage.get(&meta_key), self.storage.get(&videos_key));

        CachedPlaylist {
            meta: absent_if_malformed(decode(&meta_key, meta_raw)),
            videos: absent_if_malformed(decode(&videos_key, videos_raw)).unwrap_or_default(),
        }
    }

    pub async fn save(
        &self,
        playlist_id: &str,
        meta: Option<&PlaylistMeta>,
        videos: &[VideoEntry],
    ) {
        match (serde_json::to_string(&meta), serde_json::to_string(videos)) {
            (Ok(meta_json), Ok(videos_json)) => {
                self.storage.set(&meta_key(playlist_id), &meta_json).await;
                self.storage.set(&videos_key(playlist_id), &videos_json).await;
            }
            (Err(e), _) | (_, Err(e)) => {
                log::error!("Failed to encode playlist {playlist_id} for caching: {e}");
            }
        }
    }

    pub async fn clear_all(&self) -> usize {
        self.storage.clear_prefix(CACHE_KEY_PREFIX).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::memory_adapter;
    use futures::executor::block_on;

    fn sample_videos() -> Vec<VideoEntry> {
        vec![
            VideoEntry {
                id: "a1".to_string(),
                title: "ABC song".to_string(),
                thumbnail_url: Some("https://i.ytimg.com/vi/a1/hqdefault.jpg".to_string()),
            },
            VideoEntry {
                id: "b2".to_string(),
                title: "xyz".to_string(),
                thumbnail_url: None,
            },
        ]
    }

    #[test]
    fn keys_are_versioned_per_playlist() {
        assert_eq!(meta_key("PL1"), "pl_PL1_meta_v1");
        assert_eq!(videos_key("PL1"), "pl_PL1_videos_v1");
    }

    #[test]
    fn save_then_load_round_trips() {
        let cache = PlaylistCache::new(Rc::new(memory_adapter()));
        let meta = PlaylistMeta {
            playlist_title: "Mix".to_string(),
            author: "Me".to_string(),
        };

        block_on(cache.save("PL1", Some(&meta), &sample_videos()));
        let loaded = block_on(cache.load("PL1"));

        assert_eq!(loaded.meta, Some(meta));
        assert_eq!(loaded.videos, sample_videos());
    }

    #[test]
    fn unknown_playlist_loads_empty() {
        let cache = PlaylistCache::new(Rc::new(memory_adapter()));
        assert_eq!(block_on(cache.load("nothing")), CachedPlaylist::default());
    }

    #[test]
    fn missing_meta_is_stored_as_null() {
        let storage = Rc::new(memory_adapter());
        let cache = PlaylistCache::new(storage.clone());

        block_on(cache.save("PL1", None, &sample_videos()));

        assert_eq!(block_on(storage.get("pl_PL1_meta_v1")).as_deref(), Some("null"));
        let loaded = block_on(cache.load("PL1"));
        assert_eq!(loaded.meta, None);
        assert_eq!(loaded.videos.len(), 2);
    }

    #[test]
    fn malformed_fields_are_treated_independently_as_absent() {
        let storage = Rc::new(memory_adapter());
        block_on(storage.set("pl_PL1_meta_v1", "{not json"));
        block_on(storage.set("pl_PL1_videos_v1", r#"[{"id":"a1","title":"ABC song"}]"#));
        let cache = PlaylistCache::new(storage.clone());

        let loaded = block_on(cache.load("PL1"));
        assert_eq!(loaded.meta, None);
        assert_eq!(loaded.videos.len(), 1);

        block_on(storage.set("pl_PL1_videos_v1", r#"{"id":"a1"}"#));
        assert!(block_on(cache.load("PL1")).videos.is_empty());
    }

    #[test]
    fn malformed_json_reports_the_key() {
        let err = decode::<PlaylistMeta>("pl_x_meta_v1", Some("[1,".to_string())).unwrap_err();
        assert!(matches!(err, CacheError::Malformed { ref key, .. } if key == "pl_x_meta_v1"));
    }

    #[test]
    fn clear_all_only_touches_playlist_keys() {
        let storage = Rc::new(memory_adapter());
        let cache = PlaylistCache::new(storage.clone());
        block_on(cache.save("PL1", None, &sample_videos()));
        block_on(storage.set("player_size_pref", "wide"));

        assert_eq!(block_on(cache.clear_all()), 2);
        assert!(block_on(cache.load("PL1")).videos.is_empty());
        assert_eq!(block_on(storage.get("player_size_pref")).as_deref(), Some("wide"));
    }
}
