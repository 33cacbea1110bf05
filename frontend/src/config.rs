use crate::env_variable_utils::get_env_var;
use lazy_static::lazy_static;

pub const DEFAULT_APP_NAME: &str = "Playlist Viewer";
pub const DEFAULT_CORS_PROXY: &str = "https://corsproxy.io/?";
pub const DEFAULT_BATCH_SIZE: usize = 24;
pub const DEFAULT_PLAYLIST_ID: &str = "PLMmqTuUsDkRKv4ulZiAYRoWLu1184CAkt";

lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_lookup(get_env_var);
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub app_name: String,
    pub cors_proxy: String,
    pub batch_size: usize,
    pub default_playlist_id: String,
    pub debug_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            cors_proxy: DEFAULT_CORS_PROXY.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            default_playlist_id: DEFAULT_PLAYLIST_ID.to_string(),
            debug_mode: false,
        }
    }
}

impl AppConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            app_name: non_blank("APP_NAME").unwrap_or(defaults.app_name),
            cors_proxy: non_blank("CORS_PROXY_URL").unwrap_or(defaults.cors_proxy),
            batch_size: non_blank("BATCH_SIZE")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.batch_size),
            default_playlist_id: non_blank("DEFAULT_PLAYLIST_ID")
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.default_playlist_id),
            debug_mode: non_blank("DEBUG_MODE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.debug_mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        assert_eq!(AppConfig::from_lookup(|_| None), AppConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("APP_NAME", "My Viewer"),
            ("CORS_PROXY_URL", "https://relay.example/?url="),
            ("BATCH_SIZE", "12"),
            ("DEFAULT_PLAYLIST_ID", " PLxyz "),
            ("DEBUG_MODE", "true"),
        ]));
        assert_eq!(config.app_name, "My Viewer");
        assert_eq!(config.cors_proxy, "https://relay.example/?url=");
        assert_eq!(config.batch_size, 12);
        assert_eq!(config.default_playlist_id, "PLxyz");
        assert!(config.debug_mode);
    }

    #[test]
    fn invalid_batch_size_falls_back() {
        let zero = AppConfig::from_lookup(lookup_from(&[("BATCH_SIZE", "0")]));
        assert_eq!(zero.batch_size, DEFAULT_BATCH_SIZE);
        let junk = AppConfig::from_lookup(lookup_from(&[("BATCH_SIZE", "lots")]));
        assert_eq!(junk.batch_size, DEFAULT_BATCH_SIZE);
    }
}
