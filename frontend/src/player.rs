//! Embedded playback overlay and its persisted size preference.

pub mod components;

use crate::storage::StorageAdapter;

pub const PREFERENCE_KEY: &str = "player_size_pref";

/// Size presets for the player card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerShape {
    #[default]
    Auto,
    Small,
    Medium,
    Large,
    Wide,
    Portrait,
}

impl PlayerShape {
    pub fn all_variants() -> Vec<Self> {
        vec![
            PlayerShape::Auto,
            PlayerShape::Small,
            PlayerShape::Medium,
            PlayerShape::Large,
            PlayerShape::Wide,
            PlayerShape::Portrait,
        ]
    }

    /// The value persisted under [`PREFERENCE_KEY`].
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerShape::Auto => "auto",
            PlayerShape::Small => "small",
            PlayerShape::Medium => "medium",
            PlayerShape::Large => "large",
            PlayerShape::Wide => "wide",
            PlayerShape::Portrait => "portrait",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerShape::Auto => "Auto",
            PlayerShape::Small => "S",
            PlayerShape::Medium => "M",
            PlayerShape::Large => "L",
            PlayerShape::Wide => "Wide",
            PlayerShape::Portrait => "9:16",
        }
    }

    /// Unknown values mean "no preference".
    pub fn from_stored(value: &str) -> Option<Self> {
        match value.trim() {
            "" | "auto" => Some(PlayerShape::Auto),
            "small" => Some(PlayerShape::Small),
            "medium" => Some(PlayerShape::Medium),
            "large" => Some(PlayerShape::Large),
            "wide" => Some(PlayerShape::Wide),
            "portrait" => Some(PlayerShape::Portrait),
            _ => None,
        }
    }

    pub fn css_class(&self) -> String {
        match self {
            PlayerShape::Auto => String::new(),
            other => format!("size-{}", other.as_str()),
        }
    }
}

/// Reads the saved shape, checking the local mirror when the primary store
/// has nothing.
pub async fn load_preference(storage: &StorageAdapter) -> PlayerShape {
    let stored = match storage.get(PREFERENCE_KEY).await {
        Some(value) => Some(value),
        None => storage.get_secondary(PREFERENCE_KEY).await,
    };

    stored
        .and_then(|value| {
            let shape = PlayerShape::from_stored(&value);
            if shape.is_none() {
                log::warn!("Ignoring unknown player size preference '{value}'");
            }
            shape
        })
        .unwrap_or_default()
}

/// Persists the shape; the adapter mirrors it into local storage.
pub async fn save_preference(storage: &StorageAdapter, shape: PlayerShape) {
    storage.set(PREFERENCE_KEY, shape.as_str()).await;
    log::debug!("Saved player size preference '{}'", shape.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::memory_adapter;
    use futures::executor::block_on;

    #[test]
    fn stored_values_round_trip_through_as_str() {
        for shape in PlayerShape::all_variants() {
            assert_eq!(PlayerShape::from_stored(shape.as_str()), Some(shape));
        }
        assert_eq!(PlayerShape::from_stored(""), Some(PlayerShape::Auto));
        assert_eq!(PlayerShape::from_stored("gigantic"), None);
    }

    #[test]
    fn css_class_is_prefixed() {
        assert_eq!(PlayerShape::Auto.css_class(), "");
        assert_eq!(PlayerShape::Portrait.css_class(), "size-portrait");
    }

    #[test]
    fn unset_preference_is_auto() {
        let storage = memory_adapter();
        assert_eq!(block_on(load_preference(&storage)), PlayerShape::Auto);
    }

    #[test]
    fn saved_preference_is_loaded_back() {
        let storage = memory_adapter();
        block_on(save_preference(&storage, PlayerShape::Wide));
        assert_eq!(block_on(load_preference(&storage)), PlayerShape::Wide);

        block_on(storage.set(PREFERENCE_KEY, "bogus"));
        assert_eq!(block_on(load_preference(&storage)), PlayerShape::Auto);
    }
}
