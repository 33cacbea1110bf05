use serde::{Deserialize, Serialize};

pub const UNTITLED_PLAYLIST: &str = "Untitled Playlist";
pub const UNKNOWN_AUTHOR: &str = "Unknown";
pub const UNTITLED_VIDEO: &str = "Untitled";

/// One video of a playlist feed, in the shape it is cached under
/// `pl_<id>_videos_v1`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct VideoEntry {
    pub id: String,
    pub title: String,
    #[serde(rename = "thumb", default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistMeta {
    pub playlist_title: String,
    pub author: String,
}

impl Default for PlaylistMeta {
    fn default() -> Self {
        Self {
            playlist_title: UNTITLED_PLAYLIST.to_string(),
            author: UNKNOWN_AUTHOR.to_string(),
        }
    }
}

/// A parsed playlist feed: metadata plus entries in feed order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaylistFeed {
    pub meta: Option<PlaylistMeta>,
    pub videos: Vec<VideoEntry>,
}

impl PlaylistFeed {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_entry_uses_cached_field_names() {
        let entry = VideoEntry {
            id: "abc".to_string(),
            title: "A title".to_string(),
            thumbnail_url: Some("https://i.ytimg.com/vi/abc/hqdefault.jpg".to_string()),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["thumb"], "https://i.ytimg.com/vi/abc/hqdefault.jpg");
    }

    #[test]
    fn missing_thumb_is_omitted_and_accepted() {
        let entry = VideoEntry {
            id: "abc".to_string(),
            title: "t".to_string(),
            thumbnail_url: None,
        };
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"id":"abc","title":"t"}"#
        );
        let parsed: VideoEntry = serde_json::from_str(r#"{"id":"x","title":"y"}"#).unwrap();
        assert_eq!(parsed.thumbnail_url, None);
    }

    #[test]
    fn meta_serializes_camel_case() {
        let meta = PlaylistMeta {
            playlist_title: "Mix".to_string(),
            author: "Someone".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&meta).unwrap(),
            r#"{"playlistTitle":"Mix","author":"Someone"}"#
        );
    }
}
