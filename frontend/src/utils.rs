use url::Url;

pub const FEED_BASE_URL: &str = "https://www.youtube.com/feeds/videos.xml";
pub const EMBED_BASE_URL: &str = "https://www.youtube.com/embed";
pub const BLANK_PLAYER_URL: &str = "about:blank";

/// Normalizes user input into a playlist id.
///
/// A URL carrying a non-empty `list` query parameter yields that parameter;
/// anything else is taken as a literal id. Blank input yields an empty string.
pub fn extract_playlist_id(input: &str) -> String {
    let value = input.trim();
    if value.is_empty() {
        return String::new();
    }

    if let Ok(url) = Url::parse(value) {
        if let Some((_, list)) = url
            .query_pairs()
            .find(|(key, value)| key == "list" && !value.is_empty())
        {
            return list.into_owned();
        }
    }

    value.to_string()
}

pub fn feed_url(playlist_id: &str) -> String {
    format!("{FEED_BASE_URL}?playlist_id={playlist_id}")
}

/// Wraps the feed URL in the CORS relay, e.g. `https://corsproxy.io/?<encoded>`.
pub fn proxied_feed_url(proxy_prefix: &str, playlist_id: &str) -> String {
    format!(
        "{}{}",
        proxy_prefix,
        urlencoding::encode(&feed_url(playlist_id))
    )
}

pub fn embed_url(video_id: &str) -> String {
    format!("{EMBED_BASE_URL}/{video_id}?autoplay=1&rel=0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_list_param_from_playlist_url() {
        assert_eq!(
            extract_playlist_id("https://www.youtube.com/playlist?list=PLabc123"),
            "PLabc123"
        );
        assert_eq!(
            extract_playlist_id("  https://www.youtube.com/watch?v=xyz&list=PLdef&index=3 "),
            "PLdef"
        );
    }

    #[test]
    fn bare_id_is_returned_trimmed() {
        assert_eq!(
            extract_playlist_id("  PLMmqTuUsDkRKv4ulZiAYRoWLu1184CAkt\n"),
            "PLMmqTuUsDkRKv4ulZiAYRoWLu1184CAkt"
        );
    }

    #[test]
    fn url_without_list_is_returned_as_is() {
        let input = "https://www.youtube.com/watch?v=xyz";
        assert_eq!(extract_playlist_id(input), input);
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(extract_playlist_id(""), "");
        assert_eq!(extract_playlist_id("   \t "), "");
    }

    #[test]
    fn proxied_url_encodes_the_feed() {
        assert_eq!(
            proxied_feed_url("https://corsproxy.io/?", "PL1"),
            "https://corsproxy.io/?https%3A%2F%2Fwww.youtube.com%2Ffeeds%2Fvideos.xml%3Fplaylist_id%3DPL1"
        );
    }

    #[test]
    fn embed_url_autoplays() {
        assert_eq!(
            embed_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&rel=0"
        );
    }
}
