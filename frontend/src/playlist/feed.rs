//! Parsing of the public playlist Atom feed.

use crate::models::{
    PlaylistFeed, PlaylistMeta, VideoEntry, UNKNOWN_AUTHOR, UNTITLED_PLAYLIST, UNTITLED_VIDEO,
};
use roxmltree::{Document, Node};

fn child<'a, 'input>(node: Node<'a, 'input>, local_name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == local_name)
}

/// Concatenated text of a node and its descendants, like DOM `textContent`.
fn text_content(node: Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Maps the feed XML to playlist metadata and entries.
///
/// Entries keep feed order; duplicates pass through. An entry without a
/// video id is dropped.
pub fn parse_feed(xml: &str) -> Result<PlaylistFeed, roxmltree::Error> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    let playlist_title = if root.tag_name().name() == "feed" {
        child(root, "title").map(text_content).and_then(non_blank)
    } else {
        None
    };

    let author = doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "author")
        .find_map(|author| child(author, "name"))
        .map(text_content)
        .and_then(non_blank);

    let videos = doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "entry")
        .filter_map(parse_entry)
        .collect();

    Ok(PlaylistFeed {
        meta: Some(PlaylistMeta {
            playlist_title: playlist_title.unwrap_or_else(|| UNTITLED_PLAYLIST.to_string()),
            author: author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        }),
        videos,
    })
}

fn parse_entry(entry: Node) -> Option<VideoEntry> {
    let id = child(entry, "videoId")
        .map(|n| text_content(n).trim().to_string())
        .filter(|id| !id.is_empty())?;

    let title = child(entry, "title")
        .map(|n| text_content(n).trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED_VIDEO.to_string());

    let thumbnail_url = entry
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "thumbnail")
        .and_then(|n| n.attribute("url"))
        .map(str::to_string);

    Some(VideoEntry {
        id,
        title,
        thumbnail_url,
    })
}
