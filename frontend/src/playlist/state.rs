use crate::models::{PlaylistMeta, VideoEntry};
use std::fmt;
use std::rc::Rc;
use yew::functional::Reducible;

pub const LOADING_CACHE: &str = "Loading cached playlist…";
pub const FETCHING_LATEST: &str = "Fetching latest playlist…";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Cache,
    Network,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Cache => write!(f, "Cache"),
            DataSource::Network => write!(f, "Network"),
        }
    }
}

/// Message shown in place of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    InvalidInput,
    NotFound,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::InvalidInput => "Please enter a valid playlist ID or URL.",
            Notice::NotFound => "No videos found or playlist is private.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    /// A new playlist load starts; everything from the previous one is dropped.
    Begin { playlist_id: String },
    Invalid,
    Loading(Option<&'static str>),
    Render {
        source: DataSource,
        meta: Option<PlaylistMeta>,
        videos: Vec<VideoEntry>,
    },
    /// The network had nothing; keep showing what the cache gave us.
    KeepCache,
    NotFound,
    SetFilter(String),
    NextBatch,
}

/// Everything the playlist grid displays, plus the pagination cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub playlist_id: String,
    pub videos: Vec<VideoEntry>,
    pub filter: Option<String>,
    filtered: Option<Vec<VideoEntry>>,
    pub cursor: usize,
    pub batch_size: usize,
    pub source: DataSource,
    pub meta: Option<PlaylistMeta>,
    /// Cards currently on screen, in display order.
    pub rendered: Vec<VideoEntry>,
    pub notice: Option<Notice>,
    pub loading: Option<&'static str>,
    pub status_line: String,
    pub meta_line: String,
    busy: bool,
}

impl ViewState {
    pub fn new(batch_size: usize) -> Self {
        Self {
            playlist_id: String::new(),
            videos: Vec::new(),
            filter: None,
            filtered: None,
            cursor: 0,
            batch_size: batch_size.max(1),
            source: DataSource::Network,
            meta: None,
            rendered: Vec::new(),
            notice: None,
            loading: None,
            status_line: String::new(),
            meta_line: String::new(),
            busy: false,
        }
    }

    /// The filtered list when a filter is set, else the full list.
    pub fn active_list(&self) -> &[VideoEntry] {
        self.filtered.as_deref().unwrap_or(&self.videos)
    }

    pub fn has_more(&self) -> bool {
        self.cursor < self.active_list().len()
    }

    pub fn reset(&mut self, playlist_id: String) {
        *self = Self {
            playlist_id,
            ..Self::new(self.batch_size)
        };
    }

    /// Sets a case-insensitive title filter; blank clears it.
    pub fn set_filter(&mut self, query: &str) {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            self.filter = None;
            self.filtered = None;
        } else {
            self.filtered = Some(
                self.videos
                    .iter()
                    .filter(|v| v.title.to_lowercase().contains(&query))
                    .cloned()
                    .collect(),
            );
            self.filter = Some(query);
        }
        self.render_all(true);
    }

    fn clear_display(&mut self) {
        self.rendered.clear();
        self.notice = None;
        self.cursor = 0;
    }

    /// Appends the next batch of cards. Returns how many were appended.
    pub fn render_next_batch(&mut self) -> usize {
        if self.busy || !self.has_more() {
            return 0;
        }

        self.busy = true;
        let start = self.cursor;
        let end = (start + self.batch_size).min(self.active_list().len());
        let batch = self.active_list()[start..end].to_vec();
        self.rendered.extend(batch);
        self.cursor = end;
        self.busy = false;

        end - start
    }

    pub fn render_all(&mut self, reset: bool) {
        if reset {
            self.clear_display();
        }
        self.render_next_batch();
        self.status_line = self.format_status_line();
        self.meta_line = self.format_meta_line();
    }

    fn format_status_line(&self) -> String {
        let suffix = if self.filtered.is_some() {
            " (filtered)"
        } else {
            ""
        };
        format!(
            "Source: {} — {} videos{}",
            self.source,
            self.active_list().len(),
            suffix
        )
    }

    fn format_meta_line(&self) -> String {
        self.meta
            .as_ref()
            .map(|m| format!("Playlist: {} | By: {}", m.playlist_title, m.author))
            .unwrap_or_default()
    }

    pub fn apply(&mut self, action: ViewAction) {
        match action {
            ViewAction::Begin { playlist_id } => {
                self.reset(playlist_id);
                self.loading = Some(LOADING_CACHE);
            }
            ViewAction::Invalid => {
                self.clear_display();
                self.loading = None;
                self.notice = Some(Notice::InvalidInput);
            }
            ViewAction::Loading(message) => self.loading = message,
            ViewAction::Render {
                source,
                meta,
                videos,
            } => {
                self.videos = videos;
                self.meta = meta;
                self.source = source;
                self.loading = None;
                // A filter typed while the cached list was shown applies to the fresh list too.
                match self.filter.clone() {
                    Some(query) => self.set_filter(&query),
                    None => self.render_all(true),
                }
            }
            ViewAction::KeepCache => {
                self.source = DataSource::Cache;
                self.loading = None;
                self.render_all(true);
            }
            ViewAction::NotFound => {
                self.source = DataSource::Network;
                self.loading = None;
                self.render_all(true);
                self.notice = Some(Notice::NotFound);
            }
            ViewAction::SetFilter(query) => self.set_filter(&query),
            ViewAction::NextBatch => {
                self.render_next_batch();
            }
        }
    }
}

impl Reducible for ViewState {
    type Action = ViewAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        if action == ViewAction::NextBatch && !self.has_more() {
            return self;
        }
        let mut next = (*self).clone();
        next.apply(action);
        next.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn videos(n: usize) -> Vec<VideoEntry> {
        (0..n)
            .map(|i| VideoEntry {
                id: format!("vid{i}"),
                title: format!("Video {i}"),
                thumbnail_url: None,
            })
            .collect()
    }

    fn loaded(n: usize, batch_size: usize) -> ViewState {
        let mut state = ViewState::new(batch_size);
        state.apply(ViewAction::Begin {
            playlist_id: "PL1".to_string(),
        });
        state.apply(ViewAction::Render {
            source: DataSource::Network,
            meta: None,
            videos: videos(n),
        });
        state
    }

    #[test]
    fn render_shows_first_batch() {
        let state = loaded(50, 24);
        assert_eq!(state.cursor, 24);
        assert_eq!(state.rendered.len(), 24);
        assert_eq!(state.rendered[0].id, "vid0");
        assert_eq!(state.status_line, "Source: Network — 50 videos");
    }

    #[test]
    fn batches_advance_cursor_up_to_list_end() {
        let mut state = loaded(50, 24);

        assert_eq!(state.render_next_batch(), 24);
        assert_eq!(state.cursor, 48);
        assert_eq!(state.rendered.len(), 48);

        assert_eq!(state.render_next_batch(), 2);
        assert_eq!(state.cursor, 50);
        assert_eq!(state.rendered[49].id, "vid49");
    }

    #[test]
    fn batch_at_end_is_a_no_op() {
        let mut state = loaded(5, 24);
        let before = state.clone();

        assert_eq!(state.render_next_batch(), 0);
        state.apply(ViewAction::NextBatch);
        assert_eq!(state, before);
    }

    #[test]
    fn reducer_returns_same_state_when_nothing_left() {
        let state = Rc::new(loaded(3, 24));
        let next = state.clone().reduce(ViewAction::NextBatch);
        assert!(Rc::ptr_eq(&state, &next));
    }

    #[test]
    fn filter_is_case_insensitive_and_non_destructive() {
        let mut state = ViewState::new(24);
        state.apply(ViewAction::Render {
            source: DataSource::Cache,
            meta: None,
            videos: vec![
                VideoEntry {
                    id: "1".to_string(),
                    title: "ABC song".to_string(),
                    thumbnail_url: None,
                },
                VideoEntry {
                    id: "2".to_string(),
                    title: "xyz".to_string(),
                    thumbnail_url: None,
                },
            ],
        });

        state.apply(ViewAction::SetFilter("abc".to_string()));
        assert_eq!(state.active_list().len(), 1);
        assert_eq!(state.active_list()[0].title, "ABC song");
        assert_eq!(state.rendered.len(), 1);
        assert_eq!(state.videos.len(), 2);
        assert_eq!(state.status_line, "Source: Cache — 1 videos (filtered)");

        state.apply(ViewAction::SetFilter("   ".to_string()));
        assert_eq!(state.filter, None);
        assert_eq!(state.rendered.len(), 2);
        assert_eq!(state.status_line, "Source: Cache — 2 videos");
    }

    #[test]
    fn filter_resets_cursor_within_filtered_list() {
        let mut state = loaded(60, 24);
        state.render_next_batch();
        assert_eq!(state.cursor, 48);

        state.set_filter("video 1");
        // "Video 1", "Video 10".."Video 19"
        assert_eq!(state.active_list().len(), 11);
        assert_eq!(state.cursor, 11);
        assert!(state.cursor <= state.active_list().len());
    }

    #[test]
    fn fresh_render_reapplies_active_filter() {
        let mut state = loaded(12, 24);
        state.set_filter("video 1");
        assert_eq!(state.active_list().len(), 3);

        state.apply(ViewAction::Render {
            source: DataSource::Network,
            meta: None,
            videos: videos(3),
        });
        assert_eq!(state.filter.as_deref(), Some("video 1"));
        assert_eq!(state.active_list().len(), 1);
        assert_eq!(state.status_line, "Source: Network — 1 videos (filtered)");
    }

    #[test]
    fn meta_line_reflects_playlist() {
        let mut state = ViewState::new(24);
        state.apply(ViewAction::Render {
            source: DataSource::Network,
            meta: Some(PlaylistMeta {
                playlist_title: "Road Trip".to_string(),
                author: "Some Channel".to_string(),
            }),
            videos: videos(1),
        });
        assert_eq!(state.meta_line, "Playlist: Road Trip | By: Some Channel");
    }

    #[test]
    fn begin_drops_previous_playlist() {
        let mut state = loaded(10, 4);
        state.set_filter("video");
        state.apply(ViewAction::Begin {
            playlist_id: "PL2".to_string(),
        });

        assert_eq!(state.playlist_id, "PL2");
        assert!(state.videos.is_empty());
        assert!(state.rendered.is_empty());
        assert_eq!(state.filter, None);
        assert_eq!(state.cursor, 0);
        assert_eq!(state.batch_size, 4);
        assert_eq!(state.loading, Some(LOADING_CACHE));
    }

    #[test]
    fn not_found_shows_notice() {
        let mut state = ViewState::new(24);
        state.apply(ViewAction::NotFound);
        assert_eq!(state.notice, Some(Notice::NotFound));
        assert!(state.rendered.is_empty());
        assert!(Notice::NotFound.message().starts_with("No videos found"));
    }
}
