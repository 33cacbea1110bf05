//! Playlist load orchestration: cache first, then the network.

use crate::models::{PlaylistFeed, VideoEntry};
use crate::playlist::api::PlaylistSource;
use crate::playlist::cache::PlaylistCache;
use crate::playlist::state::{DataSource, ViewAction, ViewState, FETCHING_LATEST};
use crate::utils::extract_playlist_id;
use std::cell::RefCell;
use yew::functional::UseReducerDispatcher;

/// Receives view updates produced while a playlist loads.
pub trait ViewSink {
    fn apply(&self, action: ViewAction);
}

impl ViewSink for UseReducerDispatcher<ViewState> {
    fn apply(&self, action: ViewAction) {
        self.dispatch(action);
    }
}

impl ViewSink for RefCell<ViewState> {
    fn apply(&self, action: ViewAction) {
        self.borrow_mut().apply(action);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    InvalidInput,
    /// Fresh feed rendered and cached.
    Network {
        playlist_id: String,
        videos: Vec<VideoEntry>,
    },
    /// The network gave nothing; the cached view stays.
    CacheOnly { playlist_id: String, videos: usize },
    NotFound { playlist_id: String },
}

impl LoadOutcome {
    pub fn playlist_id(&self) -> Option<&str> {
        match self {
            LoadOutcome::InvalidInput => None,
            LoadOutcome::Network { playlist_id, .. }
            | LoadOutcome::CacheOnly { playlist_id, .. }
            | LoadOutcome::NotFound { playlist_id } => Some(playlist_id),
        }
    }
}

/// Loads a playlist from raw user input.
///
/// A cached copy renders first; a non-empty network result then replaces it
/// and overwrites the cache. Nothing here is cancelled by a later load.
pub async fn show_playlist(
    input: &str,
    cache: &PlaylistCache,
    source: &dyn PlaylistSource,
    view: &dyn ViewSink,
) -> LoadOutcome {
    let playlist_id = extract_playlist_id(input);
    if playlist_id.is_empty() {
        view.apply(ViewAction::Invalid);
        return LoadOutcome::InvalidInput;
    }

    log::info!("Loading playlist {playlist_id}");
    view.apply(ViewAction::Begin {
        playlist_id: playlist_id.clone(),
    });

    let cached = cache.load(&playlist_id).await;
    let cached_count = cached.videos.len();
    if cached_count > 0 {
        log::debug!("Rendering {cached_count} cached videos for {playlist_id}");
        view.apply(ViewAction::Render {
            source: DataSource::Cache,
            meta: cached.meta,
            videos: cached.videos,
        });
    }

    view.apply(ViewAction::Loading(Some(FETCHING_LATEST)));
    let feed = match source.fetch_playlist(&playlist_id).await {
        Ok(feed) => feed,
        Err(e) => {
            log::error!("Feed fetch for {playlist_id} failed: {e}");
            PlaylistFeed::empty()
        }
    };

    if feed.videos.is_empty() {
        if cached_count == 0 {
            view.apply(ViewAction::NotFound);
            return LoadOutcome::NotFound { playlist_id };
        }
        view.apply(ViewAction::KeepCache);
        return LoadOutcome::CacheOnly {
            playlist_id,
            videos: cached_count,
        };
    }

    cache
        .save(&playlist_id, feed.meta.as_ref(), &feed.videos)
        .await;
    log::info!("Fetched {} videos for {playlist_id}", feed.videos.len());

    view.apply(ViewAction::Render {
        source: DataSource::Network,
        meta: feed.meta,
        videos: feed.videos.clone(),
    });

    LoadOutcome::Network {
        playlist_id,
        videos: feed.videos,
    }
}
