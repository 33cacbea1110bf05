use crate::config::CONFIG;
use crate::player::components::{run_later, PlayerOverlay, Toast};
use crate::player::{load_preference, save_preference, PlayerShape};
use crate::playlist::api::HttpFeedSource;
use crate::playlist::cache::PlaylistCache;
use crate::playlist::components::{
    ClearCacheButton, PlaylistForm, SearchBox, Sentinel, StatusBar, VideoGrid,
};
use crate::playlist::controller::{show_playlist, LoadOutcome};
use crate::playlist::state::{ViewAction, ViewState};
use crate::storage::StorageAdapter;
use crate::thumbs;
use yew::prelude::*;
use yew_router::prelude::*;

const TOAST_MILLIS: i32 = 1500;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <PlaylistApp /> },
        Route::NotFound => html! {
            <div class="min-h-screen flex items-center justify-center bg-gray-700">
                <div class="bg-white p-8 rounded-lg shadow-lg text-center">
                    <h1 class="text-2xl font-bold text-gray-800 mb-4">{"404 - Page Not Found"}</h1>
                    <Link<Route> to={Route::Home} classes="text-blue-600 hover:underline">
                        {"Go back to the playlist"}
                    </Link<Route>>
                </div>
            </div>
        },
    }
}

// Keeps `?list=<id>` in the address bar so a loaded playlist can be shared.
fn update_list_param(playlist_id: &str) {
    if let Some(window) = web_sys::window() {
        let Ok(href) = window.location().href() else {
            return;
        };
        let Ok(url) = web_sys::Url::new(&href) else {
            return;
        };
        url.search_params().set("list", playlist_id);

        if url.href() == href {
            return;
        }
        if let Ok(history) = window.history() {
            let _ =
                history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url.href()));
        }
    }
}

fn get_list_param() -> Option<String> {
    let href = web_sys::window()?.location().href().ok()?;
    let url = web_sys::Url::new(&href).ok()?;
    url.search_params()
        .get("list")
        .filter(|list| !list.trim().is_empty())
}

#[function_component(PlaylistApp)]
pub fn playlist_app() -> Html {
    let storage = use_memo((), |_| StorageAdapter::browser());
    let cache = {
        let storage = storage.clone();
        use_memo((), move |_| PlaylistCache::new(storage))
    };
    let source = use_memo((), |_| HttpFeedSource::new(CONFIG.cors_proxy.clone()));
    let view = use_reducer(|| ViewState::new(CONFIG.batch_size));

    let playlist_input =
        use_state(|| get_list_param().unwrap_or_else(|| CONFIG.default_playlist_id.clone()));
    let player_video = use_state(|| None::<String>);
    let player_shape = use_state(PlayerShape::default);
    let toast = use_state(|| None::<String>);

    let on_load = {
        let cache = cache.clone();
        let source = source.clone();
        let dispatcher = view.dispatcher();

        Callback::from(move |input: String| {
            let cache = cache.clone();
            let source = source.clone();
            let dispatcher = dispatcher.clone();

            wasm_bindgen_futures::spawn_local(async move {
                let outcome = show_playlist(&input, &cache, &*source, &dispatcher).await;

                if let Some(playlist_id) = outcome.playlist_id() {
                    update_list_param(playlist_id);
                }
                if let LoadOutcome::Network { videos, .. } = outcome {
                    let urls =
                        thumbs::urls_to_warm(videos.iter().map(|v| v.thumbnail_url.as_deref()));
                    thumbs::warm(urls).await;
                }
            });
        })
    };

    // Load the initial playlist once on mount
    {
        let on_load = on_load.clone();
        let playlist_input = playlist_input.clone();
        use_effect_with((), move |_| {
            on_load.emit((*playlist_input).clone());
            || ()
        });
    }

    let on_input = {
        let playlist_input = playlist_input.clone();
        Callback::from(move |value: String| playlist_input.set(value))
    };

    let on_search = {
        let dispatcher = view.dispatcher();
        Callback::from(move |query: String| dispatcher.dispatch(ViewAction::SetFilter(query)))
    };

    let on_next_batch = {
        let dispatcher = view.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(ViewAction::NextBatch))
    };

    let on_select = {
        let storage = storage.clone();
        let player_video = player_video.clone();
        let player_shape = player_shape.clone();

        Callback::from(move |video_id: String| {
            let storage = storage.clone();
            let player_video = player_video.clone();
            let player_shape = player_shape.clone();

            // The saved shape is applied before the overlay appears.
            wasm_bindgen_futures::spawn_local(async move {
                player_shape.set(load_preference(&storage).await);
                player_video.set(Some(video_id));
            });
        })
    };

    let on_close = {
        let player_video = player_video.clone();
        Callback::from(move |_: ()| player_video.set(None))
    };

    let on_shape = {
        let storage = storage.clone();
        let player_shape = player_shape.clone();
        let toast = toast.clone();

        Callback::from(move |shape: PlayerShape| {
            player_shape.set(shape);

            let storage = storage.clone();
            let toast = toast.clone();
            wasm_bindgen_futures::spawn_local(async move {
                save_preference(&storage, shape).await;
                toast.set(Some("Player size saved".to_string()));
                run_later(TOAST_MILLIS, move || toast.set(None));
            });
        })
    };

    let on_clear_cache = {
        let cache = cache.clone();
        Callback::from(move |_: ()| {
            let Some(window) = web_sys::window() else {
                return;
            };
            if !window
                .confirm_with_message("Clear cached playlists for this viewer?")
                .unwrap_or(false)
            {
                return;
            }

            let cache = cache.clone();
            wasm_bindgen_futures::spawn_local(async move {
                cache.clear_all().await;
                thumbs::clear().await;
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message("✅ Cache cleared for this app.");
                }
            });
        })
    };

    html! {
        <div class="min-h-screen flex flex-col items-center bg-gray-700 p-4">
            <div class="bg-white p-8 rounded-lg shadow-lg w-full max-w-5xl">
                <div class="flex justify-between items-center mb-6">
                    <h1 class="text-3xl font-bold text-gray-800">
                        { CONFIG.app_name.clone() }
                    </h1>
                    <ClearCacheButton on_clear={on_clear_cache} />
                </div>

                <PlaylistForm
                    value={(*playlist_input).clone()}
                    loading={view.loading.is_some()}
                    on_input={on_input}
                    on_load={on_load}
                />

                <SearchBox on_search={on_search} />

                <StatusBar
                    status_line={view.status_line.clone()}
                    meta_line={view.meta_line.clone()}
                />

                <VideoGrid
                    cards={view.rendered.clone()}
                    notice={view.notice}
                    loading={view.loading}
                    on_select={on_select}
                />

                <Sentinel has_more={view.has_more()} on_visible={on_next_batch} />
            </div>

            <PlayerOverlay
                video_id={(*player_video).clone()}
                shape={*player_shape}
                on_close={on_close}
                on_shape={on_shape}
            />
            <Toast message={(*toast).clone()} />
        </div>
    }
}
