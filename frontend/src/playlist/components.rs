use crate::models::VideoEntry;
use crate::playlist::state::Notice;
use js_sys::{Array, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlInputElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PlaylistFormProps {
    pub value: String,
    pub loading: bool,
    pub on_input: Callback<String>,
    pub on_load: Callback<String>,
}

#[function_component(PlaylistForm)]
pub fn playlist_form(props: &PlaylistFormProps) -> Html {
    let on_input = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input_value = e.target_unchecked_into::<HtmlInputElement>().value();
            on_input.emit(input_value);
        })
    };

    // Submitting the form covers both the button and Enter in the field.
    let on_submit = {
        let on_load = props.on_load.clone();
        let value = props.value.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            on_load.emit(value.trim().to_string());
        })
    };

    html! {
        <form onsubmit={on_submit} class="flex mb-4">
            <input
                type="text"
                class="flex-grow p-3 border border-gray-300 rounded-l-lg focus:outline-none focus:ring-2 focus:ring-blue-500"
                placeholder="Playlist ID or URL..."
                value={props.value.clone()}
                oninput={on_input}
            />
            <button
                type="submit"
                class="bg-blue-600 text-white p-3 rounded-r-lg hover:bg-blue-700 focus:outline-none focus:ring-2 focus:ring-blue-500"
            >
                { if props.loading { "Loading..." } else { "Load" } }
            </button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct SearchBoxProps {
    pub on_search: Callback<String>,
}

#[function_component(SearchBox)]
pub fn search_box(props: &SearchBoxProps) -> Html {
    let on_input = {
        let on_search = props.on_search.clone();
        Callback::from(move |e: InputEvent| {
            on_search.emit(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    html! {
        <input
            type="search"
            class="w-full p-2 mb-4 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-blue-500"
            placeholder="Filter videos by title..."
            oninput={on_input}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusBarProps {
    pub status_line: String,
    pub meta_line: String,
}

#[function_component(StatusBar)]
pub fn status_bar(props: &StatusBarProps) -> Html {
    html! {
        <div class="mb-4 text-sm text-gray-600">
            <p>{ &props.meta_line }</p>
            <p class="text-gray-500">{ &props.status_line }</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoCardProps {
    pub video: VideoEntry,
    pub on_select: Callback<String>,
}

#[function_component(VideoCard)]
pub fn video_card(props: &VideoCardProps) -> Html {
    let onclick = {
        let on_select = props.on_select.clone();
        let id = props.video.id.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_select.emit(id.clone());
        })
    };

    html! {
        <a href="#" class="block bg-gray-100 rounded-lg overflow-hidden hover:shadow-lg" {onclick}>
            {
                match &props.video.thumbnail_url {
                    Some(url) => html! {
                        <img class="w-full aspect-video object-cover" src={url.clone()} loading="lazy" alt={props.video.title.clone()} />
                    },
                    None => html! {
                        <div class="w-full aspect-video bg-gray-300 flex items-center justify-center text-gray-500">{"▶"}</div>
                    },
                }
            }
            <div class="p-2 text-sm text-gray-800 line-clamp-2">{ &props.video.title }</div>
        </a>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoGridProps {
    pub cards: Vec<VideoEntry>,
    pub notice: Option<Notice>,
    pub loading: Option<&'static str>,
    pub on_select: Callback<String>,
}

#[function_component(VideoGrid)]
pub fn video_grid(props: &VideoGridProps) -> Html {
    html! {
        <div>
            {
                if let Some(msg) = props.loading {
                    html! { <p class="text-center text-gray-500 mb-4 animate-pulse">{ msg }</p> }
                } else {
                    html! {}
                }
            }
            {
                if let Some(notice) = props.notice {
                    html! { <p class="text-center text-gray-500 mb-4">{ notice.message() }</p> }
                } else {
                    html! {}
                }
            }
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                { for props.cards.iter().map(|video| html! {
                    <VideoCard video={video.clone()} on_select={props.on_select.clone()} />
                })}
            </div>
        </div>
    }
}

fn supports_intersection_observer() -> bool {
    web_sys::window()
        .map(|w| Reflect::has(&w, &"IntersectionObserver".into()).unwrap_or(false))
        .unwrap_or(false)
}

type ObserverClosure = Closure<dyn FnMut(Array)>;

fn observe(
    target: &web_sys::Element,
    on_visible: Rc<RefCell<Callback<()>>>,
) -> Option<(IntersectionObserver, ObserverClosure)> {
    let closure = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
        let intersecting = entries
            .get(0)
            .dyn_into::<IntersectionObserverEntry>()
            .map(|entry| entry.is_intersecting())
            .unwrap_or(false);
        if intersecting {
            on_visible.borrow().emit(());
        }
    });

    let options = IntersectionObserverInit::new();
    options.set_root_margin("200px");
    options.set_threshold(&JsValue::from(0));

    let observer =
        IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &options)
            .map_err(|e| log::warn!("IntersectionObserver failed: {e:?}"))
            .ok()?;
    observer.observe(target);
    Some((observer, closure))
}

#[derive(Properties, PartialEq)]
pub struct SentinelProps {
    pub has_more: bool,
    pub on_visible: Callback<()>,
}

/// Requests the next batch when scrolled near, or offers a "Load More"
/// button where `IntersectionObserver` is unavailable.
#[function_component(Sentinel)]
pub fn sentinel(props: &SentinelProps) -> Html {
    let node = use_node_ref();
    let observer_supported = use_memo((), |_| supports_intersection_observer());
    let latest = use_mut_ref(|| props.on_visible.clone());
    *latest.borrow_mut() = props.on_visible.clone();

    {
        let node = node.clone();
        let latest = latest.clone();
        use_effect_with(*observer_supported, move |supported| {
            let observer = if *supported {
                node.cast::<web_sys::Element>()
                    .and_then(|element| observe(&element, latest))
            } else {
                None
            };

            move || {
                if let Some((observer, _closure)) = observer {
                    observer.disconnect();
                }
            }
        });
    }

    if *observer_supported {
        html! { <div ref={node} class="h-4"></div> }
    } else if props.has_more {
        let on_visible = props.on_visible.clone();
        html! {
            <div class="mt-6 flex justify-center">
                <button
                    class="px-4 py-2 text-sm bg-blue-600 text-white rounded hover:bg-blue-700"
                    onclick={move |_| on_visible.emit(())}
                >
                    {"Load More"}
                </button>
            </div>
        }
    } else {
        html! {}
    }
}

#[derive(Properties, PartialEq)]
pub struct ClearCacheButtonProps {
    pub on_clear: Callback<()>,
}

#[function_component(ClearCacheButton)]
pub fn clear_cache_button(props: &ClearCacheButtonProps) -> Html {
    let on_clear = props.on_clear.clone();
    html! {
        <button
            class="text-sm text-red-600 hover:underline"
            onclick={move |_| on_clear.emit(())}
        >
            {"Clear Cache"}
        </button>
    }
}
