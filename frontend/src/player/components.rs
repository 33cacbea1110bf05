use crate::player::PlayerShape;
use crate::utils::{embed_url, BLANK_PLAYER_URL};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PlayerOverlayProps {
    /// The playing video; `None` keeps the overlay hidden with a blank frame.
    pub video_id: Option<String>,
    pub shape: PlayerShape,
    pub on_close: Callback<()>,
    pub on_shape: Callback<PlayerShape>,
}

#[function_component(PlayerOverlay)]
pub fn player_overlay(props: &PlayerOverlayProps) -> Html {
    // Escape closes the overlay while it is open.
    {
        let on_close = props.on_close.clone();
        let open = props.video_id.is_some();

        use_effect_with(open, move |open| {
            let listener = if *open {
                web_sys::window().and_then(|window| {
                    let closure = Closure::<dyn Fn(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                        if e.key() == "Escape" {
                            on_close.emit(());
                        }
                    });
                    window
                        .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                        .ok()
                        .map(|_| (window, closure))
                })
            } else {
                None
            };

            move || {
                if let Some((window, closure)) = listener {
                    let _ = window.remove_event_listener_with_callback(
                        "keydown",
                        closure.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    // Clicks inside the card must not reach the backdrop.
    let on_card_click = Callback::from(|e: MouseEvent| e.stop_propagation());

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let src = props
        .video_id
        .as_deref()
        .map(embed_url)
        .unwrap_or_else(|| BLANK_PLAYER_URL.to_string());
    let display = if props.video_id.is_some() {
        "display: flex"
    } else {
        "display: none"
    };

    html! {
        <div
            class="fixed inset-0 bg-black/80 items-center justify-center z-50"
            style={display}
            onclick={on_backdrop_click}
        >
            <div class={classes!("player-card", props.shape.css_class())} onclick={on_card_click}>
                <div class="flex justify-between items-center mb-2">
                    <SizeButtons selected={props.shape} on_select={props.on_shape.clone()} />
                    <button
                        class="text-white text-2xl px-2 hover:text-gray-300"
                        title="Close"
                        onclick={on_close_click}
                    >
                        {"✕"}
                    </button>
                </div>
                <iframe
                    class="w-full aspect-video rounded"
                    src={src}
                    allow="autoplay; encrypted-media; picture-in-picture; fullscreen"
                />
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SizeButtonsProps {
    pub selected: PlayerShape,
    pub on_select: Callback<PlayerShape>,
}

#[function_component(SizeButtons)]
pub fn size_buttons(props: &SizeButtonsProps) -> Html {
    html! {
        <div class="flex gap-1">
            { for PlayerShape::all_variants().into_iter().map(|shape| {
                let on_select = props.on_select.clone();
                let active = shape == props.selected;
                html! {
                    <button
                        class={classes!(
                            "px-2", "py-1", "text-xs", "rounded",
                            if active { "bg-blue-600 text-white" } else { "bg-gray-200 text-gray-800" }
                        )}
                        onclick={move |_| on_select.emit(shape)}
                    >
                        { shape.display_name() }
                    </button>
                }
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub message: Option<String>,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    match &props.message {
        Some(msg) => html! {
            <div class="fixed bottom-4 left-1/2 -translate-x-1/2 bg-gray-900 text-white px-4 py-2 rounded shadow-lg z-50">
                { msg }
            </div>
        },
        None => html! {},
    }
}

/// Runs `f` once after `millis` milliseconds.
pub fn run_later(millis: i32, f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(f);
    if let Err(e) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
    {
        log::warn!("setTimeout failed: {e:?}");
    }
}
