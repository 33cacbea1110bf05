mod config;
mod env_variable_utils;
mod logging;
mod models;
mod player;
mod playlist;
mod router;
mod storage;
mod thumbs;
mod utils;

use crate::config::CONFIG;
use crate::router::{switch, Route};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    logging::init_logger(CONFIG.debug_mode);

    log::info!(
        "NAME: \"{}\", PROXY: \"{}\", BATCH: {}, DEBUG: \"{}\"",
        CONFIG.app_name,
        CONFIG.cors_proxy,
        CONFIG.batch_size,
        CONFIG.debug_mode
    );

    yew::Renderer::<App>::new().render();
}
