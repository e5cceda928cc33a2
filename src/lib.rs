mod api;
mod app;
mod components;
mod config;
mod filter;
mod logging;
mod models;
mod pages;
mod query;
mod state;
mod storage;
mod timing;
mod toast;
mod util;

pub use app::App;
pub use query::hydration::notes_state_script;

use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    mount_to_body(App);
}
