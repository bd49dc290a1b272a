pub mod chart;
pub mod components;
pub mod format;
pub mod map;
pub mod net;
pub mod pricing;
pub mod state;
pub mod theme;
pub mod types;
pub mod upload;

use leptos::prelude::*;
use components::app::App;

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    theme::apply_saved_theme();
    mount_to_body(App);
}
