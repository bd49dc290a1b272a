//! Thin binding to the Leaflet global (`L`) for the contact-page map.
//! Leaflet stays the map engine; only the initialization the page needs is
//! bound here.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub const TEHRAN: (f64, f64) = (35.6892, 51.3890);
const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

#[wasm_bindgen]
extern "C" {
    pub type LeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    fn leaflet_map(element_id: &str) -> LeafletMap;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &JsValue, zoom: f64) -> LeafletMap;

    pub type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn tile_add_to(this: &TileLayer, map: &LeafletMap) -> TileLayer;

    pub type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn leaflet_marker(coords: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = addTo)]
    fn marker_add_to(this: &Marker, map: &LeafletMap) -> Marker;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Marker, content: &str) -> Marker;

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &Marker) -> Marker;
}

/// True when the Leaflet script is loaded on this page.
fn leaflet_available() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    js_sys::Reflect::get(&window, &JsValue::from_str("L"))
        .map(|l| !l.is_undefined())
        .unwrap_or(false)
}

fn lat_lng(coords: (f64, f64)) -> JsValue {
    let arr = js_sys::Array::new();
    arr.push(&JsValue::from_f64(coords.0));
    arr.push(&JsValue::from_f64(coords.1));
    arr.unchecked_into()
}

/// Initialize the contact map inside `element_id`: Tehran view, OSM tiles,
/// popup marker. Skipped when the container or Leaflet itself is missing.
pub fn init_contact_map(element_id: &str) {
    let container = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id));
    if container.is_none() {
        return;
    }
    if !leaflet_available() {
        log::warn!("Leaflet is not loaded; skipping map init");
        return;
    }

    let center = lat_lng(TEHRAN);
    let map = leaflet_map(element_id);
    map.set_view(&center, 15.0);

    let options = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &options,
        &JsValue::from_str("attribution"),
        &JsValue::from_str(OSM_ATTRIBUTION),
    );
    tile_layer(OSM_TILE_URL, &options).tile_add_to(&map);

    leaflet_marker(&center)
        .marker_add_to(&map)
        .bind_popup("پیانوت - تهران")
        .open_popup();
}
