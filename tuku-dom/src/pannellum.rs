//! Binding of the Pannellum panorama viewer.

use tuku::error::Error;
use wasm_bindgen::prelude::*;

use crate::{js_err, leaflet::js_object};

#[wasm_bindgen]
extern "C" {
    /// A panorama viewer
    pub type Viewer;

    #[wasm_bindgen(catch, js_namespace = pannellum, js_name = viewer)]
    fn new_viewer(container_id: &str, config: &JsValue) -> Result<Viewer, JsValue>;
}

/// Show an equirectangular panorama in the element `container_id` .
///
/// The panorama loads immediately and rotates slowly.
pub fn show_panorama(container_id: &str, url: &str, title: Option<&str>) -> Result<Viewer, Error> {
    let mut entries = vec![
        ("type", JsValue::from_str("equirectangular")),
        ("panorama", JsValue::from_str(url)),
        ("autoLoad", JsValue::TRUE),
        ("autoRotate", JsValue::from_f64(-2.)),
    ];
    if let Some(title) = title {
        entries.push(("title", JsValue::from_str(title)));
    }
    new_viewer(container_id, &js_object(&entries)?).map_err(js_err("Cannot create panorama viewer"))
}
