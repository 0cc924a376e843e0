//! Bindings of the Leaflet map library and its marker cluster plugin.
//!
//! Only the calls the site makes are bound.
//! The library is loaded by the page as the global `L` .

use js_sys::{Array, Function, Object, Reflect};
use tuku::{category::CategoryStyle, error::Error, geo::GeoPoint, page::MapMarker};
use wasm_bindgen::prelude::*;

use crate::js_err;

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[wasm_bindgen]
extern "C" {
    /// A Leaflet map
    pub type Map;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn new_map(id: &str) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &Map, center: &JsValue, zoom: u8) -> Map;

    #[wasm_bindgen(method, js_name = flyTo)]
    fn fly_to(this: &Map, center: &JsValue, zoom: u8, options: &JsValue) -> Map;

    /// Destroy the map and its DOM content
    #[wasm_bindgen(method)]
    pub fn remove(this: &Map);

    /// Any Leaflet layer
    #[derive(Clone)]
    pub type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, map: &Map) -> Layer;

    #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> Result<Layer, JsValue>;

    /// A Leaflet marker
    #[wasm_bindgen(extends = Layer)]
    #[derive(Clone)]
    pub type Marker;

    #[wasm_bindgen(catch, js_namespace = L, js_name = marker)]
    fn new_marker(latlng: &JsValue, options: &JsValue) -> Result<Marker, JsValue>;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Marker, content: &str) -> Marker;

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &Marker) -> Marker;

    #[wasm_bindgen(catch, js_namespace = L, js_name = divIcon)]
    fn div_icon(options: &JsValue) -> Result<JsValue, JsValue>;

    /// A group of layers, shown or hidden together
    #[wasm_bindgen(extends = Layer)]
    pub type LayerGroup;

    #[wasm_bindgen(method, js_name = addLayer)]
    fn add_layer(this: &LayerGroup, layer: &Layer) -> LayerGroup;

    #[wasm_bindgen(method, js_name = clearLayers)]
    fn clear_layers(this: &LayerGroup) -> LayerGroup;

    /// A layer group clustering nearby markers
    #[wasm_bindgen(extends = LayerGroup, extends = Layer)]
    pub type MarkerClusterGroup;

    #[wasm_bindgen(catch, js_namespace = L, js_name = markerClusterGroup)]
    fn new_marker_cluster_group() -> Result<MarkerClusterGroup, JsValue>;

    #[wasm_bindgen(method, js_name = zoomToShowLayer)]
    fn zoom_to_show_layer(this: &MarkerClusterGroup, layer: &Layer, callback: &Function);
}

/// Whether the page has loaded Leaflet.
pub fn is_loaded() -> bool {
    Reflect::has(&js_sys::global(), &JsValue::from_str("L")).unwrap_or(false)
}

fn lat_lng(point: &GeoPoint) -> JsValue {
    Array::of2(&JsValue::from_f64(point.lat), &JsValue::from_f64(point.lon)).into()
}

/// Build a plain JS object.
pub(crate) fn js_object(entries: &[(&str, JsValue)]) -> Result<JsValue, Error> {
    let obj = Object::new();
    for (k, v) in entries {
        Reflect::set(&obj, &JsValue::from_str(k), v).map_err(js_err("Cannot build JS object"))?;
    }
    Ok(obj.into())
}

/// Create a map in the element `container_id` with an OpenStreetMap tile layer.
pub fn create_map(container_id: &str, center: &GeoPoint, zoom: u8) -> Result<Map, Error> {
    let map = new_map(container_id).map_err(js_err("Cannot create map"))?;
    map.set_view(&lat_lng(center), zoom);
    let options = js_object(&[
        ("attribution", TILE_ATTRIBUTION.into()),
        ("maxZoom", 19.into()),
    ])?;
    tile_layer(TILE_URL, &options)
        .map_err(js_err("Cannot create tile layer"))?
        .add_to(&map);
    Ok(map)
}

/// The HTML of a category marker icon.
pub fn icon_html(style: &CategoryStyle, is_current: bool) -> String {
    let (scale, z_index) = if is_current {
        ("scale(1.2)", 1000)
    } else {
        ("scale(1)", 900)
    };
    format!(
        r#"<div class="marker-icon-background" style="background-color: {}; transform: {}; z-index: {};"><i class="fa-solid {}"></i></div>"#,
        style.color, scale, z_index, style.icon
    )
}

/// The popup HTML of a marker.
///
/// With `with_link` , the popup links to the detail page.
pub fn popup_html(marker: &MapMarker, with_link: bool) -> String {
    let title = html_escape::encode_text(&marker.title);
    if with_link {
        format!(
            r#"<b>{}</b><br><a href="{}">{}</a>"#,
            title,
            html_escape::encode_double_quoted_attribute(&marker.link_url),
            html_escape::encode_text(&marker.link_label)
        )
    } else {
        format!("<b>{}</b>", title)
    }
}

/// Create a marker with a category icon and a popup.
pub fn create_marker(marker: &MapMarker, with_link: bool) -> Result<Marker, Error> {
    let icon = div_icon(&js_object(&[
        ("className", "custom-fa-icon".into()),
        ("html", icon_html(&marker.style, marker.is_current).into()),
        ("iconSize", Array::of2(&40.into(), &40.into()).into()),
        ("iconAnchor", Array::of2(&20.into(), &40.into()).into()),
    ])?)
    .map_err(js_err("Cannot create marker icon"))?;
    let ret = new_marker(&lat_lng(&marker.point), &js_object(&[("icon", icon)])?)
        .map_err(js_err("Cannot create marker"))?;
    ret.bind_popup(&popup_html(marker, with_link));
    Ok(ret)
}

impl Marker {
    /// Show the marker on a map
    pub fn show_on(&self, map: &Map) {
        self.add_to(map);
    }

    /// Open the popup
    pub fn open(&self) {
        self.open_popup();
    }
}

impl Map {
    /// Animate the view to a point
    pub fn fly_to_point(&self, point: &GeoPoint, zoom: u8) {
        let options = js_object(&[("animate", true.into()), ("duration", 1.5.into())])
            .unwrap_or(JsValue::UNDEFINED);
        self.fly_to(&lat_lng(point), zoom, &options);
    }
}

impl LayerGroup {
    /// Add a layer
    pub fn add(&self, layer: &Layer) {
        self.add_layer(layer);
    }

    /// Remove all layers
    pub fn clear(&self) {
        self.clear_layers();
    }
}

impl MarkerClusterGroup {
    /// Create a cluster group and show it on a map
    pub fn new_on(map: &Map) -> Result<Self, Error> {
        let ret = new_marker_cluster_group().map_err(js_err("Cannot create marker cluster group"))?;
        ret.add_to(map);
        Ok(ret)
    }

    /// Zoom until `marker` is out of its cluster, then open its popup
    pub fn reveal(&self, marker: &Marker) {
        let m = marker.clone();
        let cb = Closure::once_into_js(move || {
            m.open_popup();
        });
        self.zoom_to_show_layer(marker, cb.unchecked_ref());
    }
}
