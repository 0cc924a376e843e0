//! The DOM binding of the Tuku GO site.
//!
//! `DomBackend` implements `tuku::backend::Backend` on top of `web-sys` .
//! The page modules render the view models of `tuku::page` into the document
//! and wire the browser events.

#![warn(missing_docs)]

use futures::future::{FutureExt, LocalBoxFuture};
use js_sys::JsString;
use tuku::{backend::*, error::Error};
use wasm_bindgen::{JsCast, JsValue};

pub mod about;
pub mod detail;
mod dom;
mod fetch;
pub mod home;
pub mod leaflet;
pub mod pannellum;
pub mod widgets;

pub use dom::DomElement;

/// The types that should usually be imported.
pub mod prelude {
    pub use crate::DomBackend;
    pub use tuku::prelude::*;
}

pub(crate) fn js_error_message(err: &JsValue) -> String {
    if let Some(err) = err.dyn_ref::<js_sys::Error>() {
        String::from(err.message())
    } else if let Some(s) = err.dyn_ref::<JsString>() {
        String::from(s)
    } else {
        "(JavaScript Error)".to_string()
    }
}

pub(crate) fn log_js_error(err: &JsValue) {
    log::error!("{}", js_error_message(err));
}

pub(crate) fn js_err(msg: &str) -> impl '_ + FnOnce(JsValue) -> Error {
    move |err| Error::BackendError {
        msg: format!("{}: {}", msg, js_error_message(&err)),
        err: None,
    }
}

/// A common async runner for DOM environment
#[inline]
pub fn async_task(fut: impl 'static + std::future::Future<Output = ()>) {
    wasm_bindgen_futures::spawn_local(fut);
}

/// A DOM backend
pub struct DomBackend {
    window: web_sys::Window,
    document: web_sys::Document,
    fetch_timeout_ms: u32,
}

impl DomBackend {
    /// Create a backend for the current page
    pub fn new(fetch_timeout_ms: u32) -> Result<Self, Error> {
        let window = web_sys::window().ok_or_else(|| Error::backend("Cannot find `window`"))?;
        let document = window
            .document()
            .ok_or_else(|| Error::backend("Cannot find `document`"))?;
        Ok(Self {
            window,
            document,
            fetch_timeout_ms,
        })
    }

    /// The `window` object
    pub fn window(&self) -> &web_sys::Window {
        &self.window
    }

    /// The `document` object
    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    /// Find an element by its `id`
    pub fn element_by_id(&self, id: &str) -> Option<web_sys::Element> {
        self.document.get_element_by_id(id)
    }

    /// The value of a query parameter of the page URL
    pub fn query_param(&self, name: &str) -> Option<String> {
        let search = self.window.location().search().ok()?;
        web_sys::UrlSearchParams::new_with_str(&search)
            .ok()?
            .get(name)
    }

    fn local_storage(&self) -> Result<web_sys::Storage, Error> {
        self.window
            .local_storage()
            .map_err(js_err("Cannot access local storage"))?
            .ok_or_else(|| Error::backend("Local storage is not available"))
    }
}

impl Backend for DomBackend {
    type Element = DomElement;

    fn async_task(fut: impl 'static + std::future::Future<Output = ()>) {
        async_task(fut)
    }

    fn fetch_text(&self, url: &str) -> LocalBoxFuture<'static, Result<String, Error>> {
        fetch::fetch_text(self.window.clone(), url.to_string(), self.fetch_timeout_ms).boxed_local()
    }

    fn stored_item(&self, key: &str) -> Option<String> {
        match self.local_storage() {
            Ok(storage) => storage.get_item(key).ok().flatten(),
            Err(err) => {
                log::warn!("{}", err);
                None
            }
        }
    }

    fn store_item(&self, key: &str, value: &str) -> Result<(), Error> {
        self.local_storage()?
            .set_item(key, value)
            .map_err(js_err("Cannot write local storage"))
    }

    fn primary_language(&self) -> Option<String> {
        self.window.navigator().language()
    }

    fn preferred_languages(&self) -> Vec<String> {
        self.window
            .navigator()
            .languages()
            .iter()
            .filter_map(|x| x.as_string())
            .collect()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => dom::elements_of(&list).map(DomElement::from).collect(),
            Err(err) => {
                log_js_error(&err);
                vec![]
            }
        }
    }

    fn query_selector(&self, selector: &str) -> Option<Self::Element> {
        match self.document.query_selector(selector) {
            Ok(x) => x.map(DomElement::from),
            Err(err) => {
                log_js_error(&err);
                None
            }
        }
    }

    fn set_document_language(&self, lang: &str) {
        if let Some(root) = self.document.document_element() {
            if let Err(err) = root.set_attribute("lang", lang) {
                log_js_error(&err);
            }
        }
    }

    fn set_document_title(&self, title: &str) {
        self.document.set_title(title);
    }

    fn add_body_class(&self, class: &str) {
        if let Some(body) = self.document.body() {
            if let Err(err) = body.class_list().add_1(class) {
                log_js_error(&err);
            }
        }
    }
}

/// Read the page configuration.
///
/// The configuration is the JSON content of `<script type="application/json" id="tuku-config">` .
/// Without such element, the defaults are used.
pub fn read_config(document: &web_sys::Document) -> Result<tuku::SiteConfig, Error> {
    match document
        .get_element_by_id("tuku-config")
        .and_then(|x| x.text_content())
    {
        None => Ok(tuku::SiteConfig::default()),
        Some(src) => tuku::SiteConfig::from_json(&src),
    }
}
