//! The page widgets shared by every page.
//!
//! These only touch the document;
//! nothing here depends on the page data.

use std::rc::Rc;

use tuku::i18n::Translator;
use wasm_bindgen::{prelude::*, JsCast};

use crate::{dom, log_js_error, DomBackend};

const HEADER_SCROLL_THRESHOLD: f64 = 50.;
const BACK_TO_TOP_THRESHOLD: f64 = 300.;
const FADE_IN_THRESHOLD: f64 = 0.1;

/// Install all widgets found in the document.
///
/// Returns the fade-in observer, so that renderers can observe the elements they create.
pub fn init_all(backend: &DomBackend, translator: &Rc<Translator<DomBackend>>) -> Option<FadeIn> {
    mobile_nav(backend);
    header_scroll(backend);
    back_to_top(backend);
    smooth_anchor_scroll(backend);
    language_selector(backend, translator);
    match FadeIn::new() {
        Ok(x) => {
            x.observe_new(backend.document());
            Some(x)
        }
        Err(err) => {
            log_js_error(&err);
            None
        }
    }
}

fn root(backend: &DomBackend) -> Option<web_sys::Element> {
    backend.document().document_element()
}

/// The hamburger menu opening the mobile navigation.
pub fn mobile_nav(backend: &DomBackend) {
    let root = match root(backend) {
        Some(x) => x,
        None => return,
    };
    let (hamburger, nav) = match (
        dom::query(&root, ".hamburger-menu"),
        dom::query(&root, ".mobile-nav"),
    ) {
        (Some(a), Some(b)) => (a, b),
        _ => return,
    };
    let body = backend.document().body();
    let set_open = {
        let hamburger = hamburger.clone();
        let nav = nav.clone();
        move |open: bool| {
            dom::toggle_class(&hamburger, "is-active", open);
            dom::toggle_class(&nav, "is-active", open);
            if let Some(body) = &body {
                let overflow = if open { "hidden" } else { "" };
                if let Err(err) = body.style().set_property("overflow", overflow) {
                    log_js_error(&err);
                }
            }
        }
    };
    let set_open = Rc::new(set_open);
    {
        let nav = nav.clone();
        let set_open = set_open.clone();
        dom::listen(&hamburger, "click", move |_| {
            set_open(!nav.class_list().contains("is-active"));
        });
    }
    for link in dom::query_all(&nav, "a") {
        let set_open = set_open.clone();
        dom::listen(&link, "click", move |_| set_open(false));
    }
}

/// Mark the header as `scrolled` once the page leaves the top.
pub fn header_scroll(backend: &DomBackend) {
    let header = match root(backend).and_then(|x| dom::query(&x, ".main-header")) {
        Some(x) => x,
        None => return,
    };
    let window = backend.window().clone();
    let update = move || {
        let y = window.scroll_y().unwrap_or(0.);
        dom::toggle_class(&header, "scrolled", y > HEADER_SCROLL_THRESHOLD);
    };
    update();
    dom::listen_passive(backend.window(), "scroll", move |_| update());
}

/// The back-to-top button.
pub fn back_to_top(backend: &DomBackend) {
    let btn = match backend.element_by_id("back-to-top-btn") {
        Some(x) => x,
        None => return,
    };
    {
        let window = backend.window().clone();
        let btn = btn.clone();
        dom::listen_passive(backend.window(), "scroll", move |_| {
            let y = window.scroll_y().unwrap_or(0.);
            dom::toggle_class(&btn, "visible", y > BACK_TO_TOP_THRESHOLD);
        });
    }
    let window = backend.window().clone();
    dom::listen(&btn, "click", move |_| {
        let options = web_sys::ScrollToOptions::new();
        options.set_top(0.);
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    });
}

/// Scroll smoothly into `elem` .
pub fn scroll_into_view(elem: &web_sys::Element) {
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    options.set_block(web_sys::ScrollLogicalPosition::Start);
    elem.scroll_into_view_with_scroll_into_view_options(&options);
}

/// In-page links scroll smoothly to their target.
pub fn smooth_anchor_scroll(backend: &DomBackend) {
    let root = match root(backend) {
        Some(x) => x,
        None => return,
    };
    for anchor in dom::query_all(&root, r##"a[href^="#"]"##) {
        let document = backend.document().clone();
        let target = anchor.get_attribute("href").unwrap_or_default();
        dom::listen(&anchor, "click", move |ev| {
            // a bare `#` is not a valid selector
            if target.len() <= 1 {
                return;
            }
            ev.prevent_default();
            if let Ok(Some(elem)) = document.query_selector(&target) {
                scroll_into_view(&elem);
            }
        });
    }
}

/// The language dropdown.
///
/// Options are `.lang-dropdown a[data-lang]` ; choosing one switches the language in background.
pub fn language_selector(backend: &DomBackend, translator: &Rc<Translator<DomBackend>>) {
    let selector = match root(backend).and_then(|x| dom::query(&x, ".language-selector")) {
        Some(x) => x,
        None => return,
    };
    let button = dom::query(&selector, ".lang-button");
    let dropdown = dom::query(&selector, ".lang-dropdown");
    let set_open = Rc::new(move |open: bool| {
        if let Some(x) = &button {
            dom::toggle_class(x, "is-open", open);
        }
        if let Some(x) = &dropdown {
            dom::toggle_class(x, "is-open", open);
        }
    });
    if let Some(button) = dom::query(&selector, ".lang-button") {
        let set_open = set_open.clone();
        let selector = selector.clone();
        dom::listen(&button, "click", move |ev| {
            ev.stop_propagation();
            let open = dom::query(&selector, ".lang-dropdown")
                .map(|x| x.class_list().contains("is-open"))
                .unwrap_or(false);
            set_open(!open);
        });
    }
    {
        let set_open = set_open.clone();
        let selector = selector.clone();
        dom::listen(backend.document(), "click", move |ev| {
            let target = ev.target().and_then(|x| x.dyn_into::<web_sys::Node>().ok());
            if !selector.contains(target.as_ref()) {
                set_open(false);
            }
        });
    }
    for link in dom::query_all(&selector, ".lang-dropdown a[data-lang]") {
        let set_open = set_open.clone();
        let translator = translator.clone();
        let lang = link.get_attribute("data-lang").unwrap_or_default();
        dom::listen(&link, "click", move |ev| {
            ev.prevent_default();
            set_open(false);
            translator.request_language(&lang);
        });
    }
}

/// Fade elements in when they enter the viewport.
///
/// Elements with the class `fade-in-element` get `is-visible` once.
#[derive(Clone)]
pub struct FadeIn {
    observer: web_sys::IntersectionObserver,
}

impl FadeIn {
    fn new() -> Result<Self, JsValue> {
        let cb = Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
            |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: web_sys::IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        let target = entry.target();
                        dom::toggle_class(&target, "is-visible", true);
                        observer.unobserve(&target);
                    }
                }
            },
        );
        let options = web_sys::IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(FADE_IN_THRESHOLD));
        let observer = web_sys::IntersectionObserver::new_with_options(
            cb.as_ref().unchecked_ref(),
            &options,
        )?;
        cb.forget();
        Ok(Self { observer })
    }

    /// Observe the fading elements that are not visible yet.
    pub fn observe_new(&self, document: &web_sys::Document) {
        let root = match document.document_element() {
            Some(x) => x,
            None => return,
        };
        for elem in dom::query_all(&root, ".fade-in-element:not(.is-visible)") {
            self.observer.observe(&elem);
        }
    }
}
