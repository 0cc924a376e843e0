use tuku::{backend::BackendElement, error::Error};
use wasm_bindgen::{prelude::*, JsCast};

use crate::{js_err, log_js_error};

/// A DOM element returned by backend queries
#[derive(Clone)]
pub struct DomElement {
    elem: web_sys::Element,
}

impl From<web_sys::Element> for DomElement {
    fn from(elem: web_sys::Element) -> Self {
        Self { elem }
    }
}

impl DomElement {
    /// The underlying DOM element
    pub fn dom_elem(&self) -> &web_sys::Element {
        &self.elem
    }
}

impl BackendElement for DomElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.elem.get_attribute(name)
    }

    fn text_content(&self) -> String {
        self.elem.text_content().unwrap_or_default()
    }

    fn set_text_content(&self, content: &str) {
        self.elem.set_text_content(Some(content));
    }
}

pub(crate) fn elements_of(list: &web_sys::NodeList) -> impl '_ + Iterator<Item = web_sys::Element> {
    (0..list.length())
        .filter_map(move |i| list.item(i))
        .filter_map(|x| x.dyn_into::<web_sys::Element>().ok())
}

pub(crate) fn query_all(parent: &web_sys::Element, selector: &str) -> Vec<web_sys::Element> {
    match parent.query_selector_all(selector) {
        Ok(list) => elements_of(&list).collect(),
        Err(err) => {
            log_js_error(&err);
            vec![]
        }
    }
}

pub(crate) fn query(parent: &web_sys::Element, selector: &str) -> Option<web_sys::Element> {
    parent.query_selector(selector).ok().flatten()
}

/// Create an element with a class name.
pub(crate) fn create(
    document: &web_sys::Document,
    tag: &str,
    class_name: &str,
) -> Result<web_sys::Element, Error> {
    let elem = document
        .create_element(tag)
        .map_err(js_err("Cannot create element"))?;
    if !class_name.is_empty() {
        elem.set_class_name(class_name);
    }
    Ok(elem)
}

pub(crate) fn set_attr(elem: &web_sys::Element, name: &str, value: &str) -> Result<(), Error> {
    elem.set_attribute(name, value)
        .map_err(js_err("Cannot set attribute"))
}

pub(crate) fn append(parent: &web_sys::Node, child: &web_sys::Node) -> Result<(), Error> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(js_err("Cannot append child"))
}

/// Create `<tag class=..>text</tag>` and append it.
pub(crate) fn append_text(
    document: &web_sys::Document,
    parent: &web_sys::Node,
    tag: &str,
    class_name: &str,
    text: &str,
) -> Result<web_sys::Element, Error> {
    let elem = create(document, tag, class_name)?;
    elem.set_text_content(Some(text));
    append(parent, &elem)?;
    Ok(elem)
}

pub(crate) fn clear(elem: &web_sys::Element) {
    elem.set_inner_html("");
}

pub(crate) fn set_display(elem: &web_sys::Element, display: &str) {
    if let Some(elem) = elem.dyn_ref::<web_sys::HtmlElement>() {
        if let Err(err) = elem.style().set_property("display", display) {
            log_js_error(&err);
        }
    }
}

pub(crate) fn toggle_class(elem: &web_sys::Element, class_name: &str, force: bool) {
    if let Err(err) = elem.class_list().toggle_with_force(class_name, force) {
        log_js_error(&err);
    }
}

/// Listen to an event for the whole page lifetime.
pub(crate) fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    f: impl 'static + FnMut(web_sys::Event),
) {
    let cb = Closure::<dyn FnMut(web_sys::Event)>::new(f);
    match target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
        Ok(_) => cb.forget(),
        Err(err) => log_js_error(&err),
    }
}

/// Like `listen` , but the listener is passive (for scroll events).
pub(crate) fn listen_passive(
    target: &web_sys::EventTarget,
    event: &str,
    f: impl 'static + FnMut(web_sys::Event),
) {
    let cb = Closure::<dyn FnMut(web_sys::Event)>::new(f);
    let options = web_sys::AddEventListenerOptions::new();
    options.set_passive(true);
    match target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        cb.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(_) => cb.forget(),
        Err(err) => log_js_error(&err),
    }
}

/// Listen to `event` on `container` for its descendants matching `selector` .
///
/// `f` gets the matching element closest to the event target.
/// Children rendered later are served by the same listener.
pub(crate) fn delegate(
    container: &web_sys::Element,
    event: &str,
    selector: &str,
    mut f: impl 'static + FnMut(web_sys::Event, web_sys::Element),
) {
    let root = container.clone();
    let selector = selector.to_string();
    listen(container, event, move |ev| {
        let target = match ev.target().and_then(|x| x.dyn_into::<web_sys::Element>().ok()) {
            Some(x) => x,
            None => return,
        };
        match target.closest(&selector) {
            Ok(Some(elem)) if root.contains(Some(&elem)) => f(ev, elem),
            Ok(_) => {}
            Err(err) => log_js_error(&err),
        }
    });
}
