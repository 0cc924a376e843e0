//! An in-memory backend.
//!
//! It serves resources from a map, keeps local storage in a map
//! and holds a flat list of elements.
//! It is used for native tests and tools.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::{FutureExt, LocalBoxFuture};
use futures::task::LocalSpawnExt;
use rustc_hash::FxHashMap;

use super::{Backend, BackendElement};
use crate::error::Error;

thread_local! {
    static POOL: RefCell<LocalPool> = RefCell::new(LocalPool::new());
    static SPAWNER: LocalSpawner = POOL.with(|pool| pool.borrow().spawner());
}

enum Resource {
    Ready(Result<String, String>),
    Deferred(Vec<oneshot::Receiver<Result<String, String>>>),
}

/// An element of the in-memory document.
#[derive(Clone)]
pub struct MemoryElement {
    inner: Rc<MemoryElementInner>,
}

struct MemoryElementInner {
    selectors: Vec<String>,
    attributes: FxHashMap<String, String>,
    text: RefCell<String>,
}

impl MemoryElement {
    fn matches(&self, selector: &str) -> bool {
        if self.inner.selectors.iter().any(|x| x == selector) {
            return true;
        }
        match selector.strip_prefix('[').and_then(|x| x.strip_suffix(']')) {
            Some(attr) => self.inner.attributes.contains_key(attr),
            None => false,
        }
    }
}

impl BackendElement for MemoryElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.inner.attributes.get(name).cloned()
    }

    fn text_content(&self) -> String {
        self.inner.text.borrow().clone()
    }

    fn set_text_content(&self, content: &str) {
        *self.inner.text.borrow_mut() = content.to_string();
    }
}

/// A backend without a browser.
#[derive(Default)]
pub struct MemoryBackend {
    storage: RefCell<FxHashMap<String, String>>,
    storage_fails: Cell<bool>,
    primary_language: RefCell<Option<String>>,
    preferred_languages: RefCell<Vec<String>>,
    resources: RefCell<FxHashMap<String, Resource>>,
    fetched: RefCell<Vec<String>>,
    elements: RefCell<Vec<MemoryElement>>,
    document_language: RefCell<Option<String>>,
    document_title: RefCell<String>,
    body_classes: RefCell<Vec<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the spawned tasks until none of them can make progress.
    pub fn run_tasks() {
        SPAWNER.with(|_| {});
        POOL.with(|pool| pool.borrow_mut().run_until_stalled());
    }

    /// Set the browser language preferences.
    pub fn set_languages(&self, primary: Option<&str>, preferred: &[&str]) {
        *self.primary_language.borrow_mut() = primary.map(|x| x.to_string());
        *self.preferred_languages.borrow_mut() = preferred.iter().map(|x| x.to_string()).collect();
    }

    /// Make `store_item` fail, like a browser with storage disabled.
    pub fn set_storage_fails(&self, fails: bool) {
        self.storage_fails.set(fails);
    }

    /// Serve a resource.
    pub fn add_resource(&self, url: &str, content: &str) {
        self.resources
            .borrow_mut()
            .insert(url.to_string(), Resource::Ready(Ok(content.to_string())));
    }

    /// Make a resource fail with a network error.
    pub fn add_failing_resource(&self, url: &str, msg: &str) {
        self.resources
            .borrow_mut()
            .insert(url.to_string(), Resource::Ready(Err(msg.to_string())));
    }

    /// Serve a resource whose response is given later through the returned sender.
    ///
    /// Each call queues one response; fetches take the queued responses in order.
    pub fn defer_resource(&self, url: &str) -> oneshot::Sender<Result<String, String>> {
        let (sender, receiver) = oneshot::channel();
        let mut resources = self.resources.borrow_mut();
        match resources.get_mut(url) {
            Some(Resource::Deferred(list)) => list.push(receiver),
            _ => {
                resources.insert(url.to_string(), Resource::Deferred(vec![receiver]));
            }
        }
        sender
    }

    /// The URLs fetched so far, in order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }

    /// Add an element matching the given selectors.
    ///
    /// Attribute selectors like `[data-i18n]` also match without being listed.
    pub fn add_element(&self, selectors: &[&str], attributes: &[(&str, &str)], text: &str) -> MemoryElement {
        let elem = MemoryElement {
            inner: Rc::new(MemoryElementInner {
                selectors: selectors.iter().map(|x| x.to_string()).collect(),
                attributes: attributes
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                text: RefCell::new(text.to_string()),
            }),
        };
        self.elements.borrow_mut().push(elem.clone());
        elem
    }

    /// The text of every element, in insertion order.
    pub fn texts(&self) -> Vec<String> {
        self.elements.borrow().iter().map(|x| x.text_content()).collect()
    }

    pub fn document_language(&self) -> Option<String> {
        self.document_language.borrow().clone()
    }

    pub fn document_title(&self) -> String {
        self.document_title.borrow().clone()
    }

    pub fn body_classes(&self) -> Vec<String> {
        self.body_classes.borrow().clone()
    }
}

impl Backend for MemoryBackend {
    type Element = MemoryElement;

    fn async_task(fut: impl 'static + std::future::Future<Output = ()>) {
        SPAWNER.with(|spawner| {
            if spawner.spawn_local(fut).is_err() {
                log::error!("The in-memory task pool has been shut down");
            }
        });
    }

    fn fetch_text(&self, url: &str) -> LocalBoxFuture<'static, Result<String, Error>> {
        self.fetched.borrow_mut().push(url.to_string());
        let url = url.to_string();
        let load_error = |url: String, msg: String| Error::ResourceLoad { url, msg };
        let mut resources = self.resources.borrow_mut();
        match resources.get_mut(&url) {
            None => async move { Err(load_error(url, "404 Not Found".into())) }.boxed_local(),
            Some(Resource::Ready(ret)) => {
                let ret = ret.clone();
                async move { ret.map_err(|msg| load_error(url, msg)) }.boxed_local()
            }
            Some(Resource::Deferred(list)) => {
                if list.is_empty() {
                    return async move { Err(load_error(url, "no queued response".into())) }
                        .boxed_local();
                }
                let receiver = list.remove(0);
                async move {
                    match receiver.await {
                        Ok(ret) => ret.map_err(|msg| load_error(url, msg)),
                        Err(_) => Err(load_error(url, "request dropped".into())),
                    }
                }
                .boxed_local()
            }
        }
    }

    fn stored_item(&self, key: &str) -> Option<String> {
        self.storage.borrow().get(key).cloned()
    }

    fn store_item(&self, key: &str, value: &str) -> Result<(), Error> {
        if self.storage_fails.get() {
            return Err(Error::backend("local storage is not available"));
        }
        self.storage
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn primary_language(&self) -> Option<String> {
        self.primary_language.borrow().clone()
    }

    fn preferred_languages(&self) -> Vec<String> {
        self.preferred_languages.borrow().clone()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element> {
        self.elements
            .borrow()
            .iter()
            .filter(|x| x.matches(selector))
            .cloned()
            .collect()
    }

    fn set_document_language(&self, lang: &str) {
        *self.document_language.borrow_mut() = Some(lang.to_string());
    }

    fn set_document_title(&self, title: &str) {
        *self.document_title.borrow_mut() = title.to_string();
    }

    fn add_body_class(&self, class: &str) {
        let mut classes = self.body_classes.borrow_mut();
        if !classes.iter().any(|x| x == class) {
            classes.push(class.to_string());
        }
    }
}
