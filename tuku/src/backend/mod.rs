//! The backend-related interface.
//!
//! The core never touches the browser directly.
//! Everything it needs from the page environment goes through `Backend` ,
//! so that the same logic runs against the DOM and against the in-memory backend.

use futures::future::LocalBoxFuture;

use crate::error::Error;

pub mod memory;

/// The interface that a backend should implement.
pub trait Backend: 'static {
    /// The element type returned by queries.
    type Element: BackendElement;

    /// Spawn an async task on the page's event loop.
    fn async_task(fut: impl 'static + std::future::Future<Output = ()>)
    where
        Self: Sized;

    /// Fetch a text resource.
    ///
    /// A non-success HTTP status is an `Error::ResourceLoad` .
    fn fetch_text(&self, url: &str) -> LocalBoxFuture<'static, Result<String, Error>>;

    /// Read a persisted value.
    fn stored_item(&self, key: &str) -> Option<String>;

    /// Persist a value across sessions.
    fn store_item(&self, key: &str, value: &str) -> Result<(), Error>;

    /// The browser's primary language tag.
    fn primary_language(&self) -> Option<String>;

    /// The browser's ordered language preference list.
    fn preferred_languages(&self) -> Vec<String>;

    /// All elements matching a CSS selector, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;

    /// The first element matching a CSS selector.
    fn query_selector(&self, selector: &str) -> Option<Self::Element> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Set the `lang` attribute of the document element.
    fn set_document_language(&self, lang: &str);

    /// Set the document title.
    fn set_document_title(&self, title: &str);

    /// Add a class to the document body. Adding it twice has no effect.
    fn add_body_class(&self, class: &str);
}

/// An element found by a backend query.
pub trait BackendElement: 'static {
    fn attribute(&self, name: &str) -> Option<String>;

    fn text_content(&self) -> String;

    fn set_text_content(&self, content: &str);
}
