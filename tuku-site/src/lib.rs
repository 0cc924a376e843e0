//! The wasm entry of the Tuku GO site.
//!
//! Every HTML page loads the same module.
//! The page kind is read from `<body data-page="home|detail|about">` .

use wasm_bindgen::prelude::*;

use tuku::{error::Error, PageContext};
use tuku_dom::{async_task, read_config, DomBackend};

/// The kinds of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Detail,
    About,
}

impl PageKind {
    /// Parse the `data-page` attribute; pages without it are treated as the homepage.
    pub fn from_attr(attr: Option<&str>) -> Option<Self> {
        match attr.unwrap_or("home") {
            "home" => Some(Self::Home),
            "detail" => Some(Self::Detail),
            "about" => Some(Self::About),
            _ => None,
        }
    }
}

fn page_kind(document: &web_sys::Document) -> Option<PageKind> {
    let attr = document.body().and_then(|x| x.get_attribute("data-page"));
    PageKind::from_attr(attr.as_deref())
}

fn start() -> Result<(), Error> {
    let window = web_sys::window().ok_or_else(|| Error::backend("Cannot find `window`"))?;
    let document = window
        .document()
        .ok_or_else(|| Error::backend("Cannot find `document`"))?;
    let config = read_config(&document);
    let level = config
        .as_ref()
        .map(|x| x.log_level())
        .unwrap_or(log::Level::Info);
    if let Err(err) = console_log::init_with_level(level) {
        // a logger may already be installed by the host page
        web_sys::console::warn_1(&err.to_string().into());
    }
    let config = match config {
        Ok(x) => x,
        Err(err) => {
            log::error!("Invalid site config, using defaults: {}", err);
            Default::default()
        }
    };
    let kind = match page_kind(&document) {
        Some(x) => x,
        None => {
            log::warn!("Unknown page kind, nothing to run");
            return Ok(());
        }
    };
    let backend = DomBackend::new(config.fetch_timeout_ms)?;
    let detail_id = backend.query_param("id");
    let ctx = PageContext::new(backend, config);
    log::debug!("Starting {:?} page", kind);
    async_task(async move {
        let ret = match kind {
            PageKind::Home => tuku_dom::home::run(ctx).await,
            PageKind::Detail => tuku_dom::detail::run(ctx, detail_id).await,
            PageKind::About => tuku_dom::about::run(ctx).await,
        };
        if let Err(err) = ret {
            log::error!("Page initialization failed: {}", err);
        }
    });
    Ok(())
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(err) = start() {
        web_sys::console::error_1(&err.to_string().into());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn page_kinds() {
        assert_eq!(PageKind::from_attr(None), Some(PageKind::Home));
        assert_eq!(PageKind::from_attr(Some("detail")), Some(PageKind::Detail));
        assert_eq!(PageKind::from_attr(Some("about")), Some(PageKind::About));
        assert_eq!(PageKind::from_attr(Some("shop")), None);
    }
}
