//! Tuku GO: the core of the Tuku tourism site.
//!
//! This crate is platform independent.
//! It contains the translation service ( `i18n` ), the proximity ranker ( `geo` ),
//! the attraction data model and the page view models.
//! The browser is reached through the `backend::Backend` trait,
//! implemented for the DOM in the `tuku-dom` crate
//! and in memory in `backend::memory` .

pub mod attraction;
pub mod backend;
pub mod category;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod geo;
pub mod i18n;
pub mod lightbox;
pub mod locale;
pub mod page;

pub use config::SiteConfig;
pub use i18n::Translator;
pub use locale::LocaleCode;
pub use page::PageContext;

/// The types that should usually be imported.
pub mod prelude {
    pub use crate::backend::{Backend, BackendElement};
    pub use crate::geo::{distance_km, nearest, GeoPoint};
    pub use crate::i18n::{LanguageChange, Subscription, Translator};
    pub use crate::locale::LocaleCode;
    pub use crate::page::PageContext;
    pub use crate::SiteConfig;
}
