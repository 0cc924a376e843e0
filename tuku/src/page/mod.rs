//! Page view models.
//!
//! A page controller loads its data through the `Translator` and the backend,
//! then exposes plain view structs that a renderer writes into the document.

use std::rc::Rc;

use crate::attraction::Attraction;
use crate::backend::Backend;
use crate::category::{category_style, CategoryStyle};
use crate::config::SiteConfig;
use crate::geo::GeoPoint;
use crate::i18n::Translator;

pub mod detail;
pub mod home;

/// The services shared by the controllers of one page.
pub struct PageContext<B: Backend> {
    pub backend: Rc<B>,
    pub config: Rc<SiteConfig>,
    pub translator: Rc<Translator<B>>,
}

impl<B: Backend> Clone for PageContext<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            config: self.config.clone(),
            translator: self.translator.clone(),
        }
    }
}

impl<B: Backend> PageContext<B> {
    pub fn new(backend: B, config: SiteConfig) -> Self {
        let backend = Rc::new(backend);
        let config = Rc::new(config);
        let translator = Translator::new(backend.clone(), config.clone());
        Self {
            backend,
            config,
            translator,
        }
    }

    /// Build the map marker of an attraction, if it has a usable location.
    pub(crate) fn marker(&self, attraction: &Attraction, is_current: bool) -> Option<MapMarker> {
        let point = attraction.location()?;
        let t = &self.translator;
        Some(MapMarker {
            id: attraction.id.clone(),
            point,
            category_key: attraction.category_key().to_string(),
            style: category_style(attraction.category_key()),
            title: attraction
                .name
                .get(t.current_language())
                .to_string(),
            link_label: t.t("card_button"),
            link_url: self.config.detail_url(&attraction.id),
            is_current,
        })
    }
}

/// A marker on a map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub id: String,
    pub point: GeoPoint,
    pub category_key: String,
    pub style: CategoryStyle,
    /// The popup title.
    pub title: String,
    pub link_label: String,
    pub link_url: String,
    /// Whether this is the attraction the page is about.
    pub is_current: bool,
}
