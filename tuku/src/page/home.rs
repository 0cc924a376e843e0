//! The homepage: attraction cards, category filters and the overview map.

use crate::attraction::{load_attractions, Attraction};
use crate::backend::Backend;

use super::{MapMarker, PageContext};

/// The filter key of the "show everything" filter.
pub const FILTER_ALL: &str = "All";

/// A category filter of the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    /// A category name in the default language.
    Category(String),
}

impl CategoryFilter {
    /// Parse a filter key as written to `data-filter` .
    pub fn from_key(key: &str) -> Self {
        if key == FILTER_ALL {
            Self::All
        } else {
            Self::Category(key.to_string())
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::All => FILTER_ALL,
            Self::Category(x) => x,
        }
    }

    fn accepts(&self, category_key: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(x) => x == category_key,
        }
    }
}

/// An attraction card.
#[derive(Debug, Clone, PartialEq)]
pub struct AttractionCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub detail_url: String,
    pub map_button_label: String,
    pub detail_button_label: String,
}

/// A filter button.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterButton {
    pub filter: CategoryFilter,
    pub label: String,
    pub active: bool,
}

/// The homepage controller state.
pub struct HomePage<B: Backend> {
    ctx: PageContext<B>,
    attractions: Vec<Attraction>,
    load_failed: bool,
    filter: CategoryFilter,
}

impl<B: Backend> HomePage<B> {
    /// Load translations, then the attraction data.
    ///
    /// A data load failure does not fail the page;
    /// it is kept as an inline error message (see `load_error` ).
    pub async fn init(ctx: PageContext<B>) -> Self {
        ctx.translator.init().await;
        let (attractions, load_failed) =
            match load_attractions(&*ctx.backend, &ctx.config.attractions_url).await {
                Ok(x) => (x, false),
                Err(err) => {
                    log::error!("Failed to load attraction data: {}", err);
                    (vec![], true)
                }
            };
        Self {
            ctx,
            attractions,
            load_failed,
            filter: CategoryFilter::All,
        }
    }

    pub fn context(&self) -> &PageContext<B> {
        &self.ctx
    }

    pub fn attractions(&self) -> &[Attraction] {
        &self.attractions
    }

    /// The inline error message, if the data could not be loaded.
    pub fn load_error(&self) -> Option<String> {
        if self.load_failed {
            Some(self.ctx.translator.t("error_db_load"))
        } else {
            None
        }
    }

    pub fn cards(&self) -> Vec<AttractionCard> {
        let t = &self.ctx.translator;
        let lang = t.current_language();
        let map_button_label = t.t("map_button_text");
        let detail_button_label = t.t("card_button");
        self.attractions
            .iter()
            .map(|a| AttractionCard {
                id: a.id.clone(),
                title: a.name.get(lang).to_string(),
                description: a.description.get(lang).to_string(),
                category: a.category.get(lang).to_string(),
                image_url: self.ctx.config.image_url(&a.folder, &a.card_image),
                detail_url: self.ctx.config.detail_url(&a.id),
                map_button_label: map_button_label.clone(),
                detail_button_label: detail_button_label.clone(),
            })
            .collect()
    }

    /// `All` followed by the categories in order of first appearance.
    pub fn filters(&self) -> Vec<FilterButton> {
        let t = &self.ctx.translator;
        let lang = t.current_language();
        let mut ret = vec![FilterButton {
            filter: CategoryFilter::All,
            label: t.t("filter_all"),
            active: self.filter == CategoryFilter::All,
        }];
        let mut seen: Vec<&str> = vec![];
        for a in self.attractions.iter() {
            let key = a.category_key();
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            let filter = CategoryFilter::Category(key.to_string());
            ret.push(FilterButton {
                active: self.filter == filter,
                filter,
                label: a.category.get(lang).to_string(),
            });
        }
        ret
    }

    pub fn active_filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn select_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// The markers of all attractions with a usable location.
    pub fn markers(&self) -> Vec<MapMarker> {
        self.attractions
            .iter()
            .filter_map(|a| self.ctx.marker(a, false))
            .collect()
    }

    /// The markers passing the active filter.
    pub fn visible_markers(&self) -> Vec<MapMarker> {
        self.markers()
            .into_iter()
            .filter(|x| self.filter.accepts(&x.category_key))
            .collect()
    }

    /// Find a marker to fly to from a card's map button.
    pub fn marker_of(&self, id: &str) -> Option<MapMarker> {
        let a = self.attractions.iter().find(|a| a.id == id)?;
        self.ctx.marker(a, false)
    }
}
