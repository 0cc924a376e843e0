//! The attraction detail page.

use crate::attraction::{load_attractions, Attraction};
use crate::backend::Backend;
use crate::error::Error;
use crate::geo::nearest;

use super::{MapMarker, PageContext};

/// A labelled line of the meta block.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaLine {
    pub label: String,
    pub value: String,
}

/// An image with its alternative text.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub url: String,
    pub alt: String,
}

/// A recommended attraction near the current one.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyCard {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub detail_url: String,
    pub distance_km: f64,
    /// The button text, including the formatted distance.
    pub button_label: String,
}

/// The small map of the detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailMap {
    pub current: MapMarker,
    pub nearby: Vec<MapMarker>,
}

/// Everything shown for an attraction.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailModel {
    pub document_title: String,
    pub title: String,
    pub hero_image_url: String,
    pub description: String,
    /// An HTML fragment.
    pub story: Option<String>,
    pub meta: Vec<MetaLine>,
    pub gallery: Vec<Image>,
    pub strip_image: Option<Image>,
    pub panorama_url: Option<String>,
    pub nearby: Vec<NearbyCard>,
    pub map: Option<DetailMap>,
}

/// The full-page error state.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorModel {
    pub message: String,
    pub back_label: String,
    pub back_url: String,
}

/// What the detail page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Ready(DetailModel),
    Error(ErrorModel),
}

/// The detail page controller state.
pub struct DetailPage<B: Backend> {
    ctx: PageContext<B>,
    attractions: Vec<Attraction>,
    current: Result<usize, Error>,
}

impl<B: Backend> DetailPage<B> {
    /// Load translations, then the attraction data, then pick the attraction `id` .
    pub async fn init(ctx: PageContext<B>, id: Option<&str>) -> Self {
        ctx.translator.init().await;
        let mut attractions = vec![];
        let current = match id.filter(|x| !x.is_empty()) {
            None => Err(Error::MissingId),
            Some(id) => match load_attractions(&*ctx.backend, &ctx.config.attractions_url).await {
                Err(err) => Err(err),
                Ok(list) => {
                    attractions = list;
                    attractions
                        .iter()
                        .position(|a| a.id == id)
                        .ok_or_else(|| Error::MissingEntity { id: id.to_string() })
                }
            },
        };
        if let Err(err) = &current {
            log::error!("Cannot show the attraction: {}", err);
        }
        Self {
            ctx,
            attractions,
            current,
        }
    }

    pub fn context(&self) -> &PageContext<B> {
        &self.ctx
    }

    /// The attraction shown, if any.
    pub fn attraction(&self) -> Option<&Attraction> {
        self.current
            .as_ref()
            .ok()
            .and_then(|x| self.attractions.get(*x))
    }

    /// Build the view in the active language.
    pub fn view(&self) -> DetailView {
        match &self.current {
            Ok(index) => DetailView::Ready(self.model(&self.attractions[*index])),
            Err(err) => DetailView::Error(self.error_model(err)),
        }
    }

    fn error_model(&self, err: &Error) -> ErrorModel {
        let t = &self.ctx.translator;
        let message = match err {
            Error::MissingId => t.t("error_missing_id"),
            Error::MissingEntity { .. } => t.t("error_not_found"),
            _ => t.t("error_db_load"),
        };
        ErrorModel {
            message,
            back_label: t.t("error_back_button"),
            back_url: self.ctx.config.home_page.clone(),
        }
    }

    fn model(&self, a: &Attraction) -> DetailModel {
        let t = &self.ctx.translator;
        let config = &self.ctx.config;
        let lang = t.current_language();
        let name = a.name.get(lang).to_string();
        let gallery = a
            .gallery_images
            .iter()
            .enumerate()
            .map(|(i, file)| Image {
                url: config.image_url(&a.folder, file),
                alt: format!("{} gallery image {}", name, i + 1),
            })
            .collect();
        let strip_image = a.strip_image().map(|file| Image {
            url: config.image_url(&a.folder, file),
            alt: format!("{} - {}", name, t.t("strip_image_title")),
        });
        let story = a
            .story
            .as_ref()
            .and_then(|x| x.get_exact(lang))
            .filter(|x| !x.is_empty())
            .map(|x| x.to_string());
        let nearby = self.nearby(a);
        let map = self.ctx.marker(a, true).map(|current| DetailMap {
            current,
            nearby: nearby
                .iter()
                .filter_map(|x| self.find(&x.id))
                .filter_map(|x| self.ctx.marker(x, false))
                .collect(),
        });
        DetailModel {
            document_title: format!("Tuku GO - {}", name),
            hero_image_url: config.image_url(&a.folder, &a.card_image),
            description: a.description.get(lang).to_string(),
            story,
            meta: vec![
                MetaLine {
                    label: t.t("detail_meta_address"),
                    value: a.address.get(lang).to_string(),
                },
                MetaLine {
                    label: t.t("detail_meta_hours"),
                    value: a.opening_hours.get(lang).to_string(),
                },
            ],
            gallery,
            strip_image,
            panorama_url: a.panorama_image().map(|x| config.image_url(&a.folder, x)),
            nearby,
            map,
            title: name,
        }
    }

    fn find(&self, id: &str) -> Option<&Attraction> {
        self.attractions.iter().find(|a| a.id == id)
    }

    /// The closest attractions to `a` , nearest first.
    ///
    /// Empty if `a` has no usable location.
    pub fn nearby(&self, a: &Attraction) -> Vec<NearbyCard> {
        let reference = match a.location() {
            Some(x) => x,
            None => return vec![],
        };
        let t = &self.ctx.translator;
        let lang = t.current_language();
        let config = &self.ctx.config;
        let candidates = self
            .attractions
            .iter()
            .enumerate()
            .filter(|(_, x)| x.id != a.id)
            .map(|(i, x)| (i, x.coordinates));
        nearest(None, &reference, candidates, config.nearby_limit)
            .into_iter()
            .map(|ranked| {
                let x = &self.attractions[ranked.id];
                let distance = format!("{:.2}", ranked.distance_km);
                NearbyCard {
                    id: x.id.clone(),
                    title: x.name.get(lang).to_string(),
                    image_url: config.image_url(&x.folder, &x.card_image),
                    detail_url: config.detail_url(&x.id),
                    distance_km: ranked.distance_km,
                    button_label: t.translate("detail_nearby_button", &[("distance", &distance)]),
                }
            })
            .collect()
    }
}
