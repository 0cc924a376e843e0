//! The homepage renderer.
//!
//! Expected markup: `#map` (inside `#map-container` ), `#map-filters` and `#attraction-grid` .

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use tuku::error::Error;
use tuku::page::home::{AttractionCard, CategoryFilter, HomePage};
use tuku::page::PageContext;

use crate::leaflet::{self, Map, Marker, MarkerClusterGroup};
use crate::widgets::{self, FadeIn};
use crate::{dom, DomBackend};

const MAP_ELEMENT_ID: &str = "map";
const FLY_TO_ZOOM: u8 = 17;

struct MapState {
    map: Map,
    cluster: MarkerClusterGroup,
    markers: FxHashMap<String, Marker>,
}

struct HomeView {
    page: RefCell<HomePage<DomBackend>>,
    backend: Rc<DomBackend>,
    map: RefCell<Option<MapState>>,
    fade_in: Option<FadeIn>,
}

/// Run the homepage.
///
/// Widgets work right away; the cards, filters and markers appear after the data is loaded.
pub async fn run(ctx: PageContext<DomBackend>) -> Result<(), Error> {
    let fade_in = widgets::init_all(&ctx.backend, &ctx.translator);
    let page = HomePage::init(ctx.clone()).await;
    let map = match init_map(&ctx) {
        Ok(x) => x,
        Err(err) => {
            log::error!("{}", err);
            None
        }
    };
    let view = Rc::new(HomeView {
        page: RefCell::new(page),
        backend: ctx.backend.clone(),
        map: RefCell::new(map),
        fade_in,
    });
    view.render()?;
    view.listen_clicks();
    let weak: Weak<HomeView> = Rc::downgrade(&view);
    ctx.translator
        .on_language_changed(move |_| {
            if let Some(view) = weak.upgrade() {
                if let Err(err) = view.render() {
                    log::error!("{}", err);
                }
            }
        })
        .detach();
    // the view lives as long as the page
    std::mem::forget(view);
    Ok(())
}

fn init_map(ctx: &PageContext<DomBackend>) -> Result<Option<MapState>, Error> {
    if ctx.backend.element_by_id(MAP_ELEMENT_ID).is_none() {
        return Ok(None);
    }
    if !leaflet::is_loaded() {
        log::error!("Leaflet library not loaded");
        return Ok(None);
    }
    let map = leaflet::create_map(MAP_ELEMENT_ID, &ctx.config.map_center, ctx.config.map_zoom)?;
    let cluster = MarkerClusterGroup::new_on(&map)?;
    Ok(Some(MapState {
        map,
        cluster,
        markers: FxHashMap::default(),
    }))
}

impl HomeView {
    fn document(&self) -> &web_sys::Document {
        self.backend.document()
    }

    fn render(&self) -> Result<(), Error> {
        self.page
            .borrow()
            .context()
            .translator
            .apply_to_document();
        self.render_filters()?;
        self.render_cards()?;
        self.render_markers()?;
        if let Some(fade_in) = &self.fade_in {
            fade_in.observe_new(self.document());
        }
        Ok(())
    }

    /// Listen once on the containers, so that re-rendered children need no listeners.
    fn listen_clicks(self: &Rc<Self>) {
        if let Some(container) = self.backend.element_by_id("map-filters") {
            let this = Rc::downgrade(self);
            dom::delegate(&container, "click", ".map-filter-button", move |_, button| {
                if let (Some(this), Some(key)) = (this.upgrade(), button.get_attribute("data-filter")) {
                    this.select_filter(CategoryFilter::from_key(&key));
                }
            });
        }
        if let Some(grid) = self.backend.element_by_id("attraction-grid") {
            let this = Rc::downgrade(self);
            dom::delegate(&grid, "click", ".map-button", move |_, button| {
                if let (Some(this), Some(id)) = (this.upgrade(), button.get_attribute("data-id")) {
                    this.fly_to(&id);
                }
            });
        }
    }

    fn render_filters(&self) -> Result<(), Error> {
        let container = match self.backend.element_by_id("map-filters") {
            Some(x) => x,
            None => return Ok(()),
        };
        dom::clear(&container);
        let filters = self.page.borrow().filters();
        for f in filters {
            let class_name = if f.active {
                "map-filter-button active"
            } else {
                "map-filter-button"
            };
            let button = dom::append_text(self.document(), &container, "button", class_name, &f.label)?;
            dom::set_attr(&button, "data-filter", f.filter.key())?;
        }
        Ok(())
    }

    fn select_filter(&self, filter: CategoryFilter) {
        self.page.borrow_mut().select_filter(filter);
        let ret = self.render_filters().and_then(|_| self.render_markers());
        if let Err(err) = ret {
            log::error!("{}", err);
        }
    }

    fn render_cards(&self) -> Result<(), Error> {
        let grid = match self.backend.element_by_id("attraction-grid") {
            Some(x) => x,
            None => return Ok(()),
        };
        dom::clear(&grid);
        let page = self.page.borrow();
        if let Some(message) = page.load_error() {
            dom::append_text(self.document(), &grid, "p", "error-message", &message)?;
            return Ok(());
        }
        for card in page.cards() {
            let elem = self.card(&card)?;
            dom::append(&grid, &elem)?;
        }
        Ok(())
    }

    fn card(&self, card: &AttractionCard) -> Result<web_sys::Element, Error> {
        let document = self.document();
        let elem = dom::create(document, "div", "card fade-in-element")?;

        let image_container = dom::create(document, "div", "card-image-container")?;
        let img = dom::create(document, "img", "")?;
        dom::set_attr(&img, "src", &card.image_url)?;
        dom::set_attr(&img, "alt", &card.title)?;
        dom::set_attr(&img, "loading", "lazy")?;
        dom::append(&image_container, &img)?;
        dom::append_text(document, &image_container, "div", "card-category", &card.category)?;
        dom::append(&elem, &image_container)?;

        let content = dom::create(document, "div", "card-content")?;
        dom::append_text(document, &content, "h3", "card-title", &card.title)?;
        dom::append_text(document, &content, "p", "card-description", &card.description)?;
        let actions = dom::create(document, "div", "card-actions")?;
        let map_button = dom::append_text(
            document,
            &actions,
            "button",
            "card-button map-button",
            &card.map_button_label,
        )?;
        dom::set_attr(&map_button, "data-id", &card.id)?;
        let link = dom::append_text(
            document,
            &actions,
            "a",
            "card-button learn-more-button",
            &card.detail_button_label,
        )?;
        dom::set_attr(&link, "href", &card.detail_url)?;
        dom::append(&content, &actions)?;
        dom::append(&elem, &content)?;
        Ok(elem)
    }

    fn render_markers(&self) -> Result<(), Error> {
        let mut state = self.map.borrow_mut();
        let state = match state.as_mut() {
            Some(x) => x,
            None => return Ok(()),
        };
        state.cluster.clear();
        state.markers.clear();
        for m in self.page.borrow().visible_markers() {
            let marker = leaflet::create_marker(&m, true)?;
            state.cluster.add(&marker);
            state.markers.insert(m.id, marker);
        }
        Ok(())
    }

    fn fly_to(&self, id: &str) {
        if let Some(state) = self.map.borrow().as_ref() {
            if let Some(m) = self.page.borrow().marker_of(id) {
                state.map.fly_to_point(&m.point, FLY_TO_ZOOM);
            }
            if let Some(marker) = state.markers.get(id) {
                state.cluster.reveal(marker);
            }
        }
        if let Some(container) = self.backend.element_by_id("map-container") {
            widgets::scroll_into_view(&container);
        }
    }
}
