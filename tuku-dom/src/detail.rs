//! The attraction detail page renderer.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tuku::error::Error;
use tuku::lightbox::Lightbox;
use tuku::page::detail::{DetailMap, DetailModel, DetailPage, DetailView, ErrorModel, NearbyCard};
use tuku::page::PageContext;
use wasm_bindgen::JsValue;

use crate::leaflet::{self, Map};
use crate::pannellum::{self, Viewer};
use crate::widgets;
use crate::{dom, js_err, DomBackend};

const DETAIL_MAP_ID: &str = "detail-map";
const PANORAMA_ID: &str = "panorama";

struct DetailRenderer {
    page: DetailPage<DomBackend>,
    backend: Rc<DomBackend>,
    lightbox: RefCell<Lightbox>,
    map: RefCell<Option<Map>>,
    panorama: RefCell<Option<Viewer>>,
}

/// Run the detail page for the attraction `id` (the `id` query parameter).
pub async fn run(ctx: PageContext<DomBackend>, id: Option<String>) -> Result<(), Error> {
    widgets::init_all(&ctx.backend, &ctx.translator);
    let page = DetailPage::init(ctx.clone(), id.as_deref()).await;
    let view = Rc::new(DetailRenderer {
        page,
        backend: ctx.backend.clone(),
        lightbox: RefCell::new(Lightbox::default()),
        map: RefCell::new(None),
        panorama: RefCell::new(None),
    });
    view.init_lightbox();
    view.listen_gallery();
    view.render()?;
    let weak: Weak<DetailRenderer> = Rc::downgrade(&view);
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

impl DetailRenderer {
    fn document(&self) -> &web_sys::Document {
        self.backend.document()
    }

    fn by_id(&self, id: &str) -> Option<web_sys::Element> {
        self.backend.element_by_id(id)
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(elem) = self.by_id(id) {
            elem.set_text_content(Some(text));
        }
    }

    fn show_section(&self, id: &str, show: bool) -> Option<web_sys::Element> {
        let elem = self.by_id(id)?;
        dom::set_display(&elem, if show { "block" } else { "none" });
        Some(elem)
    }

    fn render(self: &Rc<Self>) -> Result<(), Error> {
        self.page.context().translator.apply_to_document();
        match self.page.view() {
            DetailView::Ready(model) => self.render_model(&model),
            DetailView::Error(model) => self.render_error(&model),
        }
    }

    fn render_error(&self, model: &ErrorModel) -> Result<(), Error> {
        let main = match self.by_id("detail-main-content") {
            Some(x) => x,
            None => return Ok(()),
        };
        let document = self.document();
        dom::clear(&main);
        let container = dom::create(document, "div", "page-container")?;
        dom::set_attr(
            &container,
            "style",
            "text-align: center; padding-top: 5rem; padding-bottom: 5rem;",
        )?;
        dom::append_text(document, &container, "h1", "section-title", "Error")?;
        dom::append_text(document, &container, "p", "", &model.message)?;
        let back = dom::append_text(document, &container, "a", "cta-button", &model.back_label)?;
        dom::set_attr(&back, "href", &model.back_url)?;
        dom::set_attr(&back, "data-i18n", "error_back_button")?;
        dom::append(&main, &container)
    }

    fn render_model(self: &Rc<Self>, model: &DetailModel) -> Result<(), Error> {
        self.document().set_title(&model.document_title);
        if let Some(hero) = self.by_id("detail-hero") {
            dom::set_attr(
                &hero,
                "style",
                &format!("background-image: url('{}')", model.hero_image_url),
            )?;
        }
        self.set_text("hero-title", &model.title);
        self.set_text("detail-title", &model.title);
        self.set_text("detail-description", &model.description);

        if let Some(section) = self.show_section("spot-story-section", model.story.is_some()) {
            if let (Some(story), Some(content)) = (&model.story, dom::query(&section, "#spot-story-content")) {
                content.set_inner_html(story);
            }
        }

        self.render_meta(model)?;
        self.render_gallery(model)?;
        self.render_strip_image(model)?;
        self.render_panorama(model);
        self.render_nearby(&model.nearby)?;
        self.render_map(model.map.as_ref())
    }

    fn render_meta(&self, model: &DetailModel) -> Result<(), Error> {
        let container = match self.by_id("detail-meta") {
            Some(x) => x,
            None => return Ok(()),
        };
        dom::clear(&container);
        for line in model.meta.iter() {
            let p = dom::create(self.document(), "p", "")?;
            dom::append_text(self.document(), &p, "strong", "", &format!("{}:", line.label))?;
            p.append_with_str_1(&format!(" {}", line.value))
                .map_err(js_err("Cannot append text"))?;
            dom::append(&container, &p)?;
        }
        Ok(())
    }

    fn listen_gallery(self: &Rc<Self>) {
        let gallery = match self.by_id("image-gallery") {
            Some(x) => x,
            None => return,
        };
        let this = Rc::downgrade(self);
        dom::delegate(&gallery, "click", "img", move |_, img| {
            let index = img
                .get_attribute("data-index")
                .and_then(|x| x.parse::<usize>().ok());
            if let (Some(this), Some(index)) = (this.upgrade(), index) {
                this.lightbox.borrow_mut().open(index);
                this.update_lightbox();
            }
        });
    }

    fn render_gallery(&self, model: &DetailModel) -> Result<(), Error> {
        self.lightbox
            .borrow_mut()
            .reset(model.gallery.iter().map(|x| x.url.clone()).collect());
        self.show_section("gallery-container", !model.gallery.is_empty());
        let gallery = match self.by_id("image-gallery") {
            Some(x) => x,
            None => return Ok(()),
        };
        dom::clear(&gallery);
        for (index, image) in model.gallery.iter().enumerate() {
            let img = dom::create(self.document(), "img", "")?;
            dom::set_attr(&img, "src", &image.url)?;
            dom::set_attr(&img, "alt", &image.alt)?;
            dom::set_attr(&img, "loading", "lazy")?;
            dom::set_attr(&img, "data-index", &index.to_string())?;
            dom::append(&gallery, &img)?;
        }
        Ok(())
    }

    fn render_strip_image(&self, model: &DetailModel) -> Result<(), Error> {
        self.show_section("strip-image-section", model.strip_image.is_some());
        let (image, container) = match (&model.strip_image, self.by_id("strip-image-container")) {
            (Some(a), Some(b)) => (a, b),
            _ => return Ok(()),
        };
        dom::clear(&container);
        let img = dom::create(self.document(), "img", "")?;
        dom::set_attr(&img, "src", &image.url)?;
        dom::set_attr(&img, "alt", &image.alt)?;
        dom::set_attr(&img, "loading", "lazy")?;
        dom::append(&container, &img)
    }

    fn render_panorama(&self, model: &DetailModel) {
        self.show_section("panorama-container", model.panorama_url.is_some());
        let url = match &model.panorama_url {
            Some(x) => x,
            None => return,
        };
        // the panorama does not depend on the language
        if self.panorama.borrow().is_some() || self.by_id(PANORAMA_ID).is_none() {
            return;
        }
        match pannellum::show_panorama(PANORAMA_ID, url, Some(&model.title)) {
            Ok(x) => *self.panorama.borrow_mut() = Some(x),
            Err(err) => log::error!("{}", err),
        }
    }

    fn render_nearby(&self, nearby: &[NearbyCard]) -> Result<(), Error> {
        self.show_section("nearby-section", !nearby.is_empty());
        let grid = match self.by_id("nearby-grid") {
            Some(x) => x,
            None => return Ok(()),
        };
        let document = self.document();
        dom::clear(&grid);
        for item in nearby {
            let card = dom::create(document, "a", "card")?;
            dom::set_attr(&card, "href", &item.detail_url)?;
            let image_container = dom::create(document, "div", "card-image-container")?;
            let img = dom::create(document, "img", "")?;
            dom::set_attr(&img, "src", &item.image_url)?;
            dom::set_attr(&img, "alt", &item.title)?;
            dom::set_attr(&img, "loading", "lazy")?;
            dom::append(&image_container, &img)?;
            dom::append(&card, &image_container)?;
            let content = dom::create(document, "div", "card-content")?;
            dom::append_text(document, &content, "h3", "card-title", &item.title)?;
            dom::append_text(document, &content, "span", "card-button", &item.button_label)?;
            dom::append(&card, &content)?;
            dom::append(&grid, &card)?;
        }
        Ok(())
    }

    fn render_map(&self, map: Option<&DetailMap>) -> Result<(), Error> {
        let container = match self.by_id(DETAIL_MAP_ID) {
            Some(x) => x,
            None => return Ok(()),
        };
        if let Some(old) = self.map.borrow_mut().take() {
            old.remove();
        }
        let map = match map {
            Some(x) if leaflet::is_loaded() => x,
            _ => {
                dom::set_display(&container, "none");
                return Ok(());
            }
        };
        dom::set_display(&container, "block");
        let zoom = self.page.context().config.detail_map_zoom;
        let leaflet_map = leaflet::create_map(DETAIL_MAP_ID, &map.current.point, zoom)?;
        let current = leaflet::create_marker(&map.current, false)?;
        current.show_on(&leaflet_map);
        current.open();
        for m in map.nearby.iter() {
            leaflet::create_marker(m, false)?.show_on(&leaflet_map);
        }
        *self.map.borrow_mut() = Some(leaflet_map);
        Ok(())
    }

    fn init_lightbox(self: &Rc<Self>) {
        let modal = match self.by_id("lightbox-modal") {
            Some(x) => x,
            None => return,
        };
        let bind = |selector: &str, f: fn(&mut Lightbox)| {
            if let Some(elem) = dom::query(&modal, selector) {
                let this = Rc::downgrade(self);
                dom::listen(&elem, "click", move |ev| {
                    ev.stop_propagation();
                    if let Some(this) = this.upgrade() {
                        f(&mut this.lightbox.borrow_mut());
                        this.update_lightbox();
                    }
                });
            }
        };
        bind(".lightbox-close", Lightbox::close);
        bind(".lightbox-prev", Lightbox::prev);
        bind(".lightbox-next", Lightbox::next);
        let this = Rc::downgrade(self);
        let background = modal.clone();
        dom::listen(&modal, "click", move |ev| {
            // only a click on the backdrop itself closes the viewer
            let on_backdrop = match ev.target() {
                Some(target) => {
                    let target: &JsValue = target.as_ref();
                    let background: &JsValue = background.as_ref();
                    target == background
                }
                None => false,
            };
            if !on_backdrop {
                return;
            }
            if let Some(this) = this.upgrade() {
                this.lightbox.borrow_mut().close();
                this.update_lightbox();
            }
        });
    }

    fn update_lightbox(&self) {
        let modal = match self.by_id("lightbox-modal") {
            Some(x) => x,
            None => return,
        };
        let lightbox = self.lightbox.borrow();
        dom::toggle_class(&modal, "visible", lightbox.is_open());
        if !lightbox.is_open() {
            return;
        }
        if let (Some(image), Some(src)) = (self.by_id("lightbox-image"), lightbox.current()) {
            if let Err(err) = dom::set_attr(&image, "src", src) {
                log::error!("{}", err);
            }
        }
        self.set_text("lightbox-caption", &lightbox.caption());
    }
}
