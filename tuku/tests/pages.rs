use futures::executor::block_on;
use tuku::backend::memory::MemoryBackend;
use tuku::lightbox::Lightbox;
use tuku::page::detail::{DetailPage, DetailView};
use tuku::page::home::{CategoryFilter, HomePage};
use tuku::prelude::*;

const EN: &str = r#"{
    "card_button": "Learn more",
    "map_button_text": "On map",
    "filter_all": "All",
    "error_db_load": "Could not load data",
    "error_missing_id": "No attraction selected",
    "error_not_found": "Attraction not found",
    "error_back_button": "Back home",
    "detail_meta_address": "Address",
    "detail_meta_hours": "Hours",
    "detail_nearby_button": "{distance} km away",
    "strip_image_title": "Street view"
}"#;

const ATTRACTIONS: &str = r#"[
    {
        "id": "station",
        "name": { "zh-TW": "車站", "en": "Station" },
        "description": { "zh-TW": "車站", "en": "The old station" },
        "address": { "zh-TW": "中正路", "en": "Zhongzheng Rd." },
        "opening_hours": { "zh-TW": "全天", "en": "All day" },
        "category": { "zh-TW": "歷史建築", "en": "Historic building" },
        "coordinates": { "lat": 23.70, "lon": 120.40 },
        "folder": "station",
        "card_image": "card.jpg",
        "gallery_images": ["1.jpg", "2.jpg"],
        "stripImage": "strip.jpg",
        "story": { "en": "<p>Built in 1911.</p>" }
    },
    {
        "id": "coffee",
        "name": { "zh-TW": "咖啡", "en": "Coffee" },
        "category": { "zh-TW": "咖啡", "en": "Coffee" },
        "coordinates": { "lat": 23.71, "lon": 120.41 },
        "folder": "coffee",
        "card_image": "card.jpg",
        "panorama_image": "pano.jpg"
    },
    {
        "id": "temple",
        "name": { "zh-TW": "廟", "en": "Temple" },
        "category": { "zh-TW": "信仰", "en": "Faith" },
        "coordinates": { "lat": 24.00, "lon": 121.00 },
        "folder": "temple",
        "card_image": "card.jpg"
    },
    {
        "id": "unknown-place",
        "name": { "zh-TW": "未知", "en": "Somewhere" },
        "category": { "zh-TW": "歷史建築", "en": "Historic building" },
        "coordinates": { "lat": 0, "lon": 0, "placeholder": true },
        "folder": "x",
        "card_image": "card.jpg"
    }
]"#;

fn context(with_data: bool) -> PageContext<MemoryBackend> {
    context_with(with_data.then_some(ATTRACTIONS))
}

fn context_with(attractions: Option<&str>) -> PageContext<MemoryBackend> {
    let backend = MemoryBackend::new();
    backend.add_resource("locales/en.json", EN);
    backend.set_languages(Some("en"), &[]);
    if let Some(src) = attractions {
        backend.add_resource("attractions.json", src);
    }
    let mut config = SiteConfig::default();
    config.home_page = "../index.html".into();
    PageContext::new(backend, config)
}

#[test]
fn home_cards_and_filters() {
    let mut page = block_on(HomePage::init(context(true)));
    assert_eq!(page.load_error(), None);
    let cards = page.cards();
    assert_eq!(cards.len(), 4);
    assert_eq!(cards[0].title, "Station");
    assert_eq!(cards[0].image_url, "images/station/card.jpg");
    assert_eq!(cards[0].detail_url, "pages/detail.html?id=station");
    assert_eq!(cards[0].map_button_label, "On map");
    assert_eq!(cards[1].description, "");

    let filters = page.filters();
    let labels: Vec<_> = filters.iter().map(|x| x.label.as_str()).collect();
    assert_eq!(labels, ["All", "Historic building", "Coffee", "Faith"]);
    assert!(filters[0].active);

    assert_eq!(page.markers().len(), 3);
    page.select_filter(CategoryFilter::from_key("歷史建築"));
    let visible = page.visible_markers();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "station");
    assert_eq!(visible[0].style.icon, "fa-landmark");
    assert!(page.filters()[1].active);
    assert!(page.marker_of("unknown-place").is_none());
}

#[test]
fn home_load_failure_is_inline() {
    let page = block_on(HomePage::init(context(false)));
    assert_eq!(page.load_error().as_deref(), Some("Could not load data"));
    assert!(page.cards().is_empty());
    assert_eq!(page.filters().len(), 1);
}

#[test]
fn detail_model() {
    let page = block_on(DetailPage::init(context(true), Some("station")));
    let model = match page.view() {
        DetailView::Ready(x) => x,
        DetailView::Error(x) => panic!("unexpected error {:?}", x),
    };
    assert_eq!(model.document_title, "Tuku GO - Station");
    assert_eq!(model.story.as_deref(), Some("<p>Built in 1911.</p>"));
    assert_eq!(model.meta[0].label, "Address");
    assert_eq!(model.meta[0].value, "Zhongzheng Rd.");
    assert_eq!(model.gallery[1].alt, "Station gallery image 2");
    assert_eq!(model.strip_image.unwrap().alt, "Station - Street view");
    assert_eq!(model.panorama_url, None);

    let nearby: Vec<_> = model.nearby.iter().map(|x| x.id.as_str()).collect();
    assert_eq!(nearby, ["coffee", "temple"]);
    assert!(model.nearby[0].button_label.ends_with(" km away"));
    assert_eq!(
        model.nearby[0].button_label,
        format!("{:.2} km away", model.nearby[0].distance_km)
    );

    let map = model.map.unwrap();
    assert!(map.current.is_current);
    assert_eq!(map.nearby.len(), 2);
}

fn place(id: &str, lat: f64) -> String {
    format!(
        r#"{{
            "id": "{}",
            "name": {{ "en": "{}" }},
            "category": {{ "en": "Coffee" }},
            "coordinates": {{ "lat": {}, "lon": 120.40 }},
            "folder": "x",
            "card_image": "card.jpg"
        }}"#,
        id, id, lat
    )
}

#[test]
fn nearby_skips_every_entry_of_the_same_id() {
    let src = format!("[{}, {}, {}]", place("a", 23.70), place("a", 23.71), place("b", 23.75));
    let page = block_on(DetailPage::init(context_with(Some(&src)), Some("a")));
    match page.view() {
        DetailView::Ready(model) => {
            let nearby: Vec<_> = model.nearby.iter().map(|x| x.id.as_str()).collect();
            assert_eq!(nearby, ["b"]);
        }
        DetailView::Error(x) => panic!("unexpected error {:?}", x),
    }
}

#[test]
fn detail_links_encode_the_id() {
    let src = format!("[{}]", place("old street & 2", 23.70));
    let page = block_on(HomePage::init(context_with(Some(&src))));
    assert_eq!(
        page.cards()[0].detail_url,
        "pages/detail.html?id=old+street+%26+2"
    );
}

#[test]
fn detail_without_location() {
    let page = block_on(DetailPage::init(context(true), Some("unknown-place")));
    match page.view() {
        DetailView::Ready(model) => {
            assert!(model.nearby.is_empty());
            assert!(model.map.is_none());
            assert_eq!(model.story, None);
        }
        DetailView::Error(x) => panic!("unexpected error {:?}", x),
    }
}

#[test]
fn detail_errors() {
    let cases = [
        (context(true), None, "No attraction selected"),
        (context(true), Some("nowhere"), "Attraction not found"),
        (context(false), Some("station"), "Could not load data"),
    ];
    for (ctx, id, message) in cases {
        let page = block_on(DetailPage::init(ctx, id));
        match page.view() {
            DetailView::Error(x) => {
                assert_eq!(x.message, message);
                assert_eq!(x.back_label, "Back home");
                assert_eq!(x.back_url, "../index.html");
            }
            DetailView::Ready(_) => panic!("expected an error for {:?}", id),
        }
        assert!(page.attraction().is_none());
    }
}

#[test]
fn detail_follows_language_change() {
    let ctx = context(true);
    ctx.backend.add_resource(
        "locales/zh-TW.json",
        r#"{ "detail_nearby_button": "距離 {distance} 公里" }"#,
    );
    let page = block_on(DetailPage::init(ctx.clone(), Some("coffee")));
    block_on(ctx.translator.set_language("zh-TW"));
    match page.view() {
        DetailView::Ready(model) => {
            assert_eq!(model.title, "咖啡");
            assert!(model.nearby[0].button_label.starts_with("距離 "));
            assert_eq!(model.panorama_url.as_deref(), Some("images/coffee/pano.jpg"));
        }
        DetailView::Error(x) => panic!("unexpected error {:?}", x),
    }
}

#[test]
fn lightbox_wraps() {
    let mut lightbox = Lightbox::new(vec!["a".into(), "b".into(), "c".into()]);
    lightbox.open(0);
    assert!(lightbox.is_open());
    lightbox.prev();
    assert_eq!(lightbox.current(), Some("c"));
    assert_eq!(lightbox.caption(), "3 / 3");
    lightbox.next();
    assert_eq!(lightbox.current(), Some("a"));
    lightbox.close();
    assert!(!lightbox.is_open());

    let mut empty = Lightbox::new(vec![]);
    empty.open(2);
    empty.next();
    assert!(!empty.is_open());
}
