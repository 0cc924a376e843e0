use std::sync::Once;

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use tuku::backend::Backend;
use tuku::page::PageContext;
use tuku_dom::{home, prelude::*, widgets};

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

static INIT: Once = Once::new();

fn init() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Trace).unwrap();
    });
}

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount(html: &str) -> web_sys::Element {
    let document = document();
    let elem = document.create_element("div").unwrap();
    elem.set_inner_html(html);
    document.body().unwrap().append_child(&elem).unwrap();
    elem
}

fn click(elem: &web_sys::Element) {
    elem.dyn_ref::<web_sys::HtmlElement>().unwrap().click();
}

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    init();
    let backend = DomBackend::new(1000).unwrap();
    backend.store_item("tuku_test_key", "ko").unwrap();
    assert_eq!(backend.stored_item("tuku_test_key").as_deref(), Some("ko"));
    assert_eq!(backend.query_param("id"), None);
}

#[wasm_bindgen_test]
async fn missing_dictionaries_keep_keys() {
    init();
    let root = mount(
        r#"<p data-i18n="hero_title">x</p>
        <div class="language-selector"><span class="current-lang-text"></span></div>"#,
    );
    let backend = DomBackend::new(1000).unwrap();
    backend.store_item("tuku_go_lang", "ja").unwrap();
    let mut config = SiteConfig::default();
    config.locale_path = "no-such-dir/{lang}.json".into();
    let ctx = PageContext::new(backend, config);
    let lang = ctx.translator.init().await;
    assert_eq!(lang, LocaleCode::Ja);
    ctx.translator.apply_to_document();
    ctx.translator.apply_to_document();
    let p = root.query_selector("[data-i18n]").unwrap().unwrap();
    assert_eq!(p.text_content().unwrap(), "hero_title");
    let label = root.query_selector(".current-lang-text").unwrap().unwrap();
    assert_eq!(label.text_content().unwrap(), "lang_ja");
    let html = document().document_element().unwrap();
    assert_eq!(html.get_attribute("lang").as_deref(), Some("ja"));
    let body = document().body().unwrap();
    assert!(body.class_list().contains("i18n-loaded"));
    body.class_list().remove_1("i18n-loaded").unwrap();
    root.remove();
}

#[wasm_bindgen_test]
fn language_dropdown_opens_and_closes() {
    init();
    let root = mount(
        r##"<div class="language-selector">
            <button class="lang-button"></button>
            <div class="lang-dropdown"><a href="#" data-lang="en">English</a></div>
        </div>"##,
    );
    let ctx = PageContext::new(DomBackend::new(1000).unwrap(), SiteConfig::default());
    widgets::language_selector(&ctx.backend, &ctx.translator);
    let button = root.query_selector(".lang-button").unwrap().unwrap();
    let dropdown = root.query_selector(".lang-dropdown").unwrap().unwrap();
    click(&button);
    assert!(dropdown.class_list().contains("is-open"));
    assert!(button.class_list().contains("is-open"));
    click(&button);
    assert!(!dropdown.class_list().contains("is-open"));
    click(&button);
    click(&document().body().unwrap());
    assert!(!dropdown.class_list().contains("is-open"));
    root.remove();
}

fn data_url(json: &str) -> String {
    format!(
        "data:application/json,{}",
        String::from(js_sys::encode_uri_component(json))
    )
}

fn place(id: &str, category: &str) -> String {
    format!(
        r#"{{
            "id": "{}",
            "name": {{ "zh-TW": "{}", "en": "{}" }},
            "category": {{ "zh-TW": "{}", "en": "{}" }},
            "folder": "{}",
            "card_image": "card.jpg"
        }}"#,
        id, id, id, category, category, id
    )
}

fn active_filter(root: &web_sys::Element) -> Option<String> {
    root.query_selector(".map-filter-button.active")
        .unwrap()
        .and_then(|x| x.get_attribute("data-filter"))
}

#[wasm_bindgen_test]
async fn filters_keep_working_after_re_render() {
    init();
    let root = mount(r#"<div id="map-filters"></div><div id="attraction-grid"></div>"#);
    let mut config = SiteConfig::default();
    config.locale_path = data_url(r#"{ "filter_all": "All" }"#);
    config.attractions_url = data_url(&format!(
        "[{}, {}]",
        place("station", "歷史建築"),
        place("coffee", "咖啡")
    ));
    let ctx = PageContext::new(DomBackend::new(5000).unwrap(), config);
    home::run(ctx.clone()).await.unwrap();
    assert_eq!(root.query_selector_all(".card").unwrap().length(), 2);
    assert_eq!(active_filter(&root).as_deref(), Some("All"));

    let button = |key: &str| {
        root.query_selector(&format!(r#".map-filter-button[data-filter="{}"]"#, key))
            .unwrap()
            .unwrap()
    };
    click(&button("咖啡"));
    assert_eq!(active_filter(&root).as_deref(), Some("咖啡"));

    ctx.translator.set_language("en").await;
    click(&button("歷史建築"));
    assert_eq!(active_filter(&root).as_deref(), Some("歷史建築"));
    assert_eq!(root.query_selector_all(".map-filter-button.active").unwrap().length(), 1);

    document().body().unwrap().class_list().remove_1("i18n-loaded").unwrap();
    root.remove();
}
