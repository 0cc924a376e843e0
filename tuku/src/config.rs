//! Site configuration.
//!
//! Every field has a default so that a page works without any configuration;
//! a page may override fields with a JSON object (see `SiteConfig::from_json`).

use serde::Deserialize;
use url::form_urlencoded;

use crate::error::Error;
use crate::geo::GeoPoint;

/// The configuration of one page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// The locale file path, `{lang}` is replaced by the locale tag.
    pub locale_path: String,
    /// The attraction data file.
    pub attractions_url: String,
    /// The local storage key of the chosen language.
    pub storage_key: String,
    /// The attribute marking translatable elements.
    pub i18n_attribute: String,
    /// The directory holding attraction image folders.
    pub image_root: String,
    /// The detail page, `?id=<id>` is appended.
    pub detail_page: String,
    /// The homepage, used by the back link of error states.
    pub home_page: String,
    /// How many nearby attractions the detail page recommends.
    pub nearby_limit: usize,
    /// The initial center of the homepage map.
    pub map_center: GeoPoint,
    pub map_zoom: u8,
    pub detail_map_zoom: u8,
    /// Upper bound of a single fetch.
    pub fetch_timeout_ms: u32,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            locale_path: "locales/{lang}.json".into(),
            attractions_url: "attractions.json".into(),
            storage_key: "tuku_go_lang".into(),
            i18n_attribute: "data-i18n".into(),
            image_root: "images".into(),
            detail_page: "pages/detail.html".into(),
            home_page: "index.html".into(),
            nearby_limit: crate::geo::DEFAULT_NEAREST_LIMIT,
            map_center: GeoPoint::new(23.6766, 120.3906),
            map_zoom: 15,
            detail_map_zoom: 15,
            fetch_timeout_ms: 10_000,
            log_level: "info".into(),
        }
    }
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON configuration object.
    pub fn from_json(src: &str) -> Result<Self, Error> {
        serde_json::from_str(src).map_err(|err| Error::Parse {
            url: "<config>".into(),
            msg: err.to_string(),
        })
    }

    /// The URL of the dictionary for a locale tag.
    pub fn locale_url(&self, tag: &str) -> String {
        self.locale_path.replace("{lang}", tag)
    }

    /// The URL of an image inside an attraction folder.
    pub fn image_url(&self, folder: &str, file: &str) -> String {
        format!("{}/{}/{}", self.image_root, folder, file)
    }

    /// The URL of the detail page of an attraction.
    ///
    /// The id is form-encoded, so the page reads it back unchanged from `?id=` .
    pub fn detail_url(&self, id: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("id", id)
            .finish();
        format!("{}?{}", self.detail_page, query)
    }

    /// The configured log level, `Info` if unrecognized.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial_override() {
        let config =
            SiteConfig::from_json(r#"{ "image_root": "../images", "nearby_limit": 5 }"#).unwrap();
        assert_eq!(config.image_root, "../images");
        assert_eq!(config.nearby_limit, 5);
        assert_eq!(config.storage_key, "tuku_go_lang");
        assert_eq!(config.locale_url("ja"), "locales/ja.json");
        assert_eq!(config.image_url("koka", "a.jpg"), "../images/koka/a.jpg");
    }

    #[test]
    fn bad_level_falls_back() {
        let mut config = SiteConfig::default();
        config.log_level = "loud".into();
        assert_eq!(config.log_level(), log::Level::Info);
        config.log_level = "debug".into();
        assert_eq!(config.log_level(), log::Level::Debug);
    }
}
