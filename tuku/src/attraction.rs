//! The attraction data file.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer};

use crate::backend::Backend;
use crate::error::Error;
use crate::geo::GeoPoint;
use crate::locale::LocaleCode;

/// A text with one translation per language tag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(FxHashMap<String, String>);

impl LocalizedText {
    /// The text in `locale` , falling back to the default language, then to an empty string.
    pub fn get(&self, locale: LocaleCode) -> &str {
        self.0
            .get(locale.tag())
            .or_else(|| self.0.get(LocaleCode::DEFAULT.tag()))
            .map(|x| x.as_str())
            .unwrap_or("")
    }

    /// The text in exactly `locale` .
    pub fn get_exact(&self, locale: LocaleCode) -> Option<&str> {
        self.0.get(locale.tag()).map(|x| x.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocalizedText {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// One attraction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Attraction {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub address: LocalizedText,
    #[serde(default)]
    pub opening_hours: LocalizedText,
    #[serde(default)]
    pub category: LocalizedText,
    /// An HTML fragment.
    #[serde(default)]
    pub story: Option<LocalizedText>,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
    #[serde(default)]
    pub folder: String,
    #[serde(default)]
    pub card_image: String,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    #[serde(default, rename = "stripImage")]
    pub strip_image: Option<String>,
    #[serde(default)]
    pub panorama_image: Option<String>,
}

impl Attraction {
    /// The coordinates if they describe a real location.
    pub fn location(&self) -> Option<GeoPoint> {
        self.coordinates.filter(|x| x.is_usable())
    }

    /// The category name in the default language, used as the filter key.
    pub fn category_key(&self) -> &str {
        self.category.get(LocaleCode::DEFAULT)
    }

    pub fn strip_image(&self) -> Option<&str> {
        self.strip_image
            .as_deref()
            .map(|x| x.trim())
            .filter(|x| !x.is_empty())
    }

    pub fn panorama_image(&self) -> Option<&str> {
        self.panorama_image.as_deref().filter(|x| !x.is_empty())
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(serde_json::Number),
    }
    Ok(match Id::deserialize(d)? {
        Id::Str(x) => x,
        Id::Num(x) => x.to_string(),
    })
}

/// Parse the attraction data file.
pub fn parse_attractions(url: &str, src: &str) -> Result<Vec<Attraction>, Error> {
    serde_json::from_str(src).map_err(|err| Error::Parse {
        url: url.to_string(),
        msg: err.to_string(),
    })
}

/// Fetch and parse the attraction data file.
pub async fn load_attractions<B: Backend>(backend: &B, url: &str) -> Result<Vec<Attraction>, Error> {
    let src = backend.fetch_text(url).await?;
    parse_attractions(url, &src)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_minimal_and_full() {
        let src = r#"[
            { "id": 7, "name": { "zh-TW": "七" } },
            {
                "id": "koka",
                "name": { "zh-TW": "庫咖", "en": "KOKA" },
                "category": { "zh-TW": "咖啡", "en": "Coffee" },
                "coordinates": { "lat": 23.68, "lon": 120.39, "placeholder": true },
                "folder": "koka-coffee",
                "card_image": "card.jpg",
                "gallery_images": ["1.jpg", "2.jpg"],
                "stripImage": "  ",
                "panorama_image": "panorama.jpg"
            }
        ]"#;
        let list = parse_attractions("attractions.json", src).unwrap();
        assert_eq!(list[0].id, "7");
        assert_eq!(list[0].name.get(LocaleCode::Ja), "七");
        assert_eq!(list[0].category.get(LocaleCode::En), "");
        assert_eq!(list[1].name.get(LocaleCode::En), "KOKA");
        assert_eq!(list[1].category_key(), "咖啡");
        assert!(list[1].coordinates.is_some());
        assert_eq!(list[1].location(), None);
        assert_eq!(list[1].strip_image(), None);
        assert_eq!(list[1].panorama_image(), Some("panorama.jpg"));
    }

    #[test]
    fn malformed() {
        match parse_attractions("attractions.json", "{}") {
            Err(Error::Parse { url, .. }) => assert_eq!(url, "attractions.json"),
            x => panic!("unexpected {:?}", x),
        }
    }
}
