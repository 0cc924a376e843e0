use std::fmt;

use rustc_hash::FxHashSet;
use tuku::attraction::{parse_attractions, Attraction, LocalizedText};
use tuku::dictionary::{placeholders, Dictionary};
use tuku::LocaleCode;

use crate::config::{read_error, ToolConfig};

/// A content problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// A locale file cannot be read or parsed.
    Unreadable { file: String, msg: String },
    MissingKey { lang: LocaleCode, key: String },
    ExtraKey { lang: LocaleCode, key: String },
    /// The placeholders differ from the default language template.
    PlaceholderMismatch {
        lang: LocaleCode,
        key: String,
        expected: Vec<String>,
        found: Vec<String>,
    },
    MissingText {
        id: String,
        field: &'static str,
        lang: LocaleCode,
    },
    BadCoordinates { id: String },
    DuplicateId { id: String },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable { file, msg } => write!(f, "cannot read {}: {}", file, msg),
            Self::MissingKey { lang, key } => write!(f, "[{}] missing key {:?}", lang, key),
            Self::ExtraKey { lang, key } => {
                write!(f, "[{}] key {:?} is not in the {} locale", lang, key, LocaleCode::DEFAULT)
            }
            Self::PlaceholderMismatch {
                lang,
                key,
                expected,
                found,
            } => write!(
                f,
                "[{}] key {:?} has placeholders {:?}, expected {:?}",
                lang, key, found, expected
            ),
            Self::MissingText { id, field, lang } => {
                write!(f, "attraction {:?} has no {} in {}", id, field, lang)
            }
            Self::BadCoordinates { id } => {
                write!(f, "attraction {:?} has out-of-range coordinates", id)
            }
            Self::DuplicateId { id } => write!(f, "attraction id {:?} is used twice", id),
        }
    }
}

fn sorted_placeholders(template: &str) -> Vec<String> {
    let mut ret: Vec<String> = placeholders(template)
        .into_iter()
        .map(|x| x.to_string())
        .collect();
    ret.sort();
    ret.dedup();
    ret
}

/// Compare every dictionary with the default language one.
///
/// Without a default language dictionary, there is nothing to compare with.
pub fn check_dictionaries(dicts: &[(LocaleCode, Dictionary)]) -> Vec<Problem> {
    let mut ret = vec![];
    let default = match dicts.iter().find(|(lang, _)| *lang == LocaleCode::DEFAULT) {
        Some((_, x)) => x,
        None => return ret,
    };
    let mut default_keys: Vec<&str> = default.keys().collect();
    default_keys.sort_unstable();
    for (lang, dict) in dicts.iter().filter(|(lang, _)| *lang != LocaleCode::DEFAULT) {
        let lang = *lang;
        for key in default_keys.iter() {
            let template = match dict.get(key) {
                Some(x) => x,
                None => {
                    ret.push(Problem::MissingKey {
                        lang,
                        key: key.to_string(),
                    });
                    continue;
                }
            };
            let expected = sorted_placeholders(default.get(key).unwrap_or_default());
            let found = sorted_placeholders(template);
            if expected != found {
                ret.push(Problem::PlaceholderMismatch {
                    lang,
                    key: key.to_string(),
                    expected,
                    found,
                });
            }
        }
        let mut extra: Vec<&str> = dict.keys().filter(|x| default.get(x).is_none()).collect();
        extra.sort_unstable();
        ret.extend(extra.into_iter().map(|key| Problem::ExtraKey {
            lang,
            key: key.to_string(),
        }));
    }
    ret
}

/// Check that every attraction is complete in every supported language.
pub fn check_attractions(list: &[Attraction]) -> Vec<Problem> {
    let mut ret = vec![];
    let mut ids = FxHashSet::default();
    for a in list {
        if !ids.insert(a.id.as_str()) {
            ret.push(Problem::DuplicateId { id: a.id.clone() });
        }
        let fields: [(&'static str, &LocalizedText); 3] = [
            ("name", &a.name),
            ("description", &a.description),
            ("category", &a.category),
        ];
        for (field, text) in fields {
            for lang in LocaleCode::SUPPORTED {
                if text.get_exact(lang).map(|x| x.trim().is_empty()).unwrap_or(true) {
                    ret.push(Problem::MissingText {
                        id: a.id.clone(),
                        field,
                        lang,
                    });
                }
            }
        }
        if let Some(p) = &a.coordinates {
            let in_range = (-90.0..=90.0).contains(&p.lat) && (-180.0..=180.0).contains(&p.lon);
            if !p.placeholder && !in_range {
                ret.push(Problem::BadCoordinates { id: a.id.clone() });
            }
        }
    }
    ret
}

/// Read the locale files and the attraction file of a site and check them all.
pub fn check_site(config: &ToolConfig) -> Vec<Problem> {
    let mut ret = vec![];
    let mut dicts = vec![];
    for lang in LocaleCode::SUPPORTED {
        let path = config.resource_path(&config.site.locale_url(lang.tag()));
        log::info!("Reading {}", path.display());
        let loaded = std::fs::read_to_string(&path)
            .map_err(|err| read_error(&path, err))
            .and_then(|src| Dictionary::from_json(&path.to_string_lossy(), &src));
        match loaded {
            Ok(dict) => dicts.push((lang, dict)),
            Err(err) => ret.push(Problem::Unreadable {
                file: path.display().to_string(),
                msg: err.to_string(),
            }),
        }
    }
    ret.extend(check_dictionaries(&dicts));

    let path = config.resource_path(&config.site.attractions_url);
    log::info!("Reading {}", path.display());
    let loaded = std::fs::read_to_string(&path)
        .map_err(|err| read_error(&path, err))
        .and_then(|src| parse_attractions(&path.to_string_lossy(), &src));
    match loaded {
        Ok(list) => ret.extend(check_attractions(&list)),
        Err(err) => ret.push(Problem::Unreadable {
            file: path.display().to_string(),
            msg: err.to_string(),
        }),
    }
    ret
}

#[cfg(test)]
mod test {
    use super::*;

    fn dict(entries: &[(&str, &str)]) -> Dictionary {
        Dictionary::from_entries(entries.iter().copied())
    }

    #[test]
    fn dictionary_differences() {
        let dicts = [
            (
                LocaleCode::ZhTw,
                dict(&[("a", "甲"), ("b", "距離 {distance} 公里"), ("c", "丙")]),
            ),
            (
                LocaleCode::En,
                dict(&[("a", "A"), ("b", "{dist} km"), ("d", "D")]),
            ),
        ];
        let problems = check_dictionaries(&dicts);
        assert_eq!(
            problems,
            [
                Problem::PlaceholderMismatch {
                    lang: LocaleCode::En,
                    key: "b".into(),
                    expected: vec!["distance".into()],
                    found: vec!["dist".into()],
                },
                Problem::MissingKey {
                    lang: LocaleCode::En,
                    key: "c".into(),
                },
                Problem::ExtraKey {
                    lang: LocaleCode::En,
                    key: "d".into(),
                },
            ]
        );
        assert!(check_dictionaries(&dicts[1..]).is_empty());
    }

    #[test]
    fn attraction_completeness() {
        let list = parse_attractions(
            "attractions.json",
            r#"[
                {
                    "id": 1,
                    "name": { "zh-TW": "車站", "en": "Station", "ja": "駅", "ko": "역" },
                    "description": { "zh-TW": "x", "en": "x", "ja": "x", "ko": "x" },
                    "category": { "zh-TW": "x", "en": "x", "ja": "x", "ko": " " },
                    "coordinates": { "lat": 123.0, "lon": 120.0 },
                    "folder": "a",
                    "card_image": "a.jpg"
                },
                {
                    "id": "1",
                    "name": { "zh-TW": "x", "en": "x", "ja": "x", "ko": "x" },
                    "description": { "zh-TW": "x", "en": "x", "ja": "x", "ko": "x" },
                    "category": { "zh-TW": "x", "en": "x", "ja": "x", "ko": "x" },
                    "coordinates": { "lat": 999, "lon": 999, "placeholder": true },
                    "folder": "b",
                    "card_image": "b.jpg"
                }
            ]"#,
        )
        .unwrap();
        let problems = check_attractions(&list);
        assert_eq!(
            problems,
            [
                Problem::MissingText {
                    id: "1".into(),
                    field: "category",
                    lang: LocaleCode::Ko,
                },
                Problem::BadCoordinates { id: "1".into() },
                Problem::DuplicateId { id: "1".into() },
            ]
        );
        assert_eq!(
            problems[0].to_string(),
            "attraction \"1\" has no category in ko"
        );
    }
}
