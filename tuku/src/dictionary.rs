//! Translation dictionaries.

use rustc_hash::FxHashMap;

use crate::error::Error;
use crate::locale::LocaleCode;

/// A flat key to template mapping for one language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: FxHashMap<String, String>,
}

impl Dictionary {
    /// Parse a locale file.
    ///
    /// The file must be a JSON object whose values are all strings.
    pub fn from_json(url: &str, src: &str) -> Result<Self, Error> {
        let entries = serde_json::from_str(src).map_err(|err| Error::Parse {
            url: url.to_string(),
            msg: err.to_string(),
        })?;
        Ok(Self { entries })
    }

    pub fn from_entries<K: Into<String>, V: Into<String>>(
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|x| x.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|x| x.as_str())
    }

    /// Look up `key` and fill in the placeholders.
    ///
    /// Returns `None` if the key is absent.
    /// Each `{name}` placeholder named in `substitutions` is replaced once
    /// (the first occurrence only); other placeholders are kept as they are.
    pub fn format(&self, key: &str, substitutions: &[(&str, &str)]) -> Option<String> {
        let mut ret = self.get(key)?.to_string();
        for (name, value) in substitutions {
            let token = format!("{{{}}}", name);
            ret = ret.replacen(&token, value, 1);
        }
        Some(ret)
    }
}

/// The placeholder names of a template, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut ret = vec![];
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find(|c: char| c == '}' || c == '{') {
            Some(end) if after[end..].starts_with('}') => {
                let name = &after[..end];
                if !name.is_empty() {
                    ret.push(name);
                }
                rest = &after[end + 1..];
            }
            Some(end) => rest = &after[end..],
            None => break,
        }
    }
    ret
}

/// The outcome of loading a dictionary.
#[derive(Debug, Clone, PartialEq)]
pub enum DictionaryLoad {
    /// The requested language was loaded.
    Loaded(Dictionary),
    /// The requested language failed and the default language was loaded instead.
    FellBackToDefault(Dictionary),
    /// Nothing could be loaded; lookups return raw keys.
    Empty,
}

impl DictionaryLoad {
    pub fn status(&self) -> DictionaryStatus {
        match self {
            Self::Loaded(_) => DictionaryStatus::Loaded,
            Self::FellBackToDefault(_) => DictionaryStatus::FellBackToDefault,
            Self::Empty => DictionaryStatus::Empty,
        }
    }

    pub fn into_dictionary(self) -> Dictionary {
        match self {
            Self::Loaded(x) | Self::FellBackToDefault(x) => x,
            Self::Empty => Dictionary::default(),
        }
    }
}

/// Which kind of dictionary is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryStatus {
    Loaded,
    FellBackToDefault,
    Empty,
}

/// The locale a failed load should retry with, if any.
pub(crate) fn fallback_of(code: LocaleCode) -> Option<LocaleCode> {
    if code == LocaleCode::DEFAULT {
        None
    } else {
        Some(LocaleCode::DEFAULT)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_substitution() {
        let dict = Dictionary::from_entries([("twice", "{n} and {n}"), ("mixed", "{a}-{b}")]);
        assert_eq!(dict.format("twice", &[("n", "1")]).unwrap(), "1 and {n}");
        assert_eq!(dict.format("mixed", &[("b", "2")]).unwrap(), "{a}-2");
        assert_eq!(dict.format("absent", &[]), None);
    }

    #[test]
    fn rejects_non_string_values() {
        assert!(Dictionary::from_json("x.json", r#"{ "a": "b" }"#).is_ok());
        assert!(Dictionary::from_json("x.json", r#"{ "a": 1 }"#).is_err());
        assert!(Dictionary::from_json("x.json", r#"[ "a" ]"#).is_err());
    }

    #[test]
    fn placeholder_names() {
        assert_eq!(placeholders("{distance} km from {name}"), ["distance", "name"]);
        assert_eq!(placeholders("{{x}"), ["x"]);
        assert_eq!(placeholders("no {closing"), Vec::<&str>::new());
        assert_eq!(placeholders("{}"), Vec::<&str>::new());
    }
}
