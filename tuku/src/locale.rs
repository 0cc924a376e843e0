//! The supported UI languages and language resolution.

use std::fmt::Display;

/// A supported UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocaleCode {
    ZhTw,
    En,
    Ja,
    Ko,
}

impl Default for LocaleCode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl LocaleCode {
    /// The language used when nothing else matches.
    pub const DEFAULT: LocaleCode = LocaleCode::ZhTw;

    /// All supported languages, in selector order.
    pub const SUPPORTED: [LocaleCode; 4] =
        [LocaleCode::ZhTw, LocaleCode::En, LocaleCode::Ja, LocaleCode::Ko];

    /// The language tag, as used in file names and the persisted choice.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::ZhTw => "zh-TW",
            Self::En => "en",
            Self::Ja => "ja",
            Self::Ko => "ko",
        }
    }

    /// The base language, as written to the document `lang` attribute.
    pub fn base(self) -> &'static str {
        let tag = self.tag();
        tag.split('-').next().unwrap_or(tag)
    }

    /// The dictionary key of the language's own display name.
    pub fn label_key(self) -> String {
        format!("lang_{}", self.tag().replace('-', "_"))
    }

    /// Exact match of a language tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::SUPPORTED.into_iter().find(|x| x.tag() == tag)
    }

    /// Like `from_tag` , but unsupported input becomes the default.
    pub fn coerce(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or(Self::DEFAULT)
    }
}

impl Display for LocaleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.tag().fmt(f)
    }
}

/// Pick the UI language.
///
/// The persisted choice wins, then the browser's primary language,
/// then the browser's preference list.
/// In the preference list, an exact match is tried before the base language
/// (`en-US` matches `en` ).
pub fn resolve_language(
    stored: Option<&str>,
    primary: Option<&str>,
    preferred: &[String],
) -> LocaleCode {
    if let Some(x) = stored.and_then(LocaleCode::from_tag) {
        return x;
    }
    if let Some(x) = primary.and_then(LocaleCode::from_tag) {
        return x;
    }
    for lang in preferred {
        if let Some(x) = LocaleCode::from_tag(lang) {
            return x;
        }
        let base = lang.split('-').next().unwrap_or(lang);
        if let Some(x) = LocaleCode::from_tag(base) {
            return x;
        }
    }
    LocaleCode::DEFAULT
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tags() {
        assert_eq!(LocaleCode::ZhTw.base(), "zh");
        assert_eq!(LocaleCode::ZhTw.label_key(), "lang_zh_TW");
        assert_eq!(LocaleCode::Ko.label_key(), "lang_ko");
        assert_eq!(LocaleCode::coerce("fr"), LocaleCode::ZhTw);
        assert_eq!(LocaleCode::coerce("ja"), LocaleCode::Ja);
    }
}
