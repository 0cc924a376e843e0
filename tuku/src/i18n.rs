//! The translation service.
//!
//! A `Translator` owns the active language and its dictionary for one page.
//! Page controllers hold it in an `Rc` and subscribe to language changes
//! with `Translator::on_language_changed` .

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::backend::{Backend, BackendElement};
use crate::config::SiteConfig;
use crate::dictionary::{fallback_of, Dictionary, DictionaryLoad, DictionaryStatus};
use crate::locale::{resolve_language, LocaleCode};

/// The result of `Translator::set_language` .
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageChange {
    /// The language was installed and subscribers were notified.
    Applied(LocaleCode),
    /// A newer language change started before this one finished loading;
    /// this one was discarded.
    Superseded,
}

type Listener = Rc<dyn Fn(LocaleCode)>;

/// The body class marking a translated document.
pub const LOADED_CLASS: &str = "i18n-loaded";

/// The language state of a page.
pub struct Translator<B: Backend> {
    backend: Rc<B>,
    config: Rc<SiteConfig>,
    current: Cell<LocaleCode>,
    /// The language of the newest change, installed or still loading.
    requested: Cell<LocaleCode>,
    dictionary: RefCell<Rc<Dictionary>>,
    status: Cell<DictionaryStatus>,
    generation: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener_id: Cell<u64>,
}

impl<B: Backend> Translator<B> {
    /// Create with an empty dictionary in the default language.
    ///
    /// Call `init` before rendering.
    pub fn new(backend: Rc<B>, config: Rc<SiteConfig>) -> Rc<Self> {
        Rc::new(Self {
            backend,
            config,
            current: Cell::new(LocaleCode::DEFAULT),
            requested: Cell::new(LocaleCode::DEFAULT),
            dictionary: RefCell::new(Rc::new(Dictionary::default())),
            status: Cell::new(DictionaryStatus::Empty),
            generation: Cell::new(0),
            listeners: RefCell::new(vec![]),
            next_listener_id: Cell::new(0),
        })
    }

    pub fn backend(&self) -> &Rc<B> {
        &self.backend
    }

    pub fn config(&self) -> &Rc<SiteConfig> {
        &self.config
    }

    /// The active language.
    pub fn current_language(&self) -> LocaleCode {
        self.current.get()
    }

    /// Which kind of dictionary is installed.
    pub fn dictionary_status(&self) -> DictionaryStatus {
        self.status.get()
    }

    /// Pick the language from the persisted choice and the browser preferences.
    pub fn resolve_language(&self) -> LocaleCode {
        let stored = self.backend.stored_item(&self.config.storage_key);
        let primary = self.backend.primary_language();
        let preferred = self.backend.preferred_languages();
        resolve_language(stored.as_deref(), primary.as_deref(), &preferred)
    }

    /// Fetch the dictionary of `code` .
    ///
    /// A failure retries once with the default language.
    /// This never fails: if nothing can be loaded, the result is `DictionaryLoad::Empty` .
    pub async fn load_dictionary(&self, code: LocaleCode) -> DictionaryLoad {
        if let Some(dict) = self.fetch_dictionary(code).await {
            return DictionaryLoad::Loaded(dict);
        }
        if let Some(fallback) = fallback_of(code) {
            log::warn!("Falling back to {} translations", fallback);
            if let Some(dict) = self.fetch_dictionary(fallback).await {
                return DictionaryLoad::FellBackToDefault(dict);
            }
        }
        DictionaryLoad::Empty
    }

    async fn fetch_dictionary(&self, code: LocaleCode) -> Option<Dictionary> {
        let url = self.config.locale_url(code.tag());
        let ret = match self.backend.fetch_text(&url).await {
            Ok(src) => Dictionary::from_json(&url, &src),
            Err(err) => Err(err),
        };
        match ret {
            Ok(dict) => Some(dict),
            Err(err) => {
                log::error!("Could not load translations for {}: {}", code, err);
                None
            }
        }
    }

    /// Resolve the language and load its dictionary.
    ///
    /// Subscribers are not notified; the caller renders afterwards.
    pub async fn init(&self) -> LocaleCode {
        let code = self.resolve_language();
        self.requested.set(code);
        let generation = self.bump_generation();
        let load = self.load_dictionary(code).await;
        if self.generation.get() == generation {
            self.install(code, load);
        }
        self.current.get()
    }

    fn bump_generation(&self) -> u64 {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        generation
    }

    fn install(&self, code: LocaleCode, load: DictionaryLoad) {
        self.current.set(code);
        self.status.set(load.status());
        *self.dictionary.borrow_mut() = Rc::new(load.into_dictionary());
    }

    /// Look up `key` and fill in the `{name}` placeholders.
    ///
    /// A missing key is returned as it is.
    /// Only the first occurrence of each placeholder is replaced.
    pub fn translate(&self, key: &str, substitutions: &[(&str, &str)]) -> String {
        let dict = self.dictionary.borrow().clone();
        match dict.format(key, substitutions) {
            Some(x) => x,
            None => {
                log::warn!("Translation key not found: {}", key);
                key.to_string()
            }
        }
    }

    /// Shortcut of `translate` without substitutions.
    pub fn t(&self, key: &str) -> String {
        self.translate(key, &[])
    }

    /// Switch the language.
    ///
    /// Unsupported tags become the default language.
    /// The choice is persisted before the dictionary is loaded.
    /// When a newer call starts before this one has loaded its dictionary,
    /// this call is discarded and returns `LanguageChange::Superseded` .
    pub async fn set_language(&self, tag: &str) -> LanguageChange {
        let code = LocaleCode::coerce(tag);
        self.requested.set(code);
        let generation = self.bump_generation();
        if let Err(err) = self.backend.store_item(&self.config.storage_key, code.tag()) {
            log::warn!("Could not persist the language choice: {}", err);
        }
        let load = self.load_dictionary(code).await;
        if self.generation.get() != generation {
            log::debug!("Language change to {} superseded", code);
            return LanguageChange::Superseded;
        }
        self.install(code, load);
        self.notify(code);
        LanguageChange::Applied(code)
    }

    /// Like `set_language` , but runs in the background.
    ///
    /// Does nothing if `tag` is the language of the newest change, even while it loads.
    pub fn request_language(self: &Rc<Self>, tag: &str) {
        let code = LocaleCode::coerce(tag);
        if code == self.requested.get() {
            return;
        }
        self.requested.set(code);
        let this = self.clone();
        B::async_task(async move {
            this.set_language(code.tag()).await;
        });
    }

    /// Write translations into the marked elements of the document.
    ///
    /// Also updates the document language and the language selector label,
    /// then marks the body with the `i18n-loaded` class.
    pub fn apply_to_document(&self) {
        let attr = &self.config.i18n_attribute;
        for elem in self.backend.query_selector_all(&format!("[{}]", attr)) {
            if let Some(key) = elem.attribute(attr) {
                elem.set_text_content(&self.t(&key));
            }
        }
        let code = self.current.get();
        self.backend.set_document_language(code.base());
        if let Some(label) = self
            .backend
            .query_selector(".language-selector .current-lang-text")
        {
            label.set_text_content(&self.t(&code.label_key()));
        }
        self.backend.add_body_class(LOADED_CLASS);
    }

    /// Call `f` after every applied language change.
    ///
    /// The returned handle unsubscribes when dropped.
    pub fn on_language_changed(
        self: &Rc<Self>,
        f: impl 'static + Fn(LocaleCode),
    ) -> Subscription<B> {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(f)));
        Subscription {
            translator: Rc::downgrade(self),
            id,
        }
    }

    fn notify(&self, code: LocaleCode) {
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, f)| f.clone())
            .collect();
        for f in listeners {
            f(code);
        }
    }

    fn unsubscribe(&self, id: u64) {
        self.listeners.borrow_mut().retain(|(x, _)| *x != id);
    }
}

/// A language change subscription.
#[must_use]
pub struct Subscription<B: Backend> {
    translator: Weak<Translator<B>>,
    id: u64,
}

impl<B: Backend> Subscription<B> {
    /// Keep the subscription for the lifetime of the translator.
    pub fn detach(mut self) {
        self.translator = Weak::new();
    }
}

impl<B: Backend> Drop for Subscription<B> {
    fn drop(&mut self) {
        if let Some(translator) = self.translator.upgrade() {
            translator.unsubscribe(self.id);
        }
    }
}
