//! Species name localization.
//!
//! Model labels carry English common names; the translator maps them to the
//! configured target language through an external backend, memoizing each
//! label for the process lifetime. Backend failures degrade to the English
//! name and are never cached, so a later successful call can still populate
//! the entry.

mod google;

pub use google::GoogleTranslate;

use crate::constants::translation::SOURCE_LANGUAGE;
use crate::error::Result;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Backend seam for the external translation service.
pub trait TranslateBackend {
    /// Translate `text` from `source` to `target` language.
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}

/// Memoizing species name translator.
///
/// Owns its cache; construct one per run and pass it to the pipeline.
/// The input domain (species common names) is small and finite, so the
/// cache is unbounded by design.
pub struct Translator {
    backend: Box<dyn TranslateBackend>,
    cache: HashMap<String, String>,
    target_language: String,
}

impl Translator {
    /// Create a translator for the given target language.
    pub fn new(backend: Box<dyn TranslateBackend>, target_language: impl Into<String>) -> Self {
        Self {
            backend,
            cache: HashMap::new(),
            target_language: target_language.into(),
        }
    }

    /// Translate an English common name to the target language.
    ///
    /// Repeated calls with the same name return the memoized value without
    /// hitting the backend. On backend failure the English name is returned
    /// unchanged and the cache is left unpopulated.
    pub fn translate(&mut self, english_name: &str) -> String {
        if let Some(cached) = self.cache.get(english_name) {
            return cached.clone();
        }

        match self
            .backend
            .translate(english_name, SOURCE_LANGUAGE, &self.target_language)
        {
            Ok(translated) if !translated.is_empty() => {
                debug!("Translated '{}' -> '{}'", english_name, translated);
                self.cache
                    .insert(english_name.to_string(), translated.clone());
                translated
            }
            Ok(_) => {
                debug!("Empty translation for '{}', keeping English name", english_name);
                english_name.to_string()
            }
            Err(e) => {
                warn!("Translation failed for '{}': {e}", english_name);
                english_name.to_string()
            }
        }
    }

    /// Number of memoized labels.
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Backend that counts calls and returns a scripted reply.
    struct CountingBackend {
        calls: Cell<usize>,
        reply: RefCell<Option<String>>,
    }

    impl CountingBackend {
        fn replying(reply: &str) -> Rc<Self> {
            Rc::new(Self {
                calls: Cell::new(0),
                reply: RefCell::new(Some(reply.to_string())),
            })
        }

        /// `None` reply means the backend errors.
        fn failing() -> Rc<Self> {
            Rc::new(Self {
                calls: Cell::new(0),
                reply: RefCell::new(None),
            })
        }
    }

    impl TranslateBackend for Rc<CountingBackend> {
        fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            self.reply.borrow().clone().ok_or(Error::Internal {
                message: "backend down".to_string(),
            })
        }
    }

    #[test]
    fn test_second_call_is_memoized() {
        let backend = CountingBackend::replying("麻雀");
        let mut translator = Translator::new(Box::new(Rc::clone(&backend)), "zh-CN");

        assert_eq!(translator.translate("Sparrow"), "麻雀");
        assert_eq!(translator.translate("Sparrow"), "麻雀");
        assert_eq!(backend.calls.get(), 1);
        assert_eq!(translator.cached_count(), 1);
    }

    #[test]
    fn test_distinct_labels_each_hit_backend() {
        let backend = CountingBackend::replying("鸟");
        let mut translator = Translator::new(Box::new(Rc::clone(&backend)), "zh-CN");

        translator.translate("Sparrow");
        translator.translate("Blackbird");
        assert_eq!(backend.calls.get(), 2);
    }

    #[test]
    fn test_failure_falls_back_without_caching() {
        let backend = CountingBackend::failing();
        let mut translator = Translator::new(Box::new(Rc::clone(&backend)), "zh-CN");

        assert_eq!(translator.translate("Sparrow"), "Sparrow");
        assert_eq!(translator.cached_count(), 0);

        // A later successful call can still populate the cache
        *backend.reply.borrow_mut() = Some("麻雀".to_string());
        assert_eq!(translator.translate("Sparrow"), "麻雀");
        assert_eq!(translator.cached_count(), 1);
        assert_eq!(backend.calls.get(), 2);
    }

    #[test]
    fn test_empty_reply_is_not_cached() {
        let backend = CountingBackend::replying("");
        let mut translator = Translator::new(Box::new(Rc::clone(&backend)), "zh-CN");

        assert_eq!(translator.translate("Sparrow"), "Sparrow");
        assert_eq!(translator.cached_count(), 0);
    }
}
