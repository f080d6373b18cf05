//! Detection enrichment with representative species images.
//!
//! Strictly best-effort presentation-layer decoration: one external query
//! per displayed detection, first hit or nothing, no retry and no cache.
//! Every backend failure is reported to the caller as "no image".

mod duckduckgo;

pub use duckduckgo::DuckDuckGoImages;

use crate::error::Result;
use tracing::debug;

/// Backend seam for the external image search service.
pub trait ImageSearchBackend {
    /// Search for images matching `query`, returning the first hit.
    fn search(&self, query: &str) -> Result<Option<String>>;
}

/// Image enricher wrapping a search backend.
pub struct Enricher {
    backend: Box<dyn ImageSearchBackend>,
}

impl Enricher {
    /// Create an enricher over the given backend.
    pub fn new(backend: Box<dyn ImageSearchBackend>) -> Self {
        Self { backend }
    }

    /// Find a representative image URL for a localized species name.
    ///
    /// Errors are indistinguishable from "no image found" by contract;
    /// the cause is only logged.
    pub fn find_image(&self, localized_name: &str) -> Option<String> {
        match self.backend.search(localized_name) {
            Ok(url) => url,
            Err(e) => {
                debug!("Image search failed for '{}': {e}", localized_name);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::Cell;
    use std::rc::Rc;

    struct ScriptedBackend {
        calls: Cell<usize>,
        reply: Option<String>,
        fail: bool,
    }

    impl ImageSearchBackend for Rc<ScriptedBackend> {
        fn search(&self, query: &str) -> Result<Option<String>> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(Error::ImageSearchResponse {
                    query: query.to_string(),
                    reason: "scripted failure".to_string(),
                });
            }
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn test_returns_first_hit() {
        let backend = Rc::new(ScriptedBackend {
            calls: Cell::new(0),
            reply: Some("https://example.org/sparrow.jpg".to_string()),
            fail: false,
        });
        let enricher = Enricher::new(Box::new(Rc::clone(&backend)));

        let url = enricher.find_image("麻雀");
        assert_eq!(url.as_deref(), Some("https://example.org/sparrow.jpg"));
    }

    #[test]
    fn test_backend_error_is_reported_as_none() {
        let backend = Rc::new(ScriptedBackend {
            calls: Cell::new(0),
            reply: None,
            fail: true,
        });
        let enricher = Enricher::new(Box::new(Rc::clone(&backend)));

        assert!(enricher.find_image("麻雀").is_none());
    }

    #[test]
    fn test_repeated_lookups_are_not_cached() {
        let backend = Rc::new(ScriptedBackend {
            calls: Cell::new(0),
            reply: Some("https://example.org/a.jpg".to_string()),
            fail: false,
        });
        let enricher = Enricher::new(Box::new(Rc::clone(&backend)));

        enricher.find_image("麻雀");
        enricher.find_image("麻雀");
        assert_eq!(backend.calls.get(), 2);
    }
}
