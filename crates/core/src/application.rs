use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{DerivedLinks, RenderOutcome};
use crate::ports::{PageWriter, RecordStore, Result};
use crate::utils::identifier_from_path;

/// Application service answering a lookup for one request path
pub struct LookupService {
    record_store: Arc<dyn RecordStore>,
}

impl LookupService {
    /// Creates a new LookupService over the given record store
    pub fn new(record_store: Arc<dyn RecordStore>) -> Self {
        Self { record_store }
    }

    /// Renders the page for `path` into `page`.
    ///
    /// The raw path is always echoed first. An invalid identifier ends the
    /// page without touching the store; a valid one gets its derived links
    /// followed by every stored record for it, in store order.
    pub fn render(&self, path: &str, page: &mut dyn PageWriter) -> Result<RenderOutcome> {
        page.begin(path)?;

        let identifier = identifier_from_path(path);
        let Some(links) = DerivedLinks::for_identifier(identifier) else {
            debug!(path, "rejected identifier");
            page.invalid()?;
            page.finish()?;
            return Ok(RenderOutcome::Invalid);
        };

        page.links(&links)?;

        let records = self.record_store.find_by_identifier(identifier)?;
        for record in &records {
            page.record(record)?;
        }
        page.finish()?;

        info!(identifier, count = records.len(), "found records");
        Ok(RenderOutcome::Found {
            count: records.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::Record;
    use crate::error::LookupError;

    struct FakeStore {
        records: Vec<Record>,
        fail: bool,
        queries: Mutex<Vec<String>>,
    }

    impl FakeStore {
        fn with(records: Vec<Record>) -> Arc<Self> {
            Arc::new(Self {
                records,
                fail: false,
                queries: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                records: Vec::new(),
                fail: true,
                queries: Mutex::new(Vec::new()),
            })
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    impl RecordStore for FakeStore {
        fn find_by_identifier(&self, identifier: &str) -> Result<Vec<Record>> {
            self.queries.lock().unwrap().push(identifier.to_string());
            if self.fail {
                return Err(LookupError::store(std::io::Error::other("iterator broke")));
            }
            Ok(self
                .records
                .iter()
                .filter(|r| r.identifier == identifier)
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct RecordingPage {
        events: Vec<String>,
    }

    impl PageWriter for RecordingPage {
        fn begin(&mut self, raw_path: &str) -> Result<()> {
            self.events.push(format!("begin {raw_path}"));
            Ok(())
        }

        fn invalid(&mut self) -> Result<()> {
            self.events.push("invalid".to_string());
            Ok(())
        }

        fn links(&mut self, links: &DerivedLinks) -> Result<()> {
            self.events
                .push(format!("links {} {}", links.mirror, links.resolver));
            Ok(())
        }

        fn record(&mut self, record: &Record) -> Result<()> {
            self.events.push(format!("record {}", record.location_url));
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.events.push("finish".to_string());
            Ok(())
        }
    }

    #[test]
    fn test_render_invalid_identifier_skips_store() {
        let store = FakeStore::with(vec![Record::new("not-a-doi", "https://x")]);
        let service = LookupService::new(store.clone());
        let mut page = RecordingPage::default();

        let outcome = service.render("/not-a-doi", &mut page).unwrap();

        assert_eq!(outcome, RenderOutcome::Invalid);
        assert_eq!(page.events, vec!["begin /not-a-doi", "invalid", "finish"]);
        assert!(store.queries().is_empty());
    }

    #[test]
    fn test_render_valid_identifier_without_records() {
        let store = FakeStore::with(Vec::new());
        let service = LookupService::new(store.clone());
        let mut page = RecordingPage::default();

        let outcome = service.render("/10.1000/xyz123", &mut page).unwrap();

        assert_eq!(outcome, RenderOutcome::Found { count: 0 });
        assert_eq!(
            page.events,
            vec![
                "begin /10.1000/xyz123",
                "links https://sci-hub.se/10.1000/xyz123 https://doi.org/10.1000/xyz123",
                "finish",
            ]
        );
        assert_eq!(store.queries(), vec!["10.1000/xyz123"]);
    }

    #[test]
    fn test_render_keeps_store_order() {
        let store = FakeStore::with(vec![
            Record::new("10.1038/nphys1170", "https://b.example/2"),
            Record::new("10.1000/other", "https://ignored.example"),
            Record::new("10.1038/nphys1170", "https://a.example/1"),
        ]);
        let service = LookupService::new(store);
        let mut page = RecordingPage::default();

        let outcome = service.render("/10.1038/nphys1170", &mut page).unwrap();

        assert_eq!(outcome, RenderOutcome::Found { count: 2 });
        assert_eq!(
            &page.events[2..],
            &[
                "record https://b.example/2",
                "record https://a.example/1",
                "finish",
            ]
        );
    }

    #[test]
    fn test_render_store_failure_is_returned() {
        let service = LookupService::new(FakeStore::failing());
        let mut page = RecordingPage::default();

        let result = service.render("/10.1000/xyz123", &mut page);

        assert!(matches!(result, Err(LookupError::Store(_))));
        assert!(!page.events.contains(&"finish".to_string()));
    }

    #[test]
    fn test_render_root_path_is_invalid() {
        let store = FakeStore::with(Vec::new());
        let service = LookupService::new(store.clone());
        let mut page = RecordingPage::default();

        assert_eq!(
            service.render("/", &mut page).unwrap(),
            RenderOutcome::Invalid
        );
        assert!(store.queries().is_empty());
    }
}
