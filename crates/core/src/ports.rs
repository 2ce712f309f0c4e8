use crate::domain::{DerivedLinks, Record};
use crate::error::LookupError;

pub type Result<T> = std::result::Result<T, LookupError>;

/// Keyed query interface over the external record store.
/// Implementations are shared read-only between concurrent requests.
pub trait RecordStore: Send + Sync {
    // All records whose identifier equals `identifier`, in store order
    fn find_by_identifier(&self, identifier: &str) -> Result<Vec<Record>>;
}

/// Sink for the rendered page, written piece by piece as the lookup progresses
pub trait PageWriter {
    fn begin(&mut self, raw_path: &str) -> Result<()>;
    fn invalid(&mut self) -> Result<()>;
    fn links(&mut self, links: &DerivedLinks) -> Result<()>;
    fn record(&mut self, record: &Record) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}
