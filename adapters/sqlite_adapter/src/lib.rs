use std::path::{Path, PathBuf};

use doi_core::domain::Record;
use doi_core::error::LookupError;
use doi_core::ports::{RecordStore, Result};
use rusqlite::{Connection, OpenFlags, Row};
use tracing::{debug, info};

const RECORDS_BY_IDENTIFIER: &str = "SELECT doi, url FROM doi WHERE doi = ?1 ORDER BY rowid";

/// SQLite implementation of the RecordStore trait.
///
/// Records live in a `doi(doi TEXT, url TEXT)` table owned by whoever fills
/// the database; this adapter only reads it. Every query opens its own
/// read-only connection, so one store can serve concurrent requests.
pub struct SqliteRecordStore {
    db_path: PathBuf,
}

impl SqliteRecordStore {
    /// Opens the store at `db_path`, failing if the file or the `doi` table is missing
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let store = Self {
            db_path: db_path.as_ref().to_path_buf(),
        };

        let conn = store
            .connect()
            .map_err(|e| unavailable(&store.db_path, e))?;
        conn.prepare(RECORDS_BY_IDENTIFIER)
            .map_err(|e| unavailable(&store.db_path, e))?;

        info!(path = %store.db_path.display(), "opened record store");
        Ok(store)
    }

    fn connect(&self) -> rusqlite::Result<Connection> {
        Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    }
}

fn unavailable(path: &Path, err: rusqlite::Error) -> LookupError {
    LookupError::StoreUnavailable(format!("{}: {err}", path.display()))
}

fn record_from_row(row: &Row) -> rusqlite::Result<Record> {
    Ok(Record {
        identifier: row.get(0)?,
        location_url: row.get(1)?,
    })
}

impl RecordStore for SqliteRecordStore {
    fn find_by_identifier(&self, identifier: &str) -> Result<Vec<Record>> {
        let conn = self.connect().map_err(LookupError::store)?;

        let mut stmt = conn
            .prepare(RECORDS_BY_IDENTIFIER)
            .map_err(LookupError::store)?;

        let records = stmt
            .query_map([identifier], record_from_row)
            .map_err(LookupError::store)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()
            .map_err(LookupError::store)?;

        debug!(identifier, count = records.len(), "queried record store");
        Ok(records)
    }
}
