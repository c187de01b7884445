//! Main store implementation.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row};
use tracing::{debug, info};
use uuid::Uuid;

use ridecast_types::{NewSearch, Revision, SearchRecord};

use crate::error::{Error, Result};
use crate::schema::{self, INSERT_SEQUENCE, MANUAL_ID_SEQUENCE};

const SELECT_COLUMNS: &str = "id, rev, zip_code, location, temperature, humidity, weather, \
     precipitation, visibility, wind, rideability_score";

/// Order for [`Store::list`].
///
/// Records are ordered by when they were first inserted, not by identifier.
/// Updates keep a record's place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// Most recently inserted first.
    #[default]
    NewestFirst,
    /// Insertion order.
    OldestFirst,
}

impl ListOrder {
    fn sql(self) -> &'static str {
        match self {
            ListOrder::NewestFirst => "DESC",
            ListOrder::OldestFirst => "ASC",
        }
    }
}

/// SQLite-based document store for search records.
///
/// Every write assigns a fresh [`Revision`]. Writes must name the revision
/// they expect to replace, so two writers racing on the same record cannot
/// both succeed.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        info!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        schema::initialize(&conn)?;

        Ok(Self { conn })
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    /// Fetch a record by identifier, with its current revision.
    pub fn get(&self, id: &str) -> Result<Option<SearchRecord>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM searches WHERE id = ?");
        let row = self
            .conn
            .query_row(&sql, [id], read_row)
            .optional()?;

        row.map(into_record).transpose()
    }

    /// Write a record, returning it with its new revision.
    ///
    /// Without a revision this is a create and fails with
    /// [`Error::Conflict`] if the identifier is taken. With a revision it
    /// replaces the record only if that revision is still current; a stale
    /// revision fails with [`Error::Conflict`] and a missing record with
    /// [`Error::NotFound`].
    pub fn put(&self, record: &SearchRecord) -> Result<SearchRecord> {
        match &record.rev {
            None => self.insert(record),
            Some(expected) => self.replace(record, expected),
        }
    }

    /// Store a manually entered search under the next numeric identifier.
    pub fn create(&self, entry: NewSearch) -> Result<SearchRecord> {
        let tx = self.conn.unchecked_transaction()?;
        let id = schema::next_sequence(&tx, MANUAL_ID_SEQUENCE)?;
        let record = entry.into_record(id.to_string());
        let stored = insert_into(&tx, &record)?;
        tx.commit()?;

        info!("Created manual search {}", stored.id);
        Ok(stored)
    }

    /// Delete a record if `rev` is still its current revision.
    pub fn remove(&self, id: &str, rev: &Revision) -> Result<()> {
        let deleted = self.conn.execute(
            "DELETE FROM searches WHERE id = ?1 AND rev = ?2",
            rusqlite::params![id, rev.as_str()],
        )?;

        if deleted == 0 {
            return Err(self.missed_write(id)?);
        }

        info!("Deleted search {}", id);
        Ok(())
    }

    /// All records in the requested order.
    pub fn list(&self, order: ListOrder) -> Result<Vec<SearchRecord>> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM searches ORDER BY seq {}",
            order.sql()
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let rows = stmt
            .query_map([], read_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(into_record).collect()
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM searches", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn insert(&self, record: &SearchRecord) -> Result<SearchRecord> {
        let tx = self.conn.unchecked_transaction()?;
        let stored = insert_into(&tx, record)?;
        tx.commit()?;

        debug!("Inserted search {} at {}", stored.id, rev_str(&stored));
        Ok(stored)
    }

    fn replace(&self, record: &SearchRecord, expected: &Revision) -> Result<SearchRecord> {
        // Stored generations never reach the counter's limit, so a token
        // that cannot advance is not current.
        let Ok(next) = expected.next(&new_suffix()) else {
            return Err(self.missed_write(&record.id)?);
        };

        let updated = self.conn.execute(
            "UPDATE searches SET
                rev = ?3,
                zip_code = ?4,
                location = ?5,
                temperature = ?6,
                humidity = ?7,
                weather = ?8,
                precipitation = ?9,
                visibility = ?10,
                wind = ?11,
                rideability_score = ?12
             WHERE id = ?1 AND rev = ?2",
            rusqlite::params![
                record.id,
                expected.as_str(),
                next.as_str(),
                record.zip_code,
                record.location,
                record.temperature,
                record.humidity,
                record.weather,
                record.precipitation,
                record.visibility,
                record.wind,
                record.rideability_score,
            ],
        )?;

        if updated == 0 {
            return Err(self.missed_write(&record.id)?);
        }

        debug!("Updated search {} {} -> {}", record.id, expected, next);
        Ok(record.clone().with_rev(Some(next)))
    }

    /// The error for a conditional write that matched no row.
    fn missed_write(&self, id: &str) -> Result<Error> {
        let exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM searches WHERE id = ?",
            [id],
            |row| row.get(0),
        )?;

        if exists {
            debug!("Stale revision for search {}", id);
            Ok(Error::Conflict(id.to_string()))
        } else {
            Ok(Error::NotFound(id.to_string()))
        }
    }
}

/// Insert a new row; the identifier must be free.
fn insert_into(conn: &Connection, record: &SearchRecord) -> Result<SearchRecord> {
    let rev = Revision::first(&new_suffix())?;
    let seq = schema::next_sequence(conn, INSERT_SEQUENCE)?;

    let inserted = conn.execute(
        "INSERT INTO searches (id, seq, rev, zip_code, location, temperature, humidity,
             weather, precipitation, visibility, wind, rideability_score)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
         ON CONFLICT(id) DO NOTHING",
        rusqlite::params![
            record.id,
            seq,
            rev.as_str(),
            record.zip_code,
            record.location,
            record.temperature,
            record.humidity,
            record.weather,
            record.precipitation,
            record.visibility,
            record.wind,
            record.rideability_score,
        ],
    )?;

    if inserted == 0 {
        debug!("Search {} already exists", record.id);
        return Err(Error::Conflict(record.id.clone()));
    }

    Ok(record.clone().with_rev(Some(rev)))
}

fn new_suffix() -> String {
    Uuid::new_v4().simple().to_string()
}

fn rev_str(record: &SearchRecord) -> &str {
    record.rev.as_ref().map(Revision::as_str).unwrap_or("-")
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<(SearchRecord, String)> {
    let record = SearchRecord {
        id: row.get(0)?,
        rev: None,
        zip_code: row.get(2)?,
        location: row.get(3)?,
        temperature: row.get(4)?,
        humidity: row.get(5)?,
        weather: row.get(6)?,
        precipitation: row.get(7)?,
        visibility: row.get(8)?,
        wind: row.get(9)?,
        rideability_score: row.get(10)?,
    };
    Ok((record, row.get(1)?))
}

fn into_record((record, rev): (SearchRecord, String)) -> Result<SearchRecord> {
    let rev = Revision::parse(&rev)?;
    Ok(record.with_rev(Some(rev)))
}
