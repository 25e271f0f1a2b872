//! Station repository contract and SQLite implementation.
//!
//! # Invariants
//! - Station names are unique; collisions map to `DuplicateStationName`.
//! - A station referenced by a section cannot be deleted.

use crate::model::station::{Station, StationId};
use crate::repo::{
    ensure_connection_ready, is_foreign_key_violation, is_unique_violation, RepoError, RepoResult,
};
use rusqlite::{Connection, OptionalExtension, Row};

const STATION_SELECT_SQL: &str = "SELECT id, name FROM stations";

/// Repository interface for station lookups and maintenance.
pub trait StationRepository {
    fn create_station(&self, station: &Station) -> RepoResult<StationId>;
    fn find_station(&self, id: StationId) -> RepoResult<Option<Station>>;
    fn list_stations(&self) -> RepoResult<Vec<Station>>;
    /// Returns the number of deleted rows (`0` when absent).
    fn delete_station(&self, id: StationId) -> RepoResult<usize>;
}

/// SQLite-backed station repository.
pub struct SqliteStationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStationRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self::new(conn))
    }

    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StationRepository for SqliteStationRepository<'_> {
    fn create_station(&self, station: &Station) -> RepoResult<StationId> {
        station.validate()?;

        self.conn
            .execute(
                "INSERT INTO stations (name) VALUES (?1);",
                [station.name.as_str()],
            )
            .map_err(|err| {
                if is_unique_violation(&err) {
                    RepoError::DuplicateStationName(station.name.clone())
                } else {
                    err.into()
                }
            })?;

        Ok(self.conn.last_insert_rowid())
    }

    fn find_station(&self, id: StationId) -> RepoResult<Option<Station>> {
        let station = self
            .conn
            .query_row(
                &format!("{STATION_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_station_row,
            )
            .optional()?;

        match station {
            Some(station) => {
                station.validate()?;
                Ok(Some(station))
            }
            None => Ok(None),
        }
    }

    fn list_stations(&self) -> RepoResult<Vec<Station>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STATION_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut stations = Vec::new();
        while let Some(row) = rows.next()? {
            let station = parse_station_row(row)?;
            station.validate()?;
            stations.push(station);
        }
        Ok(stations)
    }

    fn delete_station(&self, id: StationId) -> RepoResult<usize> {
        self.conn
            .execute("DELETE FROM stations WHERE id = ?1;", [id])
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    RepoError::StationInUse(id)
                } else {
                    err.into()
                }
            })
    }
}

fn parse_station_row(row: &Row<'_>) -> rusqlite::Result<Station> {
    Ok(Station::with_id(row.get("id")?, row.get::<_, String>("name")?))
}
