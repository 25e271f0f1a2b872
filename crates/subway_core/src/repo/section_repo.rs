//! Section repository contract and SQLite implementation.
//!
//! # Invariants
//! - Sections of one line are listed in insertion order (`id ASC`).
//! - Endpoints must reference existing stations (foreign keys).

use crate::model::line::LineId;
use crate::model::section::{Section, SectionId};
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{params, Connection, Row};

/// Repository interface for line sections.
pub trait SectionRepository {
    fn create_section(&self, section: &Section) -> RepoResult<SectionId>;
    /// Lists sections of one line; empty when the line has none.
    fn list_sections_by_line(&self, line_id: LineId) -> RepoResult<Vec<Section>>;
}

/// SQLite-backed section repository.
pub struct SqliteSectionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSectionRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self::new(conn))
    }

    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SectionRepository for SqliteSectionRepository<'_> {
    fn create_section(&self, section: &Section) -> RepoResult<SectionId> {
        section.validate()?;

        self.conn.execute(
            "INSERT INTO sections (
                line_id,
                up_station_id,
                down_station_id,
                distance
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                section.line_id,
                section.up_station_id,
                section.down_station_id,
                section.distance,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_sections_by_line(&self, line_id: LineId) -> RepoResult<Vec<Section>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                line_id,
                up_station_id,
                down_station_id,
                distance
             FROM sections
             WHERE line_id = ?1
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([line_id])?;
        let mut sections = Vec::new();
        while let Some(row) = rows.next()? {
            let section = parse_section_row(row)?;
            section.validate()?;
            sections.push(section);
        }
        Ok(sections)
    }
}

fn parse_section_row(row: &Row<'_>) -> rusqlite::Result<Section> {
    Ok(Section {
        id: Some(row.get("id")?),
        line_id: row.get("line_id")?,
        up_station_id: row.get("up_station_id")?,
        down_station_id: row.get("down_station_id")?,
        distance: row.get("distance")?,
    })
}
