//! Line repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/update/delete over the `lines` table.
//! - Report row counts for update/delete so callers decide what "missing"
//!   means.
//!
//! # Invariants
//! - Name comparison is case-sensitive (`BINARY` collation).
//! - `lines.name` unique index violations map to `DuplicateLineName`.
//! - Deleting a line cascades to its sections at the storage level.

use crate::model::line::{Line, LineId};
use crate::repo::{ensure_connection_ready, is_unique_violation, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const LINE_SELECT_SQL: &str = "SELECT id, name, color FROM lines";

/// Repository interface for line CRUD operations.
pub trait LineRepository {
    fn create_line(&self, line: &Line) -> RepoResult<LineId>;
    fn find_line(&self, id: LineId) -> RepoResult<Option<Line>>;
    fn find_line_by_name(&self, name: &str) -> RepoResult<Option<Line>>;
    /// Lists all lines in insertion order.
    fn list_lines(&self) -> RepoResult<Vec<Line>>;
    /// Replaces name and color of `line.id`; returns rows affected.
    fn update_line(&self, line: &Line) -> RepoResult<usize>;
    /// Returns the number of deleted rows (`0` when absent).
    fn delete_line(&self, id: LineId) -> RepoResult<usize>;
}

/// SQLite-backed line repository.
pub struct SqliteLineRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLineRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self::new(conn))
    }

    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_one(&self, filter: &str, value: impl rusqlite::ToSql) -> RepoResult<Option<Line>> {
        let line = self
            .conn
            .query_row(
                &format!("{LINE_SELECT_SQL} WHERE {filter} = ?1;"),
                [value],
                parse_line_row,
            )
            .optional()?;

        if let Some(line) = line.as_ref() {
            line.validate()?;
        }
        Ok(line)
    }
}

impl LineRepository for SqliteLineRepository<'_> {
    fn create_line(&self, line: &Line) -> RepoResult<LineId> {
        line.validate()?;

        self.conn
            .execute(
                "INSERT INTO lines (name, color) VALUES (?1, ?2);",
                params![line.name.as_str(), line.color.as_str()],
            )
            .map_err(|err| map_line_write_error(err, line))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn find_line(&self, id: LineId) -> RepoResult<Option<Line>> {
        self.query_one("id", id)
    }

    fn find_line_by_name(&self, name: &str) -> RepoResult<Option<Line>> {
        self.query_one("name", name)
    }

    fn list_lines(&self) -> RepoResult<Vec<Line>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LINE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut lines = Vec::new();
        while let Some(row) = rows.next()? {
            let line = parse_line_row(row)?;
            line.validate()?;
            lines.push(line);
        }
        Ok(lines)
    }

    fn update_line(&self, line: &Line) -> RepoResult<usize> {
        line.validate()?;
        let id = line.id.ok_or_else(|| {
            RepoError::InvalidData("line update requires a persisted id".to_string())
        })?;

        let changed = self
            .conn
            .execute(
                "UPDATE lines
                 SET
                    name = ?1,
                    color = ?2
                 WHERE id = ?3;",
                params![line.name.as_str(), line.color.as_str(), id],
            )
            .map_err(|err| map_line_write_error(err, line))?;

        Ok(changed)
    }

    fn delete_line(&self, id: LineId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM lines WHERE id = ?1;", [id])?;
        Ok(changed)
    }
}

fn parse_line_row(row: &Row<'_>) -> rusqlite::Result<Line> {
    Ok(Line::with_id(
        row.get("id")?,
        row.get::<_, String>("name")?,
        row.get::<_, String>("color")?,
    ))
}

fn map_line_write_error(err: rusqlite::Error, line: &Line) -> RepoError {
    if is_unique_violation(&err) {
        RepoError::DuplicateLineName(line.name.clone())
    } else {
        err.into()
    }
}
