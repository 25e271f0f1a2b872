//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts (stations, lines, sections).
//! - Isolate SQLite query details from service orchestration.
//! - Scope multi-repository writes in one explicit unit of work.
//!
//! # Invariants
//! - Write paths call the model's `validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Storage constraint violations are surfaced as typed conflicts.

pub mod line_repo;
pub mod section_repo;
pub mod station_repo;
pub mod unit_of_work;

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::station::StationId;
use crate::model::ValidationError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by station, line and section stores.
#[derive(Debug)]
pub enum RepoError {
    /// Record failed field-level validation.
    Validation(ValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// `lines.name` unique index rejected the write.
    DuplicateLineName(String),
    /// `stations.name` unique index rejected the write.
    DuplicateStationName(String),
    /// Station is still referenced by at least one section.
    StationInUse(StationId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted data or caller input cannot be mapped to a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(_) => write!(f, "invalid record"),
            Self::Db(_) => write!(f, "database operation failed"),
            Self::DuplicateLineName(name) => write!(f, "line name already exists: `{name}`"),
            Self::DuplicateStationName(name) => {
                write!(f, "station name already exists: `{name}`")
            }
            Self::StationInUse(id) => write!(f, "station is referenced by a section: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid subway data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rejects connections that have not been migrated to the latest schema.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    has_extended_code(err, rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE)
}

pub(crate) fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    has_extended_code(err, rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
}

fn has_extended_code(err: &rusqlite::Error, code: i32) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(inner, _) if inner.extended_code == code)
}
