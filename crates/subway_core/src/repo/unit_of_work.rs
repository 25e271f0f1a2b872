//! Explicit transaction scope shared by station/line/section repositories.
//!
//! # Responsibility
//! - Open one SQLite transaction per service operation.
//! - Hand out repositories bound to that transaction.
//!
//! # Invariants
//! - Dropping a unit of work without `commit()` rolls back every write.
//! - Write scopes start with `BEGIN IMMEDIATE` so check-then-insert
//!   sequences cannot interleave with another writer.

use crate::repo::line_repo::SqliteLineRepository;
use crate::repo::section_repo::SqliteSectionRepository;
use crate::repo::station_repo::SqliteStationRepository;
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// One transaction spanning all repository calls of a use-case.
pub struct SqliteUnitOfWork<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> SqliteUnitOfWork<'conn> {
    /// Starts a write scope holding the database write lock.
    pub fn begin(conn: &'conn mut Connection) -> RepoResult<Self> {
        Self::begin_with(conn, TransactionBehavior::Immediate)
    }

    /// Starts a read scope; the snapshot is taken on first read.
    pub fn begin_read(conn: &'conn mut Connection) -> RepoResult<Self> {
        Self::begin_with(conn, TransactionBehavior::Deferred)
    }

    fn begin_with(conn: &'conn mut Connection, behavior: TransactionBehavior) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        let tx = conn.transaction_with_behavior(behavior)?;
        Ok(Self { tx })
    }

    pub fn stations(&self) -> SqliteStationRepository<'_> {
        SqliteStationRepository::new(&self.tx)
    }

    pub fn lines(&self) -> SqliteLineRepository<'_> {
        SqliteLineRepository::new(&self.tx)
    }

    pub fn sections(&self) -> SqliteSectionRepository<'_> {
        SqliteSectionRepository::new(&self.tx)
    }

    /// Makes every write of this scope durable.
    pub fn commit(self) -> RepoResult<()> {
        self.tx.commit()?;
        Ok(())
    }
}
