//! Line use-case service.
//!
//! # Responsibility
//! - Create a line together with its first section.
//! - Assemble the full line view (de-duplicated stations) for callers.
//! - Replace and delete lines with typed not-found/conflict errors.
//!
//! # Invariants
//! - Every public operation runs inside exactly one unit of work.
//! - `save` leaves no persisted residue when any step fails.
//! - Station lists keep first-occurrence order of section endpoints; the
//!   route order is not reconstructed.

use crate::dto::{LineRequest, LineResponse, StationResponse};
use crate::model::line::{Line, LineId};
use crate::model::section::Section;
use crate::model::station::StationId;
use crate::model::ValidationError;
use crate::repo::line_repo::LineRepository;
use crate::repo::section_repo::SectionRepository;
use crate::repo::station_repo::StationRepository;
use crate::repo::unit_of_work::SqliteUnitOfWork;
use crate::repo::RepoError;
use log::{info, warn};
use rusqlite::Connection;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTHING_DELETED: usize = 0;

/// Errors from line service operations.
#[derive(Debug)]
pub enum LineServiceError {
    /// Another line already uses this name.
    DuplicateName(String),
    /// Up and down endpoint stations are the same.
    InvalidEndpoints(StationId),
    /// Referenced station does not exist.
    StationNotFound(StationId),
    /// Referenced line does not exist.
    LineNotFound(LineId),
    /// Request fields failed model validation.
    Validation(ValidationError),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for LineServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "line name already exists: `{name}`"),
            Self::InvalidEndpoints(id) => {
                write!(f, "up and down terminal stations are the same: {id}")
            }
            Self::StationNotFound(id) => write!(f, "station not found: {id}"),
            Self::LineNotFound(id) => write!(f, "line not found: {id}"),
            Self::Validation(_) => write!(f, "invalid line request"),
            Self::Repo(_) => write!(f, "line storage failure"),
        }
    }
}

impl Error for LineServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for LineServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateLineName(name) => Self::DuplicateName(name),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Line service facade over one SQLite connection.
pub struct LineService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> LineService<'conn> {
    /// Creates a service bound to a migrated connection.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// Creates a line and its first section atomically.
    ///
    /// # Contract
    /// - Checks name uniqueness first, then distinct endpoints.
    /// - Both checks run before any write.
    /// - Returns the store-assigned line id.
    pub fn save(&mut self, request: &LineRequest) -> Result<LineId, LineServiceError> {
        let uow = SqliteUnitOfWork::begin(self.conn)?;

        if uow.lines().find_line_by_name(&request.name)?.is_some() {
            warn!("event=line_save module=service status=rejected reason=duplicate_name");
            return Err(LineServiceError::DuplicateName(request.name.clone()));
        }
        if request.up_station_id == request.down_station_id {
            warn!(
                "event=line_save module=service status=rejected reason=same_endpoints station_id={}",
                request.up_station_id
            );
            return Err(LineServiceError::InvalidEndpoints(request.up_station_id));
        }

        let line_id = uow
            .lines()
            .create_line(&Line::new(request.name.as_str(), request.color.as_str()))?;

        let up_station_id = require_station(&uow, request.up_station_id)?;
        let down_station_id = require_station(&uow, request.down_station_id)?;
        let section = Section::new(line_id, up_station_id, down_station_id, request.distance);
        let section_id = uow.sections().create_section(&section)?;

        uow.commit()?;
        info!(
            "event=line_save module=service status=ok line_id={} section_id={}",
            line_id, section_id
        );
        Ok(line_id)
    }

    /// Returns every line with its stations, in store order.
    pub fn find_all(&mut self) -> Result<Vec<LineResponse>, LineServiceError> {
        let uow = SqliteUnitOfWork::begin_read(self.conn)?;
        let lines = uow.lines().list_lines()?;
        let responses = lines
            .iter()
            .map(|line| build_line_response(&uow, line))
            .collect::<Result<Vec<_>, _>>()?;
        uow.commit()?;
        Ok(responses)
    }

    /// Returns one line with its de-duplicated stations.
    pub fn find_by_id(&mut self, id: LineId) -> Result<LineResponse, LineServiceError> {
        let uow = SqliteUnitOfWork::begin_read(self.conn)?;
        let line = uow
            .lines()
            .find_line(id)?
            .ok_or(LineServiceError::LineNotFound(id))?;
        let response = build_line_response(&uow, &line)?;
        uow.commit()?;
        Ok(response)
    }

    /// Replaces name and color of one line; returns rows affected.
    ///
    /// A missing id is not an error here: the caller sees `0`.
    pub fn update_by_line(
        &mut self,
        id: LineId,
        request: &LineRequest,
    ) -> Result<usize, LineServiceError> {
        let uow = SqliteUnitOfWork::begin(self.conn)?;
        let changed = uow.lines().update_line(&Line::with_id(
            id,
            request.name.as_str(),
            request.color.as_str(),
        ))?;
        uow.commit()?;
        info!(
            "event=line_update module=service status=ok line_id={} rows_affected={}",
            id, changed
        );
        Ok(changed)
    }

    /// Deletes one line; its sections go with it via storage cascade.
    pub fn delete_by_id(&mut self, id: LineId) -> Result<(), LineServiceError> {
        let uow = SqliteUnitOfWork::begin(self.conn)?;
        let deleted = uow.lines().delete_line(id)?;
        if deleted == NOTHING_DELETED {
            warn!(
                "event=line_delete module=service status=rejected reason=not_found line_id={}",
                id
            );
            return Err(LineServiceError::LineNotFound(id));
        }
        uow.commit()?;
        info!("event=line_delete module=service status=ok line_id={}", id);
        Ok(())
    }
}

fn require_station(
    uow: &SqliteUnitOfWork<'_>,
    id: StationId,
) -> Result<StationId, LineServiceError> {
    match uow.stations().find_station(id)? {
        Some(_) => Ok(id),
        None => {
            warn!(
                "event=line_save module=service status=rejected reason=station_not_found station_id={}",
                id
            );
            Err(LineServiceError::StationNotFound(id))
        }
    }
}

fn build_line_response(
    uow: &SqliteUnitOfWork<'_>,
    line: &Line,
) -> Result<LineResponse, LineServiceError> {
    let line_id = line.id.ok_or_else(|| {
        RepoError::InvalidData("persisted line is missing its id".to_string())
    })?;
    let sections = uow.sections().list_sections_by_line(line_id)?;

    let stations = uow.stations();
    let mut responses = Vec::new();
    for station_id in distinct_station_ids(&sections) {
        let station = stations
            .find_station(station_id)?
            .ok_or(LineServiceError::StationNotFound(station_id))?;
        responses.push(StationResponse {
            id: station_id,
            name: station.name,
        });
    }

    Ok(LineResponse {
        id: line_id,
        name: line.name.clone(),
        color: line.color.clone(),
        stations: responses,
    })
}

/// Flattens sections into `[up, down, up, down, ...]` and keeps the first
/// occurrence of each station id.
pub fn distinct_station_ids(sections: &[Section]) -> Vec<StationId> {
    let mut seen = HashSet::new();
    sections
        .iter()
        .flat_map(Section::endpoints)
        .filter(|id| seen.insert(*id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::distinct_station_ids;
    use crate::model::section::Section;

    #[test]
    fn shared_station_between_sections_appears_once() {
        let sections = vec![Section::new(1, 10, 20, 5), Section::new(1, 20, 30, 5)];
        assert_eq!(distinct_station_ids(&sections), vec![10, 20, 30]);
    }

    #[test]
    fn first_occurrence_order_is_kept_even_when_not_a_chain() {
        let sections = vec![Section::new(1, 20, 30, 5), Section::new(1, 10, 20, 5)];
        assert_eq!(distinct_station_ids(&sections), vec![20, 30, 10]);
    }

    #[test]
    fn no_sections_yields_no_stations() {
        assert!(distinct_station_ids(&[]).is_empty());
    }
}
