//! Station use-case service.
//!
//! Stations are owned outside line management; this service exists so
//! lines have endpoints to reference.

use crate::dto::{StationRequest, StationResponse};
use crate::model::station::{Station, StationId};
use crate::model::ValidationError;
use crate::repo::station_repo::StationRepository;
use crate::repo::unit_of_work::SqliteUnitOfWork;
use crate::repo::RepoError;
use log::{info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from station service operations.
#[derive(Debug)]
pub enum StationServiceError {
    DuplicateName(String),
    StationNotFound(StationId),
    /// Station is still an endpoint of some section.
    StationInUse(StationId),
    Validation(ValidationError),
    Repo(RepoError),
}

impl Display for StationServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "station name already exists: `{name}`"),
            Self::StationNotFound(id) => write!(f, "station not found: {id}"),
            Self::StationInUse(id) => write!(f, "station is still used by a section: {id}"),
            Self::Validation(_) => write!(f, "invalid station request"),
            Self::Repo(_) => write!(f, "station storage failure"),
        }
    }
}

impl Error for StationServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StationServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateStationName(name) => Self::DuplicateName(name),
            RepoError::StationInUse(id) => Self::StationInUse(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Station service facade over one SQLite connection.
pub struct StationService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> StationService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// Creates one station and returns its persisted view.
    pub fn create_station(
        &mut self,
        request: &StationRequest,
    ) -> Result<StationResponse, StationServiceError> {
        let uow = SqliteUnitOfWork::begin(self.conn)?;
        let id = uow
            .stations()
            .create_station(&Station::new(request.name.as_str()))?;
        uow.commit()?;
        info!("event=station_create module=service status=ok station_id={}", id);
        Ok(StationResponse {
            id,
            name: request.name.clone(),
        })
    }

    pub fn find_all(&mut self) -> Result<Vec<StationResponse>, StationServiceError> {
        let uow = SqliteUnitOfWork::begin_read(self.conn)?;
        let stations = uow.stations().list_stations()?;
        uow.commit()?;
        let responses = stations
            .into_iter()
            .map(StationResponse::from_station)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(responses)
    }

    pub fn find_by_id(&mut self, id: StationId) -> Result<StationResponse, StationServiceError> {
        let uow = SqliteUnitOfWork::begin_read(self.conn)?;
        let station = uow
            .stations()
            .find_station(id)?
            .ok_or(StationServiceError::StationNotFound(id))?;
        uow.commit()?;
        Ok(StationResponse {
            id,
            name: station.name,
        })
    }

    /// Deletes one station that no section references.
    pub fn delete_by_id(&mut self, id: StationId) -> Result<(), StationServiceError> {
        let uow = SqliteUnitOfWork::begin(self.conn)?;
        if uow.stations().delete_station(id)? == 0 {
            warn!(
                "event=station_delete module=service status=rejected reason=not_found station_id={}",
                id
            );
            return Err(StationServiceError::StationNotFound(id));
        }
        uow.commit()?;
        info!("event=station_delete module=service status=ok station_id={}", id);
        Ok(())
    }
}
