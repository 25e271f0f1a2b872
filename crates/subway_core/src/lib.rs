//! Core domain logic for subway line management.
//! This crate is the single source of truth for line/station/section
//! invariants.

pub mod db;
pub mod dto;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use dto::{LineRequest, LineResponse, StationRequest, StationResponse};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::line::{Line, LineId};
pub use model::section::{Distance, Section, SectionId};
pub use model::station::{Station, StationId};
pub use model::ValidationError;
pub use repo::line_repo::{LineRepository, SqliteLineRepository};
pub use repo::section_repo::{SectionRepository, SqliteSectionRepository};
pub use repo::station_repo::{SqliteStationRepository, StationRepository};
pub use repo::unit_of_work::SqliteUnitOfWork;
pub use repo::{RepoError, RepoResult};
pub use service::line_service::{LineService, LineServiceError};
pub use service::station_service::{StationService, StationServiceError};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
