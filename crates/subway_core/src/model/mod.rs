//! Line/station/section domain model.
//!
//! # Responsibility
//! - Define the value records persisted by the repository layer.
//! - Own field-level validation shared by services and repositories.
//!
//! # Invariants
//! - Identity (`id`) is assigned by storage; `None` means not yet persisted.
//! - Records are validated before every write and after every read.

pub mod line;
pub mod section;
pub mod station;

use self::section::Distance;
use self::station::StationId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field-level validation failure for any domain record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Line name is blank after trim.
    BlankLineName,
    /// Line color is blank after trim.
    BlankLineColor,
    /// Station name is blank after trim.
    BlankStationName,
    /// Section up and down endpoints are the same station.
    SameEndpoints(StationId),
    /// Section distance must be strictly positive.
    NonPositiveDistance(Distance),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankLineName => write!(f, "line name must not be blank"),
            Self::BlankLineColor => write!(f, "line color must not be blank"),
            Self::BlankStationName => write!(f, "station name must not be blank"),
            Self::SameEndpoints(id) => {
                write!(f, "up and down stations must differ, both are {id}")
            }
            Self::NonPositiveDistance(distance) => {
                write!(f, "section distance must be positive, got {distance}")
            }
        }
    }
}

impl Error for ValidationError {}
