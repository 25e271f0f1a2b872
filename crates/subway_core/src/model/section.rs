//! Section domain model.
//!
//! # Responsibility
//! - Describe one directed edge (`up -> down`) of a line.
//!
//! # Invariants
//! - `up_station_id != down_station_id`.
//! - `distance > 0`.

use super::line::LineId;
use super::station::StationId;
use super::ValidationError;

/// Store-assigned section identifier.
pub type SectionId = i64;

/// Distance between the two endpoints of a section.
pub type Distance = i64;

/// Directed edge between two stations on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: Option<SectionId>,
    pub line_id: LineId,
    pub up_station_id: StationId,
    pub down_station_id: StationId,
    pub distance: Distance,
}

impl Section {
    /// Creates a not-yet-persisted section.
    pub fn new(
        line_id: LineId,
        up_station_id: StationId,
        down_station_id: StationId,
        distance: Distance,
    ) -> Self {
        Self {
            id: None,
            line_id,
            up_station_id,
            down_station_id,
            distance,
        }
    }

    /// Checks endpoint and distance invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.up_station_id == self.down_station_id {
            return Err(ValidationError::SameEndpoints(self.up_station_id));
        }
        if self.distance <= 0 {
            return Err(ValidationError::NonPositiveDistance(self.distance));
        }
        Ok(())
    }

    /// Endpoint ids in `[up, down]` order.
    pub fn endpoints(&self) -> [StationId; 2] {
        [self.up_station_id, self.down_station_id]
    }
}
