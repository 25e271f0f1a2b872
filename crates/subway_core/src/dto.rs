//! Request/response shapes exchanged with outer layers.
//!
//! Field names serialize in camelCase to match the JSON contract used by
//! HTTP front ends (`upStationId`, `downStationId`).

use crate::model::line::LineId;
use crate::model::section::Distance;
use crate::model::station::{Station, StationId};
use crate::repo::RepoError;
use serde::{Deserialize, Serialize};

/// Input for line creation and full-replace updates.
///
/// Endpoint fields default to zero so update payloads may omit them; an
/// omitted pair is rejected by `save` as equal endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub up_station_id: StationId,
    #[serde(default)]
    pub down_station_id: StationId,
    #[serde(default)]
    pub distance: Distance,
}

impl LineRequest {
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        up_station_id: StationId,
        down_station_id: StationId,
        distance: Distance,
    ) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            up_station_id,
            down_station_id,
            distance,
        }
    }

    /// Builds an update-only request carrying just name and color.
    pub fn rename(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            ..Self::default()
        }
    }
}

/// Full view of one line with its de-duplicated stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineResponse {
    pub id: LineId,
    pub name: String,
    pub color: String,
    pub stations: Vec<StationResponse>,
}

/// Input for station creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationResponse {
    pub id: StationId,
    pub name: String,
}

impl StationResponse {
    /// Maps a persisted station; a record without identity is invalid data.
    pub fn from_station(station: Station) -> Result<Self, RepoError> {
        let id = station.id.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "persisted station `{}` is missing its id",
                station.name
            ))
        })?;
        Ok(Self {
            id,
            name: station.name,
        })
    }
}
