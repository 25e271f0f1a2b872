//! Station domain model.
//!
//! Stations are shared by any number of sections and outlive the lines that
//! reference them.

use super::ValidationError;

/// Store-assigned station identifier.
pub type StationId = i64;

/// A named stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: Option<StationId>,
    pub name: String,
}

impl Station {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn with_id(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankStationName);
        }
        Ok(())
    }
}
