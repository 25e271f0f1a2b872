//! Line domain model.
//!
//! # Invariants
//! - `name` is unique across persisted lines (enforced by storage).
//! - `name` and `color` are never blank.

use super::ValidationError;

/// Store-assigned line identifier.
pub type LineId = i64;

/// A subway route identified by name and color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// `None` until the line has been inserted.
    pub id: Option<LineId>,
    pub name: String,
    pub color: String,
}

impl Line {
    /// Creates a not-yet-persisted line.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: color.into(),
        }
    }

    /// Creates a line bound to an existing identity.
    ///
    /// Used by full-replace updates where only name/color change.
    pub fn with_id(id: LineId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            color: color.into(),
        }
    }

    /// Checks field-level invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankLineName);
        }
        if self.color.trim().is_empty() {
            return Err(ValidationError::BlankLineColor);
        }
        Ok(())
    }
}
