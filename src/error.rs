//! Typed errors for journey computation.
//!
//! The spec-level taxonomy distinguishes three classes: malformed input,
//! failed external lookups, and internal invariant violations. Callers that
//! only need the class use [`SunsideError::class`]; the binary reports the
//! full message through `anyhow`.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Broad classification of a [`SunsideError`].
///
/// Input and invariant errors are unrecoverable for the current journey.
/// Lookup failures have already exhausted their documented fallback by the
/// time they surface here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Input,
    Lookup,
    Invariant,
}

#[derive(Debug, Error)]
pub enum SunsideError {
    #[error("journey start and end coordinates are identical")]
    IdenticalEndpoints,

    #[error("arrival ({arrival}) must be after departure ({departure})")]
    NonPositiveDuration {
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    },

    #[error("coordinate out of range: latitude {lat}, longitude {lon}")]
    CoordinateOutOfRange { lat: f64, lon: f64 },

    #[error("no coordinates found for '{place}, {country}'")]
    PlaceNotFound { place: String, country: String },

    #[error("timezone lookup failed for ({lat:.4}, {lon:.4}): {detail}")]
    TimezoneLookup { lat: f64, lon: f64, detail: String },

    #[error("crossing events do not pair into day segments: {detail}")]
    UnbalancedCrossings { detail: String },

    #[error("crossing events out of order: {detail}")]
    DisorderedCrossings { detail: String },
}

impl SunsideError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::IdenticalEndpoints
            | Self::NonPositiveDuration { .. }
            | Self::CoordinateOutOfRange { .. } => ErrorClass::Input,
            Self::PlaceNotFound { .. } | Self::TimezoneLookup { .. } => ErrorClass::Lookup,
            Self::UnbalancedCrossings { .. } | Self::DisorderedCrossings { .. } => {
                ErrorClass::Invariant
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_are_distinguishable() {
        assert_eq!(SunsideError::IdenticalEndpoints.class(), ErrorClass::Input);
        assert_eq!(
            SunsideError::PlaceNotFound {
                place: "atlantis".into(),
                country: "greece".into()
            }
            .class(),
            ErrorClass::Lookup
        );
        assert_eq!(
            SunsideError::UnbalancedCrossings {
                detail: "odd event count".into()
            }
            .class(),
            ErrorClass::Invariant
        );
    }
}
