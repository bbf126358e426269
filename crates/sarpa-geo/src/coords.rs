//! Coordinates and the total `Location` sum type.
//!
//! A `Location` is either usable coordinates or an explicit, reason-tagged
//! "no usable coordinates" state. There is no null/None location anywhere
//! in the system: code that consumes a `Location` must handle both arms,
//! which keeps the degraded-ranking path total.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validated geographic coordinates.
///
/// Range violations are construction errors, not representable states:
/// a `Coordinates` value always holds latitude ∈ [-90, 90] and
/// longitude ∈ [-180, 180].
///
/// `accuracy_meters` and `captured_at` are present on device fixes and
/// absent on roster positions (a hospital does not have a GPS accuracy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
}

impl Coordinates {
    /// Build coordinates, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange { actual: latitude });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange { actual: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
            accuracy_meters: None,
            captured_at: None,
        })
    }

    /// Attach a reported fix accuracy in meters.
    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.accuracy_meters = Some(meters);
        self
    }

    /// Attach the wall-clock time the fix was captured.
    pub fn with_captured_at(mut self, at: DateTime<Utc>) -> Self {
        self.captured_at = Some(at);
        self
    }
}

/// Why a location could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    PermissionDenied,
    Timeout,
    DeviceError,
    Unsupported,
}

/// A reporter's location: exactly one of the two arms holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Location {
    Resolved(Coordinates),
    Unresolved { reason: UnresolvedReason },
}

impl Location {
    pub fn unresolved(reason: UnresolvedReason) -> Self {
        Self::Unresolved { reason }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The coordinates, if this location resolved.
    pub fn coordinates(&self) -> Option<&Coordinates> {
        match self {
            Self::Resolved(coords) => Some(coords),
            Self::Unresolved { .. } => None,
        }
    }
}

/// Errors from constructing coordinates.
#[derive(Debug, thiserror::Error)]
pub enum CoordinateError {
    #[error("latitude must be in [-90, 90] (got {actual})")]
    LatitudeOutOfRange { actual: f64 },

    #[error("longitude must be in [-180, 180] (got {actual})")]
    LongitudeOutOfRange { actual: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepts_boundary_coordinates() {
        for (lat, lon) in [(90.0, 180.0), (-90.0, -180.0), (0.0, 0.0)] {
            let coords = Coordinates::new(lat, lon).expect("boundary coordinates should build");
            assert_eq!(coords.latitude, lat);
            assert_eq!(coords.longitude, lon);
            assert_eq!(coords.accuracy_meters, None);
            assert_eq!(coords.captured_at, None);
        }
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let err = Coordinates::new(90.01, 0.0).expect_err("latitude above 90 should be rejected");
        assert!(matches!(
            err,
            CoordinateError::LatitudeOutOfRange { actual } if actual == 90.01
        ));
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        let err =
            Coordinates::new(0.0, -180.5).expect_err("longitude below -180 should be rejected");
        assert!(matches!(err, CoordinateError::LongitudeOutOfRange { .. }));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn location_arms_are_exclusive() {
        let resolved = Location::Resolved(
            Coordinates::new(12.9716, 77.5946).expect("valid coordinates should build"),
        );
        assert!(resolved.is_resolved());
        assert!(resolved.coordinates().is_some());

        let unresolved = Location::unresolved(UnresolvedReason::Timeout);
        assert!(!unresolved.is_resolved());
        assert!(unresolved.coordinates().is_none());
    }

    #[test]
    fn location_serializes_with_state_tag() {
        let captured = chrono::Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 30, 0)
            .single()
            .expect("fixed time");
        let location = Location::Resolved(
            Coordinates::new(12.9716, 77.5946)
                .expect("valid coordinates should build")
                .with_accuracy(12.5)
                .with_captured_at(captured),
        );
        let json = serde_json::to_value(&location).expect("location should serialize");
        assert_eq!(json["state"], "resolved");
        assert_eq!(json["latitude"], 12.9716);
        assert_eq!(json["accuracy_meters"], 12.5);

        let unresolved = Location::unresolved(UnresolvedReason::PermissionDenied);
        let json = serde_json::to_value(&unresolved).expect("location should serialize");
        assert_eq!(json["state"], "unresolved");
        assert_eq!(json["reason"], "permission_denied");
    }
}
