//! Error types for coordinate and time calculations

use crate::coords::Axis;
use thiserror::Error;

/// Result type alias for ephemeris operations
pub type Result<T> = std::result::Result<T, EphemerisError>;

/// Errors raised while parsing observer input or computing sidereal time
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EphemerisError {
    /// Input could not be read as a DMM or decimal coordinate
    #[error("Malformed coordinate: {0:?}")]
    MalformedCoordinate(String),

    /// Coordinate parsed but lies outside the valid range for its axis
    #[error("{axis} {value} is outside ±{limit}°")]
    CoordinateOutOfRange { axis: Axis, value: f64, limit: f64 },

    /// Date string is not a recognised ISO date or timestamp
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// Longitude was NaN or infinite
    #[error("Longitude is not a finite number: {0}")]
    InvalidLongitude(f64),
}
