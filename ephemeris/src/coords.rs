//! Degrees/decimal-minutes (DMM) coordinate strings.
//!
//! Posters print observer coordinates as `N40° 42.76800′ W74° 00.36000′`.
//! Formatting always emits five minute decimals zero-padded to width 8, so
//! parsing the output back recovers the decimal value to well within 1e-4°.

use crate::error::{EphemerisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minute precision used when formatting (5 decimal places)
const MINUTE_SCALE: f64 = 100_000.0;

/// Which geographic axis a coordinate value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Largest absolute value allowed on this axis, in degrees
    pub fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    /// Hemisphere letter for a signed value (zero counts as N/E)
    pub fn hemisphere(self, value: f64) -> char {
        match (self, value >= 0.0) {
            (Axis::Latitude, true) => 'N',
            (Axis::Latitude, false) => 'S',
            (Axis::Longitude, true) => 'E',
            (Axis::Longitude, false) => 'W',
        }
    }

    /// Map a hemisphere letter back to its axis and sign
    pub fn from_hemisphere(letter: char) -> Option<(Axis, f64)> {
        match letter.to_ascii_uppercase() {
            'N' => Some((Axis::Latitude, 1.0)),
            'S' => Some((Axis::Latitude, -1.0)),
            'E' => Some((Axis::Longitude, 1.0)),
            'W' => Some((Axis::Longitude, -1.0)),
            _ => None,
        }
    }

    /// Check that a decimal value is finite and within range for this axis
    pub fn validate(self, value: f64) -> Result<f64> {
        if !value.is_finite() || value.abs() > self.limit() {
            return Err(EphemerisError::CoordinateOutOfRange {
                axis: self,
                value,
                limit: self.limit(),
            });
        }
        Ok(value)
    }

    /// Parse a DMM or decimal string as a value on this axis.
    ///
    /// Unlike [`parse_dmm`], a hemisphere letter belonging to the other axis
    /// is rejected and the range check uses this axis' limit.
    pub fn parse(self, input: &str) -> Result<f64> {
        let (axis, value) = parse_components(input)?;
        if let Some(found) = axis {
            if found != self {
                return Err(EphemerisError::MalformedCoordinate(input.to_string()));
            }
        }
        self.validate(value)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// Format a signed decimal degree value as `{hemisphere}{deg}° {minutes}′`.
///
/// ```
/// use ephemeris::{format_dmm, Axis};
/// assert_eq!(format_dmm(40.7128, Axis::Latitude), "N40° 42.76800′");
/// assert_eq!(format_dmm(-33.5, Axis::Latitude), "S33° 30.00000′");
/// ```
pub fn format_dmm(value: f64, axis: Axis) -> String {
    let hemisphere = axis.hemisphere(value);
    let magnitude = value.abs();
    let mut degrees = magnitude.floor();
    let mut minutes = ((magnitude - degrees) * 60.0 * MINUTE_SCALE).round() / MINUTE_SCALE;

    // 59.999999 rounds up to 60.00000, which belongs to the next degree
    if minutes >= 60.0 {
        degrees += 1.0;
        minutes -= 60.0;
    }

    format!("{hemisphere}{degrees:.0}° {minutes:08.5}′")
}

/// Parse a DMM string (or bare signed decimal) back into decimal degrees.
///
/// Accepted forms:
/// - `N40° 42.76800′` (the [`format_dmm`] output; `'` also accepted)
/// - `N40 42.768` (whitespace separated)
/// - `-74.006` (bare decimal fallback)
///
/// Values with a hemisphere letter are range-checked against that letter's
/// axis. Bare decimals carry no axis, so they are checked against the wider
/// longitude bound; use [`Axis::parse`] when the axis is known.
pub fn parse_dmm(input: &str) -> Result<f64> {
    let (axis, value) = parse_components(input)?;
    axis.unwrap_or(Axis::Longitude).validate(value)
}

/// Digits with at most one decimal point: no sign, exponent or `inf`/`NaN`
fn is_plain_decimal(text: &str) -> bool {
    let mut digits = 0;
    let mut points = 0;
    for c in text.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return false,
        }
    }
    digits > 0 && points <= 1
}

/// Split an input into its (optional) axis and unchecked decimal value
fn parse_components(input: &str) -> Result<(Option<Axis>, f64)> {
    let malformed = || EphemerisError::MalformedCoordinate(input.to_string());
    let trimmed = input.trim();
    let first = trimmed.chars().next().ok_or_else(malformed)?;

    let Some((axis, sign)) = Axis::from_hemisphere(first) else {
        let value: f64 = trimmed.parse().map_err(|_| malformed())?;
        if !value.is_finite() {
            return Err(malformed());
        }
        return Ok((None, value));
    };

    let rest = trimmed[first.len_utf8()..].trim();
    let (degree_part, minute_part) = match rest.split_once('°') {
        Some((deg, min)) => (deg, min),
        None => rest.split_once(char::is_whitespace).unwrap_or((rest, "")),
    };

    let degree_part = degree_part.trim();
    if degree_part.is_empty() || !degree_part.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed());
    }
    let degrees: f64 = degree_part.parse().map_err(|_| malformed())?;

    let minute_part = minute_part.trim().trim_end_matches(['′', '\'']).trim();
    let minutes: f64 = if minute_part.is_empty() {
        0.0
    } else if is_plain_decimal(minute_part) {
        minute_part.parse().map_err(|_| malformed())?
    } else {
        return Err(malformed());
    };

    if !degrees.is_finite() || degrees < 0.0 || !(0.0..60.0).contains(&minutes) {
        return Err(malformed());
    }

    Ok((Some(axis), sign * (degrees + minutes / 60.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_format_known_values() {
        assert_eq!(format_dmm(40.7128, Axis::Latitude), "N40° 42.76800′");
        assert_eq!(format_dmm(-74.006, Axis::Longitude), "W74° 00.36000′");
        assert_eq!(format_dmm(0.0, Axis::Longitude), "E0° 00.00000′");
        assert_eq!(format_dmm(-0.5, Axis::Latitude), "S0° 30.00000′");
    }

    #[test]
    fn test_minutes_rounding_carries_into_degrees() {
        assert_eq!(format_dmm(10.999_999_999, Axis::Latitude), "N11° 00.00000′");
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let mut value = -90.0;
        while value <= 90.0 {
            let text = format_dmm(value, Axis::Latitude);
            let parsed = parse_dmm(&text).unwrap();
            assert_abs_diff_eq!(parsed, value, epsilon = 1e-4);
            value += 0.737;
        }

        let mut value = -180.0;
        while value <= 180.0 {
            let text = format_dmm(value, Axis::Longitude);
            let parsed = Axis::Longitude.parse(&text).unwrap();
            assert_abs_diff_eq!(parsed, value, epsilon = 1e-4);
            value += 1.913;
        }
    }

    #[test]
    fn test_parse_alternate_forms() {
        assert_abs_diff_eq!(parse_dmm("N40 42.768").unwrap(), 40.7128, epsilon = 1e-9);
        assert_abs_diff_eq!(parse_dmm("s33° 30'").unwrap(), -33.5, epsilon = 1e-9);
        assert_abs_diff_eq!(parse_dmm("  -74.006 ").unwrap(), -74.006, epsilon = 1e-12);
        assert_abs_diff_eq!(parse_dmm("E12°").unwrap(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for bad in [
            "",
            "   ",
            "N",
            "Nabc° 1′",
            "X12° 00.0′",
            "N12° 75.0′",
            "N-3° 1.0′",
            "NaN",
            "N40.5° 30′",
            "N1e1° 0′",
            "N40° 1e1′",
            "E+12 30",
        ] {
            assert!(
                matches!(parse_dmm(bad), Err(EphemerisError::MalformedCoordinate(_))),
                "expected malformed error for {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(matches!(
            parse_dmm("N91° 00.00000′"),
            Err(EphemerisError::CoordinateOutOfRange { axis: Axis::Latitude, .. })
        ));
        assert!(parse_dmm("W181° 00.00000′").is_err());
        assert!(parse_dmm("-180.5").is_err());
        assert!(Axis::Latitude.parse("95.0").is_err());
        assert!(parse_dmm("95.0").is_ok());
    }

    #[test]
    fn test_axis_parse_rejects_wrong_hemisphere() {
        assert!(Axis::Latitude.parse("E10° 00.00000′").is_err());
        assert!(Axis::Longitude.parse("E10° 00.00000′").is_ok());
    }
}
