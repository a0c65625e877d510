//! Sidereal time and the observer's zenith in equatorial coordinates.
//!
//! Uses the low-precision GMST polynomial from the Astronomical Almanac,
//! accurate to a fraction of a second over several centuries around J2000,
//! which is far finer than a poster's sky rotation needs.

use crate::coords::Axis;
use crate::dates::parse_iso_date;
use crate::error::{EphemerisError, Result};
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Julian date of 1970-01-01T00:00:00Z
const UNIX_EPOCH_JULIAN_DATE: f64 = 2_440_587.5;
/// Julian date of the J2000.0 epoch (2000-01-01T12:00:00 TT)
const J2000_JULIAN_DATE: f64 = 2_451_545.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;
/// GMST at J2000.0, in hours
const GMST_AT_J2000_HOURS: f64 = 18.697_374_558;
/// Sidereal hours elapsed per solar day
const SIDEREAL_HOURS_PER_DAY: f64 = 24.065_709_824_419_08;
const HOURS_PER_DAY: f64 = 24.0;
const DEGREES_PER_HOUR: f64 = 15.0;

/// Position on the celestial sphere, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equatorial {
    /// Right ascension in [0, 360)
    pub ra_degrees: f64,
    /// Declination in [-90, 90]
    pub dec_degrees: f64,
}

impl Equatorial {
    /// Right ascension expressed in hours
    pub fn ra_hours(&self) -> f64 {
        self.ra_degrees / DEGREES_PER_HOUR
    }
}

/// Julian date of a UTC instant
pub fn julian_date(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JULIAN_DATE
}

/// Greenwich mean sidereal time in hours for a Julian date, in [0, 24)
pub fn gmst_hours(julian_date: f64) -> f64 {
    let days = julian_date - J2000_JULIAN_DATE;
    normalize_hours(GMST_AT_J2000_HOURS + SIDEREAL_HOURS_PER_DAY * days)
}

/// Local sidereal time in hours at UTC midnight of `date` for an observer at
/// `longitude` degrees (east positive).
///
/// The same inputs always produce the same value, and the result is always in
/// `[0, 24)`.
pub fn calculate_lst(date: &str, longitude: f64) -> Result<f64> {
    if !longitude.is_finite() {
        return Err(EphemerisError::InvalidLongitude(longitude));
    }

    let midnight = parse_iso_date(date)?.and_time(NaiveTime::MIN).and_utc();
    let lst = gmst_hours(julian_date(midnight)) + longitude / DEGREES_PER_HOUR;
    log::debug!("LST for {date} at lon {longitude:.4}: {lst:.6}h (unnormalized)");

    Ok(normalize_hours(lst))
}

/// Equatorial position directly overhead the observer at UTC midnight of `date`
pub fn zenith_equatorial(date: &str, latitude: f64, longitude: f64) -> Result<Equatorial> {
    let dec_degrees = Axis::Latitude.validate(latitude)?;
    let lst = calculate_lst(date, longitude)?;
    Ok(Equatorial {
        ra_degrees: lst * DEGREES_PER_HOUR,
        dec_degrees,
    })
}

/// Format fractional hours as `HHh MMm SSs`
pub fn format_hours(hours: f64) -> String {
    let total_seconds = (normalize_hours(hours) * 3600.0).round() as u64 % 86_400;
    format!(
        "{:02}h {:02}m {:02}s",
        total_seconds / 3600,
        (total_seconds / 60) % 60,
        total_seconds % 60
    )
}

/// Wrap hours into [0, 24).
///
/// `rem_euclid` can return exactly 24.0 for tiny negative inputs, so that
/// case folds back to zero.
fn normalize_hours(hours: f64) -> f64 {
    let wrapped = hours.rem_euclid(HOURS_PER_DAY);
    if wrapped >= HOURS_PER_DAY {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    #[test]
    fn test_julian_date_of_j2000() {
        let noon = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_abs_diff_eq!(julian_date(noon), J2000_JULIAN_DATE, epsilon = 1e-9);
    }

    #[test]
    fn test_gmst_at_2000_midnight() {
        // 2000-01-01 00:00 UTC: GMST = 6h 39m 52s
        let lst = calculate_lst("2000-01-01", 0.0).unwrap();
        assert_abs_diff_eq!(lst, 6.664_519_645_790_46, epsilon = 1e-9);
        assert_eq!(format_hours(lst), "06h 39m 52s");
    }

    #[test]
    fn test_longitude_shifts_by_fifteen_degrees_per_hour() {
        let greenwich = calculate_lst("2000-01-01", 0.0).unwrap();
        let west = calculate_lst("2000-01-01", -75.0).unwrap();
        assert_abs_diff_eq!(greenwich - west, 5.0, epsilon = 1e-9);

        let east = calculate_lst("2000-01-01", 180.0).unwrap();
        let far_west = calculate_lst("2000-01-01", -180.0).unwrap();
        assert_abs_diff_eq!(east, far_west, epsilon = 1e-9);
    }

    #[test]
    fn test_lst_is_deterministic_and_in_range() {
        let dates = ["1969-07-20", "2000-02-29", "2025-12-25", "2100-06-30"];
        for date in dates {
            let mut longitude = -180.0;
            while longitude <= 180.0 {
                let first = calculate_lst(date, longitude).unwrap();
                let second = calculate_lst(date, longitude).unwrap();
                assert_eq!(first, second);
                assert!((0.0..24.0).contains(&first), "{date} {longitude}: {first}");
                longitude += 7.5;
            }
        }
    }

    #[test]
    fn test_lst_rejects_bad_input() {
        assert!(matches!(
            calculate_lst("2025-12-25", f64::NAN),
            Err(EphemerisError::InvalidLongitude(_))
        ));
        assert!(calculate_lst("2025-12-25", f64::INFINITY).is_err());
        assert!(matches!(
            calculate_lst("12/25/2025", 0.0),
            Err(EphemerisError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_zenith_equatorial() {
        let zenith = zenith_equatorial("2000-01-01", 51.5, 0.0).unwrap();
        assert_abs_diff_eq!(zenith.ra_hours(), 6.664_519_645_790_46, epsilon = 1e-9);
        assert_eq!(zenith.dec_degrees, 51.5);
        assert!(zenith_equatorial("2000-01-01", 91.0, 0.0).is_err());
    }

    #[test]
    fn test_format_hours_wraps() {
        assert_eq!(format_hours(0.0), "00h 00m 00s");
        assert_eq!(format_hours(23.999_999_9), "00h 00m 00s");
        assert_eq!(format_hours(12.5), "12h 30m 00s");
        assert_eq!(format_hours(-1.0), "23h 00m 00s");
    }
}
