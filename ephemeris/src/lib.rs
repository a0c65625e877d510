//! Observer coordinates, calendar dates and sidereal time.
//!
//! Everything a star map poster needs to turn form input into display
//! strings and sky orientation:
//!
//! - [`coords`]: degrees/decimal-minutes (DMM) formatting and parsing
//! - [`dates`]: ISO date parsing and long-form calendar captions
//! - [`celestial`]: Julian dates, Greenwich/local sidereal time and the
//!   equatorial position of the observer's zenith
//!
//! # Example
//!
//! ```
//! use ephemeris::{calculate_lst, format_date, format_dmm, Axis};
//!
//! let caption = format_date("2025-12-25").unwrap();
//! assert_eq!(caption, "Thursday, 25th December, 2025");
//!
//! assert_eq!(format_dmm(-74.006, Axis::Longitude), "W74° 00.36000′");
//!
//! let lst = calculate_lst("2025-12-25", -74.006).unwrap();
//! assert!((0.0..24.0).contains(&lst));
//! ```

pub mod celestial;
pub mod coords;
pub mod dates;
mod error;

pub use celestial::{
    calculate_lst, format_hours, gmst_hours, julian_date, zenith_equatorial, Equatorial,
};
pub use coords::{format_dmm, parse_dmm, Axis};
pub use dates::{format_date, iso_date, ordinal_suffix, parse_iso_date};
pub use error::{EphemerisError, Result};
