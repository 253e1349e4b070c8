//! UTC-offset lookup for coordinates.
//!
//! Uses tzf-rs to name the IANA timezone for exact coordinates, then
//! chrono-tz to evaluate its UTC offset at the queried instant. The finder
//! is expensive to build, so a single instance is shared lazily.

use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use tzf_rs::DefaultFinder;

use crate::error::SunsideError;
use crate::geo::Coordinate;

static FINDER: Lazy<DefaultFinder> = Lazy::new(DefaultFinder::new);

/// Resolves the UTC offset in effect at a place and instant.
pub trait TimezoneLookup {
    /// Offset from UTC in fractional hours (e.g. 5.5 for IST).
    fn offset_hours(&self, coord: Coordinate, instant: DateTime<Utc>)
    -> Result<f64, SunsideError>;
}

/// Coordinate-based timezone lookup over the embedded tz boundary data.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateTimezones;

impl TimezoneLookup for CoordinateTimezones {
    fn offset_hours(
        &self,
        coord: Coordinate,
        instant: DateTime<Utc>,
    ) -> Result<f64, SunsideError> {
        let name = FINDER.get_tz_name(coord.lon, coord.lat);
        let tz: Tz = name.parse().map_err(|_| SunsideError::TimezoneLookup {
            lat: coord.lat,
            lon: coord.lon,
            detail: format!("unknown timezone name '{name}'"),
        })?;
        let offset_seconds = tz
            .offset_from_utc_datetime(&instant.naive_utc())
            .fix()
            .local_minus_utc();
        Ok(f64::from(offset_seconds) / 3600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    fn june(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn madrid_is_cest_in_summer() {
        let offset = CoordinateTimezones
            .offset_hours(Coordinate::new(40.4168, -3.7038), june(12))
            .unwrap();
        assert_eq!(offset, 2.0);
    }

    #[test]
    fn new_york_is_edt_in_summer() {
        let offset = CoordinateTimezones
            .offset_hours(Coordinate::new(40.7128, -74.0060), june(12))
            .unwrap();
        assert_eq!(offset, -4.0);
    }

    #[test]
    fn india_has_a_fractional_offset() {
        let offset = CoordinateTimezones
            .offset_hours(Coordinate::new(19.0760, 72.8777), june(12))
            .unwrap();
        assert_eq!(offset, 5.5);
    }
}
