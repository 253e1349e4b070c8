//! Daylight oracle: per-point, per-instant sun event lookup.
//!
//! Wraps the astronomical calculator behind a single query so the crossing
//! solver never talks to the `sunrise` crate directly. All instants are
//! absolute UTC; the oracle has no notion of local time.

use chrono::{DateTime, Utc};
use sunrise::{Coordinates, DawnType, SolarDay, SolarEvent};

use crate::constants::MAX_SOLAR_LATITUDE;
use crate::geo::Coordinate;

/// Sun events for one point on one calendar day.
///
/// `sunrise_start`/`sunset_end` are the outer (civil twilight) bounds;
/// `sunrise_end`/`sunset_start` bracket full daylight. Solar noon is the
/// midpoint of the daylight span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayInfo {
    pub sunrise_start: DateTime<Utc>,
    pub sunrise_end: DateTime<Utc>,
    pub sunset_start: DateTime<Utc>,
    pub sunset_end: DateTime<Utc>,
    pub solar_noon: DateTime<Utc>,
}

/// Source of per-point sun events.
///
/// The solver is generic over this trait so the hunting loop can be
/// exercised against any deterministic calculator.
pub trait DaylightOracle {
    /// Sun events for the UTC calendar day containing `instant`, at `coord`.
    fn day_info(&self, instant: DateTime<Utc>, coord: Coordinate) -> DayInfo;

    /// Whether the sun is fully up at `coord` at `instant`.
    fn is_daylight(&self, coord: Coordinate, instant: DateTime<Utc>) -> bool {
        let info = self.day_info(instant, coord);
        info.sunrise_end <= instant && instant < info.sunset_start
    }
}

/// The real oracle, backed by the `sunrise` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarCalculator;

impl DaylightOracle for SolarCalculator {
    fn day_info(&self, instant: DateTime<Utc>, coord: Coordinate) -> DayInfo {
        // Latitudes are capped before calculation; the standard sunrise
        // model degenerates in polar day/night.
        let lat = coord.lat.clamp(-MAX_SOLAR_LATITUDE, MAX_SOLAR_LATITUDE);
        let lon = coord.lon.clamp(-180.0, 180.0);
        let coordinates =
            Coordinates::new(lat, lon).expect("latitude and longitude are clamped to valid ranges");

        let day = SolarDay::new(coordinates, instant.date_naive());
        let sunrise_start = day.event_time(SolarEvent::Dawn(DawnType::Civil));
        let sunrise_end = day.event_time(SolarEvent::Sunrise);
        let sunset_start = day.event_time(SolarEvent::Sunset);
        let sunset_end = day.event_time(SolarEvent::Dusk(DawnType::Civil));
        let solar_noon = sunrise_end + (sunset_start - sunrise_end) / 2;

        DayInfo {
            sunrise_start,
            sunrise_end,
            sunset_start,
            sunset_end,
            solar_noon,
        }
    }
}
