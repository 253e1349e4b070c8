//! Shared constants used across the crate.

/// Mean Earth radius in kilometers for great-circle math.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// One hour in milliseconds.
pub const ONE_HOUR_MS: i64 = 60 * 60 * 1000;

/// One day in milliseconds.
pub const ONE_DAY_MS: i64 = 24 * ONE_HOUR_MS;

/// Default convergence tolerance for the crossing solver, in milliseconds.
///
/// Two consecutive boundary estimates closer than this are considered
/// converged. Matches the precision the recommendation actually needs:
/// nobody changes seats over a 2.5 second sunset discrepancy.
pub const DEFAULT_TOLERANCE_MS: i64 = 2500;

/// Valid range for the configurable solver tolerance.
pub const MIN_TOLERANCE_MS: i64 = 100;
pub const MAX_TOLERANCE_MS: i64 = ONE_HOUR_MS;

/// Latitudes are capped to this absolute value before solar calculations.
/// Beyond it the sunrise/sunset model degenerates (polar day/night) and
/// the standard calculations are not meaningful.
pub const MAX_SOLAR_LATITUDE: f64 = 65.0;

/// Maximum absolute latitude accepted in journey input.
pub const MAX_LATITUDE: f64 = 90.0;

/// Maximum absolute longitude accepted in journey input.
pub const MAX_LONGITUDE: f64 = 180.0;
