//! Journey definition, validation, and the planning pipeline.
//!
//! A [`Journey`] is validated once at construction; [`plan_journey`] then
//! threads it through the crossing solver, the segment synthesizer and the
//! segment adapter, producing a [`JourneyPlan`]. All state is local to the
//! call, so independent journeys can be planned concurrently.

use chrono::{DateTime, Duration, Utc};

use crate::constants::{MAX_LATITUDE, MAX_LONGITUDE};
use crate::error::SunsideError;
use crate::geo::Coordinate;
use crate::seat::{SeatPlan, plan_for_segment};
use crate::segments::{Segment, adapt_segments, synthesize_segments};
use crate::solar::DaylightOracle;
use crate::solver::CrossingSolver;
use crate::timezone::TimezoneLookup;

/// A single-leg journey between two points on the globe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Journey {
    pub start: Coordinate,
    pub end: Coordinate,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    /// Whether the traveler can switch seats mid-leg.
    pub seat_change_allowed: bool,
    /// Seek the sun (true) or avoid it (false).
    pub prefer_sun: bool,
    /// Annotate sun events with the UTC offset at their location.
    pub use_local_timezones: bool,
}

impl Journey {
    /// Validate and build a journey.
    ///
    /// Rejects identical endpoints, non-positive duration, and out-of-range
    /// coordinates.
    pub fn new(
        start: Coordinate,
        end: Coordinate,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    ) -> Result<Self, SunsideError> {
        for coord in [start, end] {
            if !coord.lat.is_finite()
                || !coord.lon.is_finite()
                || coord.lat.abs() > MAX_LATITUDE
                || coord.lon.abs() > MAX_LONGITUDE
            {
                return Err(SunsideError::CoordinateOutOfRange {
                    lat: coord.lat,
                    lon: coord.lon,
                });
            }
        }
        if start == end {
            return Err(SunsideError::IdenticalEndpoints);
        }
        if arrival <= departure {
            return Err(SunsideError::NonPositiveDuration { departure, arrival });
        }
        Ok(Self {
            start,
            end,
            departure,
            arrival,
            seat_change_allowed: true,
            prefer_sun: true,
            use_local_timezones: false,
        })
    }

    pub fn with_preferences(
        mut self,
        seat_change_allowed: bool,
        prefer_sun: bool,
        use_local_timezones: bool,
    ) -> Self {
        self.seat_change_allowed = seat_change_allowed;
        self.prefer_sun = prefer_sun;
        self.use_local_timezones = use_local_timezones;
        self
    }

    pub fn duration(&self) -> Duration {
        self.arrival - self.departure
    }
}

/// Complete result of planning one journey.
///
/// Either a consistent list of daylight segments with their seat plans, or
/// an overnight journey with no segments at all — never a partial result.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyPlan {
    pub segments: Vec<Segment>,
    pub seat_plans: Vec<SeatPlan>,
    /// The whole journey happens in darkness; `segments` is empty.
    pub is_night: bool,
    /// Hunting-loop iterations the solver spent, for diagnostics.
    pub solver_iterations: u64,
}

/// Plan a journey against the given daylight oracle.
pub fn plan_journey<O: DaylightOracle>(
    journey: &Journey,
    oracle: &O,
) -> Result<JourneyPlan, SunsideError> {
    plan_journey_detailed(journey, oracle, None, crate::constants::DEFAULT_TOLERANCE_MS)
}

/// Plan a journey, annotating sun events with local UTC offsets.
///
/// Only consulted when the journey asks for local timezones, and skipped
/// entirely when both endpoints share one offset. A failed lookup for an
/// individual anchor degrades to "no offset" with a warning; callers that
/// need strict failure use the [`TimezoneLookup`] directly.
pub fn plan_journey_with_offsets<O: DaylightOracle>(
    journey: &Journey,
    oracle: &O,
    timezones: &dyn TimezoneLookup,
) -> Result<JourneyPlan, SunsideError> {
    plan_journey_detailed(
        journey,
        oracle,
        Some(timezones),
        crate::constants::DEFAULT_TOLERANCE_MS,
    )
}

/// Plan a journey with full control over the collaborators and the solver
/// convergence tolerance.
pub fn plan_journey_detailed<O: DaylightOracle>(
    journey: &Journey,
    oracle: &O,
    timezones: Option<&dyn TimezoneLookup>,
    tolerance_ms: i64,
) -> Result<JourneyPlan, SunsideError> {
    let solver = CrossingSolver::with_tolerance(oracle, tolerance_ms);
    let outcome = solver.solve(journey)?;

    if outcome.is_night {
        return Ok(JourneyPlan {
            segments: Vec::new(),
            seat_plans: Vec::new(),
            is_night: true,
            solver_iterations: outcome.iterations,
        });
    }

    let raw = synthesize_segments(journey, oracle, outcome.events)?;
    let mut segments = adapt_segments(journey, raw);

    if let Some(lookup) = timezones
        && journey.use_local_timezones
        && endpoints_differ_in_offset(journey, lookup)
    {
        for segment in &mut segments {
            annotate_segment_offsets(segment, lookup);
        }
    }

    let seat_plans = segments
        .iter()
        .map(|segment| plan_for_segment(segment, journey.seat_change_allowed, journey.prefer_sun))
        .collect();

    Ok(JourneyPlan {
        segments,
        seat_plans,
        is_night: false,
        solver_iterations: outcome.iterations,
    })
}

/// Local timezones only matter when the endpoints actually disagree.
fn endpoints_differ_in_offset(journey: &Journey, lookup: &dyn TimezoneLookup) -> bool {
    let start = lookup.offset_hours(journey.start, journey.departure);
    let end = lookup.offset_hours(journey.end, journey.arrival);
    match (start, end) {
        (Ok(a), Ok(b)) => a != b,
        _ => {
            log_warning!("timezone lookup failed; falling back to absolute times");
            false
        }
    }
}

fn annotate_segment_offsets(segment: &mut Segment, lookup: &dyn TimezoneLookup) {
    let mut annotate = |anchor: &mut crate::segments::SolarAnchor| {
        match lookup.offset_hours(anchor.coord, anchor.instant) {
            Ok(offset) => anchor.utc_offset_hours = Some(offset),
            Err(err) => {
                log_warning!("offset unavailable for {}: {err}", anchor.coord);
                anchor.utc_offset_hours = None;
            }
        }
    };
    if let Some(sunrise) = segment.sunrise.as_mut() {
        annotate(sunrise);
    }
    if let Some(sunset) = segment.sunset.as_mut() {
        annotate(sunset);
    }
    annotate(&mut segment.solar_noon);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;
    use chrono::TimeZone;

    fn coords() -> (Coordinate, Coordinate) {
        (Coordinate::new(40.0, -3.0), Coordinate::new(41.0, 2.0))
    }

    #[test]
    fn rejects_identical_endpoints() {
        let (a, _) = coords();
        let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 4, 0, 0).unwrap();
        let err = Journey::new(a, a, t0, t0 + Duration::hours(2)).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Input);
    }

    #[test]
    fn rejects_non_positive_duration() {
        let (a, b) = coords();
        let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 4, 0, 0).unwrap();
        assert!(Journey::new(a, b, t0, t0).is_err());
        assert!(Journey::new(a, b, t0, t0 - Duration::minutes(1)).is_err());
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let (a, _) = coords();
        let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 4, 0, 0).unwrap();
        let bad = Coordinate::new(91.0, 0.0);
        let err = Journey::new(a, bad, t0, t0 + Duration::hours(2)).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Input);
    }
}
