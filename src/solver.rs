//! Crossing-point solver: locates sunrise/sunset transitions along the
//! moving path.
//!
//! The vehicle moves while the illumination boundary moves, so each crossing
//! is found by a fixed-increment hunting loop: estimate the boundary instant
//! at the current position, convert it to a journey fraction, nudge the
//! fraction by one tolerance-worth of travel toward the boundary, and repeat
//! until two consecutive estimates agree within the tolerance. Crossings are
//! accepted in strictly increasing fraction order, alternating sunrise and
//! sunset; the calendar-day pointer advances one day per sunrise hunt.
//!
//! The fixed step is deliberately kept over a converging root-finder for
//! behavioral compatibility with the established results; the
//! [`DaylightOracle`] seam exists so the loop could be swapped out.

use chrono::{DateTime, Duration, Utc};

use crate::constants::{DEFAULT_TOLERANCE_MS, ONE_DAY_MS, ONE_HOUR_MS};
use crate::error::SunsideError;
use crate::geo::{Coordinate, position_at_fraction};
use crate::journey::Journey;
use crate::solar::DaylightOracle;

/// Which boundary the moving point crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingKind {
    Sunrise,
    Sunset,
}

/// One daylight/night transition along the journey.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingEvent {
    pub kind: CrossingKind,
    pub instant: DateTime<Utc>,
    pub coord: Coordinate,
    /// Journey-completion fraction at the crossing, in (0, 1).
    pub fraction: f64,
}

/// Result of running the solver over one journey.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    /// Crossings in strictly increasing fraction order, alternating kind.
    pub events: Vec<CrossingEvent>,
    /// The whole journey happens in darkness; no events were searched for.
    pub is_night: bool,
    /// Hunting-loop iterations spent, for diagnostics.
    pub iterations: u64,
}

/// The iterative boundary-crossing solver.
pub struct CrossingSolver<'a, O: DaylightOracle> {
    oracle: &'a O,
    tolerance_ms: i64,
}

impl<'a, O: DaylightOracle> CrossingSolver<'a, O> {
    pub fn new(oracle: &'a O) -> Self {
        Self {
            oracle,
            tolerance_ms: DEFAULT_TOLERANCE_MS,
        }
    }

    /// Override the convergence tolerance (milliseconds of wall-clock
    /// discrepancy between consecutive boundary estimates).
    pub fn with_tolerance(oracle: &'a O, tolerance_ms: i64) -> Self {
        Self {
            oracle,
            tolerance_ms,
        }
    }

    /// Walk the journey from departure to arrival and record every
    /// daylight/night crossing of the moving point.
    pub fn solve(&self, journey: &Journey) -> Result<SolverOutcome, SunsideError> {
        if self.journey_is_night(journey) {
            return Ok(SolverOutcome {
                events: Vec::new(),
                is_night: true,
                iterations: 0,
            });
        }

        let departure = journey.departure;
        let arrival = journey.arrival;
        let total_ms = journey.duration().num_milliseconds();

        // One round per expected crossing, two per elapsed day plus slack.
        let limit = ((2 * total_ms + ONE_DAY_MS - 1) / ONE_DAY_MS).max(2);
        let round_cap = limit * limit;
        let step = self.tolerance_ms as f64 / total_ms as f64;

        let mut rate = 0.0_f64;
        let mut position = journey.start;
        let mut seeking_sunset = self.oracle.is_daylight(journey.start, departure);
        let mut date_pointer = departure;

        let mut events: Vec<CrossingEvent> = Vec::new();
        let mut last_rate = 0.0_f64;
        let mut last_instant = departure;
        let mut accepted = 0_i64;
        let mut rounds = 0_i64;
        let mut iterations = 0_u64;

        'rounds: while accepted <= limit + 1 && date_pointer < arrival && rounds < round_cap {
            rounds += 1;
            if !seeking_sunset {
                // a sunrise hunt resumes on the next calendar day
                date_pointer += Duration::days(1);
            }

            // Hunting loop: runs until the boundary estimate has moved past
            // the previously recorded crossing and stabilized within the
            // tolerance.
            let mut candidate = departure - Duration::days(1);
            let mut diff = ONE_HOUR_MS;
            let mut inner = 0_i64;
            while candidate <= last_instant || diff > self.tolerance_ms {
                inner += 1;
                if inner > round_cap {
                    // known precision/termination trade-off: stop hunting in
                    // this direction without recording an event
                    break 'rounds;
                }
                iterations += 1;

                candidate = self.boundary_instant(date_pointer, position, seeking_sunset);
                rate = fraction_of(candidate, departure, total_ms);
                position = position_at_fraction(journey.start, journey.end, rate);

                // nudge one tolerance-worth of travel toward the boundary
                if self.oracle.is_daylight(position, date_pointer) == seeking_sunset {
                    rate += step;
                } else {
                    rate -= step;
                }
                position = position_at_fraction(journey.start, journey.end, rate);
                date_pointer =
                    departure + Duration::milliseconds((rate * total_ms as f64).floor() as i64);

                let refined = self.boundary_instant(date_pointer, position, seeking_sunset);
                diff = (candidate - refined).num_milliseconds().abs();
                date_pointer = refined;
            }

            if rate < 1.0 && rate > last_rate {
                events.push(CrossingEvent {
                    kind: if seeking_sunset {
                        CrossingKind::Sunset
                    } else {
                        CrossingKind::Sunrise
                    },
                    instant: date_pointer,
                    coord: position,
                    fraction: rate,
                });
                last_rate = rate;
                last_instant = date_pointer;
                accepted += 1;
                seeking_sunset = !seeking_sunset;
            }
        }

        check_strictly_increasing(&events)?;

        Ok(SolverOutcome {
            events,
            is_night: false,
            iterations,
        })
    }

    /// The boundary instant being hunted: sunset start when seeking sunset,
    /// sunrise end when seeking sunrise, for the calendar day of `pointer`
    /// at `position`.
    fn boundary_instant(
        &self,
        pointer: DateTime<Utc>,
        position: Coordinate,
        seeking_sunset: bool,
    ) -> DateTime<Utc> {
        let info = self.oracle.day_info(pointer, position);
        if seeking_sunset {
            info.sunset_start
        } else {
            info.sunrise_end
        }
    }

    /// Whole-journey darkness pre-check.
    ///
    /// Evaluated at the start coordinate only — an endpoint approximation
    /// kept deliberately; intermediate positions are never probed. Covers
    /// journeys crossing at most one midnight: departure at-or-after sunset
    /// and arrival at-or-before the next sunrise, or both endpoints inside
    /// the same dark span of a single calendar day.
    fn journey_is_night(&self, journey: &Journey) -> bool {
        let dep_info = self.oracle.day_info(journey.departure, journey.start);
        let dep_day = journey.departure.date_naive();
        let arr_day = journey.arrival.date_naive();

        if arr_day == dep_day {
            journey.arrival <= dep_info.sunrise_end || journey.departure >= dep_info.sunset_start
        } else if dep_day.succ_opt() == Some(arr_day) {
            let arr_info = self.oracle.day_info(journey.arrival, journey.start);
            journey.departure >= dep_info.sunset_start && journey.arrival <= arr_info.sunrise_end
        } else {
            false
        }
    }
}

fn fraction_of(instant: DateTime<Utc>, departure: DateTime<Utc>, total_ms: i64) -> f64 {
    (instant - departure).num_milliseconds() as f64 / total_ms as f64
}

/// Accepted crossings must be strictly ordered in time; anything else means
/// the alternation model broke down and no consistent segment list exists.
fn check_strictly_increasing(events: &[CrossingEvent]) -> Result<(), SunsideError> {
    for pair in events.windows(2) {
        if pair[1].instant <= pair[0].instant {
            return Err(SunsideError::DisorderedCrossings {
                detail: format!(
                    "{:?} at {} does not follow {:?} at {}",
                    pair[1].kind, pair[1].instant, pair[0].kind, pair[0].instant
                ),
            });
        }
    }
    Ok(())
}
