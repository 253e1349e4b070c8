//! Segment synthesis and adaptation.
//!
//! The solver hands over an alternating crossing list; this module pairs the
//! crossings into contiguous daylight segments, splices in the journey
//! endpoints where a bound is missing, computes each segment's solar-noon
//! anchor, clips the first and last segment to the true departure and
//! arrival instants, and classifies each boundary segment as before or
//! after solar noon.

use chrono::{DateTime, Utc};

use crate::error::SunsideError;
use crate::geo::Coordinate;
use crate::journey::Journey;
use crate::solar::DaylightOracle;
use crate::solver::{CrossingEvent, CrossingKind};

/// A sun event pinned to an instant and a place, optionally annotated with
/// the UTC offset at that place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarAnchor {
    pub instant: DateTime<Utc>,
    pub coord: Coordinate,
    pub utc_offset_hours: Option<f64>,
}

impl SolarAnchor {
    fn new(instant: DateTime<Utc>, coord: Coordinate) -> Self {
        Self {
            instant,
            coord,
            utc_offset_hours: None,
        }
    }
}

/// One contiguous daylight span of the journey.
///
/// An absent `sunrise` means daylight was already in progress at departure;
/// an absent `sunset` means daylight is still in progress at arrival. Within
/// a segment, sunrise < solar noon < sunset whenever both bounds are
/// present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub sunrise: Option<SolarAnchor>,
    pub sunset: Option<SolarAnchor>,
    pub solar_noon: SolarAnchor,
    /// Latitude decreases from sunrise to sunset.
    pub north_to_south: bool,
    /// `Some(true)` = entirely before solar noon, `Some(false)` = entirely
    /// after, `None` = the segment straddles noon.
    pub is_before_noon: Option<bool>,
}

/// A paired daylight span before clipping. Bounds spliced from the journey
/// endpoints are marked synthetic so the adapter can tell a real crossing
/// from an inherited one.
#[derive(Debug, Clone, Copy)]
pub struct RawSegment {
    sunrise: Bound,
    sunset: Bound,
    noon_instant: DateTime<Utc>,
    noon_coord: Coordinate,
    north_to_south: bool,
}

#[derive(Debug, Clone, Copy)]
struct Bound {
    instant: DateTime<Utc>,
    coord: Coordinate,
}

/// Pair the crossing list into daylight segments.
///
/// The sequence must begin with a sunrise and end with a sunset. When it
/// does not — the journey starts or ends mid-daylight, or the solver found
/// no crossing at all — the missing bound is spliced from the journey
/// endpoint: the origin's own sunrise on the departure day, or the
/// destination's own sunset on the arrival day. The adapter later clips
/// these to the actual departure/arrival instants.
pub fn synthesize_segments<O: DaylightOracle>(
    journey: &Journey,
    oracle: &O,
    events: Vec<CrossingEvent>,
) -> Result<Vec<RawSegment>, SunsideError> {
    let mut bounds: Vec<(CrossingKind, Bound)> = Vec::with_capacity(events.len() + 2);

    let needs_leading_sunrise =
        events.first().map_or(true, |e| e.kind == CrossingKind::Sunset);
    let needs_trailing_sunset =
        events.last().map_or(true, |e| e.kind == CrossingKind::Sunrise);

    if needs_leading_sunrise {
        let origin = oracle.day_info(journey.departure, journey.start);
        bounds.push((
            CrossingKind::Sunrise,
            Bound {
                instant: origin.sunrise_start,
                coord: journey.start,
            },
        ));
    }
    for event in &events {
        bounds.push((
            event.kind,
            Bound {
                instant: event.instant,
                coord: event.coord,
            },
        ));
    }
    if needs_trailing_sunset {
        let destination = oracle.day_info(journey.arrival, journey.end);
        bounds.push((
            CrossingKind::Sunset,
            Bound {
                instant: destination.sunset_end,
                coord: journey.end,
            },
        ));
    }

    if bounds.len() % 2 != 0 {
        return Err(SunsideError::UnbalancedCrossings {
            detail: format!("{} bounds after splicing journey endpoints", bounds.len()),
        });
    }

    let mut segments = Vec::with_capacity(bounds.len() / 2);
    for pair in bounds.chunks_exact(2) {
        let (sunrise_kind, sunrise) = pair[0];
        let (sunset_kind, sunset) = pair[1];
        if sunrise_kind != CrossingKind::Sunrise || sunset_kind != CrossingKind::Sunset {
            return Err(SunsideError::UnbalancedCrossings {
                detail: format!("expected sunrise/sunset pair, got {sunrise_kind:?}/{sunset_kind:?}"),
            });
        }
        if sunset.instant <= sunrise.instant {
            return Err(SunsideError::DisorderedCrossings {
                detail: format!(
                    "sunset {} not after sunrise {}",
                    sunset.instant, sunrise.instant
                ),
            });
        }

        let noon_instant = sunrise.instant + (sunset.instant - sunrise.instant) / 2;
        // Linear average of the pair's coordinates — close enough for a
        // point that only anchors the noon timestamp's timezone lookup.
        let noon_coord = Coordinate::new(
            (sunrise.coord.lat + sunset.coord.lat) / 2.0,
            (sunrise.coord.lon + sunset.coord.lon) / 2.0,
        );

        segments.push(RawSegment {
            sunrise,
            sunset,
            noon_instant,
            noon_coord,
            north_to_south: sunrise.coord.lat > sunset.coord.lat,
        });
    }

    Ok(segments)
}

/// Clip the boundary segments to the journey and classify them against
/// solar noon.
///
/// A bound clipped away by the journey endpoint becomes absent on the final
/// [`Segment`] — the traveler never sees that sunrise or sunset. Solar noon
/// is clamped to the journey only when it would fall outside it. Only the
/// first and last segment are classified; interior segments are whole
/// daylight days and always straddle noon.
pub fn adapt_segments(journey: &Journey, raw: Vec<RawSegment>) -> Vec<Segment> {
    let count = raw.len();
    let mut segments = Vec::with_capacity(count);

    for (index, span) in raw.into_iter().enumerate() {
        let first = index == 0;
        let last = index == count - 1;

        let mut sunrise = Some(SolarAnchor::new(span.sunrise.instant, span.sunrise.coord));
        let mut sunset = Some(SolarAnchor::new(span.sunset.instant, span.sunset.coord));
        let mut noon = SolarAnchor::new(span.noon_instant, span.noon_coord);
        let mut effective_sunrise = span.sunrise.instant;
        let mut effective_sunset = span.sunset.instant;

        if count == 1 {
            // sole segment: clip both ends, leave noon where it fell
            if span.sunrise.instant < journey.departure {
                sunrise = None;
                effective_sunrise = journey.departure;
            }
            if span.sunset.instant > journey.arrival {
                sunset = None;
                effective_sunset = journey.arrival;
            }
        } else {
            if first && span.sunrise.instant < journey.departure {
                sunrise = None;
                effective_sunrise = journey.departure;
            }
            if first && noon.instant < journey.departure {
                noon.instant = journey.departure;
            }
            if last && span.sunset.instant > journey.arrival {
                sunset = None;
                effective_sunset = journey.arrival;
            }
            if last && noon.instant > journey.arrival {
                noon.instant = journey.arrival;
            }
        }

        let is_before_noon = if first || last {
            classify_against_noon(
                noon.instant,
                effective_sunrise,
                effective_sunset,
                journey.departure,
                journey.arrival,
            )
        } else {
            None
        };

        segments.push(Segment {
            sunrise,
            sunset,
            solar_noon: noon,
            north_to_south: span.north_to_south,
            is_before_noon,
        });
    }

    segments
}

/// Before-noon classification of a boundary segment.
///
/// Noon past both bounds (or pinned to the arrival) means the whole segment
/// happens in the morning; noon before both bounds (or pinned to the
/// departure) means afternoon; anything else truly straddles noon.
fn classify_against_noon(
    noon: DateTime<Utc>,
    sunrise: DateTime<Utc>,
    sunset: DateTime<Utc>,
    departure: DateTime<Utc>,
    arrival: DateTime<Utc>,
) -> Option<bool> {
    if (noon > sunrise && noon > sunset) || noon == arrival {
        Some(true)
    } else if (noon < sunrise && noon < sunset) || noon == departure {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::solar::SolarCalculator;

    fn utc(day: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, h, m, 0).unwrap()
    }

    fn journey(dep: DateTime<Utc>, arr: DateTime<Utc>) -> Journey {
        Journey::new(
            Coordinate::new(40.0, -3.0),
            Coordinate::new(41.0, 2.0),
            dep,
            arr,
        )
        .unwrap()
    }

    fn event(kind: CrossingKind, instant: DateTime<Utc>, fraction: f64) -> CrossingEvent {
        CrossingEvent {
            kind,
            instant,
            coord: Coordinate::new(40.5, -0.5),
            fraction,
        }
    }

    #[test]
    fn zero_crossings_synthesize_one_full_segment() {
        let j = journey(utc(1, 4, 0), utc(1, 20, 0));
        let raw = synthesize_segments(&j, &SolarCalculator, Vec::new()).unwrap();
        assert_eq!(raw.len(), 1);

        let segments = adapt_segments(&j, raw);
        let seg = &segments[0];
        // Both astronomical bounds fall inside this journey, so neither is
        // clipped away.
        assert!(seg.sunrise.is_some());
        assert!(seg.sunset.is_some());
        let sunrise = seg.sunrise.unwrap().instant;
        let sunset = seg.sunset.unwrap().instant;
        assert!(sunrise < seg.solar_noon.instant && seg.solar_noon.instant < sunset);
        assert_eq!(seg.is_before_noon, None, "segment straddles noon");
    }

    #[test]
    fn leading_sunset_gets_spliced_sunrise() {
        // Journey departs mid-morning and ends after dark: one real sunset
        let j = journey(utc(1, 10, 0), utc(1, 22, 0));
        let events = vec![event(CrossingKind::Sunset, utc(1, 19, 20), 0.78)];
        let raw = synthesize_segments(&j, &SolarCalculator, events).unwrap();
        assert_eq!(raw.len(), 1);

        let segments = adapt_segments(&j, raw);
        let seg = &segments[0];
        // The spliced sunrise predates the 10:00 departure and is clipped away
        assert!(seg.sunrise.is_none(), "daylight already in progress at departure");
        assert!(seg.sunset.is_some());
    }

    #[test]
    fn alternation_violation_is_fatal() {
        let j = journey(utc(1, 4, 0), utc(1, 20, 0));
        let events = vec![
            event(CrossingKind::Sunrise, utc(1, 4, 45), 0.05),
            event(CrossingKind::Sunrise, utc(1, 5, 0), 0.06),
            event(CrossingKind::Sunset, utc(1, 19, 20), 0.95),
        ];
        // sunrise, sunrise, sunset, spliced sunset -> pairs break
        assert!(synthesize_segments(&j, &SolarCalculator, events).is_err());
    }

    #[test]
    fn interior_segments_are_never_classified() {
        let j = journey(utc(1, 6, 0), utc(3, 6, 0));
        let events = vec![
            event(CrossingKind::Sunset, utc(1, 19, 0), 0.27),
            event(CrossingKind::Sunrise, utc(2, 4, 0), 0.46),
            event(CrossingKind::Sunset, utc(2, 19, 0), 0.77),
            event(CrossingKind::Sunrise, utc(3, 4, 0), 0.92),
        ];
        let raw = synthesize_segments(&j, &SolarCalculator, events).unwrap();
        assert_eq!(raw.len(), 3);

        let segments = adapt_segments(&j, raw);
        assert!(segments[0].sunrise.is_none(), "started mid-daylight");
        assert_eq!(segments[1].is_before_noon, None);
        assert!(segments[1].sunrise.is_some() && segments[1].sunset.is_some());
        assert!(segments[2].sunset.is_none(), "still daylight at arrival");
        // chronological order
        assert!(segments[0].solar_noon.instant < segments[1].solar_noon.instant);
        assert!(segments[1].solar_noon.instant < segments[2].solar_noon.instant);
    }

    #[test]
    fn afternoon_boarding_is_classified_after_noon() {
        // Departure at 15:00: spliced sunrise clipped to departure, leaving
        // noon before the whole effective span
        let j = journey(utc(1, 15, 0), utc(1, 22, 0));
        let events = vec![event(CrossingKind::Sunset, utc(1, 19, 20), 0.62)];
        let raw = synthesize_segments(&j, &SolarCalculator, events).unwrap();
        let segments = adapt_segments(&j, raw);
        assert_eq!(segments[0].is_before_noon, Some(false));
    }
}
