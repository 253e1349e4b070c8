//! Presentation layer: render a planned journey as terminal output.
//!
//! One overview block, then one card per daylight segment. When local
//! timezones are active, every displayed time is shifted by the difference
//! between its anchor's UTC offset and the reference offset of the first
//! segment, so a reader following the trip sees wall-clock times that match
//! the places the sun events happen at.

use chrono::{DateTime, Duration, Utc};

use crate::journey::{Journey, JourneyPlan};
use crate::seat::SeatPlan;
use crate::segments::{Segment, SolarAnchor};

/// Human-readable endpoint names for the overview block.
pub struct JourneyLabels {
    pub origin: String,
    pub destination: String,
}

/// Render the complete plan for a journey.
pub fn render_plan(journey: &Journey, plan: &JourneyPlan, labels: &JourneyLabels) {
    log_block_start!("Journey overview");
    log_indented!("Departure: {}", stamp(journey.departure));
    log_indented!("Arrival:   {}", stamp(journey.arrival));
    log_indented!("Origin:      {}", labels.origin);
    log_indented!("Destination: {}", labels.destination);

    if plan.is_night {
        log_block_start!("🌙 The whole journey happens at night 🌙");
        log_indented!("No sunny side to pick; sit wherever you like.");
        return;
    }

    let reference_offset = reference_offset(&plan.segments);
    let total = plan.segments.len();

    for (index, (segment, seat_plan)) in
        plan.segments.iter().zip(plan.seat_plans.iter()).enumerate()
    {
        render_segment(journey, segment, seat_plan, index, total, reference_offset);
    }
}

/// The first segment's sunrise offset anchors the displayed clock.
fn reference_offset(segments: &[Segment]) -> f64 {
    segments
        .first()
        .and_then(|segment| {
            segment
                .sunrise
                .and_then(|anchor| anchor.utc_offset_hours)
                .or(segment.solar_noon.utc_offset_hours)
        })
        .unwrap_or(0.0)
}

fn render_segment(
    journey: &Journey,
    segment: &Segment,
    seat_plan: &SeatPlan,
    index: usize,
    total: usize,
    reference_offset: f64,
) {
    let noon = shifted(&segment.solar_noon, reference_offset);
    // a clipped bound means the journey endpoint is the visible edge
    let start = segment
        .sunrise
        .as_ref()
        .map(|anchor| shifted(anchor, reference_offset))
        .unwrap_or(journey.departure);
    let end = segment
        .sunset
        .as_ref()
        .map(|anchor| shifted(anchor, reference_offset))
        .unwrap_or(journey.arrival);

    let day = start.format("%-d/%-m/%Y");
    if total > 1 {
        log_block_start!("Day {day}, leg ({}/{})", index + 1, total);
    } else {
        log_block_start!("Day {day}");
    }

    let marker = if journey.prefer_sun { "☀️" } else { "⛅" };
    match seat_plan {
        SeatPlan::SwitchAtNoon { morning, afternoon } => {
            log_indented!(
                "Sit on the {morning} side from {} to {},",
                clock(start),
                clock(noon)
            );
            log_indented!(
                "then on the {afternoon} side from {} to {} {marker}",
                clock(noon),
                clock(end)
            );
        }
        SeatPlan::Whole(side) if segment.is_before_noon.is_some() => {
            log_indented!("Sit on the {side} side for the whole leg {marker}");
        }
        SeatPlan::Whole(side) => {
            log_indented!(
                "Sit on the {side} side from {} to {} {marker}",
                clock(start),
                clock(end)
            );
        }
    }
}

/// Shift an anchor's instant into the displayed clock.
fn shifted(anchor: &SolarAnchor, reference_offset: f64) -> DateTime<Utc> {
    match anchor.utc_offset_hours {
        Some(offset) if offset != reference_offset => {
            let delta_ms = ((offset - reference_offset) * 3_600_000.0).round() as i64;
            anchor.instant + Duration::milliseconds(delta_ms)
        }
        _ => anchor.instant,
    }
}

fn clock(instant: DateTime<Utc>) -> String {
    instant.format("%H:%M").to_string()
}

fn stamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use chrono::TimeZone;

    fn anchor(hour: u32, offset: Option<f64>) -> SolarAnchor {
        SolarAnchor {
            instant: Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap(),
            coord: Coordinate::new(40.0, -3.0),
            utc_offset_hours: offset,
        }
    }

    #[test]
    fn unannotated_anchor_is_not_shifted() {
        let a = anchor(12, None);
        assert_eq!(shifted(&a, 2.0), a.instant);
    }

    #[test]
    fn matching_offset_is_not_shifted() {
        let a = anchor(12, Some(2.0));
        assert_eq!(shifted(&a, 2.0), a.instant);
    }

    #[test]
    fn offset_difference_shifts_the_clock() {
        let a = anchor(12, Some(5.5));
        let shifted = shifted(&a, 2.0);
        assert_eq!(shifted - a.instant, Duration::minutes(210));
    }

    #[test]
    fn reference_offset_prefers_the_first_sunrise() {
        let segment = Segment {
            sunrise: Some(anchor(5, Some(1.0))),
            sunset: Some(anchor(19, Some(3.0))),
            solar_noon: anchor(12, Some(2.0)),
            north_to_south: true,
            is_before_noon: None,
        };
        assert_eq!(reference_offset(&[segment]), 1.0);
    }

    #[test]
    fn reference_offset_falls_back_to_noon_then_zero() {
        let mut segment = Segment {
            sunrise: None,
            sunset: Some(anchor(19, Some(3.0))),
            solar_noon: anchor(12, Some(2.0)),
            north_to_south: true,
            is_before_noon: None,
        };
        assert_eq!(reference_offset(&[segment]), 2.0);
        segment.solar_noon.utc_offset_hours = None;
        assert_eq!(reference_offset(&[segment]), 0.0);
    }

    #[test]
    fn clock_renders_zero_padded() {
        assert_eq!(clock(Utc.with_ymd_and_hms(2024, 6, 1, 7, 5, 0).unwrap()), "07:05");
    }
}
