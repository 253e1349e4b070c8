//! Seat-side decision function.
//!
//! Which side of the vehicle faces the sun flips with each of three facts:
//! whether the segment happens before solar noon, whether the vehicle heads
//! north-to-south, and whether the traveler wants the sun at all. The rule
//! is a parity count: start on the left, flip once per `false`.

use crate::segments::Segment;

/// Lateral side relative to the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatSide {
    Left,
    Right,
}

impl SeatSide {
    fn flip(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl std::fmt::Display for SeatSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Recommendation for one daylight segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatPlan {
    /// One side for the entire segment.
    Whole(SeatSide),
    /// The segment straddles solar noon and the traveler can move.
    SwitchAtNoon { morning: SeatSide, afternoon: SeatSide },
}

/// The core decision rule: left, flipped once for each `false` input.
///
/// An odd number of `false` values among the three lands on the right.
pub fn recommend_side(before_noon: bool, north_to_south: bool, prefer_sun: bool) -> SeatSide {
    let mut side = SeatSide::Left;
    if !before_noon {
        side = side.flip();
    }
    if !prefer_sun {
        side = side.flip();
    }
    if !north_to_south {
        side = side.flip();
    }
    side
}

/// Decide the seat plan for one segment.
///
/// Segments entirely before or after noon get a single side. A straddling
/// segment splits at solar noon when seat changes are allowed; otherwise a
/// single side is picked: an absent sunrise makes it an afternoon ride, an
/// absent sunset a morning one, and with both bounds present the longer of
/// the morning and afternoon spans wins.
pub fn plan_for_segment(segment: &Segment, seat_change_allowed: bool, prefer_sun: bool) -> SeatPlan {
    let nas = segment.north_to_south;

    if let Some(before_noon) = segment.is_before_noon {
        return SeatPlan::Whole(recommend_side(before_noon, nas, prefer_sun));
    }

    if seat_change_allowed {
        // degenerate morning span collapses to the afternoon side
        let morning_exists = segment
            .sunrise
            .is_none_or(|sunrise| sunrise.instant < segment.solar_noon.instant);
        if morning_exists {
            return SeatPlan::SwitchAtNoon {
                morning: recommend_side(true, nas, prefer_sun),
                afternoon: recommend_side(false, nas, prefer_sun),
            };
        }
        return SeatPlan::Whole(recommend_side(false, nas, prefer_sun));
    }

    match (segment.sunrise, segment.sunset) {
        (None, _) => SeatPlan::Whole(recommend_side(false, nas, prefer_sun)),
        (_, None) => SeatPlan::Whole(recommend_side(true, nas, prefer_sun)),
        (Some(sunrise), Some(sunset)) => {
            let morning = segment.solar_noon.instant - sunrise.instant;
            let afternoon = sunset.instant - segment.solar_noon.instant;
            SeatPlan::Whole(recommend_side(morning >= afternoon, nas, prefer_sun))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::segments::SolarAnchor;
    use chrono::{TimeZone, Utc};

    #[test]
    fn base_case_is_left() {
        assert_eq!(recommend_side(true, true, true), SeatSide::Left);
    }

    #[test]
    fn any_single_flip_lands_right() {
        assert_eq!(recommend_side(false, true, true), SeatSide::Right);
        assert_eq!(recommend_side(true, false, true), SeatSide::Right);
        assert_eq!(recommend_side(true, true, false), SeatSide::Right);
    }

    #[test]
    fn double_flips_return_left() {
        assert_eq!(recommend_side(false, false, true), SeatSide::Left);
        assert_eq!(recommend_side(false, true, false), SeatSide::Left);
        assert_eq!(recommend_side(true, false, false), SeatSide::Left);
    }

    #[test]
    fn triple_flip_is_right() {
        assert_eq!(recommend_side(false, false, false), SeatSide::Right);
    }

    fn anchor(h: u32) -> SolarAnchor {
        SolarAnchor {
            instant: Utc.with_ymd_and_hms(2024, 6, 1, h, 0, 0).unwrap(),
            coord: Coordinate::new(40.0, -3.0),
            utc_offset_hours: None,
        }
    }

    fn straddling_segment() -> Segment {
        Segment {
            sunrise: Some(anchor(5)),
            sunset: Some(anchor(19)),
            solar_noon: anchor(12),
            north_to_south: true,
            is_before_noon: None,
        }
    }

    #[test]
    fn straddle_with_seat_change_splits_at_noon() {
        let plan = plan_for_segment(&straddling_segment(), true, true);
        assert_eq!(
            plan,
            SeatPlan::SwitchAtNoon {
                morning: SeatSide::Left,
                afternoon: SeatSide::Right,
            }
        );
    }

    #[test]
    fn straddle_without_seat_change_takes_longer_span() {
        let mut segment = straddling_segment();
        // morning 07:00, afternoon 07:00: tie goes to the morning side
        assert_eq!(
            plan_for_segment(&segment, false, true),
            SeatPlan::Whole(SeatSide::Left)
        );
        // afternoon longer: 05:00 -> 10:00 -> 19:00
        segment.solar_noon = anchor(10);
        assert_eq!(
            plan_for_segment(&segment, false, true),
            SeatPlan::Whole(SeatSide::Right)
        );
    }

    #[test]
    fn missing_bounds_decide_the_side() {
        let mut segment = straddling_segment();
        segment.sunrise = None;
        // afternoon ride
        assert_eq!(
            plan_for_segment(&segment, false, true),
            SeatPlan::Whole(SeatSide::Right)
        );

        let mut segment = straddling_segment();
        segment.sunset = None;
        // morning ride
        assert_eq!(
            plan_for_segment(&segment, false, true),
            SeatPlan::Whole(SeatSide::Left)
        );
    }

    #[test]
    fn classified_segment_is_a_single_side() {
        let mut segment = straddling_segment();
        segment.is_before_noon = Some(false);
        assert_eq!(
            plan_for_segment(&segment, true, true),
            SeatPlan::Whole(SeatSide::Right)
        );
    }
}
