//! # Sunside Library
//!
//! Internal library for the Sunside binary application
//!
//! This library exists to enable testing of the planning internals and to keep
//! CLI dispatch (main.rs) separate from application logic.
//!
//! ## Architecture
//!
//! The library is organized into several layers:
//!
//! - **Journey Pipeline**: `journey` validates a trip and orchestrates the
//!   solver, the segment synthesizer/adapter, and the seat planner
//! - **Solar Core**: `solar` computes per-day sun events, `solver` hunts the
//!   instants where the moving vehicle crosses day/night boundaries
//! - **Geometry**: `geo` holds the great-circle math on the spherical Earth
//! - **Decisions**: `segments` shapes crossings into daylight spans, `seat`
//!   picks the side of the vehicle for each span
//! - **Collaborators**: `geocode` resolves place names offline, `timezone`
//!   resolves UTC offsets from coordinates
//! - **Infrastructure**: configuration, argument parsing, logging, and the
//!   terminal presentation layer

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

// Public API modules
pub mod args;
pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod journey;
pub mod seat;
pub mod segments;
pub mod solar;
pub mod solver;
pub mod timezone;

// Re-export for binary and integration tests
pub use error::{ErrorClass, SunsideError};
pub use geo::Coordinate;
pub use journey::{
    Journey, JourneyPlan, plan_journey, plan_journey_detailed, plan_journey_with_offsets,
};
pub use seat::{SeatPlan, SeatSide};
pub use segments::Segment;
pub use solar::{DayInfo, DaylightOracle, SolarCalculator};
