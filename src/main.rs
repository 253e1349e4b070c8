//! Main application entry point and high-level flow coordination.
//!
//! This module orchestrates the overall application lifecycle after
//! command-line argument parsing is complete. It coordinates between modules:
//!
//! - `args`: Command-line argument parsing and help/version display
//! - `config`: Configuration loading and validation
//! - `geocode`/`timezone`: Offline lookups for place names and UTC offsets
//! - `journey`: Validation and the planning pipeline
//! - `display`: Terminal rendering of the finished plan
//! - `logger`: Centralized logging functionality
//!
//! The flow is a single pass: resolve endpoints, validate the journey, plan
//! it, render the plan. Every failure surfaces through the logger before a
//! non-zero exit.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use sunside::args::{self, CliAction, EndpointArg, ParsedArgs, RunArgs};
use sunside::config::Config;
use sunside::display::{JourneyLabels, render_plan};
use sunside::geocode::{CityGeocoder, Geocoder};
use sunside::journey::{Journey, plan_journey_detailed};
use sunside::solar::SolarCalculator;
use sunside::timezone::CoordinateTimezones;
use sunside::{
    Coordinate, log_block_start, log_debug, log_end, log_error, log_pipe, log_version,
};

fn main() {
    let parsed_args = ParsedArgs::from_env();

    let result = match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp | CliAction::ShowHelpDueToError => {
            args::display_help();
            Ok(())
        }
        CliAction::Run(run_args) => run(*run_args),
    };

    if let Err(err) = result {
        log_pipe!();
        log_error!("{err:#}");
        log_end!();
        std::process::exit(1);
    }
}

/// Plan one journey end to end and render the result.
fn run(args: RunArgs) -> Result<()> {
    log_version!();

    if args.debug_enabled {
        log_pipe!();
        log_debug!("Debug mode enabled - showing planning diagnostics");
    }

    let config = Config::load()?;

    let geocoder = CityGeocoder;
    let (start, origin_label) = resolve_endpoint(&geocoder, &args.from)?;
    let (end, destination_label) = resolve_endpoint(&geocoder, &args.to)?;

    let departure = parse_instant(&args.depart).context("Invalid --depart time")?;
    let arrival = parse_instant(&args.arrive).context("Invalid --arrive time")?;

    // CLI flags only tighten the configured preferences
    let prefer_sun = config.prefer_sun && !args.prefer_shade;
    let seat_change_allowed = config.seat_change_allowed && !args.fixed_seat;
    let use_local_timezones = config.use_local_timezones || args.local_times;

    let journey = Journey::new(start, end, departure, arrival)?.with_preferences(
        seat_change_allowed,
        prefer_sun,
        use_local_timezones,
    );

    if args.debug_enabled {
        log_block_start!("Journey accepted");
        log_debug!("{} -> {}", journey.start, journey.end);
        log_debug!("Duration: {} minutes", journey.duration().num_minutes());
    }

    let oracle = SolarCalculator;
    let timezones = CoordinateTimezones;
    let plan = plan_journey_detailed(
        &journey,
        &oracle,
        Some(&timezones),
        config.tolerance_ms,
    )?;

    if args.debug_enabled {
        log_pipe!();
        log_debug!(
            "Solver spent {} iterations finding {} daylight segment(s)",
            plan.solver_iterations,
            plan.segments.len()
        );
    }

    render_plan(
        &journey,
        &plan,
        &JourneyLabels {
            origin: origin_label,
            destination: destination_label,
        },
    );
    log_end!();
    Ok(())
}

/// Turn a CLI endpoint into a coordinate and a label for the overview block.
fn resolve_endpoint(
    geocoder: &dyn Geocoder,
    endpoint: &EndpointArg,
) -> Result<(Coordinate, String)> {
    match endpoint {
        EndpointArg::Place { name, country } => {
            let country = country.as_deref().unwrap_or("");
            let coord = geocoder.resolve(name, country)?;
            let label = if country.is_empty() {
                name.clone()
            } else {
                format!("{name}, {country}")
            };
            Ok((coord, label))
        }
        EndpointArg::Coordinate(coord) => Ok((*coord, coord.to_string())),
    }
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("'{value}' is not an RFC 3339 timestamp"))?;
    Ok(parsed.with_timezone(&Utc))
}
