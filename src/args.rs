//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. It supports the standard help,
//! version, and debug flags while gracefully handling unknown options.

use crate::geo::Coordinate;

/// Endpoint of a journey as given on the command line.
///
/// Either a place name to geocode (with an optional country to disambiguate)
/// or an exact coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointArg {
    Place { name: String, country: Option<String> },
    Coordinate(Coordinate),
}

/// Settings for a normal planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunArgs {
    pub from: EndpointArg,
    pub to: EndpointArg,
    /// RFC 3339 departure time, parsed later so errors carry context.
    pub depart: String,
    /// RFC 3339 arrival time.
    pub arrive: String,
    pub prefer_shade: bool,
    pub fixed_seat: bool,
    pub local_times: bool,
    pub debug_enabled: bool,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Plan a journey with these settings
    Run(Box<RunArgs>),
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse the process arguments.
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }

    /// Parse command-line arguments into a structured result.
    ///
    /// This function processes the arguments and determines what action should
    /// be taken, including whether to show help, version info, or run normally.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    ///
    /// # Returns
    /// ParsedArgs containing the determined action
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut from_place: Option<String> = None;
        let mut from_country: Option<String> = None;
        let mut to_place: Option<String> = None;
        let mut to_country: Option<String> = None;
        let mut from_coord: Option<Coordinate> = None;
        let mut to_coord: Option<Coordinate> = None;
        let mut depart: Option<String> = None;
        let mut arrive: Option<String> = None;
        let mut prefer_shade = false;
        let mut fixed_seat = false;
        let mut local_times = false;
        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut invalid_arg_found = false;

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut idx = 0;
        while idx < args_vec.len() {
            let arg = args_vec[idx].as_str();
            // value-taking flags pull the next argument
            let mut take_value = || {
                idx += 1;
                match args_vec.get(idx) {
                    Some(value) if !value.starts_with("--") => Some(value.clone()),
                    _ => {
                        invalid_arg_found = true;
                        None
                    }
                }
            };
            match arg {
                "--from" => from_place = take_value(),
                "--from-country" => from_country = take_value(),
                "--to" => to_place = take_value(),
                "--to-country" => to_country = take_value(),
                "--from-coord" => {
                    from_coord = take_value().and_then(|v| parse_coordinate(&v));
                    invalid_arg_found |= from_coord.is_none();
                }
                "--to-coord" => {
                    to_coord = take_value().and_then(|v| parse_coordinate(&v));
                    invalid_arg_found |= to_coord.is_none();
                }
                "--depart" => depart = take_value(),
                "--arrive" => arrive = take_value(),
                "--prefer-shade" => prefer_shade = true,
                "--fixed-seat" => fixed_seat = true,
                "--local-times" => local_times = true,
                "-d" | "--debug" => debug_enabled = true,
                "-h" | "--help" => display_help = true,
                "-V" | "--version" => display_version = true,
                unknown => {
                    log_warning!("Unknown argument: {unknown}");
                    invalid_arg_found = true;
                }
            }
            idx += 1;
        }

        let action = if display_help {
            CliAction::ShowHelp
        } else if display_version {
            CliAction::ShowVersion
        } else if invalid_arg_found {
            CliAction::ShowHelpDueToError
        } else {
            match build_run_args(
                from_place,
                from_country,
                to_place,
                to_country,
                from_coord,
                to_coord,
                depart,
                arrive,
            ) {
                Some(mut run) => {
                    run.prefer_shade = prefer_shade;
                    run.fixed_seat = fixed_seat;
                    run.local_times = local_times;
                    run.debug_enabled = debug_enabled;
                    CliAction::Run(Box::new(run))
                }
                None => CliAction::ShowHelpDueToError,
            }
        };

        ParsedArgs { action }
    }
}

#[allow(clippy::too_many_arguments)]
fn build_run_args(
    from_place: Option<String>,
    from_country: Option<String>,
    to_place: Option<String>,
    to_country: Option<String>,
    from_coord: Option<Coordinate>,
    to_coord: Option<Coordinate>,
    depart: Option<String>,
    arrive: Option<String>,
) -> Option<RunArgs> {
    let from = endpoint(from_place, from_country, from_coord)?;
    let to = endpoint(to_place, to_country, to_coord)?;
    let (depart, arrive) = match (depart, arrive) {
        (Some(d), Some(a)) => (d, a),
        _ => {
            log_warning!("Both --depart and --arrive are required");
            return None;
        }
    };
    Some(RunArgs {
        from,
        to,
        depart,
        arrive,
        prefer_shade: false,
        fixed_seat: false,
        local_times: false,
        debug_enabled: false,
    })
}

fn endpoint(
    place: Option<String>,
    country: Option<String>,
    coord: Option<Coordinate>,
) -> Option<EndpointArg> {
    match (place, coord) {
        (Some(_), Some(_)) => {
            log_warning!("Give either a place name or a coordinate for each endpoint, not both");
            None
        }
        (Some(name), None) => Some(EndpointArg::Place { name, country }),
        (None, Some(coord)) => Some(EndpointArg::Coordinate(coord)),
        (None, None) => {
            log_warning!("Each endpoint needs --from/--to or --from-coord/--to-coord");
            None
        }
    }
}

/// Parse "LAT,LON" in decimal degrees.
fn parse_coordinate(value: &str) -> Option<Coordinate> {
    let (lat, lon) = value.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    Some(Coordinate::new(lat, lon))
}

/// Displays version information using logger methods.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("sunside [OPTIONS] --depart <rfc3339> --arrive <rfc3339>");
    log_block_start!("Endpoints (one form per endpoint):");
    log_indented!("--from <city>           Origin place name");
    log_indented!("--from-country <name>   Disambiguate the origin city");
    log_indented!("--from-coord <lat,lon>  Origin as decimal degrees");
    log_indented!("--to <city>             Destination place name");
    log_indented!("--to-country <name>     Disambiguate the destination city");
    log_indented!("--to-coord <lat,lon>    Destination as decimal degrees");
    log_block_start!("Options:");
    log_indented!("--prefer-shade          Recommend the shaded side instead of the sunny one");
    log_indented!("--fixed-seat            Never split a recommendation at solar noon");
    log_indented!("--local-times           Show sun events in the local time of their location");
    log_indented!("-d, --debug             Enable detailed debug output");
    log_indented!("-h, --help              Print help information");
    log_indented!("-V, --version           Print version information");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        let mut full = vec!["sunside"];
        full.extend_from_slice(args);
        ParsedArgs::parse(full).action
    }

    #[test]
    fn full_place_run_parses() {
        let action = parse(&[
            "--from",
            "Madrid",
            "--from-country",
            "Spain",
            "--to",
            "Barcelona",
            "--to-country",
            "Spain",
            "--depart",
            "2024-06-01T04:00:00Z",
            "--arrive",
            "2024-06-01T20:00:00Z",
        ]);
        let CliAction::Run(run) = action else {
            panic!("expected a run action");
        };
        assert_eq!(
            run.from,
            EndpointArg::Place {
                name: "Madrid".into(),
                country: Some("Spain".into()),
            }
        );
        assert!(!run.prefer_shade);
        assert!(!run.debug_enabled);
    }

    #[test]
    fn coordinate_endpoints_parse() {
        let action = parse(&[
            "--from-coord",
            "40.4168,-3.7038",
            "--to-coord",
            "41.3874,2.1686",
            "--depart",
            "2024-06-01T04:00:00Z",
            "--arrive",
            "2024-06-01T20:00:00Z",
            "--prefer-shade",
        ]);
        let CliAction::Run(run) = action else {
            panic!("expected a run action");
        };
        assert_eq!(run.from, EndpointArg::Coordinate(Coordinate::new(40.4168, -3.7038)));
        assert!(run.prefer_shade);
    }

    #[test]
    fn help_takes_precedence() {
        assert_eq!(parse(&["--help", "--from", "Madrid"]), CliAction::ShowHelp);
    }

    #[test]
    fn version_flag_is_recognized() {
        assert_eq!(parse(&["--version"]), CliAction::ShowVersion);
    }

    #[test]
    fn unknown_argument_shows_help() {
        assert_eq!(parse(&["--frmo", "Madrid"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn missing_times_show_help() {
        let action = parse(&["--from-coord", "40.0,-3.0", "--to-coord", "41.0,2.0"]);
        assert_eq!(action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn malformed_coordinate_shows_help() {
        let action = parse(&[
            "--from-coord",
            "forty,minus-three",
            "--to-coord",
            "41.0,2.0",
            "--depart",
            "2024-06-01T04:00:00Z",
            "--arrive",
            "2024-06-01T20:00:00Z",
        ]);
        assert_eq!(action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn endpoint_cannot_be_both_place_and_coordinate() {
        let action = parse(&[
            "--from",
            "Madrid",
            "--from-coord",
            "40.0,-3.0",
            "--to",
            "Barcelona",
            "--depart",
            "2024-06-01T04:00:00Z",
            "--arrive",
            "2024-06-01T20:00:00Z",
        ]);
        assert_eq!(action, CliAction::ShowHelpDueToError);
    }
}
