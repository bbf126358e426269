use sarpa_dispatch::{CoreConfig, ResponderDirectory, ResponderKind, seed_directory};
use sarpa_geo::{Coordinates, Location, UnresolvedReason};
use sarpa_report::RawReport;
use std::fs;

pub fn load_raw_report_or_exit(path: &str) -> RawReport {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: cannot read report {path}: {e}");
        std::process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("error: cannot parse report {path}: {e}");
        std::process::exit(1);
    })
}

pub fn load_config_or_exit(path: &str) -> CoreConfig {
    CoreConfig::load(path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn seed_directory_or_exit(path: &str) -> ResponderDirectory {
    let directory = ResponderDirectory::new();
    if let Err(e) = seed_directory(&directory, path) {
        eprintln!("error: cannot load roster {path}: {e}");
        std::process::exit(1);
    }
    directory
}

pub fn parse_kind_or_exit(raw: &str) -> ResponderKind {
    match raw {
        "handler" => ResponderKind::Handler,
        "hospital" => ResponderKind::Hospital,
        other => {
            eprintln!("error: kind must be handler or hospital (got {other:?})");
            std::process::exit(1);
        }
    }
}

/// Build a location from optional command-line coordinates.
///
/// Both or neither of --lat/--lon must be given; absent coordinates
/// become an explicit unresolved location (the CLI has no device).
pub fn location_from_args_or_exit(
    lat: Option<f64>,
    lon: Option<f64>,
    accuracy: Option<f64>,
) -> Location {
    match (lat, lon) {
        (None, None) => Location::unresolved(UnresolvedReason::Unsupported),
        (Some(lat), Some(lon)) => {
            let coords = Coordinates::new(lat, lon).unwrap_or_else(|e| {
                eprintln!("error: {e}");
                std::process::exit(1);
            });
            match accuracy {
                Some(meters) => Location::Resolved(coords.with_accuracy(meters)),
                None => Location::Resolved(coords),
            }
        }
        _ => {
            eprintln!("error: --lat and --lon must be given together");
            std::process::exit(1);
        }
    }
}
