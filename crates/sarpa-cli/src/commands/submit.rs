use crate::support::{
    load_config_or_exit, load_raw_report_or_exit, location_from_args_or_exit,
    seed_directory_or_exit,
};
use sarpa_dispatch::{IncidentSubmissionService, RankedResponder};
use serde_json::json;
use std::sync::Arc;

pub struct Args {
    pub input: String,
    pub roster: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub accuracy: Option<f64>,
    pub config: String,
    pub json: bool,
}

pub fn run(args: Args) {
    let raw = load_raw_report_or_exit(&args.input);
    let config = load_config_or_exit(&args.config);
    let directory = Arc::new(seed_directory_or_exit(&args.roster));
    let location = location_from_args_or_exit(args.lat, args.lon, args.accuracy);

    let service = IncidentSubmissionService::new(directory, config.match_config());
    match service.submit(&raw, location) {
        Ok(result) => {
            if args.json {
                let payload = json!({
                    "incident_ref": result.incident_ref(),
                    "result": result,
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&payload).expect("json serialization")
                );
            } else {
                println!("incident recorded: {}", result.incident_ref());
                println!(
                    "  Location: {}",
                    match result.report.location.coordinates() {
                        Some(coords) => format!("{:.6}, {:.6}", coords.latitude, coords.longitude),
                        None => "unresolved".to_string(),
                    }
                );
                print_pool("Hospitals", &result.hospitals);
                print_pool("Handlers", &result.handlers);
            }
        }
        Err(error) => {
            if args.json {
                let payload = json!({
                    "submitted": false,
                    "issues": error.issues,
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&payload).expect("json serialization")
                );
            } else {
                eprintln!("error: {error}");
            }
            std::process::exit(1);
        }
    }
}

fn print_pool(label: &str, ranked: &[RankedResponder]) {
    println!("  {label}: {}", ranked.len());
    for entry in ranked {
        let distance = match entry.distance_km {
            Some(km) => format!("{km:.1} km"),
            None => "distance unknown".to_string(),
        };
        println!(
            "    {} {} ({})",
            entry.responder.name, entry.responder.phone, distance
        );
    }
}
