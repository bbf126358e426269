use crate::support::{
    load_config_or_exit, location_from_args_or_exit, parse_kind_or_exit, seed_directory_or_exit,
};
use sarpa_dispatch::{MatchConfig, rank};
use serde_json::json;

pub struct Args {
    pub roster: String,
    pub kind: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub limit: Option<usize>,
    pub config: String,
    pub json: bool,
}

pub fn run(args: Args) {
    let kind = parse_kind_or_exit(&args.kind);
    let config = load_config_or_exit(&args.config);
    let directory = seed_directory_or_exit(&args.roster);
    let location = location_from_args_or_exit(args.lat, args.lon, None);

    let match_config = MatchConfig {
        limit: args.limit.or(config.match_config().limit),
    };
    let snapshot = directory.snapshot();
    let ranked = rank(&location, kind, &snapshot, &match_config);

    if args.json {
        let payload = json!({
            "kind": kind.to_string(),
            "location": location,
            "roster_size": snapshot.len(),
            "ranked": ranked,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!("sarpa rank --kind {kind} ({} candidate(s))", ranked.len());
        for (position, entry) in ranked.iter().enumerate() {
            let distance = match entry.distance_km {
                Some(km) => format!("{km:.1} km"),
                None => "distance unknown".to_string(),
            };
            println!(
                "  {}. {} [{}] {} ({})",
                position + 1,
                entry.responder.name,
                entry.responder.id,
                entry.responder.phone,
                distance
            );
        }
    }
}
