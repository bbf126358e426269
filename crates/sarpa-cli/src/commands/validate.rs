use crate::support::load_raw_report_or_exit;
use sarpa_geo::{Location, UnresolvedReason};
use sarpa_report::validate;
use serde_json::json;

pub fn run(input: String, json_output: bool) {
    let raw = load_raw_report_or_exit(&input);
    // Validation never looks at the location; a placeholder keeps this
    // command free of any coordinate arguments.
    let location = Location::unresolved(UnresolvedReason::Unsupported);

    match validate(&raw, location) {
        Ok(report) => {
            if json_output {
                let fingerprint = report.fingerprint();
                let payload = json!({
                    "valid": true,
                    "report": report,
                    "fingerprint": fingerprint,
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&payload).expect("json serialization")
                );
            } else {
                println!("report is valid");
                println!("  Victim: {} (age {})", report.victim_name, report.age);
                println!("  Time of bite: {}", report.time_of_bite);
                if let Some(symptoms) = &report.symptoms {
                    println!("  Symptoms: {symptoms}");
                }
                if let Some(detail) = &report.location_detail {
                    println!("  Location detail: {detail}");
                }
                println!("  Fingerprint: {}", report.fingerprint());
            }
        }
        Err(error) => {
            if json_output {
                let payload = json!({
                    "valid": false,
                    "issues": error.issues,
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&payload).expect("json serialization")
                );
            } else {
                println!("report is invalid ({} field(s)):", error.issues.len());
                for issue in &error.issues {
                    println!("  {}: {}", issue.field, issue.message);
                }
            }
            std::process::exit(1);
        }
    }
}
