//! Incident submission: the one public operation of the core.
//!
//! `submit` validates, allocates a collision-free incident id, and ranks
//! both responder pools against one directory snapshot. Validation
//! failure is the only error path; everything after a valid report
//! degrades instead of failing; an empty or stale roster must never
//! leave an emergency unrecorded.

use crate::directory::ResponderDirectory;
use crate::matcher::{MatchConfig, RankedResponder, rank};
use crate::responder::ResponderKind;
use chrono::{DateTime, Utc};
use sarpa_geo::Location;
use sarpa_report::{Fingerprint, RawReport, Report, ValidationError, validate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// The durable record of one submission.
///
/// Immutable once assembled; this is what the surrounding system
/// persists, logs, and renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResult {
    pub incident_id: u64,
    pub report: Report,
    pub fingerprint: Fingerprint,
    pub submitted_at: DateTime<Utc>,
    pub handlers: Vec<RankedResponder>,
    pub hospitals: Vec<RankedResponder>,
}

impl DispatchResult {
    /// Human-readable incident reference, e.g. `EMR-17`.
    pub fn incident_ref(&self) -> String {
        format!("EMR-{}", self.incident_id)
    }
}

/// Orchestrates validation, id allocation, and matching.
///
/// The incident counter is the single piece of shared mutable state in
/// the core; ids are unique and strictly increasing across concurrent
/// submissions.
#[derive(Debug)]
pub struct IncidentSubmissionService {
    directory: Arc<ResponderDirectory>,
    match_config: MatchConfig,
    next_incident_id: AtomicU64,
}

impl IncidentSubmissionService {
    pub fn new(directory: Arc<ResponderDirectory>, match_config: MatchConfig) -> Self {
        Self {
            directory,
            match_config,
            next_incident_id: AtomicU64::new(1),
        }
    }

    /// Submit a raw report with the location acquired upstream.
    ///
    /// Fail-fast on validation: no incident id is allocated and the
    /// directory is never touched for an invalid report.
    pub fn submit(
        &self,
        raw: &RawReport,
        location: Location,
    ) -> Result<DispatchResult, ValidationError> {
        let report = validate(raw, location)?;
        let incident_id = self.next_incident_id.fetch_add(1, Ordering::Relaxed);

        let snapshot = self.directory.snapshot();
        let handlers = rank(
            &report.location,
            ResponderKind::Handler,
            &snapshot,
            &self.match_config,
        );
        let hospitals = rank(
            &report.location,
            ResponderKind::Hospital,
            &snapshot,
            &self.match_config,
        );

        tracing::info!(
            incident_id,
            report_id = %report.id,
            resolved = report.location.is_resolved(),
            handlers = handlers.len(),
            hospitals = hospitals.len(),
            "incident submitted"
        );

        Ok(DispatchResult {
            incident_id,
            fingerprint: report.fingerprint(),
            submitted_at: Utc::now(),
            report,
            handlers,
            hospitals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::{Capability, Responder, ResponderStatus};
    use sarpa_geo::{Coordinates, UnresolvedReason};
    use std::sync::Barrier;
    use std::thread;

    const ORIGIN_LAT: f64 = 12.9716;
    const ORIGIN_LON: f64 = 77.5946;

    fn asha_form() -> RawReport {
        RawReport {
            victim_name: "Asha".to_string(),
            age: "34".to_string(),
            time_of_bite: "just-now".to_string(),
            symptoms: String::new(),
            location: String::new(),
        }
    }

    fn origin() -> Location {
        Location::Resolved(
            Coordinates::new(ORIGIN_LAT, ORIGIN_LON).expect("origin should build"),
        )
    }

    fn seeded_directory() -> Arc<ResponderDirectory> {
        let directory = Arc::new(ResponderDirectory::new());
        // One available handler ~0.8 km north, one available hospital ~2.5 km north.
        directory
            .upsert(
                Responder::new(
                    "snk-1",
                    "Emergency Snake Response",
                    "+91-9876543210",
                    Coordinates::new(ORIGIN_LAT + 0.8 / 111.2, ORIGIN_LON)
                        .expect("handler position should build"),
                    ResponderStatus::Available,
                    Capability::BiteRescue,
                    ResponderKind::Handler,
                )
                .expect("handler should build"),
            )
            .expect("handler upsert should succeed");
        directory
            .upsert(
                Responder::new(
                    "hosp-1",
                    "Victoria Hospital Emergency",
                    "+91-80-2670 0447",
                    Coordinates::new(ORIGIN_LAT + 2.5 / 111.2, ORIGIN_LON)
                        .expect("hospital position should build"),
                    ResponderStatus::Available,
                    Capability::EmergencyCare,
                    ResponderKind::Hospital,
                )
                .expect("hospital should build"),
            )
            .expect("hospital upsert should succeed");
        directory
    }

    #[test]
    fn end_to_end_example_submission() {
        let service = IncidentSubmissionService::new(seeded_directory(), MatchConfig::default());
        let result = service
            .submit(&asha_form(), origin())
            .expect("valid submission should succeed");

        assert_eq!(result.incident_id, 1);
        assert_eq!(result.incident_ref(), "EMR-1");
        assert_eq!(result.report.victim_name, "Asha");
        assert_eq!(result.report.age, 34);

        assert_eq!(result.handlers.len(), 1);
        assert_eq!(result.handlers[0].responder.id, "snk-1");
        let handler_km = result.handlers[0]
            .distance_km
            .expect("handler distance should be known");
        assert!((handler_km - 0.8).abs() < 0.05, "got {handler_km} km");

        assert_eq!(result.hospitals.len(), 1);
        assert_eq!(result.hospitals[0].responder.id, "hosp-1");
        let hospital_km = result.hospitals[0]
            .distance_km
            .expect("hospital distance should be known");
        assert!((hospital_km - 2.5).abs() < 0.05, "got {hospital_km} km");
    }

    #[test]
    fn invalid_report_allocates_no_incident_id() {
        let service = IncidentSubmissionService::new(seeded_directory(), MatchConfig::default());
        let bad = RawReport::default();
        service
            .submit(&bad, origin())
            .expect_err("empty form must fail validation");

        // The failed attempt must not have consumed an id.
        let result = service
            .submit(&asha_form(), origin())
            .expect("valid submission should succeed");
        assert_eq!(result.incident_id, 1);
    }

    #[test]
    fn empty_directory_still_records_the_incident() {
        let service = IncidentSubmissionService::new(
            Arc::new(ResponderDirectory::new()),
            MatchConfig::default(),
        );
        let result = service
            .submit(&asha_form(), Location::unresolved(UnresolvedReason::Timeout))
            .expect("submission must not depend on the roster");
        assert!(result.handlers.is_empty());
        assert!(result.hospitals.is_empty());
        assert_eq!(result.incident_id, 1);
    }

    #[test]
    fn concurrent_submissions_get_unique_ids() {
        let service = Arc::new(IncidentSubmissionService::new(
            seeded_directory(),
            MatchConfig::default(),
        ));
        let n = 16;
        let barrier = Arc::new(Barrier::new(n));

        let handles: Vec<_> = (0..n)
            .map(|_| {
                let service = Arc::clone(&service);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    service
                        .submit(&asha_form(), origin())
                        .expect("concurrent submission should succeed")
                        .incident_id
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .map(|h| h.join().expect("submission thread should finish"))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), n, "every submission must get a distinct id");
    }
}
