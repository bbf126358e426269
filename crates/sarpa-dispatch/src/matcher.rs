//! Dispatch ranking: availability first, proximity second.
//!
//! Ranking is a pure function of (location, kind, snapshot, config) and
//! is deterministic: within an availability tier, ascending distance,
//! ties broken by id. Re-running a match over the same snapshot always
//! yields the same order.

use crate::directory::DirectorySnapshot;
use crate::responder::{Responder, ResponderKind, ResponderStatus};
use sarpa_geo::{Location, haversine_km};
use serde::{Deserialize, Serialize};

/// Matcher tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Max responders returned per kind; `None` returns all.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One ranked dispatch candidate.
///
/// `distance_km` is `None` when the report location never resolved:
/// unknown distance, which is not the same claim as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResponder {
    pub responder: Responder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// Rank the snapshot's responders of one kind against a report location.
///
/// - Resolved location: OFFLINE responders are dropped; AVAILABLE ones
///   come before every BUSY one regardless of distance; within a tier,
///   ascending haversine distance, then id.
/// - Unresolved location: AVAILABLE responders only, in directory
///   insertion order, every distance unknown.
pub fn rank(
    location: &Location,
    kind: ResponderKind,
    snapshot: &DirectorySnapshot,
    config: &MatchConfig,
) -> Vec<RankedResponder> {
    let mut ranked: Vec<RankedResponder> = match location.coordinates() {
        None => snapshot
            .iter()
            .filter(|r| r.kind == kind && r.status == ResponderStatus::Available)
            .map(|r| RankedResponder {
                responder: r.clone(),
                distance_km: None,
            })
            .collect(),
        Some(origin) => {
            let mut candidates: Vec<RankedResponder> = snapshot
                .iter()
                .filter(|r| r.kind == kind && r.status != ResponderStatus::Offline)
                .map(|r| RankedResponder {
                    distance_km: Some(haversine_km(origin, &r.position)),
                    responder: r.clone(),
                })
                .collect();
            candidates.sort_by(|a, b| {
                availability_tier(a.responder.status)
                    .cmp(&availability_tier(b.responder.status))
                    .then_with(|| {
                        a.distance_km
                            .unwrap_or(f64::INFINITY)
                            .total_cmp(&b.distance_km.unwrap_or(f64::INFINITY))
                    })
                    .then_with(|| a.responder.id.cmp(&b.responder.id))
            });
            candidates
        }
    };

    if let Some(limit) = config.limit {
        ranked.truncate(limit);
    }
    ranked
}

/// Availability dominates proximity: a nearer but busy responder is less
/// useful in an emergency than a farther available one.
fn availability_tier(status: ResponderStatus) -> u8 {
    match status {
        ResponderStatus::Available => 0,
        ResponderStatus::Busy => 1,
        // Filtered out before ranking; ordered last if it ever leaks in.
        ResponderStatus::Offline => 2,
    }
}
