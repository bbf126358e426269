//! Responder records: the dispatchable handlers and hospitals.

use regex::Regex;
use sarpa_geo::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Whether a responder can take a dispatch right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponderStatus {
    Available,
    Busy,
    Offline,
}

/// What kind of emergency response a responder provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    BiteRescue,
    VenomTreatment,
    EmergencyCare,
}

/// The two dispatch pools. A submission ranks each kind independently:
/// a rescue needs both a handler and a medical facility, and the two
/// must not compete for the same slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponderKind {
    Handler,
    Hospital,
}

impl fmt::Display for ResponderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler => write!(f, "handler"),
            Self::Hospital => write!(f, "hospital"),
        }
    }
}

/// One dispatchable responder.
///
/// Seeded and refreshed by the external roster feed; read-only from the
/// matcher's perspective during a single match. The phone is held in
/// E.164 form; construct through `Responder::new` to get normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Responder {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub position: Coordinates,
    pub status: ResponderStatus,
    pub capability: Capability,
    pub kind: ResponderKind,
}

impl Responder {
    /// Build a responder, normalizing the phone to E.164.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        phone: &str,
        position: Coordinates,
        status: ResponderStatus,
        capability: Capability,
        kind: ResponderKind,
    ) -> Result<Self, PhoneError> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            phone: normalize_phone(phone)?,
            position,
            status,
            capability,
            kind,
        })
    }
}

static PHONE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{8,15}$").expect("phone pattern should compile"));

/// Normalize a phone number to E.164 (`+` followed by 8-15 digits).
///
/// Separators (spaces, dashes, dots, parentheses) are stripped first;
/// anything else is rejected.
pub fn normalize_phone(raw: &str) -> Result<String, PhoneError> {
    let stripped: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();

    if !PHONE_DIGITS.is_match(&stripped) {
        return Err(PhoneError::Invalid {
            raw: raw.to_string(),
        });
    }

    if stripped.starts_with('+') {
        Ok(stripped)
    } else {
        Ok(format!("+{stripped}"))
    }
}

/// A phone number that cannot be normalized to E.164.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PhoneError {
    #[error("phone number is not E.164-normalizable: {raw:?}")]
    Invalid { raw: String },
}
