//! Validation pass: `RawReport` → canonical `Report`.
//!
//! Every field is checked; every failure is collected. The caller gets
//! one `ValidationError` naming all defective fields, never just the
//! first; an emergency form must not make the reporter fix problems one
//! round trip at a time.

use crate::report::{RawReport, Report, TimeOfBite};
use sarpa_geo::Location;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Cap on free-text fields (symptoms, location detail), in characters.
///
/// Over-long text is truncated silently rather than rejected: partial
/// information is still valuable in an emergency.
pub const MAX_FREE_TEXT_CHARS: usize = 2_000;

const MAX_AGE: u8 = 150;

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// All field failures from one validation pass.
///
/// Display renders one line naming every defective field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid report ({} field(s)):", self.issues.len())?;
        for issue in &self.issues {
            write!(f, " {}: {};", issue.field, issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// Whether a given field is among the failures.
    pub fn names_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

/// Validate and normalize raw form input into a `Report`.
///
/// The location is produced upstream (by the resolver or a manual entry)
/// and passes through untouched; validation never depends on it.
pub fn validate(raw: &RawReport, location: Location) -> Result<Report, ValidationError> {
    let mut issues = Vec::new();

    let victim_name = raw.victim_name.trim();
    if victim_name.is_empty() {
        issues.push(FieldIssue::new("victimName", "victim name is required"));
    }

    let age = match raw.age.trim().parse::<i64>() {
        Ok(value) if (0..=i64::from(MAX_AGE)).contains(&value) => Some(value as u8),
        Ok(value) => {
            issues.push(FieldIssue::new(
                "age",
                format!("age must be in [0, {MAX_AGE}] (got {value})"),
            ));
            None
        }
        Err(_) => {
            issues.push(FieldIssue::new(
                "age",
                format!("age must be a whole number (got {:?})", raw.age.trim()),
            ));
            None
        }
    };

    let time_of_bite = match raw.time_of_bite.parse::<TimeOfBite>() {
        Ok(bucket) => Some(bucket),
        Err(_) => {
            issues.push(FieldIssue::new(
                "timeOfBite",
                format!(
                    "time of bite must be one of {}",
                    TimeOfBite::tokens().join(", ")
                ),
            ));
            None
        }
    };

    if !issues.is_empty() {
        return Err(ValidationError { issues });
    }

    Ok(Report {
        id: Uuid::new_v4(),
        victim_name: victim_name.to_string(),
        // Unreachable: a field issue was pushed for every None above.
        age: age.expect("age validated above"),
        time_of_bite: time_of_bite.expect("time of bite validated above"),
        symptoms: normalize_free_text(&raw.symptoms),
        location_detail: normalize_free_text(&raw.location),
        location,
    })
}

/// Trim, then cap at `MAX_FREE_TEXT_CHARS` characters (silent truncation,
/// char-boundary safe). Empty after trimming becomes `None`.
fn normalize_free_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().count() <= MAX_FREE_TEXT_CHARS {
        return Some(trimmed.to_string());
    }
    Some(trimmed.chars().take(MAX_FREE_TEXT_CHARS).collect())
}
