//! Report types: raw form input and the canonical validated record.

use crate::fingerprint::Fingerprint;
use sarpa_geo::Location;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Untyped incident fields exactly as a form submits them.
///
/// Everything is a string; `validate` turns this into a `Report` or an
/// aggregated error. Field names match the form's wire names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReport {
    #[serde(default)]
    pub victim_name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub time_of_bite: String,
    #[serde(default)]
    pub symptoms: String,
    #[serde(default)]
    pub location: String,
}

/// How long ago the bite happened. Closed set: dispatch urgency keys off
/// this bucket, so free text is never accepted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfBite {
    JustNow,
    Min5To15,
    Min15To30,
    Min30To60,
    HourPlus,
}

impl TimeOfBite {
    /// The form token for this bucket.
    pub fn token(&self) -> &'static str {
        match self {
            Self::JustNow => "just-now",
            Self::Min5To15 => "5-15-min",
            Self::Min15To30 => "15-30-min",
            Self::Min30To60 => "30-60-min",
            Self::HourPlus => "1-hour-plus",
        }
    }

    /// All accepted form tokens, for error messages.
    pub fn tokens() -> [&'static str; 5] {
        [
            "just-now",
            "5-15-min",
            "15-30-min",
            "30-60-min",
            "1-hour-plus",
        ]
    }
}

impl FromStr for TimeOfBite {
    type Err = UnknownTimeOfBite;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "just-now" => Ok(Self::JustNow),
            "5-15-min" => Ok(Self::Min5To15),
            "15-30-min" => Ok(Self::Min15To30),
            "30-60-min" => Ok(Self::Min30To60),
            "1-hour-plus" => Ok(Self::HourPlus),
            other => Err(UnknownTimeOfBite {
                token: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TimeOfBite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// An unrecognized time-of-bite token.
#[derive(Debug, thiserror::Error)]
#[error("unknown time-of-bite token: {token:?}")]
pub struct UnknownTimeOfBite {
    pub token: String,
}

/// A validated, immutable incident report.
///
/// Constructed only by `validate`; never mutated afterwards. The id is
/// fresh per validation; re-submission is a new report by design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub victim_name: String,
    pub age: u8,
    pub time_of_bite: TimeOfBite,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_detail: Option<String>,
    pub location: Location,
}

impl Report {
    /// Content fingerprint over substantive fields.
    ///
    /// Excludes the volatile id and the location: two submissions of the
    /// same form content fingerprint identically even when one resolved
    /// GPS and the other did not.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::builder()
            .field("victim_name", &self.victim_name)
            .field_int("age", i64::from(self.age))
            .field("time_of_bite", self.time_of_bite.token())
            .field_opt("symptoms", self.symptoms.as_deref())
            .field_opt("location_detail", self.location_detail.as_deref())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_bite_parses_every_form_token() {
        for token in TimeOfBite::tokens() {
            let bucket: TimeOfBite = token.parse().expect("known token should parse");
            assert_eq!(bucket.token(), token);
        }
    }

    #[test]
    fn time_of_bite_rejects_free_text() {
        let err = "about an hour"
            .parse::<TimeOfBite>()
            .expect_err("free text must not parse");
        assert_eq!(err.token, "about an hour");
    }

    #[test]
    fn time_of_bite_trims_before_parsing() {
        let bucket: TimeOfBite = "  just-now ".parse().expect("padded token should parse");
        assert_eq!(bucket, TimeOfBite::JustNow);
    }

    #[test]
    fn raw_report_deserializes_camel_case_form_fields() {
        let raw: RawReport = serde_json::from_str(
            r#"{"victimName":"Asha","age":"34","timeOfBite":"just-now","symptoms":"","location":""}"#,
        )
        .expect("form payload should deserialize");
        assert_eq!(raw.victim_name, "Asha");
        assert_eq!(raw.age, "34");
        assert_eq!(raw.time_of_bite, "just-now");
    }
}
