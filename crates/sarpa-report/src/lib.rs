//! # sarpa-report
//!
//! Incident report intake: the untyped form input (`RawReport`), the
//! canonical immutable `Report`, and the validation pass between them.
//!
//! Validation aggregates every field failure into one `ValidationError`
//! so an emergency form can surface all problems in a single round trip.
//! A `Report` is immutable once constructed; re-submitting the same form
//! produces a new `Report` with a new identity, while `fingerprint()`
//! stays stable over the substantive content for downstream dedupe.

pub mod fingerprint;
pub mod report;
pub mod validate;

pub use fingerprint::Fingerprint;
pub use report::{RawReport, Report, TimeOfBite, UnknownTimeOfBite};
pub use validate::{FieldIssue, MAX_FREE_TEXT_CHARS, ValidationError, validate};
