//! Content fingerprints for reports.
//!
//! A fingerprint hashes substantive content in a stable field order and
//! excludes volatile identity (report id, location). It is a dedupe hint
//! for the persistence layer, not a security primitive.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A content-addressed hash over a report's substantive fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub String);

impl Fingerprint {
    /// Start building a fingerprint by feeding fields in a stable order.
    pub fn builder() -> FingerprintBuilder {
        FingerprintBuilder {
            hasher: Sha256::new(),
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Incremental fingerprint builder.
pub struct FingerprintBuilder {
    hasher: Sha256,
}

impl FingerprintBuilder {
    /// Feed a string field.
    ///
    /// The value is length-prefixed, so a value embedding the field
    /// separators cannot collide with a different field sequence.
    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.hasher.update(name.as_bytes());
        self.hasher.update(b":");
        self.hasher.update(value.len().to_string().as_bytes());
        self.hasher.update(b":");
        self.hasher.update(value.as_bytes());
        self.hasher.update(b"\n");
        self
    }

    /// Feed an integer field.
    pub fn field_int(self, name: &str, value: i64) -> Self {
        self.field(name, &value.to_string())
    }

    /// Feed an optional field (skipped if None).
    pub fn field_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.field(name, v),
            None => self,
        }
    }

    /// Finalize into a hex fingerprint.
    pub fn finish(self) -> Fingerprint {
        let hash = self.hasher.finalize();
        Fingerprint(format!("{hash:x}"))
    }
}
