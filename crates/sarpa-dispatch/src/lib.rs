//! # sarpa-dispatch
//!
//! The dispatch-matching side of sarpa:
//! - `Responder` records (handlers and hospitals) with normalized phones
//! - `ResponderDirectory`: the concurrently readable/writable roster
//! - `rank`: availability-then-proximity ordering per responder kind
//! - `IncidentSubmissionService`: the one public `submit` operation
//! - JSONL roster persistence and TOML core config
//!
//! The incident-id counter inside the submission service is the only
//! shared mutable state in the core; everything else is immutable or
//! copy-on-read.

pub mod config;
pub mod directory;
pub mod matcher;
pub mod responder;
pub mod roster;
pub mod submit;

pub use config::{ConfigError, CoreConfig};
pub use directory::{DirectoryError, DirectorySnapshot, ResponderDirectory};
pub use matcher::{MatchConfig, RankedResponder, rank};
pub use responder::{
    Capability, PhoneError, Responder, ResponderKind, ResponderStatus, normalize_phone,
};
pub use roster::{
    RosterError, read_responders, read_responders_from_path, seed_directory, write_responders,
    write_responders_to_path,
};
pub use submit::{DispatchResult, IncidentSubmissionService};
