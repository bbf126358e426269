//! The responder directory: concurrently readable roster state.
//!
//! Writers (`upsert`, `set_status`) and readers (`snapshot`) may race;
//! a reader never observes a half-updated record. Snapshots preserve
//! insertion order, which is the ranking order when no distance is
//! available.

use crate::responder::{Responder, ResponderStatus};
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Errors from directory mutations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DirectoryError {
    /// An upsert tried to change an existing record's kind. A hospital id
    /// being reused for a handler is a differently-identified record and
    /// a caller-side logic fault, never a silent overwrite.
    #[error("responder id {id:?} already registered as {existing}, refusing {incoming}")]
    IdentityConflict {
        id: String,
        existing: String,
        incoming: String,
    },

    #[error("unknown responder id: {id:?}")]
    UnknownResponder { id: String },
}

#[derive(Debug, Default)]
struct DirectoryState {
    /// Ids in first-insertion order.
    order: Vec<String>,
    records: BTreeMap<String, Responder>,
}

/// A consistent point-in-time copy of the directory, insertion-ordered.
pub type DirectorySnapshot = Vec<Responder>;

/// Mapping from responder id to record, safe for concurrent readers and
/// writers.
#[derive(Debug, Default)]
pub struct ResponderDirectory {
    state: RwLock<DirectoryState>,
}

impl ResponderDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new responder or refresh an existing one by id.
    ///
    /// Updates that change the record's kind are rejected (see
    /// `DirectoryError::IdentityConflict`); status transitions are
    /// unconstrained; the feed, not the directory, owns those rules.
    pub fn upsert(&self, responder: Responder) -> Result<(), DirectoryError> {
        let mut state = self.write_lock();
        if let Some(existing) = state.records.get(&responder.id) {
            if existing.kind != responder.kind {
                return Err(DirectoryError::IdentityConflict {
                    id: responder.id.clone(),
                    existing: existing.kind.to_string(),
                    incoming: responder.kind.to_string(),
                });
            }
            tracing::debug!(id = %responder.id, "directory refresh");
        } else {
            tracing::debug!(id = %responder.id, kind = %responder.kind, "directory insert");
            state.order.push(responder.id.clone());
        }
        state.records.insert(responder.id.clone(), responder);
        Ok(())
    }

    /// Set the status of a known responder.
    pub fn set_status(&self, id: &str, status: ResponderStatus) -> Result<(), DirectoryError> {
        let mut state = self.write_lock();
        let record = state
            .records
            .get_mut(id)
            .ok_or_else(|| DirectoryError::UnknownResponder { id: id.to_string() })?;
        record.status = status;
        Ok(())
    }

    /// Point-in-time copy of every record, in insertion order.
    pub fn snapshot(&self) -> DirectorySnapshot {
        let state = self.read_lock();
        state
            .order
            .iter()
            .filter_map(|id| state.records.get(id).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read_lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_lock().records.is_empty()
    }

    // A poisoned lock only means another thread panicked mid-update of
    // plain data; the state itself is still coherent record-by-record.
    fn read_lock(&self) -> RwLockReadGuard<'_, DirectoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, DirectoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
