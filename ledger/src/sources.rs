//! Pseudonymous source protection records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use tipline_crypto::derive_source_id;
use tipline_types::{ProtectionLevel, SourceHash, SourceId, Timestamp};

/// A protection marker for a hashed source identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedSource {
    pub source_id: SourceId,
    pub hashed_identity: SourceHash,
    pub level: ProtectionLevel,
    pub created_at: Timestamp,
    pub active: bool,
}

/// Records keyed by `derive_source_id(hash, timestamp)`.
///
/// Lookups recompute the id from the caller's timestamp, so a record is only
/// found when queried with the timestamp it was created at. Protecting the
/// same hash twice at one timestamp replaces the earlier record.
#[derive(Clone, Debug, Default)]
pub struct SourceProtectionRegistry {
    sources: HashMap<SourceId, ProtectedSource>,
}

impl SourceProtectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an active protection record and return its id.
    pub fn protect(
        &mut self,
        hash: SourceHash,
        level: ProtectionLevel,
        now: Timestamp,
    ) -> SourceId {
        let source_id = derive_source_id(&hash, now);
        self.sources.insert(
            source_id,
            ProtectedSource {
                source_id,
                hashed_identity: hash,
                level,
                created_at: now,
                active: true,
            },
        );
        source_id
    }

    /// `(active, level)` for the record derived from `(hash, now)`, or
    /// `(false, None)` when there is none.
    pub fn is_protected(&self, hash: &SourceHash, now: Timestamp) -> (bool, ProtectionLevel) {
        match self.sources.get(&derive_source_id(hash, now)) {
            Some(source) if source.active => (true, source.level),
            _ => (false, ProtectionLevel::None),
        }
    }

    pub fn get(&self, source_id: &SourceId) -> Option<&ProtectedSource> {
        self.sources.get(source_id)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
