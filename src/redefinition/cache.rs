//! Process-wide redefinition cache.
//!
//! Substitution is expensive: it rewrites a type's executable code. The cache amortizes
//! that cost by keying every computed transformation outcome on (type identity,
//! configuration equality), so any slot or test asking for the identical treatment of a
//! type reuses the stored outcome instead of going through the transformer again.
//! Different configurations of the same type (dynamic vs. full mocking) coexist as
//! distinct entries.
//!
//! # Concurrency
//!
//! The cache is append-only for the lifetime of the process: entries are never mutated or
//! removed once stored, so concurrent readers are safe past the writer's exclusion zone.
//! Writes happen only inside a fixture's redefinition pass, which runs under the shared
//! exclusion zone (see [`crate::state::SharedMockState`]). Generated-class ids are minted
//! atomically, exactly once per class never seen before.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::fixture::MockingConfiguration;
use crate::redefinition::transformer::TransformedType;
use crate::types::TypeToken;

/// Identifier minted for a generated mock class, unique per cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeneratedClassId(u32);

impl GeneratedClassId {
    /// Returns the raw id value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for GeneratedClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cache key: type identity plus configuration equality
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    type_token: TypeToken,
    configuration: MockingConfiguration,
}

impl CacheKey {
    /// Build a key for one (type, configuration) pair
    #[must_use]
    pub fn new(type_token: TypeToken, configuration: MockingConfiguration) -> Self {
        CacheKey {
            type_token,
            configuration,
        }
    }
}

/// One stored transformation outcome; immutable once stored
#[derive(Debug)]
pub struct CacheEntry {
    /// Id minted when this class was first transformed
    pub class_id: GeneratedClassId,
    /// The opaque transformation outcome, ready to reapply
    pub outcome: Arc<TransformedType>,
}

/// Append-only table of computed transformations
#[derive(Debug)]
pub struct RedefinitionCache {
    entries: DashMap<CacheKey, Arc<CacheEntry>>,
    next_class_id: AtomicU32,
}

impl Default for RedefinitionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RedefinitionCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        RedefinitionCache {
            entries: DashMap::new(),
            next_class_id: AtomicU32::new(1),
        }
    }

    /// Look up a previously stored outcome
    #[must_use]
    pub fn lookup(&self, key: &CacheKey) -> Option<Arc<CacheEntry>> {
        self.entries.get(key).map(|e| e.value().clone())
    }

    /// Mint a fresh generated-class id for a class never seen before
    #[must_use]
    pub fn mint_class_id(&self) -> GeneratedClassId {
        GeneratedClassId(self.next_class_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Store the outcome for a (type, configuration) pair.
    ///
    /// First writer wins; the stored entry is returned either way, keeping the table
    /// append-only even under a racing double-store.
    pub fn store(
        &self,
        key: CacheKey,
        class_id: GeneratedClassId,
        outcome: Arc<TransformedType>,
    ) -> Arc<CacheEntry> {
        self.entries
            .entry(key)
            .or_insert_with(|| Arc::new(CacheEntry { class_id, outcome }))
            .clone()
    }

    /// Number of stored entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been stored yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
