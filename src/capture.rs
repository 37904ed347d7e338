//! Capture of instances constructed spontaneously by the code under test.
//!
//! A slot with a capture budget wants to claim instances of its type that the framework did
//! not create itself. The transformer's constructor interception calls into the registry on
//! every construction of a capture-interesting type; the registry decides whether any slot
//! still has capacity. Budgets never go negative and are reset to their full limit at each
//! test's assignment pass.

use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;

use crate::fixture::{FixtureInstance, SlotId};
use crate::redefinition::InstanceRc;
use crate::types::TypeToken;

#[derive(Debug)]
struct CaptureEntry {
    type_token: TypeToken,
    limit: u32,
    remaining: AtomicU32,
}

/// Per-fixture table of slots with capture interest
#[derive(Debug, Default)]
pub struct CaptureRegistry {
    entries: DashMap<SlotId, CaptureEntry>,
}

impl CaptureRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        CaptureRegistry {
            entries: DashMap::new(),
        }
    }

    /// Register a slot's capture interest.
    ///
    /// The budget starts at the full limit; it is reset again whenever the slot gets a
    /// fresh instance at test setup.
    pub fn register_slot(&self, slot: SlotId, type_token: TypeToken, limit: u32) {
        self.entries.insert(
            slot,
            CaptureEntry {
                type_token,
                limit,
                remaining: AtomicU32::new(limit),
            },
        );
    }

    /// Reset a slot's budget to its full limit; a fresh test run gets a fresh capture budget
    pub fn reset_capture_count(&self, slot: SlotId) {
        if let Some(entry) = self.entries.get(&slot) {
            entry.remaining.store(entry.limit, Ordering::Release);
        }
    }

    /// Try to claim a constructed instance for some slot of the fixture still interested
    /// in its type.
    ///
    /// The fixture instance is the explicit capture context: an instance that is already
    /// the claiming slot's current value was assigned by the framework or the author, not
    /// constructed spontaneously, and is not claimed. Returns the claiming slot, or `None`
    /// when no slot matches or all budgets are exhausted. The budget is decremented
    /// atomically and never below zero.
    #[must_use]
    pub fn try_capture(
        &self,
        fixture: &FixtureInstance,
        constructed: &InstanceRc,
    ) -> Option<SlotId> {
        for entry in self.entries.iter() {
            if entry.type_token != constructed.type_token() {
                continue;
            }

            let already_assigned = fixture
                .slot_value(*entry.key())
                .is_some_and(|current| current.serial() == constructed.serial());
            if already_assigned {
                continue;
            }

            let mut current = entry.remaining.load(Ordering::Acquire);
            while current > 0 {
                match entry.remaining.compare_exchange_weak(
                    current,
                    current - 1,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                ) {
                    Ok(_) => return Some(*entry.key()),
                    Err(observed) => current = observed,
                }
            }
        }

        None
    }

    /// True when no slot ever requested capture
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all capture interest; part of fixture teardown
    pub fn clear(&self) {
        self.entries.clear();
    }
}
