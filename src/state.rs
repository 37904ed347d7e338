//! Process-wide shared mocking state.
//!
//! [`SharedMockState`] is the explicit service object holding everything multiple fixtures
//! (potentially on concurrent test threads) share: the redefinition cache, the registry of
//! types currently under mock control, the per-test mock registrations, the set of
//! cascading types, and the exclusion zone serializing redefinition passes. It is passed by
//! [`Arc`] to whoever needs it — nothing in this crate reaches for ambient global state.
//!
//! # Exclusion discipline
//!
//! A fixture's entire discovery-and-redefinition pass runs while holding the guard from
//! [`SharedMockState::enter_redefinition_zone`]. The guard is scoped, so the zone is
//! released on every exit path, including a failure mid-redefinition. Per-test assignment
//! does not take the zone; it only touches per-fixture state and must simply run after the
//! corresponding pass committed its cache entries.
//!
//! # Storage
//!
//! The mocked-class registry is an ordered lock-free [`SkipMap`]; registration is
//! idempotent per type. Mock registrations live in a [`DashMap`] keyed by instance serial
//! so injectable and non-strict entries can be cleared at the start of each test without
//! touching the rest.

use std::sync::{Arc, Mutex, MutexGuard};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;

use crate::fixture::MockedTypeDescriptor;
use crate::redefinition::{InstanceRc, RedefinitionCache};
use crate::types::{TargetTypeRc, TypeToken};
use crate::{Error, Result};

/// Association between a live instance and the descriptor that produced it.
///
/// Created when an instance is assigned or captured, destroyed at teardown; injectable and
/// non-strict registrations are additionally cleared at the start of each test.
#[derive(Debug)]
pub struct MockRegistration {
    mock_id: String,
    type_token: TypeToken,
    instance: InstanceRc,
    injectable: bool,
    non_strict: bool,
}

impl MockRegistration {
    /// Build a registration for an instance under the slot descriptor that produced it
    #[must_use]
    pub fn new(descriptor: &MockedTypeDescriptor, instance: InstanceRc) -> Self {
        MockRegistration {
            mock_id: descriptor.mock_id().to_string(),
            type_token: descriptor.declared_type().token(),
            instance,
            injectable: descriptor.injectable(),
            // Partial mocks run real logic outside intercepted members; they are
            // non-strict by construction.
            non_strict: descriptor.tested(),
        }
    }

    /// The slot identifier the registration belongs to
    #[must_use]
    pub fn mock_id(&self) -> &str {
        &self.mock_id
    }

    /// Identity of the registered instance's declared type
    #[must_use]
    pub fn type_token(&self) -> TypeToken {
        self.type_token
    }

    /// The registered instance
    #[must_use]
    pub fn instance(&self) -> &InstanceRc {
        &self.instance
    }
}

/// Process-wide shared state for mocking
#[derive(Debug, Default)]
pub struct SharedMockState {
    cache: RedefinitionCache,
    mocked_classes: SkipMap<TypeToken, String>,
    registrations: DashMap<u64, MockRegistration>,
    cascading_types: DashMap<TypeToken, ()>,
    redefinition_zone: Mutex<()>,
}

impl SharedMockState {
    /// Create a fresh shared state
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(SharedMockState::default())
    }

    /// The process-wide redefinition cache
    #[must_use]
    pub fn cache(&self) -> &RedefinitionCache {
        &self.cache
    }

    /// Enter the exclusion zone serializing redefinition passes.
    ///
    /// The returned guard keeps the zone until it goes out of scope.
    ///
    /// # Errors
    /// [`Error::LockError`] when the zone was poisoned by a panicking pass.
    pub fn enter_redefinition_zone(&self) -> Result<MutexGuard<'_, ()>> {
        self.redefinition_zone.lock().map_err(|_| Error::LockError)
    }

    /// Register a type as globally mocked. Idempotent per type.
    pub fn register_mocked_class(&self, target: &TargetTypeRc) {
        self.mocked_classes.insert(target.token(), target.full_name());
    }

    /// True when instances of the type are currently under mock control
    #[must_use]
    pub fn is_class_mocked(&self, token: TypeToken) -> bool {
        self.mocked_classes.contains_key(&token)
    }

    /// Number of types registered as mocked
    #[must_use]
    pub fn mocked_class_count(&self) -> usize {
        self.mocked_classes.len()
    }

    /// Register an instance as an active mock
    pub fn register_mock(&self, registration: MockRegistration) {
        self.registrations
            .insert(registration.instance.serial(), registration);
    }

    /// True when the instance is registered as an active mock
    #[must_use]
    pub fn is_mock_registered(&self, instance: &InstanceRc) -> bool {
        self.registrations.contains_key(&instance.serial())
    }

    /// Number of active mock registrations
    #[must_use]
    pub fn active_mock_count(&self) -> usize {
        self.registrations.len()
    }

    /// Drop injectable and non-strict registrations; each test starts from fresh state
    pub fn clear_injectable_and_non_strict_mocks(&self) {
        self.registrations
            .retain(|_, r| !r.injectable && !r.non_strict);
    }

    /// Drop every registration; part of fixture teardown
    pub fn clear_registered_mocks(&self) {
        self.registrations.clear();
    }

    /// Register a type whose mocked return values cascade into further mocks
    pub fn register_cascading_type(&self, token: TypeToken) {
        self.cascading_types.insert(token, ());
    }

    /// True when the type cascades
    #[must_use]
    pub fn is_cascading_type(&self, token: TypeToken) -> bool {
        self.cascading_types.contains_key(&token)
    }

    /// Drop all cascading-type registrations; part of fixture teardown
    pub fn clear_cascading_types(&self) {
        self.cascading_types.clear();
    }
}
