//! The mock-slot director.
//!
//! [`MockSlotDirector`] orchestrates mocking for one test fixture: it walks the fixture's
//! ancestor chain, builds a descriptor per eligible slot, picks and applies a substitution
//! strategy through the redefinition engine, materializes and assigns instances at test
//! setup, claims spontaneously constructed instances through the capture registry, and
//! tears everything down at the end.
//!
//! # Lifecycle
//!
//! 1. [`MockSlotDirector::build_redefinitions`] - one discovery-and-redefinition pass,
//!    executed entirely inside the shared exclusion zone
//! 2. [`MockSlotDirector::assign_new_instances_to_mock_fields`] - once per test, outside
//!    the zone, strictly after the pass committed its cache entries
//! 3. [`MockSlotDirector::capture_new_instance_for_applicable_slot`] - callback hook for
//!    the transformer's constructor interception, any number of times during the test
//! 4. [`MockSlotDirector::clean_up`] - teardown
//!
//! # Failure semantics
//!
//! Discovery raises only structural errors (a final slot with an unmockable type); a slot
//! whose type cannot be substituted is silently excluded from all tracking. Instance
//! construction failures surface lazily at assignment, trace-filtered but otherwise
//! unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use crate::capture::CaptureRegistry;
use crate::fixture::{
    FixtureClassRc, FixtureInstance, FixtureSlot, MockedTypeDescriptor, SlotId,
};
use crate::redefinition::{InstanceFactory, InstanceRc, Transformer, TypeRedefinition};
use crate::state::{MockRegistration, SharedMockState};
use crate::types::TargetTypeRc;
use crate::{stacktrace, Result};

/// Orchestrates slot discovery, substitution, and instance lifecycle for one fixture
pub struct MockSlotDirector {
    shared: Arc<SharedMockState>,
    transformer: Arc<dyn Transformer>,
    fixture_class: FixtureClassRc,
    descriptors: HashMap<SlotId, MockedTypeDescriptor>,
    instance_factories: HashMap<SlotId, InstanceFactory>,
    slots_not_set: Vec<SlotId>,
    capture: Option<CaptureRegistry>,
    redefined_targets: boxcar::Vec<TargetTypeRc>,
}

impl MockSlotDirector {
    /// Run the discovery-and-redefinition pass for a fixture type.
    ///
    /// Walks every ancestor from most-base to most-derived (stopping at the chain root and
    /// before the framework's own expectation-block bases), builds a descriptor per
    /// eligible slot, and applies the matching substitution strategy. The whole pass holds
    /// the shared exclusion zone; the guard is scoped, so the zone is released on every
    /// exit path.
    ///
    /// # Errors
    /// [`crate::Error::InvalidMockConfiguration`] when a final slot names a type that
    /// cannot be mocked in place; [`crate::Error::LockError`] when the zone is poisoned.
    pub fn build_redefinitions(
        shared: Arc<SharedMockState>,
        transformer: Arc<dyn Transformer>,
        fixture_class: FixtureClassRc,
    ) -> Result<Self> {
        let mut director = MockSlotDirector {
            shared: Arc::clone(&shared),
            transformer,
            fixture_class: Arc::clone(&fixture_class),
            descriptors: HashMap::new(),
            instance_factories: HashMap::new(),
            slots_not_set: Vec::new(),
            capture: None,
            redefined_targets: boxcar::Vec::new(),
        };

        {
            let _zone = shared.enter_redefinition_zone()?;
            director.redefine_slot_types(&fixture_class)?;

            let targets: Vec<TargetTypeRc> = director
                .redefined_targets
                .iter()
                .map(|(_, t)| t.clone())
                .collect();
            director.transformer.ensure_initialized(&targets);
        }

        Ok(director)
    }

    fn redefine_slot_types(&mut self, class: &FixtureClassRc) -> Result<()> {
        if let Some(superclass) = class.superclass() {
            if !superclass.is_framework_base() {
                let superclass = superclass.clone();
                self.redefine_slot_types(&superclass)?;
            }
        }

        for slot in class.slots() {
            if slot.modifiers().is_eligible() {
                self.redefine_slot_type(slot)?;
            }
        }

        Ok(())
    }

    fn redefine_slot_type(&mut self, slot: &FixtureSlot) -> Result<()> {
        let Some(descriptor) = MockedTypeDescriptor::from_slot(slot) else {
            return Ok(());
        };

        if !descriptor.is_mockable() {
            return Ok(());
        }

        let partial_mocking = descriptor.tested();
        let needs_value_to_set = !descriptor.is_final() && !partial_mocking;

        let mut redefinition =
            TypeRedefinition::new(&descriptor, &self.shared, self.transformer.as_ref());
        let redefined;

        if needs_value_to_set {
            match redefinition.redefine_type() {
                Some(factory) => {
                    redefined = true;
                    self.instance_factories.insert(descriptor.slot_id(), factory);
                }
                None => redefined = false,
            }
        } else {
            redefined = if partial_mocking {
                redefinition.redefine_type_for_tested_slot()?
            } else {
                redefinition.redefine_type_for_final_slot()?
            };

            if redefined {
                self.slots_not_set.push(descriptor.slot_id());
            }
        }

        if redefined {
            self.redefined_targets.push(descriptor.declared_type().clone());

            if !partial_mocking {
                self.register_capture_of_new_instances(&descriptor);
            }

            self.descriptors.insert(descriptor.slot_id(), descriptor);
        }

        Ok(())
    }

    fn register_capture_of_new_instances(&mut self, descriptor: &MockedTypeDescriptor) {
        if descriptor.max_instances_to_capture() > 0 {
            let registry = self.capture.get_or_insert_with(CaptureRegistry::new);
            registry.register_slot(
                descriptor.slot_id(),
                descriptor.declared_type().token(),
                descriptor.max_instances_to_capture(),
            );
        }
    }

    /// The fixture class this director was built for
    #[must_use]
    pub fn fixture_class(&self) -> &FixtureClassRc {
        &self.fixture_class
    }

    /// Slots the framework will supply a fresh instance for
    #[must_use]
    pub fn slots_needing_value(&self) -> Vec<SlotId> {
        self.instance_factories.keys().copied().collect()
    }

    /// Tracked slots whose value the author supplies (final or partial-mock slots)
    #[must_use]
    pub fn slots_not_set(&self) -> &[SlotId] {
        &self.slots_not_set
    }

    /// Total number of tracked slots
    #[must_use]
    pub fn tracked_slot_count(&self) -> usize {
        self.instance_factories.len() + self.slots_not_set.len()
    }

    /// True when at least one slot registered capture interest
    #[must_use]
    pub fn has_capture_interest(&self) -> bool {
        self.capture.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Materialize and register instances for one test run.
    ///
    /// For every slot with a factory: a null slot gets a fresh instance (resetting the
    /// slot's capture budget), a pre-assigned slot is left untouched; either way the
    /// resulting instance is registered as an active mock. Tracked slots without a factory
    /// register their current value when present; an absent value is not an error.
    ///
    /// # Errors
    /// [`crate::Error::Initialization`] when a transformed type fails its own setup. The
    /// trace is filtered of internal frames and the failure is re-raised unchanged — never
    /// retried, never swallowed.
    pub fn assign_new_instances_to_mock_fields(&self, fixture: &FixtureInstance) -> Result<()> {
        self.shared.clear_injectable_and_non_strict_mocks();
        self.create_and_assign_new_instances(fixture)?;
        self.obtain_and_register_instances_of_slots_not_set(fixture);
        Ok(())
    }

    fn create_and_assign_new_instances(&self, fixture: &FixtureInstance) -> Result<()> {
        for (slot_id, factory) in &self.instance_factories {
            let Some(descriptor) = self.descriptors.get(slot_id) else {
                continue;
            };

            let mock = match fixture.slot_value(*slot_id) {
                Some(existing) => existing,
                None => {
                    let created = factory.create().map_err(stacktrace::filter)?;
                    fixture.set_slot_value(*slot_id, created.clone());

                    if descriptor.max_instances_to_capture() > 0 {
                        if let Some(capture) = &self.capture {
                            capture.reset_capture_count(*slot_id);
                        }
                    }

                    created
                }
            };

            self.shared.register_mock(MockRegistration::new(descriptor, mock));
        }

        Ok(())
    }

    fn obtain_and_register_instances_of_slots_not_set(&self, fixture: &FixtureInstance) {
        for slot_id in &self.slots_not_set {
            let Some(descriptor) = self.descriptors.get(slot_id) else {
                continue;
            };

            if let Some(mock) = fixture.slot_value(*slot_id) {
                self.shared.register_mock(MockRegistration::new(descriptor, mock));
            }
        }
    }

    /// Offer a spontaneously constructed instance for capture.
    ///
    /// Called by the transformer's constructor interception whenever a capture-interesting
    /// type is instantiated anywhere in the code under test. Returns true when some slot of
    /// the given fixture claimed the instance; false leaves the instance alone.
    pub fn capture_new_instance_for_applicable_slot(
        &self,
        fixture: &FixtureInstance,
        constructed: &InstanceRc,
    ) -> bool {
        let Some(capture) = &self.capture else {
            return false;
        };

        match capture.try_capture(fixture, constructed) {
            Some(slot_id) => {
                if let Some(descriptor) = self.descriptors.get(&slot_id) {
                    self.shared
                        .register_mock(MockRegistration::new(descriptor, constructed.clone()));
                }
                true
            }
            None => false,
        }
    }

    /// Tear down the fixture's mocking: clear cascading types and registrations, drop
    /// capture interest, and ask the transformer to restore every redefined target class
    pub fn clean_up(&self) {
        self.shared.clear_cascading_types();
        self.shared.clear_registered_mocks();

        if let Some(capture) = &self.capture {
            capture.clear();
        }

        for (_, target) in self.redefined_targets.iter() {
            self.transformer.restore(target);
        }
    }
}
