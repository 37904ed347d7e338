//! The redefinition engine.
//!
//! One [`TypeRedefinition`] decides and applies the substitution strategy for a single
//! slot descriptor. Three entry paths exist, one per slot classification:
//!
//! - [`TypeRedefinition::redefine_type`] - full mock; the framework will supply a fresh
//!   instance, so it needs an [`InstanceFactory`]
//! - [`TypeRedefinition::redefine_type_for_final_slot`] - the slot cannot be overwritten,
//!   so the type is rewritten in place and the already-assigned instance becomes the mock
//! - [`TypeRedefinition::redefine_type_for_tested_slot`] - partial mock; same in-place
//!   rewrite with dynamic mocking enabled
//!
//! All paths consult the process-wide [`RedefinitionCache`]: a hit reapplies the stored
//! outcome without a fresh rewrite, a miss mints a generated-class id, runs the
//! transformer, and stores the outcome for any other slot or test sharing the same
//! (type, configuration). On success the target type is registered in the shared
//! mocked-class registry so other subsystems know instances of it are under mock control.
//!
//! "Cannot be substituted" is a normal negative result on every path; only a final slot
//! with a structurally unmockable type is an error.

use crate::fixture::MockedTypeDescriptor;
use crate::redefinition::cache::CacheKey;
use crate::redefinition::factory::InstanceFactory;
use crate::redefinition::transformer::{TransformOutcome, Transformer};
use crate::state::SharedMockState;
use crate::types::{generated_class_name, TypeKind};
use crate::{Error, Result};

/// Substitution strategy applicator for one slot descriptor
pub struct TypeRedefinition<'a> {
    descriptor: &'a MockedTypeDescriptor,
    state: &'a SharedMockState,
    transformer: &'a dyn Transformer,
    use_dynamic_mocking: bool,
}

impl<'a> TypeRedefinition<'a> {
    /// Create a redefinition for one descriptor.
    ///
    /// Must run inside the shared exclusion zone; the director guarantees that.
    #[must_use]
    pub fn new(
        descriptor: &'a MockedTypeDescriptor,
        state: &'a SharedMockState,
        transformer: &'a dyn Transformer,
    ) -> Self {
        TypeRedefinition {
            descriptor,
            state,
            transformer,
            use_dynamic_mocking: false,
        }
    }

    /// Full-mock path: transform the declared type so fresh instances behave as mocks.
    ///
    /// Returns a factory on success, `None` when the type cannot be substituted.
    #[must_use]
    pub fn redefine_type(&mut self) -> Option<InstanceFactory> {
        let target = self.descriptor.declared_type();
        let configuration = self.descriptor.mocking_configuration(false);
        let key = CacheKey::new(target.token(), configuration.clone());

        if let Some(entry) = self.state.cache().lookup(&key) {
            if !self.transformer.reapply(&entry.outcome) {
                return None;
            }

            self.state.register_mocked_class(target);
            let name = generated_class_name(
                target,
                self.descriptor.user_mock_id(),
                entry.class_id.value(),
            );
            return Some(InstanceFactory::new(entry.outcome.clone(), &name));
        }

        match self.transformer.transform(target, &configuration) {
            TransformOutcome::Transformed(outcome) => {
                let class_id = self.state.cache().mint_class_id();
                let entry = self.state.cache().store(key, class_id, outcome);

                self.state.register_mocked_class(target);
                let name = generated_class_name(
                    target,
                    self.descriptor.user_mock_id(),
                    entry.class_id.value(),
                );
                Some(InstanceFactory::new(entry.outcome.clone(), &name))
            }
            TransformOutcome::Unsupported => None,
        }
    }

    /// Partial-mock path: in-place rewrite with dynamic mocking, so only intercepted
    /// members behave as mocks while all others execute real logic.
    ///
    /// # Errors
    /// None of its own; shares the slot-not-set path.
    pub fn redefine_type_for_tested_slot(&mut self) -> Result<bool> {
        self.use_dynamic_mocking = true;
        self.redefine_type_for_slot_not_set()
    }

    /// Final-slot path: the framework cannot overwrite the slot, so the type is rewritten
    /// in place and the author-assigned instance becomes the mock.
    ///
    /// # Errors
    /// [`Error::InvalidMockConfiguration`] when the declared type is an unresolved generic
    /// placeholder, or an interface on a non-injectable slot — neither can be given
    /// behavior without a concrete instance to modify.
    pub fn redefine_type_for_final_slot(&mut self) -> Result<bool> {
        let kind = self.descriptor.declared_type().kind();

        if kind == TypeKind::GenericPlaceholder
            || (!self.descriptor.injectable() && kind == TypeKind::Interface)
        {
            return Err(Error::InvalidMockConfiguration {
                mock_id: self.descriptor.mock_id().to_string(),
            });
        }

        self.redefine_type_for_slot_not_set()
    }

    /// Shared path for slots whose value the framework does not set.
    ///
    /// Cache hit: reapply the stored outcome, never the full rewrite. Cache miss: mint a
    /// class id, rewrite methods and constructors in place, store the outcome. Either way
    /// a success registers the target type as globally mocked.
    fn redefine_type_for_slot_not_set(&mut self) -> Result<bool> {
        let target = self.descriptor.declared_type();
        let configuration = self
            .descriptor
            .mocking_configuration(self.use_dynamic_mocking);
        let key = CacheKey::new(target.token(), configuration.clone());

        let redefined = if let Some(entry) = self.state.cache().lookup(&key) {
            self.transformer.reapply(&entry.outcome)
        } else {
            match self.transformer.transform_in_place(target, &configuration) {
                TransformOutcome::Transformed(outcome) => {
                    let class_id = self.state.cache().mint_class_id();
                    self.state.cache().store(key, class_id, outcome);
                    true
                }
                TransformOutcome::Unsupported => false,
            }
        };

        if redefined {
            self.state.register_mocked_class(target);
        }

        Ok(redefined)
    }
}
