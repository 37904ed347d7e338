//! Mocked-slot descriptors and mocking configurations.
//!
//! A [`MockedTypeDescriptor`] is the immutable record of one candidate slot built during
//! discovery: its declared type, modifiers, role, and capture budget. The descriptor also
//! owns the mockability policy and derives the [`MockingConfiguration`] handed to the
//! transformer. Exactly one descriptor exists per eligible slot per fixture-construction
//! pass.

use crate::fixture::slot::{FixtureSlot, MockRole, SlotId, SlotModifiers};
use crate::types::{TargetTypeRc, TypeKind};

/// What the transformer is asked to do to a target type.
///
/// Configurations are compared for equality when consulting the redefinition cache, so two
/// slots asking for the same treatment of the same type share one transformation while a
/// dynamic (partial) and a full mocking of the same type stay distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MockingConfiguration {
    dynamic_mocking: bool,
    filters: Vec<String>,
}

impl MockingConfiguration {
    /// True when only explicitly intercepted members behave as mocks
    #[must_use]
    pub fn dynamic_mocking(&self) -> bool {
        self.dynamic_mocking
    }

    /// Member interception filters; empty means intercept everything
    #[must_use]
    pub fn filters(&self) -> &[String] {
        &self.filters
    }
}

/// Immutable description of one slot eligible for mocking
#[derive(Debug, Clone)]
pub struct MockedTypeDescriptor {
    slot_id: SlotId,
    slot_name: String,
    declared_type: TargetTypeRc,
    modifiers: SlotModifiers,
    mock_id: Option<String>,
    role: MockRole,
    max_instances_to_capture: u32,
    filters: Vec<String>,
}

impl MockedTypeDescriptor {
    /// Build the descriptor for a slot, or `None` when the slot carries no mocking request.
    ///
    /// Eligibility (non-static, non-synthetic) is the caller's concern; this only looks at
    /// the request.
    #[must_use]
    pub fn from_slot(slot: &FixtureSlot) -> Option<Self> {
        let request = slot.mocking()?;

        Some(MockedTypeDescriptor {
            slot_id: slot.id(),
            slot_name: slot.name().to_string(),
            declared_type: slot.declared_type().clone(),
            modifiers: slot.modifiers(),
            mock_id: request.mock_id().map(str::to_string),
            role: request.role(),
            max_instances_to_capture: request.max_instances_to_capture(),
            filters: request.filters().to_vec(),
        })
    }

    /// Identity of the slot this descriptor was built from
    #[must_use]
    pub fn slot_id(&self) -> SlotId {
        self.slot_id
    }

    /// The slot's static type
    #[must_use]
    pub fn declared_type(&self) -> &TargetTypeRc {
        &self.declared_type
    }

    /// The slot's declared modifiers
    #[must_use]
    pub fn modifiers(&self) -> SlotModifiers {
        self.modifiers
    }

    /// The user-supplied mock id, if any
    #[must_use]
    pub fn user_mock_id(&self) -> Option<&str> {
        self.mock_id.as_deref()
    }

    /// Identifier used when reporting this slot: the user-supplied mock id, or the slot name
    #[must_use]
    pub fn mock_id(&self) -> &str {
        self.mock_id.as_deref().unwrap_or(&self.slot_name)
    }

    /// True when the slot participates in dependency injection rather than being a plain mock
    #[must_use]
    pub fn injectable(&self) -> bool {
        self.role == MockRole::Injectable
    }

    /// True when the slot holds a real collaborator to be partially intercepted
    #[must_use]
    pub fn tested(&self) -> bool {
        self.role == MockRole::Tested
    }

    /// True when the slot cannot be overwritten by the framework
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.modifiers.contains(SlotModifiers::FINAL)
    }

    /// Capture budget; 0 means no capture wanted
    #[must_use]
    pub fn max_instances_to_capture(&self) -> u32 {
        self.max_instances_to_capture
    }

    /// Whether the declared type can be substituted at all.
    ///
    /// Primitives never can. Generic placeholders and interfaces pass here; the final-slot
    /// path rejects them separately because only that path needs a concrete class.
    #[must_use]
    pub fn is_mockable(&self) -> bool {
        self.declared_type.kind() != TypeKind::Primitive
    }

    /// Derive the configuration handed to the transformer.
    ///
    /// ## Arguments
    /// * `dynamic_mocking` - Enabled on the partial-mock path, where only intercepted
    ///   members behave as mocks
    #[must_use]
    pub fn mocking_configuration(&self, dynamic_mocking: bool) -> MockingConfiguration {
        MockingConfiguration {
            dynamic_mocking,
            filters: self.filters.clone(),
        }
    }
}
