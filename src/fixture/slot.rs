//! Slot declarations on a test fixture.
//!
//! A slot is a named, typed storage location on a fixture class. Slots carry the modifiers
//! that decide eligibility and substitution strategy, plus an optional [`MockingRequest`]
//! describing how the test author wants the slot mocked. Slots without a request are never
//! candidates for substitution.

use std::sync::atomic::{AtomicU32, Ordering};

use bitflags::bitflags;

use crate::types::TargetTypeRc;

/// Global slot id source; ids are unique across all fixture classes in the process.
static NEXT_SLOT_ID: AtomicU32 = AtomicU32::new(1);

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Declared modifiers of a fixture slot
    pub struct SlotModifiers: u32 {
        /// Slot cannot be overwritten once assigned
        const FINAL = 0x0001;
        /// Slot belongs to the fixture type, not to instances
        const STATIC = 0x0002;
        /// Slot was synthesized by the compiler
        const SYNTHETIC = 0x0004;
    }
}

impl SlotModifiers {
    /// True when the slot may participate in mocking at all.
    ///
    /// Static and compiler-synthesized slots are never eligible.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        !self.intersects(SlotModifiers::STATIC | SlotModifiers::SYNTHETIC)
    }
}

/// Identity of one slot, unique within the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u32);

impl SlotId {
    fn next() -> Self {
        SlotId(NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw slot id value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// The role a mocked slot plays in the fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockRole {
    /// Fully replaced: every member of the type behaves as a mock
    Full,
    /// Fully replaced and also offered for dependency injection into a tested object
    Injectable,
    /// Partially intercepted: the slot holds a real collaborator under test
    Tested,
}

/// What the test author asked for on one slot.
///
/// Built by the declarative discovery layer (out of scope here) and attached to the slot
/// declaration. Immutable once built.
#[derive(Debug, Clone)]
pub struct MockingRequest {
    role: MockRole,
    mock_id: Option<String>,
    max_instances_to_capture: u32,
    filters: Vec<String>,
}

impl MockingRequest {
    /// A full-mock request with defaults
    #[must_use]
    pub fn full() -> Self {
        Self::with_role(MockRole::Full)
    }

    /// An injectable-mock request with defaults
    #[must_use]
    pub fn injectable() -> Self {
        Self::with_role(MockRole::Injectable)
    }

    /// A tested (partial-mock) request with defaults
    #[must_use]
    pub fn tested() -> Self {
        Self::with_role(MockRole::Tested)
    }

    fn with_role(role: MockRole) -> Self {
        MockingRequest {
            role,
            mock_id: None,
            max_instances_to_capture: 0,
            filters: Vec::new(),
        }
    }

    /// Attach a user-supplied mock id disambiguating this slot from others of the same type
    #[must_use]
    pub fn with_mock_id(mut self, mock_id: &str) -> Self {
        self.mock_id = Some(mock_id.to_string());
        self
    }

    /// Request capture of up to `max` instances constructed spontaneously by the code under test
    #[must_use]
    pub fn with_capture(mut self, max: u32) -> Self {
        self.max_instances_to_capture = max;
        self
    }

    /// Restrict interception to the named members
    #[must_use]
    pub fn with_filters(mut self, filters: &[&str]) -> Self {
        self.filters = filters.iter().map(|f| (*f).to_string()).collect();
        self
    }

    /// The role requested for the slot
    #[must_use]
    pub fn role(&self) -> MockRole {
        self.role
    }

    /// The user-supplied mock id, if any
    #[must_use]
    pub fn mock_id(&self) -> Option<&str> {
        self.mock_id.as_deref()
    }

    /// Capture budget; 0 means no capture wanted
    #[must_use]
    pub fn max_instances_to_capture(&self) -> u32 {
        self.max_instances_to_capture
    }

    /// Member interception filters; empty means intercept everything
    #[must_use]
    pub fn filters(&self) -> &[String] {
        &self.filters
    }
}

/// One declared slot of a fixture class
#[derive(Debug, Clone)]
pub struct FixtureSlot {
    id: SlotId,
    name: String,
    declared_type: TargetTypeRc,
    modifiers: SlotModifiers,
    mocking: Option<MockingRequest>,
}

impl FixtureSlot {
    /// Declare a new slot.
    ///
    /// ## Arguments
    /// * `name` - Slot name as declared on the fixture
    /// * `declared_type` - Static type of the slot
    /// * `modifiers` - Declared modifiers
    /// * `mocking` - Mocking request, or `None` for a plain slot
    #[must_use]
    pub fn new(
        name: &str,
        declared_type: TargetTypeRc,
        modifiers: SlotModifiers,
        mocking: Option<MockingRequest>,
    ) -> Self {
        FixtureSlot {
            id: SlotId::next(),
            name: name.to_string(),
            declared_type,
            modifiers,
            mocking,
        }
    }

    /// The slot's process-wide identity
    #[must_use]
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// The slot's declared name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
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

    /// The slot's mocking request, if the author marked it for mocking
    #[must_use]
    pub fn mocking(&self) -> Option<&MockingRequest> {
        self.mocking.as_ref()
    }
}
