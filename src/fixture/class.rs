//! Fixture classes and instances.
//!
//! A [`FixtureClass`] describes a test fixture type: its name, its ancestor chain, and the
//! slots it declares. A [`FixtureInstance`] is one live fixture object whose slot values the
//! director reads and writes during per-test assignment. Slot storage uses interior
//! mutability so the director can assign instances through a shared reference, the same way
//! field reflection works in the environments this core was designed for.

use std::sync::Arc;

use dashmap::DashMap;

use crate::fixture::slot::{FixtureSlot, SlotId};
use crate::redefinition::InstanceRc;

/// A reference-counted handle to a [`FixtureClass`]
pub type FixtureClassRc = Arc<FixtureClass>;

/// Description of one test fixture type.
///
/// Immutable after construction. The ancestor chain ends either at the chain root (no
/// superclass) or at a class flagged as a framework base; discovery never walks past either.
#[derive(Debug)]
pub struct FixtureClass {
    name: String,
    superclass: Option<FixtureClassRc>,
    framework_base: bool,
    slots: Vec<FixtureSlot>,
}

impl FixtureClass {
    /// Start building a fixture class description
    #[must_use]
    pub fn builder(name: &str) -> FixtureClassBuilder {
        FixtureClassBuilder {
            name: name.to_string(),
            superclass: None,
            framework_base: false,
            slots: Vec::new(),
        }
    }

    /// The class name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The direct superclass, if any
    #[must_use]
    pub fn superclass(&self) -> Option<&FixtureClassRc> {
        self.superclass.as_ref()
    }

    /// True for the framework's own expectation-block base classes.
    ///
    /// Discovery stops before such a class: its slots belong to the framework, not to the
    /// test author.
    #[must_use]
    pub fn is_framework_base(&self) -> bool {
        self.framework_base
    }

    /// The slots this class declares itself (not including inherited ones)
    #[must_use]
    pub fn slots(&self) -> &[FixtureSlot] {
        &self.slots
    }

    /// Find a declared slot by name, searching this class only
    #[must_use]
    pub fn slot_by_name(&self, name: &str) -> Option<&FixtureSlot> {
        self.slots.iter().find(|s| s.name() == name)
    }
}

/// Builder for [`FixtureClass`]
pub struct FixtureClassBuilder {
    name: String,
    superclass: Option<FixtureClassRc>,
    framework_base: bool,
    slots: Vec<FixtureSlot>,
}

impl FixtureClassBuilder {
    /// Set the direct superclass
    #[must_use]
    pub fn superclass(mut self, superclass: FixtureClassRc) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Mark the class as a framework expectation-block base
    #[must_use]
    pub fn framework_base(mut self) -> Self {
        self.framework_base = true;
        self
    }

    /// Declare a slot on the class
    #[must_use]
    pub fn slot(mut self, slot: FixtureSlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Finish the description
    #[must_use]
    pub fn build(self) -> FixtureClassRc {
        Arc::new(FixtureClass {
            name: self.name,
            superclass: self.superclass,
            framework_base: self.framework_base,
            slots: self.slots,
        })
    }
}

/// One live fixture object with mutable slot storage
#[derive(Debug)]
pub struct FixtureInstance {
    class: FixtureClassRc,
    values: DashMap<SlotId, InstanceRc>,
}

impl FixtureInstance {
    /// Create a fresh instance of the given fixture class with all slots unassigned
    #[must_use]
    pub fn new(class: FixtureClassRc) -> Self {
        FixtureInstance {
            class,
            values: DashMap::new(),
        }
    }

    /// The instance's class
    #[must_use]
    pub fn class(&self) -> &FixtureClassRc {
        &self.class
    }

    /// Read a slot's current value; `None` when the slot is unassigned
    #[must_use]
    pub fn slot_value(&self, slot: SlotId) -> Option<InstanceRc> {
        self.values.get(&slot).map(|v| v.value().clone())
    }

    /// Write a slot's value, replacing any previous one
    pub fn set_slot_value(&self, slot: SlotId, value: InstanceRc) {
        self.values.insert(slot, value);
    }
}
