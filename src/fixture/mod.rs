//! Fixture model: classes, slots, instances, and mocked-slot descriptors.
//!
//! # Key Components
//!
//! - [`FixtureClass`] / [`FixtureClassRc`] - Description of a test fixture type and its
//!   ancestor chain
//! - [`FixtureSlot`] / [`SlotId`] - One declared storage location on a fixture
//! - [`SlotModifiers`] - Declared modifiers deciding eligibility and strategy
//! - [`MockingRequest`] / [`MockRole`] - What the test author asked for on a slot
//! - [`FixtureInstance`] - A live fixture object with mutable slot storage
//! - [`MockedTypeDescriptor`] - Immutable per-slot record built during discovery
//! - [`MockingConfiguration`] - The derived configuration handed to the transformer

mod class;
mod descriptor;
mod slot;

pub use class::{FixtureClass, FixtureClassBuilder, FixtureClassRc, FixtureInstance};
pub use descriptor::{MockedTypeDescriptor, MockingConfiguration};
pub use slot::{FixtureSlot, MockRole, MockingRequest, SlotId, SlotModifiers};
