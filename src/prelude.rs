//! # mimicry Prelude
//!
//! Convenient re-exports of the types needed to embed the substitution core in a
//! test-double framework.

/// The main error type for all mimicry operations
pub use crate::Error;

/// The result type used throughout mimicry
pub use crate::Result;

/// The per-fixture orchestrator
pub use crate::director::MockSlotDirector;

/// Fixture model
pub use crate::fixture::{
    FixtureClass, FixtureClassRc, FixtureInstance, FixtureSlot, MockRole, MockedTypeDescriptor,
    MockingConfiguration, MockingRequest, SlotId, SlotModifiers,
};

/// Runtime type model
pub use crate::types::{TargetType, TargetTypeRc, TypeKind, TypeToken};

/// Redefinition machinery and the transformer boundary
pub use crate::redefinition::{
    InstanceFactory, InstanceRc, MockInstance, TransformOutcome, TransformedType, Transformer,
};

/// Capture of spontaneously constructed instances
pub use crate::capture::CaptureRegistry;

/// Process-wide shared state
pub use crate::state::{MockRegistration, SharedMockState};
