//! The transformer boundary.
//!
//! The actual rewriting of a type's executable behavior is not this library's business; it
//! is performed by an external [`Transformer`] the embedding framework supplies. The trait
//! captures exactly the capabilities the redefinition engine needs: transform a type into a
//! mockable shape, transform it in place, cheaply reapply a previously computed outcome,
//! and restore a type at teardown. Implementations must be idempotent for identical
//! (type, configuration) pairs.

use std::fmt;
use std::sync::Arc;

use crate::fixture::MockingConfiguration;
use crate::types::TargetTypeRc;

/// Failure raised by a transformed type's own setup code during construction.
///
/// Carries the message and the call trace at the point of failure. The trace may contain
/// internal framework frames; those are filtered out before the failure reaches the test
/// author.
#[derive(Debug, Clone)]
pub struct InitializationFailure {
    /// Failure message from the type's setup code
    pub message: String,
    /// Call trace at the point of failure, innermost frame first
    pub trace: Vec<String>,
}

impl InitializationFailure {
    /// Create a failure with a message and trace frames
    #[must_use]
    pub fn new(message: &str, trace: &[&str]) -> Self {
        InitializationFailure {
            message: message.to_string(),
            trace: trace.iter().map(|f| (*f).to_string()).collect(),
        }
    }
}

/// Constructor behavior of a transformed type; may fail with an [`InitializationFailure`]
pub type ConstructorHook =
    Box<dyn Fn() -> std::result::Result<(), InitializationFailure> + Send + Sync>;

/// The opaque outcome of one successful transformation.
///
/// Owns the capability to run the transformed type's constructor. Stored in the
/// redefinition cache and shared between every slot and test that mocks the same
/// (type, configuration).
pub struct TransformedType {
    target: TargetTypeRc,
    constructor: Option<ConstructorHook>,
}

impl TransformedType {
    /// A transformed type whose constructor always succeeds
    #[must_use]
    pub fn new(target: TargetTypeRc) -> Arc<Self> {
        Arc::new(TransformedType {
            target,
            constructor: None,
        })
    }

    /// A transformed type with explicit constructor behavior
    #[must_use]
    pub fn with_constructor(target: TargetTypeRc, constructor: ConstructorHook) -> Arc<Self> {
        Arc::new(TransformedType {
            target,
            constructor: Some(constructor),
        })
    }

    /// The type this outcome was computed for
    #[must_use]
    pub fn target(&self) -> &TargetTypeRc {
        &self.target
    }

    /// Run the transformed type's constructor
    ///
    /// # Errors
    /// Returns the [`InitializationFailure`] raised by the type's own setup code.
    pub fn run_constructor(&self) -> std::result::Result<(), InitializationFailure> {
        match &self.constructor {
            Some(hook) => hook(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for TransformedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformedType")
            .field("target", &self.target)
            .field("has_constructor", &self.constructor.is_some())
            .finish()
    }
}

/// Result of asking the transformer to rewrite a type.
///
/// `Unsupported` is a normal negative result, not an error; the slot is simply left
/// unmocked.
#[derive(Debug)]
pub enum TransformOutcome {
    /// The type was rewritten; the outcome can be cached and reapplied
    Transformed(Arc<TransformedType>),
    /// The type cannot be substituted
    Unsupported,
}

/// External capability that rewrites a type's executable behavior.
///
/// Implementations must be idempotent for identical (type, configuration) pairs: the engine
/// relies on this when a cache entry is reapplied instead of rewritten.
pub trait Transformer: Send + Sync {
    /// Rewrite a type so fresh instances of it behave as controllable doubles
    fn transform(
        &self,
        target: &TargetTypeRc,
        configuration: &MockingConfiguration,
    ) -> TransformOutcome;

    /// Rewrite a type's methods and constructors in place so already-assigned instances
    /// behave as doubles
    fn transform_in_place(
        &self,
        target: &TargetTypeRc,
        configuration: &MockingConfiguration,
    ) -> TransformOutcome;

    /// Reapply a previously computed outcome without a fresh rewrite.
    ///
    /// Returns false when the outcome can no longer be applied.
    fn reapply(&self, outcome: &Arc<TransformedType>) -> bool {
        let _ = outcome;
        true
    }

    /// Ensure every given target class has completed its static initialization
    fn ensure_initialized(&self, targets: &[TargetTypeRc]) {
        let _ = targets;
    }

    /// Undo the transformation of a target class at teardown
    fn restore(&self, target: &TargetTypeRc) {
        let _ = target;
    }
}
