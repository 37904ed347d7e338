//! Mock instances and the factory that creates them.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::redefinition::transformer::TransformedType;
use crate::types::TypeToken;
use crate::{Error, Result};

/// A reference-counted handle to a [`MockInstance`]
pub type InstanceRc = Arc<MockInstance>;

/// Global serial source; every instance in the process gets a distinct serial.
static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);

/// One live instance of a transformed type.
///
/// Instances are opaque to this library: a type identity, a serial distinguishing this
/// instance from every other, and the generated-class name it was created under. The
/// expectation DSL decides what the instance does when invoked.
pub struct MockInstance {
    type_token: TypeToken,
    generated_class_name: String,
    serial: u64,
}

impl MockInstance {
    /// Create a new instance of the given type under the given generated-class name.
    ///
    /// Also the entry point for instances constructed spontaneously by the code under test:
    /// the transformer's constructor interception materializes them through here before
    /// offering them for capture.
    #[must_use]
    pub fn new(type_token: TypeToken, generated_class_name: &str) -> InstanceRc {
        Arc::new(MockInstance {
            type_token,
            generated_class_name: generated_class_name.to_string(),
            serial: NEXT_SERIAL.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Identity of the instance's type
    #[must_use]
    pub fn type_token(&self) -> TypeToken {
        self.type_token
    }

    /// The generated-class name the instance was created under
    #[must_use]
    pub fn generated_class_name(&self) -> &str {
        &self.generated_class_name
    }

    /// The instance's process-wide serial
    #[must_use]
    pub fn serial(&self) -> u64 {
        self.serial
    }
}

impl fmt::Debug for MockInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.generated_class_name, self.serial)
    }
}

/// Produces fresh instances of exactly one transformed type.
///
/// Stateless beyond that capability: the factory holds the cached transformation outcome
/// and the generated-class name, nothing per-test.
#[derive(Debug)]
pub struct InstanceFactory {
    transformed: Arc<TransformedType>,
    generated_class_name: String,
}

impl InstanceFactory {
    /// Wrap a transformation outcome as a factory
    #[must_use]
    pub fn new(transformed: Arc<TransformedType>, generated_class_name: &str) -> Self {
        InstanceFactory {
            transformed,
            generated_class_name: generated_class_name.to_string(),
        }
    }

    /// The generated-class name instances are created under
    #[must_use]
    pub fn generated_class_name(&self) -> &str {
        &self.generated_class_name
    }

    /// Construct a new instance.
    ///
    /// # Errors
    /// [`Error::Initialization`] when the transformed type's own setup fails. The trace is
    /// raw at this point; the caller filters it before propagating.
    pub fn create(&self) -> Result<InstanceRc> {
        let target = self.transformed.target();

        match self.transformed.run_constructor() {
            Ok(()) => Ok(MockInstance::new(target.token(), &self.generated_class_name)),
            Err(failure) => Err(Error::Initialization {
                type_name: target.full_name(),
                message: failure.message,
                trace: failure.trace,
            }),
        }
    }
}
