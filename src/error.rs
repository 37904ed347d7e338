use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers the failure conditions that can occur while discovering mock slots,
/// redefining target types, and materializing mock instances. Everything else the core can
/// report (an unsupported type, an already-assigned slot, a missing capture interest) is a
/// normal negative result, not an error.
///
/// # Error Categories
///
/// ## Configuration Errors
/// - [`Error::InvalidMockConfiguration`] - A final slot names a type that cannot be mocked in place
///
/// ## Instance Construction Errors
/// - [`Error::Initialization`] - A transformed type failed during its own setup
///
/// ## Synchronization Errors
/// - [`Error::LockError`] - The redefinition exclusion zone is poisoned
#[derive(Error, Debug)]
pub enum Error {
    /// A final mock slot names a type that cannot be given mock behavior in place.
    ///
    /// Raised at discovery time when a final slot's declared type is an unresolved generic
    /// placeholder, or an interface on a slot that is not injectable. A final slot cannot be
    /// overwritten by the framework, so its declared type must be a concrete class whose
    /// already-assigned instance can be intercepted.
    ///
    /// The `mock_id` identifies the offending slot.
    #[error("Final mock slot \"{mock_id}\" must be of a class type")]
    InvalidMockConfiguration {
        /// Identifier of the slot with the invalid configuration
        mock_id: String,
    },

    /// A freshly constructed mock instance failed during its own initialization.
    ///
    /// The failure originates in the transformed type's static or instance setup, not in this
    /// library. It is propagated to the test author after the trace has been filtered of
    /// internal frames; it is never retried or swallowed.
    #[error("Failed to initialize mocked type {type_name}: {message}")]
    Initialization {
        /// Full name of the type whose construction failed
        type_name: String,
        /// Failure message reported by the type's own setup code
        message: String,
        /// Call trace at the point of failure, filtered of internal frames
        trace: Vec<String>,
    },

    /// Failed to lock target.
    ///
    /// This error occurs when thread synchronization fails, typically when the redefinition
    /// exclusion zone was poisoned by a panicking fixture pass on another thread.
    #[error("Failed to lock target")]
    LockError,

    /// Generic error for miscellaneous failures.
    ///
    /// Used for errors that don't fit into other categories.
    #[error("{0}")]
    Error(String),
}
