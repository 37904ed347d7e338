use std::fmt;
use std::sync::Arc;

use strum::{EnumCount, EnumIter};

/// A reference-counted handle to a [`TargetType`]
pub type TargetTypeRc = Arc<TargetType>;

/// Identity of a target type within the process.
///
/// Tokens are opaque 32-bit identifiers assigned by whoever describes the runtime type
/// universe to this library. Two descriptions with the same token are the same type for
/// every purpose of the redefinition cache and the mocked-class registry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeToken(pub u32);

impl TypeToken {
    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        TypeToken(value)
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for TypeToken {
    fn from(value: u32) -> Self {
        TypeToken(value)
    }
}

impl From<TypeToken> for u32 {
    fn from(token: TypeToken) -> Self {
        token.0
    }
}

impl fmt::Debug for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeToken(0x{:08x})", self.0)
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// The fundamental category of a target type.
///
/// The category drives substitution policy: primitives are never mockable, generic
/// placeholders and interfaces are rejected on the final-slot path, everything else can be
/// transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum TypeKind {
    /// A concrete class
    Class,
    /// An abstract class
    AbstractClass,
    /// An interface with no implementation of its own
    Interface,
    /// A built-in primitive value type
    Primitive,
    /// An unresolved generic type placeholder
    GenericPlaceholder,
}

/// Description of one runtime type that a mock slot may declare.
///
/// This library has no ambient reflection; the embedding framework describes each type it
/// knows about once and shares the description via [`TargetTypeRc`]. Descriptions are
/// immutable after construction.
#[derive(Debug)]
pub struct TargetType {
    /// Process-wide identity of this type
    token: TypeToken,
    /// Namespace the type lives in (may be empty)
    namespace: String,
    /// Simple name of the type
    name: String,
    /// Fundamental category of the type
    kind: TypeKind,
}

impl TargetType {
    /// Create a new target type description.
    ///
    /// ## Arguments
    /// * `token` - Process-wide identity for the type
    /// * `namespace` - Namespace the type lives in, empty for global types
    /// * `name` - Simple name of the type
    /// * `kind` - Fundamental category of the type
    #[must_use]
    pub fn new(token: TypeToken, namespace: &str, name: &str, kind: TypeKind) -> TargetTypeRc {
        Arc::new(TargetType {
            token,
            namespace: namespace.to_string(),
            name: name.to_string(),
            kind,
        })
    }

    /// The type's identity token
    #[must_use]
    pub fn token(&self) -> TypeToken {
        self.token
    }

    /// The type's namespace
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The type's simple name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type's fundamental category
    #[must_use]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// The type's full name, `namespace.name` or just `name` for global types
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}
