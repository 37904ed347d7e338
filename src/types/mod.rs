//! Runtime type model.
//!
//! This library operates on described runtime types rather than on Rust's own type system:
//! the embedding test-double framework tells the core which types exist, what category they
//! fall into, and how to identify them process-wide. The model is deliberately small — a
//! token identity, a category, and a name are all the substitution machinery needs.
//!
//! # Key Components
//!
//! - [`TypeToken`] - Process-wide identity of a target type
//! - [`TargetType`] / [`TargetTypeRc`] - Immutable description of one runtime type
//! - [`TypeKind`] - Fundamental category driving substitution policy
//! - [`generated_class_name`] - Naming scheme for generated mock classes

mod naming;
mod target;

pub use naming::generated_class_name;
pub use target::{TargetType, TargetTypeRc, TypeKind, TypeToken};
