//! Type redefinition: strategy selection, caching, and instance creation.
//!
//! # Key Components
//!
//! - [`Transformer`] - External capability that rewrites a type's executable behavior
//! - [`TransformOutcome`] / [`TransformedType`] - Discriminated result of a rewrite
//! - [`RedefinitionCache`] - Process-wide (type, configuration) → outcome table
//! - [`TypeRedefinition`] - The engine applying one slot's substitution strategy
//! - [`InstanceFactory`] / [`MockInstance`] - Creation of fresh mock instances

mod cache;
mod engine;
mod factory;
mod transformer;

pub use cache::{CacheEntry, CacheKey, GeneratedClassId, RedefinitionCache};
pub use engine::TypeRedefinition;
pub use factory::{InstanceFactory, InstanceRc, MockInstance};
pub use transformer::{
    ConstructorHook, InitializationFailure, TransformOutcome, TransformedType, Transformer,
};
