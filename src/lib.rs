// Copyright 2026 The mimicry authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![deny(missing_docs)]

//! # mimicry
//!
//! The injection/substitution core of a test-double framework: given a test fixture, it
//! discovers which of the fixture's data slots request a mock, decides a substitution
//! strategy per slot, transforms the runtime type so instances behave as controllable
//! doubles, and manages the full lifecycle of those instances across one test execution —
//! creation, assignment, and capture of instances spontaneously created by the code under
//! test.
//!
//! ## What this crate is, and is not
//!
//! This crate is the hard middle of such a framework: a cache-correctness problem (the
//! same type under the same configuration is transformed at most once, process-wide), a
//! lifecycle state machine (slot → armed → assigned → cleared), and delicate failure
//! semantics (constructor failures propagate with a readable, filtered trace instead of
//! being swallowed). The pieces around it are collaborators consumed at their interface:
//! the declarative discovery syntax, the expectation-recording DSL, and above all the
//! [`Transformer`](redefinition::Transformer) — the external capability that actually
//! rewrites a type's method and constructor bodies.
//!
//! It decides *which* types get substituted and *when* instances exist; it never decides
//! what a mock does when invoked, and it is not a dependency-injection container.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mimicry::prelude::*;
//!
//! let shared = SharedMockState::new();
//! let director = MockSlotDirector::build_redefinitions(
//!     shared.clone(),
//!     transformer,
//!     fixture_class,
//! )?;
//!
//! // Once per test:
//! director.assign_new_instances_to_mock_fields(&fixture_instance)?;
//!
//! // From the transformer's constructor interception:
//! director.capture_new_instance_for_applicable_slot(&fixture_instance, &constructed);
//!
//! // At teardown:
//! director.clean_up();
//! # Ok::<(), mimicry::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`fixture`] - fixture classes, slots, instances, and per-slot descriptors
//! - [`types`] - the described runtime type model and generated-class naming
//! - [`redefinition`] - the transformer boundary, the process-wide cache, the engine, and
//!   instance factories
//! - [`capture`] - claiming of spontaneously constructed instances
//! - [`state`] - the explicit shared-state service, including the exclusion zone
//! - [`director`] - the per-fixture orchestrator
//! - [`Error`] and [`Result`] - error handling
//!
//! ## Concurrency
//!
//! One test thread drives a fixture's pass, but the redefinition cache and the
//! mocked-class registry are process-wide. Every discovery-and-redefinition pass runs
//! inside [`state::SharedMockState`]'s exclusion zone with scoped acquisition; cache
//! entries are immutable once written and safe for concurrent readers past the writer's
//! zone.

pub mod capture;
pub mod director;
pub mod fixture;
pub mod prelude;
pub mod redefinition;
pub mod stacktrace;
pub mod state;
pub mod types;

mod error;

pub use error::Error;

/// The result type used throughout mimicry
pub type Result<T> = std::result::Result<T, Error>;
