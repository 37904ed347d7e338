//! Integration tests for capture of instances constructed spontaneously by the code
//! under test.

use std::sync::Arc;

use mimicry::prelude::*;
use mimicry::redefinition::TransformOutcome;

struct PlainTransformer;

impl PlainTransformer {
    fn new() -> Arc<Self> {
        Arc::new(PlainTransformer)
    }
}

impl Transformer for PlainTransformer {
    fn transform(&self, target: &TargetTypeRc, _: &MockingConfiguration) -> TransformOutcome {
        TransformOutcome::Transformed(TransformedType::new(target.clone()))
    }

    fn transform_in_place(
        &self,
        target: &TargetTypeRc,
        _: &MockingConfiguration,
    ) -> TransformOutcome {
        TransformOutcome::Transformed(TransformedType::new(target.clone()))
    }
}

fn worker_type() -> TargetTypeRc {
    TargetType::new(TypeToken::new(50), "app", "Worker", TypeKind::Class)
}

fn capture_fixture(limit: u32) -> FixtureClassRc {
    FixtureClass::builder("CaptureTest")
        .slot(FixtureSlot::new(
            "worker",
            worker_type(),
            SlotModifiers::empty(),
            Some(MockingRequest::full().with_capture(limit)),
        ))
        .build()
}

/// The full scenario from the design: one non-final mockable slot of a concrete type
/// with capture limit 2. Setup assigns a fresh instance and arms the budget; the code
/// under test constructing three instances results in exactly two captured, one ignored.
#[test]
fn test_capture_budget_of_two_claims_exactly_two() -> Result<()> {
    let shared = SharedMockState::new();
    let director = MockSlotDirector::build_redefinitions(
        shared.clone(),
        PlainTransformer::new(),
        capture_fixture(2),
    )?;
    let instance = FixtureInstance::new(director.fixture_class().clone());
    director.assign_new_instances_to_mock_fields(&instance)?;

    let spontaneous: Vec<_> = (0..3)
        .map(|_| MockInstance::new(worker_type().token(), "app.Worker$Mocked1"))
        .collect();

    assert!(director.capture_new_instance_for_applicable_slot(&instance, &spontaneous[0]));
    assert!(director.capture_new_instance_for_applicable_slot(&instance, &spontaneous[1]));
    assert!(!director.capture_new_instance_for_applicable_slot(&instance, &spontaneous[2]));

    assert!(shared.is_mock_registered(&spontaneous[0]));
    assert!(shared.is_mock_registered(&spontaneous[1]));
    assert!(!shared.is_mock_registered(&spontaneous[2]));
    Ok(())
}

/// Without any capture interest the hook always declines, leaving instances alone.
#[test]
fn test_no_capture_interest_declines_everything() -> Result<()> {
    let shared = SharedMockState::new();
    let fixture_class = FixtureClass::builder("Test")
        .slot(FixtureSlot::new(
            "worker",
            worker_type(),
            SlotModifiers::empty(),
            Some(MockingRequest::full()),
        ))
        .build();

    let director =
        MockSlotDirector::build_redefinitions(shared.clone(), PlainTransformer::new(), fixture_class)?;
    let instance = FixtureInstance::new(director.fixture_class().clone());
    director.assign_new_instances_to_mock_fields(&instance)?;

    let constructed = MockInstance::new(worker_type().token(), "app.Worker$Mocked1");
    assert!(!director.capture_new_instance_for_applicable_slot(&instance, &constructed));
    assert!(!shared.is_mock_registered(&constructed));
    Ok(())
}

/// An instance of a type no slot is interested in is never claimed.
#[test]
fn test_unrelated_type_is_not_captured() -> Result<()> {
    let shared = SharedMockState::new();
    let director = MockSlotDirector::build_redefinitions(
        shared,
        PlainTransformer::new(),
        capture_fixture(2),
    )?;
    let instance = FixtureInstance::new(director.fixture_class().clone());
    director.assign_new_instances_to_mock_fields(&instance)?;

    let other = MockInstance::new(TypeToken::new(51), "app.Other$Mocked1");
    assert!(!director.capture_new_instance_for_applicable_slot(&instance, &other));
    Ok(())
}

/// A fresh test run gets a fresh capture budget: assignment of a new instance resets the
/// exhausted counter back to the full limit.
#[test]
fn test_budget_resets_on_next_test_run() -> Result<()> {
    let shared = SharedMockState::new();
    let director = MockSlotDirector::build_redefinitions(
        shared,
        PlainTransformer::new(),
        capture_fixture(1),
    )?;

    let first_test = FixtureInstance::new(director.fixture_class().clone());
    director.assign_new_instances_to_mock_fields(&first_test)?;

    let a = MockInstance::new(worker_type().token(), "app.Worker$Mocked1");
    let b = MockInstance::new(worker_type().token(), "app.Worker$Mocked1");
    assert!(director.capture_new_instance_for_applicable_slot(&first_test, &a));
    assert!(!director.capture_new_instance_for_applicable_slot(&first_test, &b));

    let second_test = FixtureInstance::new(director.fixture_class().clone());
    director.assign_new_instances_to_mock_fields(&second_test)?;

    let c = MockInstance::new(worker_type().token(), "app.Worker$Mocked1");
    assert!(director.capture_new_instance_for_applicable_slot(&second_test, &c));
    Ok(())
}

/// The framework-assigned instance itself is not claimed as a spontaneous construction.
#[test]
fn test_assigned_instance_does_not_consume_budget() -> Result<()> {
    let shared = SharedMockState::new();
    let director = MockSlotDirector::build_redefinitions(
        shared,
        PlainTransformer::new(),
        capture_fixture(1),
    )?;
    let instance = FixtureInstance::new(director.fixture_class().clone());
    director.assign_new_instances_to_mock_fields(&instance)?;

    let slot_id = director.slots_needing_value()[0];
    let assigned = instance.slot_value(slot_id).unwrap();
    assert!(!director.capture_new_instance_for_applicable_slot(&instance, &assigned));

    // Budget still intact for a genuinely spontaneous construction.
    let spontaneous = MockInstance::new(worker_type().token(), "app.Worker$Mocked1");
    assert!(director.capture_new_instance_for_applicable_slot(&instance, &spontaneous));
    Ok(())
}
