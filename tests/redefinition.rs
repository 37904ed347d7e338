//! Integration tests for the redefinition engine and its process-wide cache.
//!
//! The central property: substituting the same (type, configuration) pair any number of
//! times across fixtures performs the expensive rewrite at most once; everything after the
//! first substitution reapplies the cached outcome.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mimicry::prelude::*;
use mimicry::redefinition::TransformOutcome;

/// Transformer counting full rewrites and reapplications separately.
#[derive(Default)]
struct CountingTransformer {
    transforms: AtomicUsize,
    in_place_rewrites: AtomicUsize,
    reapplications: AtomicUsize,
    refuse_reapply: bool,
}

impl CountingTransformer {
    fn new() -> Arc<Self> {
        Arc::new(CountingTransformer::default())
    }

    fn refusing_reapply() -> Arc<Self> {
        Arc::new(CountingTransformer {
            refuse_reapply: true,
            ..CountingTransformer::default()
        })
    }
}

impl Transformer for CountingTransformer {
    fn transform(&self, target: &TargetTypeRc, _: &MockingConfiguration) -> TransformOutcome {
        self.transforms.fetch_add(1, Ordering::SeqCst);
        TransformOutcome::Transformed(TransformedType::new(target.clone()))
    }

    fn transform_in_place(
        &self,
        target: &TargetTypeRc,
        _: &MockingConfiguration,
    ) -> TransformOutcome {
        self.in_place_rewrites.fetch_add(1, Ordering::SeqCst);
        TransformOutcome::Transformed(TransformedType::new(target.clone()))
    }

    fn reapply(&self, _: &Arc<TransformedType>) -> bool {
        self.reapplications.fetch_add(1, Ordering::SeqCst);
        !self.refuse_reapply
    }
}

fn repo_type() -> TargetTypeRc {
    TargetType::new(TypeToken::new(100), "app", "Repository", TypeKind::Class)
}

fn fixture_with_final_slot(name: &str, target: TargetTypeRc) -> FixtureClassRc {
    FixtureClass::builder(name)
        .slot(FixtureSlot::new(
            "repo",
            target,
            SlotModifiers::FINAL,
            Some(MockingRequest::full()),
        ))
        .build()
}

/// Two fixtures mocking the same type in place under the same configuration share one
/// cache entry; the second pass reapplies instead of rewriting.
#[test]
fn test_in_place_rewrite_happens_at_most_once() -> Result<()> {
    let shared = SharedMockState::new();
    let transformer = CountingTransformer::new();
    let target = repo_type();

    let first = MockSlotDirector::build_redefinitions(
        shared.clone(),
        transformer.clone(),
        fixture_with_final_slot("FirstTest", target.clone()),
    )?;
    let second = MockSlotDirector::build_redefinitions(
        shared.clone(),
        transformer.clone(),
        fixture_with_final_slot("SecondTest", target.clone()),
    )?;

    assert_eq!(first.slots_not_set().len(), 1);
    assert_eq!(second.slots_not_set().len(), 1);
    assert_eq!(shared.cache().len(), 1);
    assert_eq!(transformer.in_place_rewrites.load(Ordering::SeqCst), 1);
    assert_eq!(transformer.reapplications.load(Ordering::SeqCst), 1);
    assert!(shared.is_class_mocked(target.token()));
    Ok(())
}

/// The full-mock path amortizes the same way: the second fixture gets its factory from
/// the cache without another transform.
#[test]
fn test_full_mock_transform_happens_at_most_once() -> Result<()> {
    let shared = SharedMockState::new();
    let transformer = CountingTransformer::new();
    let target = repo_type();

    let build = |name: &str| {
        MockSlotDirector::build_redefinitions(
            shared.clone(),
            transformer.clone(),
            FixtureClass::builder(name)
                .slot(FixtureSlot::new(
                    "repo",
                    target.clone(),
                    SlotModifiers::empty(),
                    Some(MockingRequest::full()),
                ))
                .build(),
        )
    };

    let first = build("FirstTest")?;
    let second = build("SecondTest")?;

    assert_eq!(first.slots_needing_value().len(), 1);
    assert_eq!(second.slots_needing_value().len(), 1);
    assert_eq!(shared.cache().len(), 1);
    assert_eq!(transformer.transforms.load(Ordering::SeqCst), 1);
    Ok(())
}

/// Dynamic (partial) and full mocking of the same type are distinct cache entries.
#[test]
fn test_dynamic_and_full_mocking_coexist() -> Result<()> {
    let shared = SharedMockState::new();
    let transformer = CountingTransformer::new();
    let target = repo_type();

    MockSlotDirector::build_redefinitions(
        shared.clone(),
        transformer.clone(),
        fixture_with_final_slot("FullTest", target.clone()),
    )?;

    MockSlotDirector::build_redefinitions(
        shared.clone(),
        transformer.clone(),
        FixtureClass::builder("PartialTest")
            .slot(FixtureSlot::new(
                "repo",
                target.clone(),
                SlotModifiers::empty(),
                Some(MockingRequest::tested()),
            ))
            .build(),
    )?;

    assert_eq!(shared.cache().len(), 2);
    assert_eq!(transformer.in_place_rewrites.load(Ordering::SeqCst), 2);
    Ok(())
}

/// A cached outcome the transformer can no longer reapply degrades to the silent
/// unsupported result: the slot is untracked, nothing is raised.
#[test]
fn test_failed_reapply_excludes_slot_silently() -> Result<()> {
    let shared = SharedMockState::new();
    let transformer = CountingTransformer::refusing_reapply();
    let target = repo_type();

    let first = MockSlotDirector::build_redefinitions(
        shared.clone(),
        transformer.clone(),
        fixture_with_final_slot("FirstTest", target.clone()),
    )?;
    let second = MockSlotDirector::build_redefinitions(
        shared.clone(),
        transformer.clone(),
        fixture_with_final_slot("SecondTest", target),
    )?;

    assert_eq!(first.slots_not_set().len(), 1);
    assert_eq!(second.slots_not_set().len(), 0);
    Ok(())
}

/// Generated-class names stay distinct across configurations but honor a user mock id.
#[test]
fn test_generated_class_naming() -> Result<()> {
    let shared = SharedMockState::new();
    let transformer = CountingTransformer::new();
    let target = repo_type();

    let fixture_class = FixtureClass::builder("Test")
        .slot(FixtureSlot::new(
            "repo",
            target,
            SlotModifiers::empty(),
            Some(MockingRequest::full().with_mock_id("primary")),
        ))
        .build();

    let director =
        MockSlotDirector::build_redefinitions(shared, transformer, fixture_class)?;
    let instance = FixtureInstance::new(director.fixture_class().clone());
    director.assign_new_instances_to_mock_fields(&instance)?;

    let slot_id = director.slots_needing_value()[0];
    let mock = instance.slot_value(slot_id).unwrap();
    assert_eq!(mock.generated_class_name(), "app.Repository$Mocked_primary");
    Ok(())
}
