//! Naming of generated mock classes.
//!
//! Every substituted type gets a generated-class name so that instances, traces, and the
//! redefinition cache can refer to the transformed shape unambiguously. A slot with a
//! user-supplied mock id gets a stable name derived from that id; otherwise the minted
//! class id keeps names unique per (type, configuration).

use crate::types::target::TargetType;

const GENERATED_CLASS_MARKER: &str = "$Mocked";

/// Name for the generated class of a substituted type.
///
/// ## Arguments
/// * `target` - The type being substituted
/// * `mock_id` - User-supplied slot disambiguator, if any
/// * `class_id` - Minted class id, used when no mock id was supplied
#[must_use]
pub fn generated_class_name(target: &TargetType, mock_id: Option<&str>, class_id: u32) -> String {
    match mock_id {
        Some(id) => format!("{}{}_{}", target.full_name(), GENERATED_CLASS_MARKER, id),
        None => format!("{}{}{}", target.full_name(), GENERATED_CLASS_MARKER, class_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::target::{TypeKind, TypeToken};

    #[test]
    fn test_name_with_mock_id() {
        let t = TargetType::new(TypeToken::new(1), "orders", "Repository", TypeKind::Class);
        assert_eq!(
            generated_class_name(&t, Some("primaryRepo"), 7),
            "orders.Repository$Mocked_primaryRepo"
        );
    }

    #[test]
    fn test_name_without_mock_id_uses_class_id() {
        let t = TargetType::new(TypeToken::new(1), "", "Collaborator", TypeKind::Class);
        assert_eq!(generated_class_name(&t, None, 3), "Collaborator$Mocked3");
    }
}
