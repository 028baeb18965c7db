//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating entities that satisfy the
//! domain invariants, so properties can focus on service behavior.

use proptest::collection::{btree_set, vec};
use proptest::prelude::*;

use core_kernel::{EntityId, TreeId};
use domain_tree::{EntityKind, Family, MultimediaLink, Note, Owner};

/// Strategy for valid (non-negative) tree ids
pub fn tree_id_strategy() -> impl Strategy<Value = TreeId> {
    (0i64..50).prop_map(TreeId::new)
}

/// Strategy for ids of stored entities
pub fn entity_id_strategy() -> impl Strategy<Value = EntityId> {
    (1i64..10_000).prop_map(EntityId::new)
}

/// Strategy for entity kinds
pub fn entity_kind_strategy() -> impl Strategy<Value = EntityKind> {
    prop_oneof![
        Just(EntityKind::Individual),
        Just(EntityKind::Family),
        Just(EntityKind::Fact),
        Just(EntityKind::Source),
        Just(EntityKind::Repository),
        Just(EntityKind::Citation),
    ]
}

/// Strategy for optional owners
pub fn owner_strategy() -> impl Strategy<Value = Option<Owner>> {
    proptest::option::of(
        (entity_kind_strategy(), entity_id_strategy())
            .prop_map(|(kind, id)| Owner::new(kind, id)),
    )
}

/// Strategy for unsaved notes in the given tree
pub fn note_strategy(tree_id: TreeId) -> impl Strategy<Value = Note> {
    (owner_strategy(), "[a-zA-Z0-9 ,.]{0,80}").prop_map(move |(owner, text)| Note {
        id: EntityId::UNSAVED,
        tree_id,
        owner,
        text,
    })
}

/// Strategy for unsaved multimedia links that pass validation
pub fn multimedia_link_strategy(tree_id: TreeId) -> impl Strategy<Value = MultimediaLink> {
    (
        owner_strategy(),
        "[a-z]{1,12}/[a-z0-9_-]{1,24}",
        prop_oneof![Just("jpeg"), Just("png"), Just("pdf"), Just("mp3")],
        "[A-Za-z ]{0,40}",
    )
        .prop_map(move |(owner, stem, format, title)| MultimediaLink {
            id: EntityId::UNSAVED,
            tree_id,
            owner,
            file: format!("{}.{}", stem, format),
            format: format.to_string(),
            title,
        })
}

/// Strategy for unsaved families that pass validation
///
/// Spouses come from 1..1000 and children from 1000.., so a spouse is never
/// listed as a child, and children are drawn from a set so none repeats.
pub fn family_strategy(tree_id: TreeId) -> impl Strategy<Value = Family> {
    (
        proptest::option::of(1i64..500),
        proptest::option::of(500i64..1000),
        btree_set(1000i64..5000, 0..6),
    )
        .prop_map(move |(husband, wife, children)| Family {
            id: EntityId::UNSAVED,
            tree_id,
            husband_id: husband.map(EntityId::new),
            wife_id: wife.map(EntityId::new),
            child_ids: children.into_iter().map(EntityId::new).collect(),
        })
}

/// Strategy for a batch of notes in one tree
pub fn note_batch_strategy(tree_id: TreeId, max: usize) -> impl Strategy<Value = Vec<Note>> {
    vec(note_strategy(tree_id), 0..max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Entity;

    proptest! {
        #[test]
        fn generated_families_are_valid(family in family_strategy(TreeId::new(1))) {
            prop_assert!(family.validate().is_ok());
        }

        #[test]
        fn generated_links_are_valid(link in multimedia_link_strategy(TreeId::new(1))) {
            prop_assert!(link.validate().is_ok());
        }

        #[test]
        fn generated_tree_ids_are_not_negative(tree_id in tree_id_strategy()) {
            prop_assert!(!tree_id.is_negative());
        }
    }
}
