//! Integration Tests for Family Tree Core
//!
//! These tests verify workflows that involve multiple crates working
//! together: services sharing a store across units of work, and the HTTP
//! layer observing what the services wrote.

use std::sync::Arc;

use family_tree::kernel::{EntityId, UnitOfWorkFactory};
use family_tree::tree::{
    FamilyService, InMemoryDatabase, InMemoryUnitOfWorkFactory, MultimediaLinkService, Note,
    NoteService, Owner,
};
use test_utils::{
    assert_ordered_by_id, assert_page, FamilyBuilder, IndividualFixtures, MultimediaLinkBuilder,
    NoteBuilder, TreeFixtures,
};

mod shared_store_workflow {
    use super::*;

    /// Writes committed by one unit of work are visible to the next
    #[tokio::test]
    async fn test_units_of_work_share_committed_state() {
        let factory = InMemoryUnitOfWorkFactory::new();
        let tree = TreeFixtures::primary();

        let writer = NoteService::new(Arc::new(factory.begin().await.unwrap()));
        let note = writer.add(NoteBuilder::new().build()).await.unwrap();

        let reader = NoteService::new(Arc::new(factory.begin().await.unwrap()));
        assert_eq!(reader.get(tree, note.id).await.unwrap(), Some(note));
    }

    /// Documenting a family: the family, a note on the father and a photo of
    /// the wedding, all found again through the owner queries
    #[tokio::test]
    async fn test_document_a_family() {
        let factory = InMemoryUnitOfWorkFactory::new();
        let tree = TreeFixtures::primary();
        let uow = Arc::new(factory.begin().await.unwrap());

        let families = FamilyService::new(Arc::clone(&uow));
        let notes = NoteService::new(Arc::clone(&uow));
        let links = MultimediaLinkService::new(Arc::clone(&uow));

        let family = families.add(FamilyBuilder::nuclear().build()).await.unwrap();
        let family_owner = Owner::family(family.id);

        notes
            .add(NoteBuilder::new().owned_by(IndividualFixtures::father_as_owner()).build())
            .await
            .unwrap();
        notes
            .add(NoteBuilder::new().with_text("Married in 1912").owned_by(family_owner).build())
            .await
            .unwrap();
        links
            .add(MultimediaLinkBuilder::new().owned_by(family_owner).build())
            .await
            .unwrap();

        let family_notes = notes.get_by_owner(tree, family_owner).await.unwrap();
        assert_eq!(family_notes.len(), 1);
        assert_eq!(family_notes[0].text, "Married in 1912");
        assert_eq!(links.get_by_owner(tree, family_owner).await.unwrap().len(), 1);

        let as_parent = families
            .get_by_spouse(tree, IndividualFixtures::mother())
            .await
            .unwrap();
        assert_eq!(as_parent, vec![family.clone()]);

        let database = factory.database();
        assert_eq!(database.family_count().await, 1);
        assert_eq!(database.note_count().await, 2);
        assert_eq!(database.multimedia_link_count().await, 1);
    }

    /// Paging walks the whole tree in id order
    #[tokio::test]
    async fn test_page_through_a_tree() {
        let factory = InMemoryUnitOfWorkFactory::new();
        let notes = NoteService::new(Arc::new(factory.begin().await.unwrap()));
        let tree = TreeFixtures::primary();

        for _ in 0..7 {
            notes.add(NoteBuilder::new().with_random_text().build()).await.unwrap();
        }
        notes
            .add(NoteBuilder::new().in_tree(TreeFixtures::secondary()).build())
            .await
            .unwrap();

        let mut seen: Vec<Note> = Vec::new();
        for page_index in 0..3 {
            let page = notes.get_page(tree, |_| true, page_index, 3).await.unwrap();
            let expected_len = if page_index < 2 { 3 } else { 1 };
            assert_page(&page, page_index, expected_len, 7);
            seen.extend(page.into_items());
        }

        assert_eq!(seen.len(), 7);
        assert_ordered_by_id(&seen);
    }
}

mod api_workflow {
    use super::*;
    use axum_test::TestServer;
    use family_tree::api::{config::ApiConfig, create_router};
    use serde_json::Value;

    /// The API and the services read and write the same store
    #[tokio::test]
    async fn test_api_reads_service_writes() {
        let database = Arc::new(InMemoryDatabase::new());
        let factory = InMemoryUnitOfWorkFactory::with_database(Arc::clone(&database));

        let families = FamilyService::new(Arc::new(factory.begin().await.unwrap()));
        let family = families.add(FamilyBuilder::nuclear().build()).await.unwrap();

        let server = TestServer::new(create_router(factory, ApiConfig::default())).unwrap();
        let listed: Value = server
            .get("/api/v1/trees/1/families")
            .add_query_param("child", IndividualFixtures::first_child().value())
            .await
            .json();

        assert_eq!(listed[0]["id"], family.id.value());
        assert_eq!(listed[0]["child_ids"], serde_json::json!([103, 104]));

        server
            .delete(&format!("/api/v1/trees/1/families/{}", family.id.value()))
            .await
            .assert_status(axum::http::StatusCode::NO_CONTENT);
        assert_eq!(families.get(TreeFixtures::primary(), family.id).await.unwrap(), None);
        assert_eq!(database.family_count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let server = TestServer::new(create_router(
            InMemoryUnitOfWorkFactory::new(),
            ApiConfig::default(),
        ))
        .unwrap();

        server
            .get(&format!("/api/v1/trees/1/notes/{}", EntityId::new(99).value()))
            .await
            .assert_status_not_found();
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;
    use test_utils::note_batch_strategy;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Every stored note comes back exactly once from get_all
        #[test]
        fn prop_get_all_returns_every_note(batch in note_batch_strategy(TreeFixtures::primary(), 20)) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let stored = runtime.block_on(async {
                let factory = InMemoryUnitOfWorkFactory::new();
                let notes = NoteService::new(Arc::new(factory.begin().await.unwrap()));
                for note in batch.clone() {
                    notes.add(note).await.unwrap();
                }
                notes.get_all(TreeFixtures::primary()).await.unwrap()
            });

            prop_assert_eq!(stored.len(), batch.len());
            for (stored, original) in stored.iter().zip(batch.iter()) {
                prop_assert_eq!(&stored.text, &original.text);
                prop_assert_eq!(stored.owner, original.owner);
            }
        }
    }
}
