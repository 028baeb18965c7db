//! PostgreSQL adapter tests
//!
//! These tests start a PostgreSQL container and are ignored by default.
//! Run them with `cargo test -p infra_db -- --ignored`.

use std::sync::Arc;

use core_kernel::{HealthCheckable, RepositoryProvider, UnitOfWork, UnitOfWorkFactory};
use domain_tree::{Family, FamilyService, MultimediaLinkService, Note, NoteService, Owner};
use infra_db::PgUnitOfWork;
use test_utils::{
    assert_ordered_by_id, assert_stored_as, create_isolated_test_database, FamilyBuilder,
    IndividualFixtures, MultimediaLinkBuilder, NoteBuilder, TreeFixtures,
};

async fn unit_of_work(db: &test_utils::TestDatabase) -> Arc<PgUnitOfWork> {
    Arc::new(db.factory().begin().await.expect("begin unit of work"))
}

#[tokio::test]
#[ignore = "requires docker"]
async fn note_lifecycle() {
    let db = create_isolated_test_database().await.expect("database");
    let service = NoteService::new(unit_of_work(&db).await);
    let tree = TreeFixtures::primary();

    let original = NoteBuilder::new().owned_by(IndividualFixtures::father_as_owner()).build();
    let mut stored = service.add(original.clone()).await.unwrap();
    assert_stored_as(&stored, &original);

    stored.text = "Arrived at Ellis Island".to_string();
    service.update(&stored).await.unwrap();
    let found = service.get(tree, stored.id).await.unwrap();
    assert_eq!(found, Some(stored.clone()));

    service.delete(&stored).await.unwrap();
    assert_eq!(service.get(tree, stored.id).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn reads_are_scoped_to_the_tree() {
    let db = create_isolated_test_database().await.expect("database");
    let service = MultimediaLinkService::new(unit_of_work(&db).await);

    let link = service.add(MultimediaLinkBuilder::new().build()).await.unwrap();
    service
        .add(MultimediaLinkBuilder::new().in_tree(TreeFixtures::secondary()).build())
        .await
        .unwrap();

    let primary = service.get_all(TreeFixtures::primary()).await.unwrap();
    assert_eq!(primary, vec![link.clone()]);
    assert_eq!(service.get(TreeFixtures::secondary(), link.id).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn family_children_keep_their_order() {
    let db = create_isolated_test_database().await.expect("database");
    let uow = unit_of_work(&db).await;
    let service = FamilyService::new(Arc::clone(&uow));
    let tree = TreeFixtures::primary();

    let family = service.add(FamilyBuilder::nuclear().build()).await.unwrap();
    service.add(FamilyBuilder::new().with_husband(IndividualFixtures::first_child()).build()).await.unwrap();

    let by_child = service.get_by_child(tree, IndividualFixtures::second_child()).await.unwrap();
    assert_eq!(by_child, vec![family.clone()]);

    let as_spouse = service.get_by_spouse(tree, IndividualFixtures::first_child()).await.unwrap();
    assert_eq!(as_spouse.len(), 1);
    assert_ordered_by_id(&service.get_all(tree).await.unwrap());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn missing_rows_are_reported_and_rolled_back() {
    let db = create_isolated_test_database().await.expect("database");
    let uow = unit_of_work(&db).await;
    let service = FamilyService::new(Arc::clone(&uow));

    let ghost = FamilyBuilder::new().with_id(core_kernel::EntityId::new(999)).build();
    let error = service.update(&ghost).await.unwrap_err();
    assert!(error.is_not_found());
    assert!(!uow.session().in_transaction().await);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn uncommitted_writes_are_discarded_by_rollback() {
    let db = create_isolated_test_database().await.expect("database");
    let uow = unit_of_work(&db).await;
    let repository = RepositoryProvider::<Note>::repository(uow.as_ref());

    let staged = repository
        .add(Note::new(TreeFixtures::primary(), "draft").owned_by(Owner::family(core_kernel::EntityId::new(3))))
        .await
        .unwrap();
    assert!(uow.session().in_transaction().await);
    uow.rollback().await.unwrap();

    let fresh = unit_of_work(&db).await;
    let notes = NoteService::new(fresh);
    assert_eq!(notes.get(TreeFixtures::primary(), staged.id).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn one_commit_covers_every_repository() {
    let db = create_isolated_test_database().await.expect("database");
    let uow = unit_of_work(&db).await;
    let notes = RepositoryProvider::<Note>::repository(uow.as_ref());
    let families = RepositoryProvider::<Family>::repository(uow.as_ref());

    notes.add(NoteBuilder::new().build()).await.unwrap();
    families.add(FamilyBuilder::nuclear().build()).await.unwrap();
    uow.commit().await.unwrap();

    let tree = TreeFixtures::primary();
    assert_eq!(notes.get_by_tree(tree).await.unwrap().len(), 1);
    assert_eq!(families.get_by_tree(tree).await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn health_check_reports_healthy() {
    let db = create_isolated_test_database().await.expect("database");
    let result = db.factory().health_check().await;
    assert!(result.is_operational());
}
