//! Multimedia Link Service Tests

mod common;

use std::sync::Arc;

use core_kernel::{EntityId, UnitOfWorkFactory};
use domain_tree::adapters::InMemoryUnitOfWorkFactory;
use domain_tree::{MultimediaLink, MultimediaLinkService, Owner};
use proptest::prelude::*;

use common::{tree, RecordingUnitOfWork};

fn service() -> (MultimediaLinkService<RecordingUnitOfWork>, Arc<RecordingUnitOfWork>) {
    let uow = RecordingUnitOfWork::new();
    (MultimediaLinkService::new(Arc::clone(&uow)), uow)
}

#[tokio::test]
async fn test_add_and_get_link() {
    let (links, _) = service();

    let link = links
        .add(MultimediaLink::new(tree(), "scans/marriage-1902.pdf", "pdf").titled("Marriage record"))
        .await
        .unwrap();

    let found = links.get(tree(), link.id).await.unwrap().unwrap();
    assert_eq!(found.title, "Marriage record");
    assert_eq!(found.format, "pdf");
}

#[tokio::test]
async fn test_link_without_file_rejected() {
    let (links, uow) = service();

    let error = links.add(MultimediaLink::new(tree(), "", "jpeg")).await.unwrap_err();

    assert!(error.is_validation());
    assert_eq!(uow.commits(), 0);
}

#[tokio::test]
async fn test_link_owned_by_negative_id_rejected() {
    let (links, uow) = service();
    let mut link = links
        .add(MultimediaLink::new(tree(), "photos/mill.jpg", "jpeg"))
        .await
        .unwrap();

    link.owner = Some(Owner::individual(EntityId::new(-4)));
    let error = links.update(&link).await.unwrap_err();

    assert!(error.is_validation());
    assert_eq!(uow.commits(), 1);
    let stored = links.get(tree(), link.id).await.unwrap().unwrap();
    assert_eq!(stored.owner, None);
}

#[tokio::test]
async fn test_get_by_owner_for_family() {
    let (links, _) = service();
    let family = Owner::family(EntityId::new(3));
    let photo = links
        .add(MultimediaLink::new(tree(), "photos/reunion.jpg", "jpeg").owned_by(family))
        .await
        .unwrap();
    links
        .add(MultimediaLink::new(tree(), "photos/unsorted.jpg", "jpeg"))
        .await
        .unwrap();

    let found = links.get_by_owner(tree(), family).await.unwrap();

    assert_eq!(found, vec![photo]);
}

#[tokio::test]
async fn test_delete_unknown_link_not_found() {
    let (links, _) = service();
    let mut ghost = MultimediaLink::new(tree(), "missing.png", "png");
    ghost.id = EntityId::new(12);

    let error = links.delete(&ghost).await.unwrap_err();

    assert!(error.is_not_found());
}

#[tokio::test]
async fn test_units_of_work_share_committed_state() {
    let factory = InMemoryUnitOfWorkFactory::new();
    let writer = MultimediaLinkService::new(Arc::new(factory.begin().await.unwrap()));
    let reader = MultimediaLinkService::new(Arc::new(factory.begin().await.unwrap()));

    let link = writer
        .add(MultimediaLink::new(tree(), "audio/interview.ogg", "ogg"))
        .await
        .unwrap();

    assert_eq!(reader.get(tree(), link.id).await.unwrap(), Some(link));
}

proptest! {
    #[test]
    fn prop_pages_cover_every_link(count in 0usize..30, page_size in 1usize..8) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let (links, _) = service();
            for n in 0..count {
                links
                    .add(MultimediaLink::new(tree(), format!("file-{}.jpg", n), "jpeg"))
                    .await
                    .unwrap();
            }

            let first = links.get_page(tree(), |_| true, 0, page_size).await.unwrap();
            let mut seen = 0;
            for index in 0..first.page_count() {
                let page = links.get_page(tree(), |_| true, index, page_size).await.unwrap();
                seen += page.len();
            }
            assert_eq!(first.total_count(), count);
            assert_eq!(seen, count);
        });
    }
}
