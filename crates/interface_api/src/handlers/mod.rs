//! Request handlers
//!
//! Every request opens its own unit of work from the factory in
//! [`AppState`]; writes are committed by the service before the response
//! is sent.

pub mod health;
pub mod notes;
pub mod multimedia_links;
pub mod families;

use std::sync::Arc;

use core_kernel::{Entity, EntityId, RepositoryProvider, TreeId, UnitOfWorkFactory};
use domain_tree::EntityService;

use crate::error::ApiError;
use crate::AppState;

/// Builds the service for `E` over a fresh unit of work
pub(crate) async fn service<E, F>(
    state: &AppState<F>,
) -> Result<EntityService<E, F::UnitOfWork>, ApiError>
where
    E: Entity,
    F: UnitOfWorkFactory,
    F::UnitOfWork: RepositoryProvider<E>,
{
    let unit_of_work = state.factory.begin().await?;
    Ok(EntityService::new(Arc::new(unit_of_work)))
}

/// Fetches an entity or answers 404
pub(crate) async fn require<E, U>(
    service: &EntityService<E, U>,
    tree_id: TreeId,
    id: EntityId,
) -> Result<E, ApiError>
where
    E: Entity,
    U: RepositoryProvider<E>,
{
    service
        .get(tree_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} {} not found in tree {}", E::KIND, id, tree_id)))
}
