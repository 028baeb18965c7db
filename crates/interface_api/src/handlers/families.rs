//! Family handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::{EntityId, RepositoryProvider, TreeId, UnitOfWorkFactory};
use domain_tree::Family;

use super::{require, service};
use crate::extract::{JsonBody, PathParams, QueryParams};
use crate::dto::family::{FamilyQuery, FamilyRequest};
use crate::dto::{Listing, PageQuery};
use crate::{error::ApiError, AppState};

/// Lists the families of a tree
///
/// `spouse` and `child` narrow the list to the families of one individual;
/// they cannot be combined with each other.
pub async fn list_families<F>(
    State(state): State<AppState<F>>,
    PathParams(tree_id): PathParams<i64>,
    QueryParams(paging): QueryParams<PageQuery>,
    QueryParams(filter): QueryParams<FamilyQuery>,
) -> Result<Json<Listing<Family>>, ApiError>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: RepositoryProvider<Family>,
{
    let tree_id = TreeId::new(tree_id);
    let page = paging.page()?;
    let families = service::<Family, F>(&state).await?;

    let spouse = filter.spouse.map(EntityId::new);
    let child = filter.child.map(EntityId::new);
    if spouse.is_some() && child.is_some() {
        return Err(ApiError::BadRequest(
            "spouse and child filters are mutually exclusive".to_string(),
        ));
    }

    let listing = match page {
        Some((page_index, page_size)) => {
            let matches = move |family: &Family| match (spouse, child) {
                (Some(individual), _) => family.has_spouse(individual),
                (_, Some(individual)) => family.has_child(individual),
                (None, None) => true,
            };
            let page = families.get_page(tree_id, matches, page_index, page_size).await?;
            Listing::Page(page.into())
        }
        None => Listing::All(match (spouse, child) {
            (Some(individual), _) => families.get_by_spouse(tree_id, individual).await?,
            (_, Some(individual)) => families.get_by_child(tree_id, individual).await?,
            (None, None) => families.get_all(tree_id).await?,
        }),
    };

    Ok(Json(listing))
}

/// Gets a family by ID
pub async fn get_family<F>(
    State(state): State<AppState<F>>,
    PathParams((tree_id, id)): PathParams<(i64, i64)>,
) -> Result<Json<Family>, ApiError>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: RepositoryProvider<Family>,
{
    let families = service::<Family, F>(&state).await?;
    let family = require(&families, TreeId::new(tree_id), EntityId::new(id)).await?;
    Ok(Json(family))
}

/// Creates a family
pub async fn create_family<F>(
    State(state): State<AppState<F>>,
    PathParams(tree_id): PathParams<i64>,
    JsonBody(request): JsonBody<FamilyRequest>,
) -> Result<(StatusCode, Json<Family>), ApiError>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: RepositoryProvider<Family>,
{
    request.validate()?;
    let families = service::<Family, F>(&state).await?;
    let family = families
        .add(request.into_family(TreeId::new(tree_id), EntityId::UNSAVED))
        .await?;
    Ok((StatusCode::CREATED, Json(family)))
}

/// Replaces a family, including its list of children
pub async fn update_family<F>(
    State(state): State<AppState<F>>,
    PathParams((tree_id, id)): PathParams<(i64, i64)>,
    JsonBody(request): JsonBody<FamilyRequest>,
) -> Result<Json<Family>, ApiError>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: RepositoryProvider<Family>,
{
    request.validate()?;
    let families = service::<Family, F>(&state).await?;
    let family = request.into_family(TreeId::new(tree_id), EntityId::new(id));
    families.update(&family).await?;
    Ok(Json(family))
}

/// Deletes a family
pub async fn delete_family<F>(
    State(state): State<AppState<F>>,
    PathParams((tree_id, id)): PathParams<(i64, i64)>,
) -> Result<StatusCode, ApiError>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: RepositoryProvider<Family>,
{
    let families = service::<Family, F>(&state).await?;
    let family = require(&families, TreeId::new(tree_id), EntityId::new(id)).await?;
    families.delete(&family).await?;
    Ok(StatusCode::NO_CONTENT)
}
