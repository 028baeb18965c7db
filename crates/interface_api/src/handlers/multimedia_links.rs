//! Multimedia link handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::{EntityId, RepositoryProvider, TreeId, UnitOfWorkFactory};
use domain_tree::MultimediaLink;

use super::{require, service};
use crate::extract::{JsonBody, PathParams, QueryParams};
use crate::dto::multimedia_link::MultimediaLinkRequest;
use crate::dto::{Listing, OwnerQuery, PageQuery};
use crate::{error::ApiError, AppState};

/// Lists the multimedia links of a tree
///
/// Filtered by owner when `owner_kind` and `owner_id` are given, paged when
/// `page_size` is given.
pub async fn list_multimedia_links<F>(
    State(state): State<AppState<F>>,
    PathParams(tree_id): PathParams<i64>,
    QueryParams(paging): QueryParams<PageQuery>,
    QueryParams(filter): QueryParams<OwnerQuery>,
) -> Result<Json<Listing<MultimediaLink>>, ApiError>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: RepositoryProvider<MultimediaLink>,
{
    let tree_id = TreeId::new(tree_id);
    let owner = filter.owner()?;
    let page = paging.page()?;
    let links = service::<MultimediaLink, F>(&state).await?;

    let listing = match (page, owner) {
        (Some((page_index, page_size)), owner) => {
            let matches_owner =
                move |link: &MultimediaLink| owner.is_none() || link.owner == owner;
            let page = links.get_page(tree_id, matches_owner, page_index, page_size).await?;
            Listing::Page(page.into())
        }
        (None, Some(owner)) => Listing::All(links.get_by_owner(tree_id, owner).await?),
        (None, None) => Listing::All(links.get_all(tree_id).await?),
    };

    Ok(Json(listing))
}

/// Gets a multimedia link by ID
pub async fn get_multimedia_link<F>(
    State(state): State<AppState<F>>,
    PathParams((tree_id, id)): PathParams<(i64, i64)>,
) -> Result<Json<MultimediaLink>, ApiError>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: RepositoryProvider<MultimediaLink>,
{
    let links = service::<MultimediaLink, F>(&state).await?;
    let link = require(&links, TreeId::new(tree_id), EntityId::new(id)).await?;
    Ok(Json(link))
}

/// Creates a multimedia link
pub async fn create_multimedia_link<F>(
    State(state): State<AppState<F>>,
    PathParams(tree_id): PathParams<i64>,
    JsonBody(request): JsonBody<MultimediaLinkRequest>,
) -> Result<(StatusCode, Json<MultimediaLink>), ApiError>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: RepositoryProvider<MultimediaLink>,
{
    request.validate()?;
    let links = service::<MultimediaLink, F>(&state).await?;
    let link = links
        .add(request.into_link(TreeId::new(tree_id), EntityId::UNSAVED))
        .await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// Replaces a multimedia link
pub async fn update_multimedia_link<F>(
    State(state): State<AppState<F>>,
    PathParams((tree_id, id)): PathParams<(i64, i64)>,
    JsonBody(request): JsonBody<MultimediaLinkRequest>,
) -> Result<Json<MultimediaLink>, ApiError>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: RepositoryProvider<MultimediaLink>,
{
    request.validate()?;
    let links = service::<MultimediaLink, F>(&state).await?;
    let link = request.into_link(TreeId::new(tree_id), EntityId::new(id));
    links.update(&link).await?;
    Ok(Json(link))
}

/// Deletes a multimedia link
pub async fn delete_multimedia_link<F>(
    State(state): State<AppState<F>>,
    PathParams((tree_id, id)): PathParams<(i64, i64)>,
) -> Result<StatusCode, ApiError>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: RepositoryProvider<MultimediaLink>,
{
    let links = service::<MultimediaLink, F>(&state).await?;
    let link = require(&links, TreeId::new(tree_id), EntityId::new(id)).await?;
    links.delete(&link).await?;
    Ok(StatusCode::NO_CONTENT)
}
