//! Note handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::{EntityId, RepositoryProvider, TreeId, UnitOfWorkFactory};
use domain_tree::Note;

use super::{require, service};
use crate::extract::{JsonBody, PathParams, QueryParams};
use crate::dto::note::NoteRequest;
use crate::dto::{Listing, OwnerQuery, PageQuery};
use crate::{error::ApiError, AppState};

/// Lists the notes of a tree
///
/// Filtered by owner when `owner_kind` and `owner_id` are given, paged when
/// `page_size` is given.
pub async fn list_notes<F>(
    State(state): State<AppState<F>>,
    PathParams(tree_id): PathParams<i64>,
    QueryParams(paging): QueryParams<PageQuery>,
    QueryParams(filter): QueryParams<OwnerQuery>,
) -> Result<Json<Listing<Note>>, ApiError>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: RepositoryProvider<Note>,
{
    let tree_id = TreeId::new(tree_id);
    let owner = filter.owner()?;
    let page = paging.page()?;
    let notes = service::<Note, F>(&state).await?;

    let listing = match (page, owner) {
        (Some((page_index, page_size)), owner) => {
            let matches_owner = move |note: &Note| owner.is_none() || note.owner == owner;
            let page = notes.get_page(tree_id, matches_owner, page_index, page_size).await?;
            Listing::Page(page.into())
        }
        (None, Some(owner)) => Listing::All(notes.get_by_owner(tree_id, owner).await?),
        (None, None) => Listing::All(notes.get_all(tree_id).await?),
    };

    Ok(Json(listing))
}

/// Gets a note by ID
pub async fn get_note<F>(
    State(state): State<AppState<F>>,
    PathParams((tree_id, id)): PathParams<(i64, i64)>,
) -> Result<Json<Note>, ApiError>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: RepositoryProvider<Note>,
{
    let notes = service::<Note, F>(&state).await?;
    let note = require(&notes, TreeId::new(tree_id), EntityId::new(id)).await?;
    Ok(Json(note))
}

/// Creates a note
pub async fn create_note<F>(
    State(state): State<AppState<F>>,
    PathParams(tree_id): PathParams<i64>,
    JsonBody(request): JsonBody<NoteRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: RepositoryProvider<Note>,
{
    request.validate()?;
    let notes = service::<Note, F>(&state).await?;
    let note = notes
        .add(request.into_note(TreeId::new(tree_id), EntityId::UNSAVED))
        .await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// Replaces a note
pub async fn update_note<F>(
    State(state): State<AppState<F>>,
    PathParams((tree_id, id)): PathParams<(i64, i64)>,
    JsonBody(request): JsonBody<NoteRequest>,
) -> Result<Json<Note>, ApiError>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: RepositoryProvider<Note>,
{
    request.validate()?;
    let notes = service::<Note, F>(&state).await?;
    let note = request.into_note(TreeId::new(tree_id), EntityId::new(id));
    notes.update(&note).await?;
    Ok(Json(note))
}

/// Deletes a note
pub async fn delete_note<F>(
    State(state): State<AppState<F>>,
    PathParams((tree_id, id)): PathParams<(i64, i64)>,
) -> Result<StatusCode, ApiError>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: RepositoryProvider<Note>,
{
    let notes = service::<Note, F>(&state).await?;
    let note = require(&notes, TreeId::new(tree_id), EntityId::new(id)).await?;
    notes.delete(&note).await?;
    Ok(StatusCode::NO_CONTENT)
}
