//! Request and response data transfer objects

pub mod note;
pub mod multimedia_link;
pub mod family;

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{EntityId, PagedList};
use domain_tree::{EntityKind, Owner};

use crate::error::ApiError;

/// Owner reference in a request body
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct OwnerRequest {
    #[validate(range(min = 0))]
    pub id: i64,
    pub kind: EntityKind,
}

impl From<OwnerRequest> for Owner {
    fn from(request: OwnerRequest) -> Self {
        Owner::new(request.kind, EntityId::new(request.id))
    }
}

/// Paging parameters of a list request
///
/// A list is paged when `page_size` is present; `page_index` defaults to 0.
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct PageQuery {
    pub page_index: Option<usize>,
    #[validate(range(min = 1, max = 500))]
    pub page_size: Option<usize>,
}

impl PageQuery {
    /// Returns `(page_index, page_size)` if paging was requested
    pub fn page(&self) -> Result<Option<(usize, usize)>, ApiError> {
        self.validate()?;
        match (self.page_index, self.page_size) {
            (index, Some(size)) => Ok(Some((index.unwrap_or(0), size))),
            (None, None) => Ok(None),
            (Some(_), None) => Err(ApiError::BadRequest(
                "page_index requires page_size".to_string(),
            )),
        }
    }
}

/// Owner filter of a list request, given as `owner_kind` and `owner_id`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnerQuery {
    pub owner_kind: Option<EntityKind>,
    pub owner_id: Option<i64>,
}

impl OwnerQuery {
    pub fn owner(&self) -> Result<Option<Owner>, ApiError> {
        match (self.owner_kind, self.owner_id) {
            (Some(kind), Some(id)) => Ok(Some(Owner::new(kind, EntityId::new(id)))),
            (None, None) => Ok(None),
            _ => Err(ApiError::BadRequest(
                "owner_kind and owner_id must be given together".to_string(),
            )),
        }
    }
}

/// One page of a list response
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page_index: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub page_count: usize,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> From<PagedList<T>> for PageResponse<T> {
    fn from(page: PagedList<T>) -> Self {
        Self {
            page_index: page.page_index(),
            page_size: page.page_size(),
            total_count: page.total_count(),
            page_count: page.page_count(),
            has_previous_page: page.has_previous_page(),
            has_next_page: page.has_next_page(),
            items: page.into_items(),
        }
    }
}

/// Body of a list response: every match, or one page of them
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Listing<T> {
    All(Vec<T>),
    Page(PageResponse<T>),
}
