//! Request handlers.

pub mod health;
pub mod tenants;
pub mod users;

use naviera_core::repository::{PaginatedResult, Pagination};
use serde::{Deserialize, Serialize};

/// `?offset=&limit=` query parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PageParams {
    pub offset: u64,
    pub limit: u64,
}

impl Default for PageParams {
    fn default() -> Self {
        let Pagination { offset, limit } = Pagination::default();
        Self { offset, limit }
    }
}

impl From<PageParams> for Pagination {
    fn from(params: PageParams) -> Self {
        Self {
            offset: params.offset,
            limit: params.limit.clamp(1, 200),
        }
    }
}

/// Paginated list body.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

impl<T, U: From<T>> From<PaginatedResult<T>> for Page<U> {
    fn from(result: PaginatedResult<T>) -> Self {
        Self {
            items: result.items.into_iter().map(U::from).collect(),
            total: result.total,
            offset: result.offset,
            limit: result.limit,
        }
    }
}
