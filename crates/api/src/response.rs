//! Shared response envelope types for API handlers.
//!
//! Single resources use the `{ "data": ... }` envelope; listings add a
//! `meta` object with pagination fields.

use serde::Serialize;

use officely_db::PAGE_SIZE;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Pagination metadata for listing responses.
#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub per_page: i64,
    pub count: usize,
}

/// `{ "data": [...], "meta": { ... } }` envelope for paginated listings.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(data: Vec<T>, page: i64) -> Self {
        let meta = PageMeta {
            page: page.max(1),
            per_page: PAGE_SIZE,
            count: data.len(),
        };
        Self { data, meta }
    }
}
