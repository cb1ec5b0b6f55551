//! HTTP handlers, one module per app.
//!
//! Mutating handlers load the target, consult the compiled policy for its
//! resource kind, and only then apply the change.

pub mod accounts;
pub mod blog;
pub mod ops;
pub mod orders;
pub mod products;

use serde::{Deserialize, Serialize};

use mysite_core::error::{Result, SiteError};

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageQuery {
    pub page: Option<usize>,
}

/// One page of a listing (1-based).
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: usize,
    pub page: usize,
    pub num_pages: usize,
    pub results: Vec<T>,
}

/// Slice `rows` into page `page`. An empty listing still has page 1;
/// any page past the end is `NotFound`.
pub fn paginate<T>(rows: Vec<T>, page: Option<usize>) -> Result<Page<T>> {
    let page = page.unwrap_or(1);
    if page == 0 {
        return Err(SiteError::BadRequest("page must be >= 1".into()));
    }
    let count = rows.len();
    let num_pages = count.div_ceil(PAGE_SIZE).max(1);
    if page > num_pages {
        return Err(SiteError::NotFound(format!("page {page}")));
    }
    let results = rows
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();
    Ok(Page {
        count,
        page,
        num_pages,
        results,
    })
}
