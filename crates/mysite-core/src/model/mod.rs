//! Domain entities for the shop, blog and accounts apps.
//!
//! Input types (`New*`, `*Patch`) are `deny_unknown_fields`: an owner field in
//! a client payload is rejected instead of silently ignored. Owners are always
//! taken from the acting subject.

pub mod article;
pub mod order;
pub mod price;
pub mod product;
pub mod profile;

pub use article::{Article, ArticlePatch, ArticleSummary, AuthorRef, NewArticle};
pub use order::{NewOrder, NewOrderItem, Order, OrderItem, OrderPatch, OrderStatus};
pub use price::Price;
pub use product::{NewProduct, Product, ProductPatch};
pub use profile::{Profile, ProfilePatch};

use crate::error::{Result, SiteError};

/// Trimmed, non-empty, at most `max` characters.
pub(crate) fn check_text(field: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SiteError::BadRequest(format!("{field} must not be empty")));
    }
    check_len(field, value, max)
}

pub(crate) fn check_len(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(SiteError::BadRequest(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}
