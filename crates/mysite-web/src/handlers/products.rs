//! Shop products.
//!
//! `export_products` builds its dump on every request; there is no cache
//! in front of it.

use std::cmp::Ordering;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use mysite_core::error::{Result, SiteError};
use mysite_core::model::{NewProduct, Price, Product, ProductPatch};

use crate::app_state::AppState;
use crate::auth::{CurrentUser, MaybeUser};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};

use super::{paginate, Page};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductQuery {
    /// Case-insensitive match on name or description.
    pub search: Option<String>,
    /// `name`, `price` or `created_at`, optionally prefixed with `-`.
    pub ordering: Option<String>,
    pub page: Option<usize>,
    /// Staff only.
    #[serde(default)]
    pub include_archived: bool,
}

fn sort_products(rows: &mut [Product], ordering: Option<&str>) -> Result<()> {
    let Some(key) = ordering else {
        return Ok(());
    };
    let (desc, field) = match key.strip_prefix('-') {
        Some(f) => (true, f),
        None => (false, key),
    };
    let cmp: fn(&Product, &Product) -> Ordering = match field {
        "name" => |a, b| a.name.cmp(&b.name),
        "price" => |a, b| a.price.cmp(&b.price),
        "created_at" => |a, b| a.created_at.cmp(&b.created_at),
        other => return Err(SiteError::BadRequest(format!("unknown ordering field: {other}"))),
    };
    rows.sort_by(|a, b| {
        let o = cmp(a, b).then(a.id.cmp(&b.id));
        if desc {
            o.reverse()
        } else {
            o
        }
    });
    Ok(())
}

pub async fn list_products(
    State(app): State<AppState>,
    MaybeUser(user): MaybeUser,
    ApiQuery(q): ApiQuery<ProductQuery>,
) -> ApiResult<Json<Page<Product>>> {
    if q.include_archived && !user.as_ref().is_some_and(|u| u.sees_all()) {
        return Err(SiteError::Forbidden("include_archived is restricted to staff".into()).into());
    }

    let needle = q.search.as_deref().map(str::to_lowercase);
    let mut rows: Vec<Product> = app
        .store()
        .products
        .all()
        .into_iter()
        .filter(|p| q.include_archived || !p.archived)
        .filter(|p| match &needle {
            Some(n) => p.name.to_lowercase().contains(n) || p.description.to_lowercase().contains(n),
            None => true,
        })
        .collect();
    sort_products(&mut rows, q.ordering.as_deref())?;

    Ok(Json(paginate(rows, q.page)?))
}

pub async fn get_product(State(app): State<AppState>, ApiPath(id): ApiPath<u64>) -> ApiResult<Json<Product>> {
    let product = app
        .store()
        .products
        .get(id)
        .ok_or_else(|| SiteError::NotFound(format!("product {id}")))?;
    Ok(Json(product))
}

pub async fn create_product(
    State(app): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<NewProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    app.policies().products.authorize_create(&user)?;
    body.validate()?;

    let owner = user.id.clone();
    let product = app
        .store()
        .products
        .insert_with(|id| body.into_product(id, owner, Utc::now()));
    tracing::info!(id = product.id, user = %user.username, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(app): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<u64>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> ApiResult<Json<Product>> {
    patch.validate()?;
    let policy = &app.policies().products;
    let product = app.store().products.try_update(id, "product", |p| {
        policy.authorize_edit(&user, p)?;
        patch.apply(p, Utc::now());
        Ok(())
    })?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(app): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<u64>,
) -> ApiResult<StatusCode> {
    let store = app.store();
    let product = store
        .products
        .get(id)
        .ok_or_else(|| SiteError::NotFound(format!("product {id}")))?;
    app.policies().products.authorize_delete(&user, &product)?;

    // Ordered products are kept (409); archive them instead.
    store.delete_product(id)?;
    tracing::info!(id, user = %user.username, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct ProductExport {
    pub pk: u64,
    pub name: String,
    pub price: Price,
    pub archived: bool,
    pub created_by: String,
}

#[derive(Debug, Serialize)]
pub struct ProductsExport {
    pub products: Vec<ProductExport>,
}

pub async fn export_products(State(app): State<AppState>) -> Json<ProductsExport> {
    let products = app
        .store()
        .products
        .all()
        .into_iter()
        .map(|p| ProductExport {
            pk: p.id,
            created_by: app.accounts().username_of(&p.created_by).unwrap_or_default(),
            name: p.name,
            price: p.price,
            archived: p.archived,
        })
        .collect();
    Json(ProductsExport { products })
}
