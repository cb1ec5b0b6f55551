//! Axum router wiring.
//!
//! `/healthz` sits outside the throttle; every application route goes
//! through `throttle_requests` first.

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::app_state::AppState;
use crate::handlers::{accounts, blog, ops, orders, products};
use crate::throttle;

pub fn build_router(state: AppState) -> Router {
    let app_routes = Router::new()
        // shop
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/api/products/export", get(products::export_products))
        .route(
            "/api/products/:id",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
        .route("/api/orders", get(orders::list_orders).post(orders::create_order))
        .route("/api/orders/export", get(orders::export_orders))
        .route(
            "/api/orders/:id",
            get(orders::get_order)
                .patch(orders::update_order)
                .delete(orders::delete_order),
        )
        // blog
        .route(
            "/blog/articles",
            get(blog::list_articles).post(blog::create_article),
        )
        .route(
            "/blog/articles/:id",
            get(blog::get_article)
                .patch(blog::update_article)
                .delete(blog::delete_article),
        )
        .route("/blog/feed", get(blog::latest_feed))
        // accounts
        .route("/accounts/register", post(accounts::register))
        .route("/accounts/me", get(accounts::me))
        .route("/accounts/profile", patch(accounts::edit_profile))
        .route("/accounts/profiles/:username", get(accounts::get_profile))
        .route(
            "/accounts/users/:username/permissions",
            post(accounts::update_permissions),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            throttle::throttle_requests,
        ));

    Router::new()
        .route("/healthz", get(ops::healthz))
        .merge(app_routes)
        .with_state(state)
}
