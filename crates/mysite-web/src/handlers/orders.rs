//! Shop orders.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use mysite_core::access::Owned;
use mysite_core::error::{Result, SiteError};
use mysite_core::model::{NewOrder, Order, OrderItem, OrderPatch, OrderStatus, Price};
use mysite_core::subject::Subject;

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};

use super::{paginate, Page};

/// Order plus its computed total.
#[derive(Debug, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub total_price: Price,
}

impl OrderView {
    fn new(order: Order) -> Result<Self> {
        let total_price = order.total_price()?;
        Ok(Self { order, total_price })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
    pub page: Option<usize>,
}

/// Staff and superusers read every order; others only their own.
fn ensure_visible(user: &Subject, order: &Order) -> Result<()> {
    if user.sees_all() || order.owner() == &user.id {
        Ok(())
    } else {
        Err(SiteError::Forbidden(format!("not allowed to view order {}", order.id)))
    }
}

pub async fn list_orders(
    State(app): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiQuery(q): ApiQuery<OrderQuery>,
) -> ApiResult<Json<Page<OrderView>>> {
    let mut rows: Vec<Order> = app
        .store()
        .orders
        .all()
        .into_iter()
        .filter(|o| user.sees_all() || o.user == user.id)
        .filter(|o| q.status.map_or(true, |s| o.status == s))
        .collect();
    // newest first
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    let rows = rows.into_iter().map(OrderView::new).collect::<Result<Vec<_>>>()?;
    Ok(Json(paginate(rows, q.page)?))
}

pub async fn get_order(
    State(app): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<u64>,
) -> ApiResult<Json<OrderView>> {
    let order = app
        .store()
        .orders
        .get(id)
        .ok_or_else(|| SiteError::NotFound(format!("order {id}")))?;
    ensure_visible(&user, &order)?;
    Ok(Json(OrderView::new(order)?))
}

pub async fn create_order(
    State(app): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<NewOrder>,
) -> ApiResult<(StatusCode, Json<OrderView>)> {
    app.policies().orders.authorize_create(&user)?;
    body.validate()?;

    let now = Utc::now();
    let order = app.store().place_order(|products| {
        // snapshot unit prices at order time
        let items = body
            .items
            .iter()
            .map(|line| -> Result<OrderItem> {
                let product = products
                    .get(line.product_id)
                    .filter(|p| !p.archived)
                    .ok_or_else(|| SiteError::BadRequest(format!("unknown product: {}", line.product_id)))?;
                Ok(OrderItem {
                    product_id: product.id,
                    quantity: line.quantity,
                    price: product.price,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let draft = Order {
            id: 0,
            user: user.id.clone(),
            status: OrderStatus::Pending,
            delivery_address: body.delivery_address,
            promocode: body.promocode.filter(|c| !c.is_empty()),
            items,
            created_at: now,
            updated_at: now,
        };
        // reject out-of-range totals before storing
        draft.total_price()?;
        Ok(draft)
    })?;
    tracing::info!(id = order.id, user = %user.username, "order placed");
    Ok((StatusCode::CREATED, Json(OrderView::new(order)?)))
}

pub async fn update_order(
    State(app): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<u64>,
    ApiJson(patch): ApiJson<OrderPatch>,
) -> ApiResult<Json<OrderView>> {
    patch.validate()?;
    let policy = &app.policies().orders;
    let order = app.store().orders.try_update(id, "order", |o| {
        policy.authorize_edit(&user, o)?;
        patch.apply(o, Utc::now());
        Ok(())
    })?;
    Ok(Json(OrderView::new(order)?))
}

pub async fn delete_order(
    State(app): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<u64>,
) -> ApiResult<StatusCode> {
    let orders = &app.store().orders;
    let order = orders
        .get(id)
        .ok_or_else(|| SiteError::NotFound(format!("order {id}")))?;
    app.policies().orders.authorize_delete(&user, &order)?;
    orders.remove(id);
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct OrderedProduct {
    pub pk: u64,
    pub name: String,
    pub price: Price,
}

#[derive(Debug, Serialize)]
pub struct OrderExport {
    pub pk: u64,
    pub user: String,
    pub delivery_address: String,
    pub promocode: Option<String>,
    pub status: OrderStatus,
    pub products: Vec<OrderedProduct>,
    pub total_price: Price,
}

#[derive(Debug, Serialize)]
pub struct OrdersExport {
    pub orders: Vec<OrderExport>,
}

/// Full order dump. Contains every customer's addresses, so staff only.
pub async fn export_orders(
    State(app): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<OrdersExport>> {
    if !user.sees_all() {
        return Err(SiteError::Forbidden("order export is restricted to staff".into()).into());
    }

    let store = app.store();
    let orders = store
        .orders
        .all()
        .into_iter()
        .map(|o| -> Result<OrderExport> {
            let total_price = o.total_price()?;
            let products = o
                .items
                .iter()
                .map(|item| OrderedProduct {
                    pk: item.product_id,
                    name: store
                        .products
                        .get(item.product_id)
                        .map(|p| p.name)
                        .unwrap_or_default(),
                    price: item.price,
                })
                .collect();
            Ok(OrderExport {
                pk: o.id,
                user: app.accounts().username_of(&o.user).unwrap_or_default(),
                delivery_address: o.delivery_address,
                promocode: o.promocode,
                status: o.status,
                products,
                total_price,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Json(OrdersExport { orders }))
}
