use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::Owned;
use crate::error::{Result, SiteError};
use crate::subject::SubjectId;

use super::{check_len, Price};

const PROMOCODE_MAX: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// One product line, with the unit price captured when the order was placed.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub product_id: u64,
    pub quantity: u32,
    pub price: Price,
}

/// A customer order, owned by the ordering subject.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: u64,
    pub user: SubjectId,
    pub status: OrderStatus,
    pub delivery_address: String,
    pub promocode: Option<String>,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Order {
    fn owner(&self) -> &SubjectId {
        &self.user
    }
}

impl Order {
    pub fn total_price(&self) -> Result<Price> {
        self.items.iter().try_fold(Price::ZERO, |acc, item| {
            item.price
                .times(item.quantity)
                .and_then(|line| acc.checked_add(line))
                .ok_or_else(|| SiteError::BadRequest("order total out of range".into()))
        })
    }

    pub fn contains_product(&self, product_id: u64) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewOrderItem {
    pub product_id: u64,
    pub quantity: u32,
}

/// Create payload. The ordering user comes from the caller, never the body.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewOrder {
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub promocode: Option<String>,
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    pub fn validate(&self) -> Result<()> {
        check_address(&self.delivery_address)?;
        if self.items.is_empty() {
            return Err(SiteError::BadRequest("order must contain at least one item".into()));
        }
        if let Some(bad) = self.items.iter().find(|i| i.quantity == 0) {
            return Err(SiteError::BadRequest(format!(
                "quantity for product {} must be at least 1",
                bad.product_id
            )));
        }
        if let Some(code) = &self.promocode {
            check_len("promocode", code, PROMOCODE_MAX)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub delivery_address: Option<String>,
    pub promocode: Option<String>,
}

impl OrderPatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(addr) = &self.delivery_address {
            check_address(addr)?;
        }
        if let Some(code) = &self.promocode {
            check_len("promocode", code, PROMOCODE_MAX)?;
        }
        Ok(())
    }

    pub fn apply(self, o: &mut Order, now: DateTime<Utc>) {
        if let Some(s) = self.status {
            o.status = s;
        }
        if let Some(a) = self.delivery_address {
            o.delivery_address = a;
        }
        if let Some(c) = self.promocode {
            o.promocode = if c.is_empty() { None } else { Some(c) };
        }
        o.updated_at = now;
    }
}

/// Orders are created and edited under the same address rule.
fn check_address(addr: &str) -> Result<()> {
    if addr.trim().is_empty() {
        return Err(SiteError::BadRequest("delivery_address must not be empty".into()));
    }
    Ok(())
}
