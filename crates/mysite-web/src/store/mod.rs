//! In-memory storage.
//!
//! Persistence is out of scope; tables are concurrent maps keyed by a
//! monotonically increasing id.
//!
//! Orders reference products. Placing an order and deleting a product both
//! go through `references`, so a product is never removed while an order
//! naming it is being inserted: order placement takes it shared, product
//! deletion takes it exclusive.

pub mod table;

use std::sync::RwLock;

use dashmap::DashMap;

use mysite_core::error::{Result, SiteError};
use mysite_core::model::{Article, Order, Product, Profile};
use mysite_core::subject::SubjectId;

pub use table::Table;

#[derive(Default)]
pub struct Store {
    pub products: Table<Product>,
    pub orders: Table<Order>,
    pub articles: Table<Article>,
    pub profiles: DashMap<SubjectId, Profile>,
    references: RwLock<()>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any order line references `product_id`.
    pub fn product_in_orders(&self, product_id: u64) -> bool {
        self.orders.any(|o| o.contains_product(product_id))
    }

    /// Build an order from the current products and store it.
    ///
    /// `build` sees the product table and returns the draft (its `id` is
    /// replaced). No referenced product can be deleted until the order is in.
    pub fn place_order(&self, build: impl FnOnce(&Table<Product>) -> Result<Order>) -> Result<Order> {
        let _refs = self
            .references
            .read()
            .map_err(|_| SiteError::Internal("store reference lock poisoned".into()))?;
        let draft = build(&self.products)?;
        Ok(self.orders.insert_with(|id| Order { id, ..draft }))
    }

    /// Remove a product unless an order references it.
    ///
    /// `Conflict` when referenced, `NotFound` when already gone.
    pub fn delete_product(&self, id: u64) -> Result<Product> {
        let _refs = self
            .references
            .write()
            .map_err(|_| SiteError::Internal("store reference lock poisoned".into()))?;
        if self.product_in_orders(id) {
            return Err(SiteError::Conflict(format!("product {id} is referenced by an order")));
        }
        self.products
            .remove(id)
            .ok_or_else(|| SiteError::NotFound(format!("product {id}")))
    }
}
