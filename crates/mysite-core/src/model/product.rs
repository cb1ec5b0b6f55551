use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::Owned;
use crate::error::Result;
use crate::subject::SubjectId;

use super::{check_text, Price};

const NAME_MAX: usize = 200;

/// A shop product, owned by the subject that created it.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub quantity: u32,
    pub archived: bool,
    pub created_by: SubjectId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Product {
    fn owner(&self) -> &SubjectId {
        &self.created_by
    }
}

/// Create payload. The owner comes from the caller, not the body.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub quantity: u32,
}

impl NewProduct {
    pub fn validate(&self) -> Result<()> {
        check_text("name", &self.name, NAME_MAX)
    }

    pub fn into_product(self, id: u64, owner: SubjectId, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            description: self.description,
            price: self.price,
            quantity: self.quantity,
            archived: false,
            created_by: owner,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub quantity: Option<u32>,
    pub archived: Option<bool>,
}

impl ProductPatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            check_text("name", name, NAME_MAX)?;
        }
        Ok(())
    }

    pub fn apply(self, p: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            p.name = name.trim().to_string();
        }
        if let Some(d) = self.description {
            p.description = d;
        }
        if let Some(price) = self.price {
            p.price = price;
        }
        if let Some(q) = self.quantity {
            p.quantity = q;
        }
        if let Some(a) = self.archived {
            p.archived = a;
        }
        p.updated_at = now;
    }
}
