use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::query::{query, CatalogQuery};

/// A product category as served by the backend. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Canonical price of a product.
///
/// The wire value may be a JSON number or a numeric string. Anything that
/// cannot be read as a finite decimal becomes [`Price::Unavailable`], which
/// is distinct from a zero price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "amount", rename_all = "snake_case")]
pub enum Price {
    Amount(Decimal),
    Unavailable,
}

impl Price {
    /// Returns the amount, or `None` for the unavailable sentinel.
    #[must_use]
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Price::Amount(value) => Some(*value),
            Price::Unavailable => None,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Price::Amount(_))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(value) => write!(f, "{value}"),
            Price::Unavailable => write!(f, "not available"),
        }
    }
}

/// A product after enrichment: normalized lists, coerced price, and the
/// category name joined in from the category list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub latin_name: String,
    pub price: Price,
    /// `None` when the backend record carried no usable category id.
    pub category_id: Option<i64>,
    /// Derived from `category_id` at enrichment time. Empty when the
    /// category is unknown or was deleted. Never sent back to the backend.
    pub category_name: String,
    pub composition: Vec<String>,
    pub utilization: Vec<String>,
    pub image_ref: String,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An immutable snapshot of the enriched catalog for one session.
///
/// A fresh fetch builds a new snapshot; nothing is patched in place.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self {
            categories,
            products,
        }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by id.
    #[must_use]
    pub fn find(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Runs `q` over this snapshot. See [`crate::query::query`].
    #[must_use]
    pub fn query(&self, q: &CatalogQuery) -> Vec<&Product> {
        query(&self.products, q)
    }

    /// Home-page preview: the first `limit` products by name, unfiltered.
    #[must_use]
    pub fn preview(&self, limit: usize) -> Vec<&Product> {
        query(&self.products, &CatalogQuery::preview(limit))
    }
}
