//! Catalog types: product cards, product detail, categories and list queries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// A product as listed in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category_name: String,
    pub price: Decimal,
    pub stock_quantity: u32,
    pub main_image: Option<String>,
    pub is_in_stock: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A product with its full image gallery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDetail {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category_name: String,
    pub price: Decimal,
    pub stock_quantity: u32,
    pub is_in_stock: bool,
    pub is_active: bool,
    pub images: Vec<ProductImage>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductImage {
    pub id: u64,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub products_count: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Sort order accepted by the product list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductOrdering {
    PriceAsc,
    PriceDesc,
    Newest,
    Oldest,
}

impl ProductOrdering {
    /// Value of the `ordering` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::PriceAsc => "price",
            Self::PriceDesc => "-price",
            Self::Newest => "-created_at",
            Self::Oldest => "created_at",
        }
    }
}

impl FromStr for ProductOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" | "price-asc" => Ok(Self::PriceAsc),
            "-price" | "price-desc" => Ok(Self::PriceDesc),
            "-created_at" | "newest" => Ok(Self::Newest),
            "created_at" | "oldest" => Ok(Self::Oldest),
            other => Err(format!("unknown ordering: {other}")),
        }
    }
}

/// Narrowing applied to every product list request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilters {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub in_stock: bool,
    pub ordering: Option<ProductOrdering>,
}

/// Query string of a product list request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub search: Option<String>,
    pub filters: ProductFilters,
}

impl ProductQuery {
    pub fn page(page: u32, filters: &ProductFilters) -> Self {
        Self {
            page: Some(page),
            search: None,
            filters: filters.clone(),
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self {
            page: None,
            search: Some(query.into()),
            filters: ProductFilters::default(),
        }
    }

    pub fn filtered(filters: &ProductFilters) -> Self {
        Self {
            page: None,
            search: None,
            filters: filters.clone(),
        }
    }

    /// Query parameters in the order they are sent.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(min) = self.filters.min_price {
            pairs.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.filters.max_price {
            pairs.push(("max_price", max.to_string()));
        }
        if self.filters.in_stock {
            pairs.push(("in_stock", "true".to_string()));
        }
        if let Some(ordering) = self.filters.ordering {
            pairs.push(("ordering", ordering.as_param().to_string()));
        }
        pairs
    }
}
