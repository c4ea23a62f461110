use crate::api::StorefrontApi;
use crate::model::{Category, Product, ProductDetail, ProductFilters};
use serde::Serialize;
use std::sync::Arc;

/// Products per page served by the backend.
pub const PAGE_SIZE: u64 = 3;

/// Number of pages needed to show `count` products.
pub fn page_count(count: u64) -> u64 {
    count.div_ceil(PAGE_SIZE)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogState {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    /// Slug of the selected category.
    pub active_category: Option<String>,
    pub query: String,
    pub active_page: u32,
    pub page_count: u64,
    pub products_count: u64,
    pub filters: ProductFilters,
    pub selected_product: Option<ProductDetail>,
    pub loading: bool,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            categories: Vec::new(),
            active_category: None,
            query: String::new(),
            active_page: 1,
            page_count: 1,
            products_count: 0,
            filters: ProductFilters::default(),
            selected_product: None,
            loading: false,
        }
    }
}

#[derive(Clone)]
pub struct CatalogContext {
    pub api: Arc<dyn StorefrontApi>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(3), 1);
        assert_eq!(page_count(4), 2);
        assert_eq!(page_count(7), 3);
        assert_eq!(page_count(9), 3);
    }
}
