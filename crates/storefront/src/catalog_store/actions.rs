use crate::model::{Category, Product, ProductDetail, ProductFilters, ProductId};

#[derive(Debug, Clone)]
pub enum CatalogAction {
    /// Loads page `n` of the unfiltered-by-category catalog with the active filters.
    FetchPage(u32),
    /// Reloads the active page.
    Refresh,
    Search(String),
    /// Loads the products of the category with this slug.
    FetchByCategory(String),
    FetchCategories,
    /// Selects a category, or clears the selection with `None`.
    ///
    /// Selecting the category that is already active does nothing.
    SetActiveCategory(Option<String>),
    /// Replaces the filters and reloads from the first page.
    SetFilters(ProductFilters),
    FetchProduct(ProductId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogActionResult {
    Products(Vec<Product>),
    Categories(Vec<Category>),
    Product(ProductDetail),
    /// Nothing was requested.
    Unchanged,
}
