//! # Catalog Client
//!
//! High-level API for the catalog store.
use crate::catalog_store::{CatalogAction, CatalogActionResult, CatalogError, CatalogState};
use crate::model::{Category, Product, ProductDetail, ProductFilters, ProductId};
use store_framework::{StoreClient, StoreHandle};
use tracing::instrument;

#[derive(Clone)]
pub struct CatalogClient {
    inner: StoreClient<CatalogState>,
}

impl CatalogClient {
    pub fn new(inner: StoreClient<CatalogState>) -> Self {
        Self { inner }
    }

    async fn products(&self, action: CatalogAction) -> Result<Vec<Product>, CatalogError> {
        match self.inner.dispatch(action).await? {
            CatalogActionResult::Products(products) => Ok(products),
            other => unreachable!("product list action must return Products, got {other:?}"),
        }
    }

    #[instrument(skip(self))]
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<Product>, CatalogError> {
        self.products(CatalogAction::FetchPage(page)).await
    }

    /// Reloads the active page.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Vec<Product>, CatalogError> {
        self.products(CatalogAction::Refresh).await
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        self.products(CatalogAction::Search(query.to_string())).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_category(&self, slug: &str) -> Result<Vec<Product>, CatalogError> {
        self.products(CatalogAction::FetchByCategory(slug.to_string()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError> {
        match self.inner.dispatch(CatalogAction::FetchCategories).await? {
            CatalogActionResult::Categories(categories) => Ok(categories),
            other => unreachable!("FetchCategories must return Categories, got {other:?}"),
        }
    }

    /// Selects a category and loads its products.
    ///
    /// Returns `None` when `category` was already active and nothing was fetched.
    #[instrument(skip(self))]
    pub async fn set_active_category(
        &self,
        category: Option<String>,
    ) -> Result<Option<Vec<Product>>, CatalogError> {
        match self
            .inner
            .dispatch(CatalogAction::SetActiveCategory(category))
            .await?
        {
            CatalogActionResult::Products(products) => Ok(Some(products)),
            CatalogActionResult::Unchanged => Ok(None),
            other => unreachable!("SetActiveCategory must return Products, got {other:?}"),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_filters(&self, filters: ProductFilters) -> Result<Vec<Product>, CatalogError> {
        self.products(CatalogAction::SetFilters(filters)).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_product(&self, id: ProductId) -> Result<ProductDetail, CatalogError> {
        match self.inner.dispatch(CatalogAction::FetchProduct(id)).await? {
            CatalogActionResult::Product(detail) => Ok(detail),
            other => unreachable!("FetchProduct must return Product, got {other:?}"),
        }
    }
}

impl StoreHandle<CatalogState> for CatalogClient {
    fn inner(&self) -> &StoreClient<CatalogState> {
        &self.inner
    }
}
