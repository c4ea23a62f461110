use super::{page_count, CatalogAction, CatalogActionResult, CatalogContext, CatalogError, CatalogState};
use crate::model::{Product, ProductFilters, ProductQuery};
use async_trait::async_trait;
use store_framework::{StateCell, StoreState};
use tracing::{debug, warn};

#[async_trait]
impl StoreState for CatalogState {
    type Action = CatalogAction;
    type ActionResult = CatalogActionResult;
    type Context = CatalogContext;
    type Error = CatalogError;

    async fn handle_action(
        cell: &StateCell<Self>,
        action: CatalogAction,
        ctx: &CatalogContext,
    ) -> Result<CatalogActionResult, CatalogError> {
        match action {
            CatalogAction::FetchPage(page) => {
                let filters = cell.read(|s| s.filters.clone());
                fetch_page(cell, ctx, page, filters, |_| {})
                    .await
                    .map(CatalogActionResult::Products)
            }

            CatalogAction::Refresh => {
                let (page, filters) = cell.read(|s| (s.active_page, s.filters.clone()));
                fetch_page(cell, ctx, page, filters, |_| {})
                    .await
                    .map(CatalogActionResult::Products)
            }

            CatalogAction::Search(query) => {
                let _loading = cell.begin_loading(|s| &mut s.loading);
                let page = ctx
                    .api
                    .products(&ProductQuery::search(query.as_str()))
                    .await
                    .map_err(|e| {
                        warn!(error = %e, %query, "Search failed");
                        e
                    })?;
                // Pagination is left as it was.
                cell.update(|s| {
                    s.query = query;
                    s.products.clone_from(&page.results);
                });
                Ok(CatalogActionResult::Products(page.results))
            }

            CatalogAction::FetchByCategory(slug) => {
                let filters = cell.read(|s| s.filters.clone());
                fetch_by_category(cell, ctx, &slug, &filters, |_| {})
                    .await
                    .map(CatalogActionResult::Products)
            }

            CatalogAction::FetchCategories => {
                let _loading = cell.begin_loading(|s| &mut s.loading);
                let page = ctx.api.categories().await.map_err(|e| {
                    warn!(error = %e, "Category fetch failed");
                    e
                })?;
                cell.update(|s| s.categories.clone_from(&page.results));
                Ok(CatalogActionResult::Categories(page.results))
            }

            CatalogAction::SetActiveCategory(category) => {
                if cell.read(|s| s.active_category == category) {
                    debug!(?category, "Category already active");
                    return Ok(CatalogActionResult::Unchanged);
                }
                let (page, filters) = cell.read(|s| (s.active_page, s.filters.clone()));
                let select = |s: &mut CatalogState| s.active_category.clone_from(&category);
                let products = match &category {
                    Some(slug) => fetch_by_category(cell, ctx, slug, &filters, select).await?,
                    None => fetch_page(cell, ctx, page, filters, select).await?,
                };
                Ok(CatalogActionResult::Products(products))
            }

            CatalogAction::SetFilters(filters) => {
                let products = match cell.read(|s| s.active_category.clone()) {
                    Some(slug) => {
                        let apply = |s: &mut CatalogState| {
                            s.filters.clone_from(&filters);
                            s.active_page = 1;
                        };
                        fetch_by_category(cell, ctx, &slug, &filters, apply).await?
                    }
                    None => fetch_page(cell, ctx, 1, filters, |_| {}).await?,
                };
                Ok(CatalogActionResult::Products(products))
            }

            CatalogAction::FetchProduct(id) => {
                let _loading = cell.begin_loading(|s| &mut s.loading);
                let detail = ctx.api.product(id).await.map_err(|e| {
                    warn!(error = %e, product = %id, "Product fetch failed");
                    e
                })?;
                cell.update(|s| s.selected_product = Some(detail.clone()));
                Ok(CatalogActionResult::Product(detail))
            }
        }
    }
}

/// Loads `page` with `filters` and, on success, stores both with the results.
///
/// `apply` runs in the same state update as the results.
async fn fetch_page(
    cell: &StateCell<CatalogState>,
    ctx: &CatalogContext,
    page: u32,
    filters: ProductFilters,
    apply: impl FnOnce(&mut CatalogState),
) -> Result<Vec<Product>, CatalogError> {
    let _loading = cell.begin_loading(|s| &mut s.loading);
    let query = ProductQuery::page(page, &filters);
    let fetched = ctx.api.products(&query).await.map_err(|e| {
        warn!(error = %e, page, "Page fetch failed");
        e
    })?;
    cell.update(|s| {
        apply(s);
        s.products.clone_from(&fetched.results);
        s.products_count = fetched.count;
        s.page_count = page_count(fetched.count);
        s.active_page = page;
        s.filters = filters;
    });
    Ok(fetched.results)
}

async fn fetch_by_category(
    cell: &StateCell<CatalogState>,
    ctx: &CatalogContext,
    slug: &str,
    filters: &ProductFilters,
    apply: impl FnOnce(&mut CatalogState),
) -> Result<Vec<Product>, CatalogError> {
    let _loading = cell.begin_loading(|s| &mut s.loading);
    let query = ProductQuery::filtered(filters);
    let fetched = ctx
        .api
        .products_by_category(slug, &query)
        .await
        .map_err(|e| {
            warn!(error = %e, slug, "Category products fetch failed");
            e
        })?;
    cell.update(|s| {
        apply(s);
        s.products.clone_from(&fetched.results);
    });
    Ok(fetched.results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{ApiCall, FakeApi};
    use crate::api::ApiError;
    use crate::model::{ProductId, ProductOrdering};
    use std::sync::Arc;
    use store_framework::{StoreActor, StoreClient};

    fn start(api: Arc<FakeApi>) -> StoreClient<CatalogState> {
        let (actor, client) = StoreActor::<CatalogState>::new(8);
        tokio::spawn(actor.run(CatalogContext { api }));
        client
    }

    #[tokio::test]
    async fn test_fetch_page_sets_cursor_and_page_count() {
        let api = Arc::new(FakeApi::seeded());
        let client = start(api.clone());

        client.dispatch(CatalogAction::FetchPage(2)).await.unwrap();

        let state = client.snapshot();
        assert_eq!(state.products.len(), 3);
        assert_eq!(state.products_count, 7);
        assert_eq!(state.page_count, 3);
        assert_eq!(state.active_page, 2);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_failed_page_fetch_keeps_previous_page() {
        let api = Arc::new(FakeApi::seeded());
        let client = start(api.clone());
        client.dispatch(CatalogAction::FetchPage(1)).await.unwrap();
        let before = client.snapshot();

        let result = client.dispatch(CatalogAction::FetchPage(9)).await;

        assert!(matches!(
            result,
            Err(CatalogError::Api(ApiError::Status { status: 404, .. }))
        ));
        assert_eq!(client.snapshot(), before);
    }

    #[tokio::test]
    async fn test_search_keeps_pagination() {
        let api = Arc::new(FakeApi::seeded());
        let client = start(api.clone());
        client.dispatch(CatalogAction::FetchPage(2)).await.unwrap();

        let result = client
            .dispatch(CatalogAction::Search("lamp".into()))
            .await
            .unwrap();

        let CatalogActionResult::Products(products) = result else {
            panic!("expected products");
        };
        assert_eq!(products.len(), 2);
        let state = client.snapshot();
        assert_eq!(state.query, "lamp");
        assert_eq!(state.active_page, 2);
        assert_eq!(state.page_count, 3);
    }

    #[tokio::test]
    async fn test_same_category_twice_requests_once() {
        let api = Arc::new(FakeApi::seeded());
        let client = start(api.clone());

        let first = client
            .dispatch(CatalogAction::SetActiveCategory(Some("kitchen".into())))
            .await
            .unwrap();
        let second = client
            .dispatch(CatalogAction::SetActiveCategory(Some("kitchen".into())))
            .await
            .unwrap();

        assert!(matches!(first, CatalogActionResult::Products(ref p) if p.len() == 3));
        assert_eq!(second, CatalogActionResult::Unchanged);
        assert_eq!(
            api.count(|c| matches!(c, ApiCall::ProductsByCategory { .. })),
            1
        );
        assert_eq!(client.snapshot().active_category.as_deref(), Some("kitchen"));
    }

    #[tokio::test]
    async fn test_clearing_category_fetches_unfiltered_page() {
        let api = Arc::new(FakeApi::seeded());
        let client = start(api.clone());
        client
            .dispatch(CatalogAction::SetActiveCategory(Some("lighting".into())))
            .await
            .unwrap();

        client
            .dispatch(CatalogAction::SetActiveCategory(None))
            .await
            .unwrap();

        assert_eq!(
            api.calls().last(),
            Some(&ApiCall::Products(ProductQuery::page(1, &ProductFilters::default())))
        );
        let state = client.snapshot();
        assert_eq!(state.active_category, None);
        assert_eq!(state.products_count, 7);
    }

    #[tokio::test]
    async fn test_clearing_absent_category_is_a_no_op() {
        let api = Arc::new(FakeApi::seeded());
        let client = start(api.clone());

        let result = client
            .dispatch(CatalogAction::SetActiveCategory(None))
            .await
            .unwrap();

        assert_eq!(result, CatalogActionResult::Unchanged);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_set_filters_refetches_first_page() {
        let api = Arc::new(FakeApi::seeded());
        let client = start(api.clone());
        client.dispatch(CatalogAction::FetchPage(3)).await.unwrap();
        let filters = ProductFilters {
            in_stock: true,
            ordering: Some(ProductOrdering::PriceAsc),
            ..ProductFilters::default()
        };

        client
            .dispatch(CatalogAction::SetFilters(filters.clone()))
            .await
            .unwrap();

        let state = client.snapshot();
        assert_eq!(state.active_page, 1);
        assert_eq!(state.products_count, 6);
        assert_eq!(state.page_count, 2);
        assert_eq!(state.products[0].name, "Bulb Pack");
        assert_eq!(
            api.calls().last(),
            Some(&ApiCall::Products(ProductQuery::page(1, &filters)))
        );
    }

    #[tokio::test]
    async fn test_failed_set_filters_keeps_page_and_filters() {
        let api = Arc::new(FakeApi::seeded());
        let client = start(api.clone());
        client.dispatch(CatalogAction::FetchPage(3)).await.unwrap();
        let before = client.snapshot();
        api.fail_next(ApiError::Request("offline".into()));

        let result = client
            .dispatch(CatalogAction::SetFilters(ProductFilters {
                in_stock: true,
                ordering: Some(ProductOrdering::PriceAsc),
                ..ProductFilters::default()
            }))
            .await;

        assert!(matches!(result, Err(CatalogError::Api(ApiError::Request(_)))));
        let state = client.snapshot();
        assert_eq!(state, before);
        assert_eq!(state.active_page, 3);
        assert_eq!(state.filters, ProductFilters::default());
    }

    #[tokio::test]
    async fn test_failed_category_switch_keeps_selection() {
        let api = Arc::new(FakeApi::seeded());
        let client = start(api.clone());
        client
            .dispatch(CatalogAction::SetActiveCategory(Some("lighting".into())))
            .await
            .unwrap();
        let before = client.snapshot();
        api.fail_next(ApiError::Request("offline".into()));

        let result = client
            .dispatch(CatalogAction::SetActiveCategory(Some("kitchen".into())))
            .await;
        assert!(result.is_err());
        assert_eq!(client.snapshot(), before);

        // Not mistaken for the active category on retry.
        client
            .dispatch(CatalogAction::SetActiveCategory(Some("kitchen".into())))
            .await
            .unwrap();
        assert_eq!(client.snapshot().active_category.as_deref(), Some("kitchen"));
    }

    #[tokio::test]
    async fn test_set_filters_with_category_uses_slug_endpoint() {
        let api = Arc::new(FakeApi::seeded());
        let client = start(api.clone());
        client
            .dispatch(CatalogAction::SetActiveCategory(Some("lighting".into())))
            .await
            .unwrap();

        client
            .dispatch(CatalogAction::SetFilters(ProductFilters {
                in_stock: true,
                ..ProductFilters::default()
            }))
            .await
            .unwrap();

        let names: Vec<String> = client
            .snapshot()
            .products
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Bulb Pack", "Desk Lamp"]);
    }

    #[tokio::test]
    async fn test_categories_and_product_detail() {
        let api = Arc::new(FakeApi::seeded());
        let client = start(api.clone());

        client.dispatch(CatalogAction::FetchCategories).await.unwrap();
        client
            .dispatch(CatalogAction::FetchProduct(ProductId(7)))
            .await
            .unwrap();

        let state = client.snapshot();
        assert_eq!(state.categories.len(), 2);
        assert_eq!(state.categories[1].products_count, 4);
        assert_eq!(
            state.selected_product.map(|p| p.name).as_deref(),
            Some("Teapot")
        );
    }

    #[tokio::test]
    async fn test_refresh_reloads_active_page() {
        let api = Arc::new(FakeApi::seeded());
        let client = start(api.clone());
        client.dispatch(CatalogAction::FetchPage(2)).await.unwrap();

        client.dispatch(CatalogAction::Refresh).await.unwrap();

        assert_eq!(
            api.calls().last(),
            Some(&ApiCall::Products(ProductQuery::page(2, &ProductFilters::default())))
        );
    }
}
