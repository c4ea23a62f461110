use std::sync::Arc;
use store_framework::StoreHandle;
use storefront::api::fake::{ApiCall, FakeApi};
use storefront::catalog_store::{page_count, PAGE_SIZE};
use storefront::lifecycle::Storefront;
use storefront::model::{ProductFilters, ProductQuery};
use storefront::notify::TracingNotifier;
use storefront::token_store::MemoryTokenStore;

fn start(api: &Arc<FakeApi>) -> Storefront {
    Storefront::new(
        api.clone(),
        Arc::new(MemoryTokenStore::new()),
        Arc::new(TracingNotifier),
    )
    .expect("Failed to start storefront")
}

#[tokio::test]
async fn test_page_count_matches_product_count_on_every_page() {
    let api = Arc::new(FakeApi::seeded());
    let shop = start(&api);

    for page in 1..=3 {
        let products = shop.catalog.fetch_page(page).await.unwrap();
        let state = shop.catalog.snapshot();

        assert_eq!(state.active_page, page);
        assert_eq!(state.products, products);
        assert_eq!(state.page_count, state.products_count.div_ceil(PAGE_SIZE));
        assert_eq!(state.page_count, page_count(7));
    }
    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_page_count_follows_catalog_size() {
    let api = Arc::new(FakeApi::new());
    api.add_category("Misc", "misc");
    let shop = start(&api);

    for (added, expected_pages) in [(1, 1), (2, 1), (1, 2), (3, 3)] {
        for _ in 0..added {
            api.add_product("Thing", "Misc", 1.into(), 1);
        }
        shop.catalog.fetch_page(1).await.unwrap();
        assert_eq!(shop.catalog.snapshot().page_count, expected_pages);
    }
    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_same_category_twice_issues_one_request() {
    let api = Arc::new(FakeApi::seeded());
    let shop = start(&api);

    let first = shop
        .catalog
        .set_active_category(Some("lighting".to_string()))
        .await
        .unwrap();
    let second = shop
        .catalog
        .set_active_category(Some("lighting".to_string()))
        .await
        .unwrap();

    assert_eq!(first.map(|p| p.len()), Some(3));
    assert_eq!(second, None);
    assert_eq!(api.calls().len(), 1);
    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_clearing_category_falls_back_to_unfiltered_catalog() {
    let api = Arc::new(FakeApi::seeded());
    let shop = start(&api);
    shop.catalog
        .set_active_category(Some("kitchen".to_string()))
        .await
        .unwrap();
    assert_eq!(shop.catalog.snapshot().products.len(), 3);

    shop.catalog.set_active_category(None).await.unwrap();

    assert_eq!(
        api.calls(),
        vec![
            ApiCall::ProductsByCategory {
                slug: "kitchen".to_string(),
                query: ProductQuery::default(),
            },
            ApiCall::Products(ProductQuery::page(1, &ProductFilters::default())),
        ]
    );
    assert_eq!(shop.catalog.snapshot().products_count, 7);
    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_switching_categories_requests_each_once() {
    let api = Arc::new(FakeApi::seeded());
    let shop = start(&api);

    for slug in ["kitchen", "lighting", "lighting", "kitchen"] {
        shop.catalog
            .set_active_category(Some(slug.to_string()))
            .await
            .unwrap();
    }

    assert_eq!(
        api.count(|call| matches!(call, ApiCall::ProductsByCategory { .. })),
        3
    );
    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_catalog_failure_keeps_shown_products() {
    let api = Arc::new(FakeApi::seeded());
    let shop = start(&api);
    shop.catalog.fetch_page(1).await.unwrap();
    let shown = shop.catalog.snapshot();

    assert!(shop
        .catalog
        .set_active_category(Some("garden".to_string()))
        .await
        .is_err());

    let state = shop.catalog.snapshot();
    assert_eq!(state.products, shown.products);
    assert_eq!(state.active_category, None);
    assert!(!state.loading);
    shop.shutdown().await.unwrap();
}
