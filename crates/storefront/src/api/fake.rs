//! # In-Memory Backend
//!
//! [`FakeApi`] implements [`StorefrontApi`] against an in-memory shop: accounts, a paginated
//! catalog, per-user carts and orders. It answers with the same status codes and error payloads
//! as the real backend and records every call, so store behavior ("exactly one cart fetch after
//! login", "no request for an unchanged category") can be asserted without a network.
//!
//! ```rust
//! use storefront::api::fake::{ApiCall, FakeApi};
//! use storefront::api::StorefrontApi;
//! use storefront::model::{Credentials, ProductQuery};
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = FakeApi::seeded();
//!     api.add_account("alice@example.com", "secret-pass", "Alice", "Smith");
//!
//!     let auth = api.login(&Credentials::new("alice@example.com", "secret-pass")).await.unwrap();
//!     assert_eq!(auth.user.first_name, "Alice");
//!
//!     let page = api.products(&ProductQuery::default()).await.unwrap();
//!     assert_eq!(page.results.len(), 3);
//!     assert_eq!(api.count(|call| matches!(call, ApiCall::Products(_))), 1);
//! }
//! ```

use super::{ApiError, StorefrontApi};
use crate::catalog_store::PAGE_SIZE;
use crate::model::{
    AccessToken, AuthResponse, Cart, CartItem, CartItemId, Category, Credentials, NewOrder, Order,
    OrderId, OrderItem, OrderStatus, Page, Product, ProductDetail, ProductId, ProductOrdering,
    ProductQuery, Profile, ProfileUpdate, Registration, UserId,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// One request received by the fake, without its bearer token.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Register { email: String },
    Login { email: String },
    Refresh,
    Profile,
    UpdateProfile(ProfileUpdate),
    Products(ProductQuery),
    ProductsByCategory { slug: String, query: ProductQuery },
    Product(ProductId),
    Categories,
    Cart,
    AddToCart { product_id: ProductId, quantity: u32 },
    ClearCart { user_id: Option<UserId> },
    UpdateCartItem { item: CartItemId, quantity: u32 },
    RemoveCartItem(CartItemId),
    Orders,
    CreateOrder { shipping_address: String },
}

/// A received call together with the bearer token it carried.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub call: ApiCall,
    pub token: Option<String>,
}

struct Account {
    password: String,
    profile: Profile,
}

#[derive(Default)]
struct Shop {
    accounts: Vec<Account>,
    sessions: HashMap<String, UserId>,
    refresh_tokens: HashMap<String, UserId>,
    products: Vec<Product>,
    categories: Vec<Category>,
    carts: HashMap<UserId, Cart>,
    orders: HashMap<UserId, Vec<Order>>,
    next_id: u64,
    calls: Vec<RecordedCall>,
    failure: Option<ApiError>,
    latency: Option<Duration>,
}

impl Shop {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn issue_tokens(&mut self, user: UserId) -> (AccessToken, AccessToken) {
        let n = self.next_id();
        let access = format!("access-{}-{n}", user.0);
        let refresh = format!("refresh-{}-{n}", user.0);
        self.sessions.insert(access.clone(), user);
        self.refresh_tokens.insert(refresh.clone(), user);
        (AccessToken::new(access), AccessToken::new(refresh))
    }

    fn user_for(&self, token: &AccessToken) -> Result<UserId, ApiError> {
        self.sessions
            .get(token.expose())
            .copied()
            .ok_or_else(|| status(401, json!({"detail": "Given token not valid for any token type"})))
    }

    fn profile(&self, user: UserId) -> Result<&Profile, ApiError> {
        self.accounts
            .iter()
            .map(|account| &account.profile)
            .find(|profile| profile.id == user)
            .ok_or_else(|| status(404, json!({"detail": "Not found."})))
    }

    fn cart_mut(&mut self, user: UserId) -> &mut Cart {
        let id = self.carts.len() as u64 + 1;
        self.carts.entry(user).or_insert_with(|| Cart {
            id,
            user_id: user,
            ..Cart::default()
        })
    }
}

fn status(code: u16, body: serde_json::Value) -> ApiError {
    ApiError::Status { status: code, body }
}

fn recompute(cart: &mut Cart) {
    for item in &mut cart.items {
        item.subtotal = item.product_price * Decimal::from(item.quantity);
    }
    cart.total_amount = cart.items.iter().map(|item| item.subtotal).sum();
    cart.total_items = cart.items.iter().map(|item| item.quantity).sum();
}

fn paginate<T: Clone>(items: &[T], page: Option<u32>) -> Result<Page<T>, ApiError> {
    let count = items.len() as u64;
    let Some(page) = page else {
        let mut all = Page::of(items.iter().take(PAGE_SIZE as usize).cloned().collect());
        all.count = count;
        return Ok(all);
    };
    let start = (page.max(1) as u64 - 1) * PAGE_SIZE;
    if page == 0 || (page > 1 && start >= count) {
        return Err(status(404, json!({"detail": "Invalid page."})));
    }
    let results = items
        .iter()
        .skip(start as usize)
        .take(PAGE_SIZE as usize)
        .cloned()
        .collect();
    Ok(Page {
        count,
        next: (start + PAGE_SIZE < count).then(|| format!("?page={}", page + 1)),
        previous: (page > 1).then(|| format!("?page={}", page - 1)),
        results,
    })
}

fn select(products: &[Product], query: &ProductQuery) -> Vec<Product> {
    let filters = &query.filters;
    let needle = query.search.as_deref().map(str::to_lowercase);
    let mut selected: Vec<Product> = products
        .iter()
        .filter(|p| filters.min_price.map_or(true, |min| p.price >= min))
        .filter(|p| filters.max_price.map_or(true, |max| p.price <= max))
        .filter(|p| !filters.in_stock || p.stock_quantity > 0)
        .filter(|p| {
            needle.as_deref().map_or(true, |needle| {
                p.name.to_lowercase().contains(needle)
                    || p.description.to_lowercase().contains(needle)
            })
        })
        .cloned()
        .collect();
    match filters.ordering {
        Some(ProductOrdering::PriceAsc) => selected.sort_by(|a, b| a.price.cmp(&b.price)),
        Some(ProductOrdering::PriceDesc) => selected.sort_by(|a, b| b.price.cmp(&a.price)),
        Some(ProductOrdering::Oldest) => selected.sort_by_key(|p| p.id.0),
        Some(ProductOrdering::Newest) | None => selected.sort_by_key(|p| std::cmp::Reverse(p.id.0)),
    }
    selected
}

/// In-memory [`StorefrontApi`].
#[derive(Default)]
pub struct FakeApi {
    shop: Mutex<Shop>,
}

impl FakeApi {
    /// An empty shop: no accounts, no products.
    pub fn new() -> Self {
        Self::default()
    }

    /// A shop with two categories and seven products.
    pub fn seeded() -> Self {
        let api = Self::new();
        api.add_category("Lighting", "lighting");
        api.add_category("Kitchen", "kitchen");
        api.add_product("Desk Lamp", "Lighting", Decimal::new(2490, 2), 12);
        api.add_product("Floor Lamp", "Lighting", Decimal::new(8900, 2), 0);
        api.add_product("Bulb Pack", "Lighting", Decimal::new(990, 2), 40);
        api.add_product("Mug", "Kitchen", Decimal::new(1250, 2), 25);
        api.add_product("Teapot", "Kitchen", Decimal::new(3400, 2), 5);
        api.add_product("Cutting Board", "Kitchen", Decimal::new(1800, 2), 9);
        api.add_product("Kettle", "Kitchen", Decimal::new(4599, 2), 3);
        api
    }

    fn shop(&self) -> MutexGuard<'_, Shop> {
        self.shop.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_category(&self, name: &str, slug: &str) -> Category {
        let mut shop = self.shop();
        let category = Category {
            id: shop.next_id(),
            name: name.to_string(),
            slug: slug.to_string(),
            ..Category::default()
        };
        shop.categories.push(category.clone());
        category
    }

    pub fn add_product(&self, name: &str, category: &str, price: Decimal, stock: u32) -> Product {
        let mut shop = self.shop();
        let product = Product {
            id: ProductId(shop.next_id()),
            name: name.to_string(),
            category_name: category.to_string(),
            price,
            stock_quantity: stock,
            is_in_stock: stock > 0,
            ..Product::default()
        };
        shop.products.push(product.clone());
        if let Some(c) = shop.categories.iter_mut().find(|c| c.name == category) {
            c.products_count += 1;
        }
        product
    }

    /// Registers an account directly, bypassing validation.
    pub fn add_account(&self, email: &str, password: &str, first: &str, last: &str) -> Profile {
        let mut shop = self.shop();
        let profile = Profile {
            id: UserId(shop.next_id()),
            email: email.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            full_name: format!("{first} {last}"),
            ..Profile::default()
        };
        shop.accounts.push(Account {
            password: password.to_string(),
            profile: profile.clone(),
        });
        profile
    }

    /// Starts a session for an existing account, as if a token had been restored from disk.
    pub fn issue_token(&self, user: UserId) -> AccessToken {
        self.shop().issue_tokens(user).0
    }

    /// Makes the next call fail with `error`, whatever it is.
    pub fn fail_next(&self, error: ApiError) {
        self.shop().failure = Some(error);
    }

    /// Delays every response by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.shop().latency = Some(latency);
    }

    pub fn cart_of(&self, user: UserId) -> Option<Cart> {
        self.shop().carts.get(&user).cloned()
    }

    /// Every call received so far, in arrival order.
    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.shop().calls.clone()
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.recorded().into_iter().map(|r| r.call).collect()
    }

    pub fn count(&self, predicate: impl Fn(&ApiCall) -> bool) -> usize {
        self.shop().calls.iter().filter(|r| predicate(&r.call)).count()
    }

    /// Records `call` and applies the injected failure and latency.
    async fn begin(&self, call: ApiCall, token: Option<&AccessToken>) -> Result<(), ApiError> {
        let (failure, latency) = {
            let mut shop = self.shop();
            shop.calls.push(RecordedCall {
                call,
                token: token.map(|t| t.expose().to_string()),
            });
            (shop.failure.take(), shop.latency)
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        failure.map_or(Ok(()), Err)
    }
}

#[async_trait]
impl StorefrontApi for FakeApi {
    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        let email = registration.email.clone();
        self.begin(ApiCall::Register { email: email.clone() }, None).await?;

        let password = registration.password.expose_secret();
        if password != registration.password_confirm.expose_secret() {
            return Err(status(400, json!({"password_confirm": "Passwords do not match"})));
        }
        if password.len() < 8 {
            return Err(status(
                400,
                json!({"password": ["Ensure this field has at least 8 characters."]}),
            ));
        }
        if self.shop().accounts.iter().any(|a| a.profile.email == email) {
            return Err(status(400, json!({"email": ["user with this email already exists."]})));
        }

        let profile = self.add_account(
            &email,
            password,
            &registration.first_name,
            &registration.last_name,
        );
        let mut shop = self.shop();
        if let Some(account) = shop.accounts.last_mut() {
            account.profile.phone.clone_from(&registration.phone);
            account.profile.date_of_birth = registration.date_of_birth;
        }
        let (access, refresh) = shop.issue_tokens(profile.id);
        Ok(AuthResponse {
            access,
            refresh: Some(refresh),
            user: shop.profile(profile.id)?.clone(),
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.begin(
            ApiCall::Login {
                email: credentials.email.clone(),
            },
            None,
        )
        .await?;

        let password = credentials.password.expose_secret();
        if credentials.email.is_empty() || password.is_empty() {
            return Err(status(400, json!({"error": "Email and password are required"})));
        }
        let mut shop = self.shop();
        let profile = shop
            .accounts
            .iter()
            .find(|a| a.profile.email == credentials.email && a.password == password)
            .map(|a| a.profile.clone())
            .ok_or_else(|| status(401, json!({"error": "Invalid credentials"})))?;
        let (access, refresh) = shop.issue_tokens(profile.id);
        Ok(AuthResponse {
            access,
            refresh: Some(refresh),
            user: profile,
        })
    }

    async fn refresh(&self, refresh: &AccessToken) -> Result<AccessToken, ApiError> {
        self.begin(ApiCall::Refresh, None).await?;
        let mut shop = self.shop();
        let user = shop
            .refresh_tokens
            .get(refresh.expose())
            .copied()
            .ok_or_else(|| status(401, json!({"error": "Invalid refresh token"})))?;
        Ok(shop.issue_tokens(user).0)
    }

    async fn profile(&self, token: &AccessToken) -> Result<Profile, ApiError> {
        self.begin(ApiCall::Profile, Some(token)).await?;
        let shop = self.shop();
        let user = shop.user_for(token)?;
        shop.profile(user).cloned()
    }

    async fn update_profile(
        &self,
        token: &AccessToken,
        update: &ProfileUpdate,
    ) -> Result<ProfileUpdate, ApiError> {
        self.begin(ApiCall::UpdateProfile(update.clone()), Some(token))
            .await?;
        let mut shop = self.shop();
        let user = shop.user_for(token)?;
        let account = shop
            .accounts
            .iter_mut()
            .find(|a| a.profile.id == user)
            .ok_or_else(|| status(404, json!({"detail": "Not found."})))?;
        account.profile.apply(update);
        let profile = &account.profile;
        Ok(ProfileUpdate {
            first_name: Some(profile.first_name.clone()),
            last_name: Some(profile.last_name.clone()),
            phone: profile.phone.clone(),
            date_of_birth: profile.date_of_birth,
            avatar: profile.avatar.clone(),
        })
    }

    async fn products(&self, query: &ProductQuery) -> Result<Page<Product>, ApiError> {
        self.begin(ApiCall::Products(query.clone()), None).await?;
        let shop = self.shop();
        paginate(&select(&shop.products, query), query.page)
    }

    async fn products_by_category(
        &self,
        slug: &str,
        query: &ProductQuery,
    ) -> Result<Page<Product>, ApiError> {
        self.begin(
            ApiCall::ProductsByCategory {
                slug: slug.to_string(),
                query: query.clone(),
            },
            None,
        )
        .await?;
        let shop = self.shop();
        let category = shop
            .categories
            .iter()
            .find(|c| c.slug == slug)
            .ok_or_else(|| status(404, json!({"detail": "No Category matches the given query."})))?;
        let in_category: Vec<Product> = shop
            .products
            .iter()
            .filter(|p| p.category_name == category.name)
            .cloned()
            .collect();
        paginate(&select(&in_category, query), query.page)
    }

    async fn product(&self, id: ProductId) -> Result<ProductDetail, ApiError> {
        self.begin(ApiCall::Product(id), None).await?;
        let shop = self.shop();
        let product = shop
            .products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| status(404, json!({"detail": "No Product matches the given query."})))?;
        Ok(ProductDetail {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            category_name: product.category_name.clone(),
            price: product.price,
            stock_quantity: product.stock_quantity,
            is_in_stock: product.is_in_stock,
            is_active: true,
            images: Vec::new(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }

    async fn categories(&self) -> Result<Page<Category>, ApiError> {
        self.begin(ApiCall::Categories, None).await?;
        Ok(Page::of(self.shop().categories.clone()))
    }

    async fn cart(&self, token: &AccessToken) -> Result<Cart, ApiError> {
        self.begin(ApiCall::Cart, Some(token)).await?;
        let mut shop = self.shop();
        let user = shop.user_for(token)?;
        Ok(shop.cart_mut(user).clone())
    }

    async fn add_to_cart(
        &self,
        token: &AccessToken,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        self.begin(ApiCall::AddToCart { product_id, quantity }, Some(token))
            .await?;
        let mut shop = self.shop();
        let user = shop.user_for(token)?;
        let product = shop
            .products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| status(400, json!({"product_id": ["Product not found"]})))?;
        let item_id = CartItemId(shop.next_id());
        let cart = shop.cart_mut(user);
        match cart.items.iter().position(|i| i.product_id == product_id) {
            Some(index) => cart.items[index].quantity += quantity,
            None => cart.items.push(CartItem {
                id: item_id,
                product_id,
                quantity,
                product_name: product.name,
                product_price: product.price,
                ..CartItem::default()
            }),
        }
        recompute(cart);
        Ok(())
    }

    async fn clear_cart(
        &self,
        token: &AccessToken,
        user_id: Option<UserId>,
    ) -> Result<(), ApiError> {
        self.begin(ApiCall::ClearCart { user_id }, Some(token)).await?;
        let mut shop = self.shop();
        let user = shop.user_for(token)?;
        if let Some(cart) = shop.carts.get_mut(&user) {
            cart.items.clear();
            recompute(cart);
        }
        Ok(())
    }

    async fn update_cart_item(
        &self,
        token: &AccessToken,
        item: CartItemId,
        quantity: u32,
    ) -> Result<Cart, ApiError> {
        self.begin(ApiCall::UpdateCartItem { item, quantity }, Some(token))
            .await?;
        if quantity < 1 {
            return Err(status(400, json!({"quantity": ["Quantity must be at least 1"]})));
        }
        let mut shop = self.shop();
        let user = shop.user_for(token)?;
        let cart = shop.cart_mut(user);
        let line = cart
            .items
            .iter_mut()
            .find(|i| i.id == item)
            .ok_or_else(|| status(404, json!({"detail": "Not found."})))?;
        line.quantity = quantity;
        recompute(cart);
        Ok(cart.clone())
    }

    async fn remove_cart_item(
        &self,
        token: &AccessToken,
        item: CartItemId,
    ) -> Result<Cart, ApiError> {
        self.begin(ApiCall::RemoveCartItem(item), Some(token)).await?;
        let mut shop = self.shop();
        let user = shop.user_for(token)?;
        let cart = shop.cart_mut(user);
        let before = cart.items.len();
        cart.items.retain(|i| i.id != item);
        if cart.items.len() == before {
            return Err(status(404, json!({"detail": "Not found."})));
        }
        recompute(cart);
        Ok(cart.clone())
    }

    async fn orders(&self, token: &AccessToken) -> Result<Page<Order>, ApiError> {
        self.begin(ApiCall::Orders, Some(token)).await?;
        let shop = self.shop();
        let user = shop.user_for(token)?;
        Ok(Page::of(shop.orders.get(&user).cloned().unwrap_or_default()))
    }

    async fn create_order(
        &self,
        token: &AccessToken,
        order: &NewOrder,
    ) -> Result<Order, ApiError> {
        self.begin(
            ApiCall::CreateOrder {
                shipping_address: order.shipping_address.clone(),
            },
            Some(token),
        )
        .await?;
        if order.shipping_address.is_empty() {
            return Err(status(400, json!({"error": "Shipping address is required"})));
        }
        let mut shop = self.shop();
        let user = shop.user_for(token)?;
        let profile = shop.profile(user)?.clone();
        let cart = shop.cart_mut(user).clone();
        if cart.items.is_empty() {
            return Err(status(400, json!({"error": "Cart is empty"})));
        }
        let created = Order {
            id: OrderId(shop.next_id()),
            user_id: user,
            user_email: profile.email,
            user_name: profile.full_name,
            shipping_address: order.shipping_address.clone(),
            status: OrderStatus::Pending,
            total_amount: cart.total_amount,
            items: cart
                .items
                .iter()
                .map(|item| OrderItem {
                    product_id: item.product_id,
                    product_name: item.product_name.clone(),
                    quantity: item.quantity,
                    price: item.product_price,
                })
                .collect(),
            ..Order::default()
        };
        shop.orders.entry(user).or_default().push(created.clone());
        let cart = shop.cart_mut(user);
        cart.items.clear();
        recompute(cart);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catalog_pages_hold_three_products() {
        let api = FakeApi::seeded();

        let first = api.products(&ProductQuery::page(1, &Default::default())).await.unwrap();
        let last = api.products(&ProductQuery::page(3, &Default::default())).await.unwrap();

        assert_eq!(first.count, 7);
        assert_eq!(first.results.len(), 3);
        assert_eq!(last.results.len(), 1);
        assert!(last.next.is_none());
        assert!(matches!(
            api.products(&ProductQuery::page(4, &Default::default())).await,
            Err(ApiError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_cart_requires_a_known_token() {
        let api = FakeApi::seeded();
        let result = api.cart(&AccessToken::new("forged")).await;
        assert_eq!(result.unwrap_err().status(), Some(401));
        assert_eq!(
            api.recorded()[0].token.as_deref(),
            Some("forged")
        );
    }

    #[tokio::test]
    async fn test_injected_failure_hits_only_the_next_call() {
        let api = FakeApi::seeded();
        api.fail_next(ApiError::Request("offline".into()));

        assert!(api.categories().await.is_err());
        assert_eq!(api.categories().await.unwrap().results.len(), 2);
    }

    #[tokio::test]
    async fn test_order_is_built_from_the_cart_and_empties_it() {
        let api = FakeApi::seeded();
        let user = api.add_account("a@example.com", "password1", "A", "B");
        let token = api.issue_token(user.id);
        api.add_to_cart(&token, ProductId(3), 2).await.unwrap();

        let order = api
            .create_order(&token, &NewOrder { shipping_address: "1 Main St".into() })
            .await
            .unwrap();

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total_amount, Decimal::new(4980, 2));
        assert!(api.cart_of(user.id).unwrap().items.is_empty());
    }
}
