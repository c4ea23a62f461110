//! # REST Gateway
//!
//! [`StorefrontApi`] is the only way the stores reach the backend. [`HttpApi`] implements it
//! over `reqwest`; [`fake::FakeApi`] implements it in memory for tests and demos.
//!
//! Every authenticated call takes the bearer token explicitly. The gateway keeps no session
//! state of its own.

pub mod error;
pub mod fake;
pub mod http;

pub use error::ApiError;
pub use http::HttpApi;

use crate::model::{
    AccessToken, AuthResponse, Cart, CartItemId, Category, Credentials, NewOrder, Order, Page,
    Product, ProductDetail, ProductId, ProductQuery, Profile, ProfileUpdate, Registration, UserId,
};
use async_trait::async_trait;

#[async_trait]
pub trait StorefrontApi: Send + Sync {
    // --- Account ---

    /// `POST /user/register/`
    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError>;
    /// `POST /user/login/`
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError>;
    /// `POST /user/refresh/`, returns a new access token.
    async fn refresh(&self, refresh: &AccessToken) -> Result<AccessToken, ApiError>;
    /// `GET /user/profile/`
    async fn profile(&self, token: &AccessToken) -> Result<Profile, ApiError>;
    /// `PATCH /user/profile/update/`, returns the fields the server stored.
    async fn update_profile(
        &self,
        token: &AccessToken,
        update: &ProfileUpdate,
    ) -> Result<ProfileUpdate, ApiError>;

    // --- Catalog ---

    /// `GET /products/?...`
    async fn products(&self, query: &ProductQuery) -> Result<Page<Product>, ApiError>;
    /// `GET /products/{slug}/?...`
    async fn products_by_category(
        &self,
        slug: &str,
        query: &ProductQuery,
    ) -> Result<Page<Product>, ApiError>;
    /// `GET /products/{id}/`
    async fn product(&self, id: ProductId) -> Result<ProductDetail, ApiError>;
    /// `GET /categories/`
    async fn categories(&self) -> Result<Page<Category>, ApiError>;

    // --- Cart ---

    /// `GET /cart/`
    async fn cart(&self, token: &AccessToken) -> Result<Cart, ApiError>;
    /// `POST /cart/add/`. The response body is not used.
    async fn add_to_cart(
        &self,
        token: &AccessToken,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), ApiError>;
    /// `POST /cart/clear/`. The server answers `204 No Content`.
    async fn clear_cart(&self, token: &AccessToken, user_id: Option<UserId>)
        -> Result<(), ApiError>;
    /// `PATCH /cart/update/{id}/`, returns the whole cart.
    async fn update_cart_item(
        &self,
        token: &AccessToken,
        item: CartItemId,
        quantity: u32,
    ) -> Result<Cart, ApiError>;
    /// `DELETE /cart/delete/{id}/`, returns the whole cart.
    async fn remove_cart_item(&self, token: &AccessToken, item: CartItemId)
        -> Result<Cart, ApiError>;

    // --- Orders ---

    /// `GET /order/list/`
    async fn orders(&self, token: &AccessToken) -> Result<Page<Order>, ApiError>;
    /// `POST /order/create/`
    async fn create_order(&self, token: &AccessToken, order: &NewOrder)
        -> Result<Order, ApiError>;
}
