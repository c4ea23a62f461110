//! `reqwest` implementation of [`StorefrontApi`].

use super::{ApiError, StorefrontApi};
use crate::model::{
    AccessToken, AuthResponse, Cart, CartItemId, Category, Credentials, NewOrder, Order, Page,
    Product, ProductDetail, ProductId, ProductQuery, Profile, ProfileUpdate, RefreshResponse,
    Registration, UserId,
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, instrument};
use url::Url;

/// HTTP gateway rooted at the API base URL (e.g. `http://127.0.0.1:8000/api`).
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base: Url,
}

impl HttpApi {
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self::with_client(Client::new(), base)
    }

    #[must_use]
    pub fn with_client(client: Client, mut base: Url) -> Self {
        // `Url::join` replaces the last segment unless the path ends with a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { client, base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute URL of `path` (relative, no leading slash) with `query` appended.
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self
            .base
            .join(path)
            .map_err(|e| ApiError::Request(e.to_string()))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Absolute URL of the path made of `segments`, each percent-encoded as a single segment.
    ///
    /// Ends with a slash like every backend route. `/`, `?` and `..` inside a segment cannot
    /// escape it.
    pub fn segment_endpoint(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Request(format!("{} cannot be a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        token: Option<&AccessToken>,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path, query)?;
        debug!(%method, path, "HTTP request");
        Ok(Self::authorize(self.client.request(method, url), token))
    }

    fn request_to(
        &self,
        method: Method,
        url: Url,
        token: Option<&AccessToken>,
    ) -> RequestBuilder {
        debug!(%method, path = url.path(), "HTTP request");
        Self::authorize(self.client.request(method, url), token)
    }

    fn authorize(request: RequestBuilder, token: Option<&AccessToken>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        }
    }

    /// Sends the request and turns every non-2xx status into [`ApiError::Status`].
    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Error pages are not always JSON.
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            debug!(status = status.as_u16(), %body, "HTTP error response");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        self.execute(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl StorefrontApi for HttpApi {
    #[instrument(skip_all)]
    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        let request = self.request(Method::POST, "user/register/", &[], None)?;
        self.send(request.json(registration)).await
    }

    #[instrument(skip_all)]
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let request = self.request(Method::POST, "user/login/", &[], None)?;
        self.send(request.json(credentials)).await
    }

    #[instrument(skip_all)]
    async fn refresh(&self, refresh: &AccessToken) -> Result<AccessToken, ApiError> {
        let request = self.request(Method::POST, "user/refresh/", &[], None)?;
        let response: RefreshResponse = self
            .send(request.json(&json!({ "refresh": refresh.expose() })))
            .await?;
        Ok(response.access)
    }

    #[instrument(skip_all)]
    async fn profile(&self, token: &AccessToken) -> Result<Profile, ApiError> {
        let request = self.request(Method::GET, "user/profile/", &[], Some(token))?;
        self.send(request).await
    }

    #[instrument(skip_all)]
    async fn update_profile(
        &self,
        token: &AccessToken,
        update: &ProfileUpdate,
    ) -> Result<ProfileUpdate, ApiError> {
        let request = self.request(Method::PATCH, "user/profile/update/", &[], Some(token))?;
        self.send(request.json(update)).await
    }

    #[instrument(skip(self))]
    async fn products(&self, query: &ProductQuery) -> Result<Page<Product>, ApiError> {
        let request = self.request(Method::GET, "products/", &query.to_pairs(), None)?;
        self.send(request).await
    }

    #[instrument(skip(self))]
    async fn products_by_category(
        &self,
        slug: &str,
        query: &ProductQuery,
    ) -> Result<Page<Product>, ApiError> {
        let url = self.segment_endpoint(&["products", slug], &query.to_pairs())?;
        self.send(self.request_to(Method::GET, url, None)).await
    }

    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<ProductDetail, ApiError> {
        let path = format!("products/{}/", id.0);
        let request = self.request(Method::GET, &path, &[], None)?;
        self.send(request).await
    }

    #[instrument(skip(self))]
    async fn categories(&self) -> Result<Page<Category>, ApiError> {
        let request = self.request(Method::GET, "categories/", &[], None)?;
        self.send(request).await
    }

    #[instrument(skip_all)]
    async fn cart(&self, token: &AccessToken) -> Result<Cart, ApiError> {
        let request = self.request(Method::GET, "cart/", &[], Some(token))?;
        self.send(request).await
    }

    #[instrument(skip(self, token))]
    async fn add_to_cart(
        &self,
        token: &AccessToken,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let request = self.request(Method::POST, "cart/add/", &[], Some(token))?;
        let body = json!({ "product_id": product_id, "quantity": quantity });
        self.execute(request.json(&body)).await?;
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn clear_cart(
        &self,
        token: &AccessToken,
        user_id: Option<UserId>,
    ) -> Result<(), ApiError> {
        let request = self.request(Method::POST, "cart/clear/", &[], Some(token))?;
        self.execute(request.json(&json!({ "user_id": user_id })))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn update_cart_item(
        &self,
        token: &AccessToken,
        item: CartItemId,
        quantity: u32,
    ) -> Result<Cart, ApiError> {
        let path = format!("cart/update/{}/", item.0);
        let request = self.request(Method::PATCH, &path, &[], Some(token))?;
        self.send(request.json(&json!({ "quantity": quantity })))
            .await
    }

    #[instrument(skip(self, token))]
    async fn remove_cart_item(
        &self,
        token: &AccessToken,
        item: CartItemId,
    ) -> Result<Cart, ApiError> {
        let path = format!("cart/delete/{}/", item.0);
        let request = self.request(Method::DELETE, &path, &[], Some(token))?;
        self.send(request).await
    }

    #[instrument(skip_all)]
    async fn orders(&self, token: &AccessToken) -> Result<Page<Order>, ApiError> {
        let request = self.request(Method::GET, "order/list/", &[], Some(token))?;
        self.send(request).await
    }

    #[instrument(skip(self, token))]
    async fn create_order(
        &self,
        token: &AccessToken,
        order: &NewOrder,
    ) -> Result<Order, ApiError> {
        let request = self.request(Method::POST, "order/create/", &[], Some(token))?;
        self.send(request.json(order)).await
    }
}
