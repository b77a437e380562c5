//! Backend API client implementation.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use silsila_core::{OrderId, OrderStatus, ProductId};
use tracing::{debug, instrument};
use url::Url;

use crate::config::SilsilaConfig;

use super::BackendError;
use super::cache::{CacheKey, CacheValue};
use super::types::{
    AnalyticsSummary, Category, DashboardMetrics, LoginRequest, LoginResponse, NewOrder, Order,
    Page, PlacedOrder, Product, ProductFilter, ProductInput, Profile, Series, Theme,
};

/// Request timeout for backend calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Catalog cache TTL (5 minutes).
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Maximum cached catalog entries.
const CACHE_CAPACITY: u64 = 1000;

/// Client for the Silsila backend API.
///
/// Cheaply cloneable; catalog reads are cached for 5 minutes, authenticated
/// reads always go to the backend.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl BackendClient {
    /// Create a new backend API client.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized; this is a startup
    /// failure, not a runtime condition.
    #[must_use]
    pub fn new(config: &SilsilaConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.api_base_url.clone(),
                cache,
            }),
        }
    }

    // =========================================================================
    // Storefront surface
    // =========================================================================

    /// List products matching a catalog filter. Cached per filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Page<Product>, BackendError> {
        let key = CacheKey::Products(filter.to_query());
        if let Some(CacheValue::Products(page)) = self.inner.cache.get(&key).await {
            debug!("catalog cache hit");
            return Ok(page);
        }

        let path = format!("products?{}", filter.to_query());
        let page: Page<Product> = self.get_json(&path, None).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Products(page.clone()))
            .await;
        Ok(page)
    }

    /// Fetch a single product by ID. Cached.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] for unknown products.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, BackendError> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            return Ok(*product);
        }

        let product: Product = self.get_json(&format!("products/{id}"), None).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// List all product categories. Cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, BackendError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            return Ok(categories);
        }
        let categories: Vec<Category> = self.get_json("categories", None).await?;
        self.inner
            .cache
            .insert(CacheKey::Categories, CacheValue::Categories(categories.clone()))
            .await;
        Ok(categories)
    }

    /// List all product series. Cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_series(&self) -> Result<Vec<Series>, BackendError> {
        if let Some(CacheValue::Series(series)) = self.inner.cache.get(&CacheKey::Series).await {
            return Ok(series);
        }
        let series: Vec<Series> = self.get_json("series", None).await?;
        self.inner
            .cache
            .insert(CacheKey::Series, CacheValue::Series(series.clone()))
            .await;
        Ok(series)
    }

    /// List lookbook themes. Cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_themes(&self) -> Result<Vec<Theme>, BackendError> {
        if let Some(CacheValue::Themes(themes)) = self.inner.cache.get(&CacheKey::Themes).await {
            return Ok(themes);
        }
        let themes: Vec<Theme> = self.get_json("themes", None).await?;
        self.inner
            .cache
            .insert(CacheKey::Themes, CacheValue::Themes(themes.clone()))
            .await;
        Ok(themes)
    }

    /// List currently trending products. Cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn trending_products(&self) -> Result<Vec<Product>, BackendError> {
        if let Some(CacheValue::Trending(products)) = self.inner.cache.get(&CacheKey::Trending).await
        {
            return Ok(products);
        }
        let products: Vec<Product> = self.get_json("products/trending", None).await?;
        self.inner
            .cache
            .insert(CacheKey::Trending, CacheValue::Trending(products.clone()))
            .await;
        Ok(products)
    }

    /// Exchange credentials for a session token and role claim.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Api`] with status 401 for bad credentials.
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, BackendError> {
        self.send_json(Method::POST, "auth/login", None, request)
            .await
    }

    /// Place a new order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the order is rejected.
    #[instrument(skip(self, order))]
    pub async fn place_order(&self, order: &NewOrder) -> Result<PlacedOrder, BackendError> {
        self.send_json(Method::POST, "orders", None, order).await
    }

    /// Look up an order by its public number and the purchaser's email.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] when no matching order exists.
    #[instrument(skip(self, email))]
    pub async fn track_order(&self, number: &str, email: &str) -> Result<Order, BackendError> {
        let path = format!(
            "orders/track?number={}&email={}",
            urlencoding::encode(number),
            urlencoding::encode(email)
        );
        self.get_json(&path, None).await
    }

    /// Fetch the signed-in customer's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the request fails.
    #[instrument(skip(self, token))]
    pub async fn profile(&self, token: &str) -> Result<Profile, BackendError> {
        self.get_json("me", Some(token)).await
    }

    /// Fetch the signed-in customer's order history.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the request fails.
    #[instrument(skip(self, token))]
    pub async fn my_orders(&self, token: &str) -> Result<Vec<Order>, BackendError> {
        self.get_json("me/orders", Some(token)).await
    }

    // =========================================================================
    // Admin surface
    // =========================================================================

    /// Fetch dashboard metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the request fails.
    #[instrument(skip(self, token))]
    pub async fn dashboard(&self, token: &str) -> Result<DashboardMetrics, BackendError> {
        self.get_json("admin/dashboard", Some(token)).await
    }

    /// List orders for the admin console.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the request fails.
    #[instrument(skip(self, token))]
    pub async fn admin_orders(&self, token: &str, page: u32) -> Result<Page<Order>, BackendError> {
        let path = format!("admin/orders?page={}", page.max(1));
        self.get_json(&path, Some(token)).await
    }

    /// Update an order's fulfillment status.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the order is unknown.
    #[instrument(skip(self, token))]
    pub async fn update_order_status(
        &self,
        token: &str,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, BackendError> {
        let body = serde_json::json!({ "status": status });
        self.send_json(
            Method::PATCH,
            &format!("admin/orders/{id}/status"),
            Some(token),
            &body,
        )
        .await
    }

    /// List products for the admin console (uncached - admins need to see
    /// their own edits immediately).
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the request fails.
    #[instrument(skip(self, token))]
    pub async fn admin_products(
        &self,
        token: &str,
        page: u32,
    ) -> Result<Page<Product>, BackendError> {
        let path = format!("admin/products?page={}", page.max(1));
        self.get_json(&path, Some(token)).await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the input is invalid.
    #[instrument(skip(self, token, input))]
    pub async fn create_product(
        &self,
        token: &str,
        input: &ProductInput,
    ) -> Result<Product, BackendError> {
        let product = self
            .send_json(Method::POST, "admin/products", Some(token), input)
            .await?;
        self.invalidate_catalog();
        Ok(product)
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the product is unknown.
    #[instrument(skip(self, token, input))]
    pub async fn update_product(
        &self,
        token: &str,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, BackendError> {
        let product = self
            .send_json(
                Method::PUT,
                &format!("admin/products/{id}"),
                Some(token),
                input,
            )
            .await?;
        self.invalidate_catalog();
        Ok(product)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the product is unknown.
    #[instrument(skip(self, token))]
    pub async fn delete_product(&self, token: &str, id: ProductId) -> Result<(), BackendError> {
        let url = self.url(&format!("admin/products/{id}"));
        let response = self
            .inner
            .client
            .delete(url)
            .bearer_auth(token)
            .send()
            .await?;
        Self::check_status(response).await?;
        self.invalidate_catalog();
        Ok(())
    }

    /// Fetch the analytics summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the request fails.
    #[instrument(skip(self, token))]
    pub async fn analytics(&self, token: &str) -> Result<AnalyticsSummary, BackendError> {
        self.get_json("admin/analytics", Some(token)).await
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn url(&self, path: &str) -> String {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        format!("{base}/{path}")
    }

    /// GET `path` and parse the JSON body, attaching a bearer token when one
    /// is supplied.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, BackendError> {
        let mut request = self.inner.client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// Send a JSON body and parse the JSON response.
    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: &impl Serialize,
    ) -> Result<T, BackendError> {
        let mut request = self.inner.client.request(method, self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// Map non-success statuses to errors, preserving the body as message.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let path = response.url().path().to_string();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(path));
        }
        let message = response.text().await.unwrap_or_default();
        Err(BackendError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Drop cached catalog entries after an admin write.
    fn invalidate_catalog(&self) {
        self.inner.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_base(base: &str) -> BackendClient {
        let config = SilsilaConfig {
            api_base_url: base.parse().expect("valid url"),
            host: "127.0.0.1".parse().expect("valid ip"),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            sentry: crate::config::SentryConfig::default(),
        };
        BackendClient::new(&config)
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = client_with_base("https://api.silsila.shop/");
        assert_eq!(
            client.url("products/7"),
            "https://api.silsila.shop/products/7"
        );

        let client = client_with_base("https://api.silsila.shop/v1");
        assert_eq!(client.url("categories"), "https://api.silsila.shop/v1/categories");
    }
}
