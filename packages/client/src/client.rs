use std::sync::Arc;

use bayline_auth::TokenStore;
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

/// Shared HTTP client for the Bayline backend.
///
/// Cheap to clone; holds the reqwest pool, the configuration, and a handle
/// to the token store. On HTTP 401 the stored token is cleared so the rest
/// of the application observes the logout.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, tokens: Arc<TokenStore>) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Build a request with the bearer token attached when one is held.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = self.tokens.bearer_token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await.map_err(ApiError::network)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_response(status.as_u16(), &body);
        if error.is_unauthorized() {
            tracing::debug!("Received 401, clearing stored auth token");
            self.tokens.clear();
        }
        Err(error)
    }

    async fn json_of<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response.json::<T>().await.map_err(ApiError::decode)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::json_of(response).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        Self::json_of(response).await
    }

    pub async fn get_bytes(&self, path: &str) -> ApiResult<Vec<u8>> {
        let response = self.send(self.request(Method::GET, path)).await?;
        let bytes = response.bytes().await.map_err(ApiError::decode)?;
        Ok(bytes.to_vec())
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        Self::json_of(response).await
    }

    /// POST with no body, for action endpoints.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(self.request(Method::POST, path)).await?;
        Self::json_of(response).await
    }

    /// POST an urlencoded form (the backend's login endpoint is an OAuth2
    /// password form, not JSON).
    pub async fn post_form<B, T>(&self, path: &str, form: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).form(form))
            .await?;
        Self::json_of(response).await
    }

    /// POST a multipart form (warranty claim attachments).
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> ApiResult<T> {
        let response = self
            .send(self.request(Method::POST, path).multipart(form))
            .await?;
        Self::json_of(response).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        Self::json_of(response).await
    }

    pub async fn put_with_query<Q, T>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::PUT, path).query(query))
            .await?;
        Self::json_of(response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(self.request(Method::DELETE, path)).await?;
        Self::json_of(response).await
    }
}
