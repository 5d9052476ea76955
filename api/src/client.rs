//! Catalog API client implementation

use crate::{
    config::{ApiConfig, ConfigError},
    error::ApiError,
};
use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};

/// Catalog API client
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid or the HTTP
    /// client cannot be built
    pub fn new(config: ApiConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    /// Create a client with configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the environment holds invalid values
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(ApiConfig::from_env()?)
    }

    /// Base URL every path is resolved against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET` a resource with the given filters and decode its JSON body
    ///
    /// `query` holds `(name, value)` pairs from a query builder; an empty
    /// slice sends no query string.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-2xx statuses, or undecodable bodies
    pub async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;

        tracing::debug!(
            method = "GET",
            %url,
            ?query,
            status = response.status().as_u16(),
            "API response"
        );

        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// `POST` a JSON body, expecting any 2xx
    ///
    /// The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures or non-2xx statuses
    pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.url(path);
        let response = self.client.post(&url).json(body).send().await?;

        tracing::debug!(method = "POST", %url, status = response.status().as_u16(), "API response");

        check_status(response).await.map(|_| ())
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
