//! Generic REST client for the backend-as-a-service persistence contract.
//!
//! The backend exposes named resource collections over a PostgREST-style
//! interface: inserts with `Prefer: return=representation`, equality-filtered
//! selects with ordering and limits, PATCH partial updates by filter, and
//! DELETE by filter. Authentication is a static API key sent as both the
//! `apikey` header and a bearer token.
//!
//! This layer is fully fallible (`Result<_, StoreError>`); the per-resource
//! modules on top of it convert failures to logged safe defaults.

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store API error (status {status}): {message}")]
    Status { status: u16, message: String },
}

/// Query parameters for a filtered select / update / delete.
#[derive(Debug, Clone, Default)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equality filter on a column.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.params
            .push(("order".to_string(), format!("{column}.asc")));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.params
            .push(("order".to_string(), format!("{column}.desc")));
        self
    }

    pub fn limit(mut self, n: u32) -> Self {
        self.params.push(("limit".to_string(), n.to_string()));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// The persistence gateway client shared by all resource modules.
#[derive(Clone)]
pub struct StoreClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl StoreClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
    }

    /// Inserts one or more rows and returns the created representations.
    pub async fn insert<T, R>(&self, table: &str, rows: &T) -> Result<Vec<R>, StoreError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await?;
        let response = check_status(response).await?;
        debug!("insert into {table} succeeded");
        Ok(response.json().await?)
    }

    /// Filtered select with optional ordering and limit.
    pub async fn select<R>(&self, table: &str, query: &Query) -> Result<Vec<R>, StoreError>
    where
        R: DeserializeOwned,
    {
        let response = self
            .request(reqwest::Method::GET, table)
            .query(query.params())
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Partial update of every row matching the filter.
    pub async fn update<P>(&self, table: &str, query: &Query, patch: &P) -> Result<(), StoreError>
    where
        P: Serialize + ?Sized,
    {
        let response = self
            .request(reqwest::Method::PATCH, table)
            .query(query.params())
            .json(patch)
            .send()
            .await?;
        check_status(response).await?;
        debug!("update of {table} succeeded");
        Ok(())
    }

    /// Deletes every row matching the filter.
    pub async fn delete(&self, table: &str, query: &Query) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::DELETE, table)
            .query(query.params())
            .send()
            .await?;
        check_status(response).await?;
        debug!("delete from {table} succeeded");
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        message,
    })
}
