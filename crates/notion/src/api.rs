//! REST API client for the Notion HTTP endpoints.
//!
//! Wraps page, database and database-row creation using [`reqwest`].
//! Authentication and the `Notion-Version` header are set once as default
//! headers on the underlying client.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::payloads::{CreateDatabaseRequest, CreatePageRequest, CreatedObject, NotionErrorBody};

/// Public Notion API base URL.
pub const DEFAULT_API_URL: &str = "https://api.notion.com/v1";

/// API version pinned via the `Notion-Version` header.
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const NOTION_VERSION_HEADER: &str = "Notion-Version";

/// Errors from the Notion REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum NotionApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Notion returned a non-2xx status code.
    #[error("Notion API error ({status} {code}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Notion error code, e.g. `object_not_found`, or `unknown` when
        /// the body was not a Notion error object.
        code: String,
        /// Notion's message, or the raw body.
        message: String,
    },

    /// The token or version could not be encoded as a header value.
    #[error("Invalid header value for {0}")]
    InvalidHeader(&'static str),
}

/// Connection settings for [`NotionApi`].
#[derive(Debug, Clone)]
pub struct NotionApiConfig {
    pub token: String,
    pub api_url: String,
    pub notion_version: String,
    pub timeout: Duration,
}

impl NotionApiConfig {
    /// Settings for the public API with the given integration token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// HTTP client for one Notion integration.
///
/// Cheap to share behind an `Arc`; every call is an independent request.
#[derive(Debug, Clone)]
pub struct NotionApi {
    client: reqwest::Client,
    api_url: String,
}

impl NotionApi {
    /// Build a client with auth and version headers preconfigured.
    pub fn new(config: &NotionApiConfig) -> Result<Self, NotionApiError> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| NotionApiError::InvalidHeader("Authorization"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let version = HeaderValue::from_str(&config.notion_version)
            .map_err(|_| NotionApiError::InvalidHeader(NOTION_VERSION_HEADER))?;
        headers.insert(NOTION_VERSION_HEADER, version);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Create a page.
    ///
    /// Sends `POST /pages`. Child pages and database rows share this
    /// endpoint; the request's `parent` decides which one is created.
    pub async fn post_page(
        &self,
        request: &CreatePageRequest<'_>,
    ) -> Result<CreatedObject, NotionApiError> {
        tracing::debug!(parent = ?request.parent, "POST /pages");

        let response = self
            .client
            .post(format!("{}/pages", self.api_url))
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Create a database.
    ///
    /// Sends `POST /databases` with the title and property schema.
    pub async fn post_database(
        &self,
        request: &CreateDatabaseRequest<'_>,
    ) -> Result<CreatedObject, NotionApiError> {
        tracing::debug!(parent = ?request.parent, "POST /databases");

        let response = self
            .client
            .post(format!("{}/databases", self.api_url))
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. On failure the body
    /// is decoded as a Notion error object, falling back to the raw text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, NotionApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        let (code, message) = match serde_json::from_str::<NotionErrorBody>(&body) {
            Ok(err) => (err.code, err.message),
            Err(_) => ("unknown".to_string(), body),
        };

        Err(NotionApiError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, NotionApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
