use std::fmt;
use std::time::Duration;

use scaffold_core::ids::{normalize_notion_id, PageId};
use scaffold_notion::api::{
    NotionApiConfig, DEFAULT_API_URL, DEFAULT_NOTION_VERSION, DEFAULT_REQUEST_TIMEOUT,
};

/// Errors raised while loading [`ProvisionerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Provisioner configuration loaded from environment variables.
///
/// Loaded and validated once in `main`, then handed to the components
/// that need it.
#[derive(Clone)]
pub struct ProvisionerConfig {
    /// Notion integration token.
    pub api_key: String,
    /// Page the weekly pages are created under, in dashed UUID form.
    pub parent_page_id: PageId,
    /// API base URL (default: public Notion API).
    pub api_url: String,
    /// Value of the `Notion-Version` header.
    pub notion_version: String,
    /// Per-request HTTP timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ProvisionerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Required | Default                     |
    /// |------------------------|----------|-----------------------------|
    /// | `NOTION_API_KEY`       | yes      | --                          |
    /// | `PARENT_PAGE_ID`       | yes      | --                          |
    /// | `NOTION_API_URL`       | no       | `https://api.notion.com/v1` |
    /// | `NOTION_VERSION`       | no       | `2022-06-28`                |
    /// | `REQUEST_TIMEOUT_SECS` | no       | `30`                        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through
    /// `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get("NOTION_API_KEY").ok_or(ConfigError::Missing("NOTION_API_KEY"))?;

        let raw_parent = get("PARENT_PAGE_ID").ok_or(ConfigError::Missing("PARENT_PAGE_ID"))?;
        let parent_page_id =
            normalize_notion_id(&raw_parent).map_err(|e| ConfigError::Invalid {
                var: "PARENT_PAGE_ID",
                reason: e.to_string(),
            })?;

        let api_url = get("NOTION_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: "NOTION_API_URL",
                reason: format!("'{api_url}' is not an http(s) URL"),
            });
        }

        let notion_version =
            get("NOTION_VERSION").unwrap_or_else(|| DEFAULT_NOTION_VERSION.to_string());

        let request_timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    var: "REQUEST_TIMEOUT_SECS",
                    reason: format!("'{raw}' is not a positive integer"),
                })?,
            None => DEFAULT_REQUEST_TIMEOUT.as_secs(),
        };

        Ok(Self {
            api_key,
            parent_page_id,
            api_url,
            notion_version,
            request_timeout_secs,
        })
    }

    /// Connection settings for the Notion client.
    pub fn notion_api_config(&self) -> NotionApiConfig {
        NotionApiConfig {
            token: self.api_key.clone(),
            api_url: self.api_url.clone(),
            notion_version: self.notion_version.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

impl fmt::Debug for ProvisionerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionerConfig")
            .field("api_key", &"<redacted>")
            .field("parent_page_id", &self.parent_page_id)
            .field("api_url", &self.api_url)
            .field("notion_version", &self.notion_version)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
