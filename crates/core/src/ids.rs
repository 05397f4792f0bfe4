//! Opaque identifiers returned by Notion, plus parent-id normalisation.
//!
//! Notion hands out UUIDs for every object. Users usually copy them out of
//! a browser, so [`normalize_notion_id`] accepts a bare 32-hex id, a dashed
//! UUID, or a full page URL and returns the canonical dashed form.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Matches a dashed UUID or a bare 32-hex id anywhere in the input.
const NOTION_ID_PATTERN: &str =
    r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}|[0-9a-fA-F]{32}";

static NOTION_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NOTION_ID_PATTERN).expect("valid regex"));

/// Identifier of a Notion page. Database rows are pages too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

/// Identifier of a Notion database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl DatabaseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for DatabaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract and canonicalise a Notion id.
///
/// Query strings and fragments are ignored (database view URLs carry a
/// second id in `?v=`), and when several ids appear in the path the last
/// one wins, since Notion appends the id to the page slug.
pub fn normalize_notion_id(input: &str) -> Result<PageId, CoreError> {
    let trimmed = input.trim();
    let path = trimmed
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let candidate = NOTION_ID_RE
        .find_iter(path)
        .last()
        .map(|m| m.as_str())
        .ok_or_else(|| CoreError::InvalidId(trimmed.to_string()))?;

    let uuid =
        Uuid::parse_str(candidate).map_err(|_| CoreError::InvalidId(trimmed.to_string()))?;

    Ok(PageId(uuid.hyphenated().to_string()))
}
