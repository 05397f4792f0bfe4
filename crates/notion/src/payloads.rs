//! Request and response bodies for the Notion endpoints we call.

use serde::{Deserialize, Serialize};
use serde_json::json;

use scaffold_core::blocks::{ContentBlock, RichText};
use scaffold_core::ids::{DatabaseId, PageId};
use scaffold_core::schema::{StoreRow, StoreSchema};

/// Where a new page or database is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parent {
    PageId { page_id: String },
    DatabaseId { database_id: String },
}

impl Parent {
    pub fn page(id: &PageId) -> Self {
        Parent::PageId {
            page_id: id.as_str().to_string(),
        }
    }

    pub fn database(id: &DatabaseId) -> Self {
        Parent::DatabaseId {
            database_id: id.as_str().to_string(),
        }
    }
}

/// Body of `POST /pages`, used both for child pages and database rows.
#[derive(Debug, Serialize)]
pub struct CreatePageRequest<'a> {
    pub parent: Parent,
    pub properties: serde_json::Value,
    #[serde(skip_serializing_if = "no_blocks")]
    pub children: &'a [ContentBlock],
}

impl<'a> CreatePageRequest<'a> {
    /// A titled page nested under another page.
    pub fn child_page(parent: &PageId, title: &str, children: &'a [ContentBlock]) -> Self {
        Self {
            parent: Parent::page(parent),
            properties: json!({ "title": { "title": [RichText::plain(title)] } }),
            children,
        }
    }

    /// A row in a store database.
    pub fn database_row(database: &DatabaseId, row: &StoreRow) -> Self {
        Self {
            parent: Parent::database(database),
            properties: serde_json::to_value(row).expect("StoreRow is always serialisable"),
            children: &[],
        }
    }
}

fn no_blocks(children: &&[ContentBlock]) -> bool {
    children.is_empty()
}

/// Body of `POST /databases`.
#[derive(Debug, Serialize)]
pub struct CreateDatabaseRequest<'a> {
    pub parent: Parent,
    pub title: Vec<RichText>,
    pub properties: &'a StoreSchema,
}

impl<'a> CreateDatabaseRequest<'a> {
    pub fn inline_in_page(parent: &PageId, title: &str, schema: &'a StoreSchema) -> Self {
        Self {
            parent: Parent::page(parent),
            title: vec![RichText::plain(title)],
            properties: schema,
        }
    }
}

/// The part of a create response we care about.
#[derive(Debug, Deserialize)]
pub struct CreatedObject {
    /// `"page"` or `"database"`.
    #[serde(default)]
    pub object: Option<String>,
    pub id: String,
}

/// Error object returned by Notion on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct NotionErrorBody {
    pub code: String,
    pub message: String,
}
