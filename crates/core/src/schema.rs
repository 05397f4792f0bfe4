//! Store database schema and row values.
//!
//! Every provisioned page gets one "Store Information" database with a
//! fixed four-column schema, seeded with a single row.

use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::json;

use crate::blocks::RichText;
use crate::clock::format_notion_date;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Title of the database created inside each page.
pub const STORE_DATABASE_TITLE: &str = "Store Information";

/// Title column.
pub const COLUMN_STORE: &str = "Store";

/// Currency-formatted number column.
pub const COLUMN_TOTAL_COST: &str = "TotalCost";

/// Date column set from the clock when a row is inserted.
pub const COLUMN_CREATE_DATE: &str = "Create Date";

/// Server-maintained edit timestamp. Never written by this crate.
pub const COLUMN_LAST_MODIFIED: &str = "Last Modified";

/// Title of the row inserted into every new store database.
pub const SEED_STORE_NAME: &str = "Example Store";

/// Cost of the seed row.
pub const SEED_TOTAL_COST: f64 = 0.0;

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Display format of a number column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    Number,
    Dollar,
}

/// Property type of a database column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Title,
    Number(NumberFormat),
    Date,
    /// Read-only, filled in by Notion.
    LastEditedTime,
}

impl ColumnKind {
    /// Notion property type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnKind::Title => "title",
            ColumnKind::Number(_) => "number",
            ColumnKind::Date => "date",
            ColumnKind::LastEditedTime => "last_edited_time",
        }
    }

    fn config(&self) -> serde_json::Value {
        match self {
            ColumnKind::Number(format) => json!({ "format": format }),
            _ => json!({}),
        }
    }
}

impl Serialize for ColumnKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", self.type_name())?;
        map.serialize_entry(self.type_name(), &self.config())?;
        map.end()
    }
}

/// A named database column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// Ordered column set of a database. Serialises to the `properties` map
/// of a `POST /databases` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSchema {
    columns: Vec<Column>,
}

impl StoreSchema {
    /// The fixed schema used for every store database.
    pub fn store_information() -> Self {
        let column = |name: &str, kind| Column {
            name: name.to_string(),
            kind,
        };
        Self {
            columns: vec![
                column(COLUMN_STORE, ColumnKind::Title),
                column(COLUMN_TOTAL_COST, ColumnKind::Number(NumberFormat::Dollar)),
                column(COLUMN_CREATE_DATE, ColumnKind::Date),
                column(COLUMN_LAST_MODIFIED, ColumnKind::LastEditedTime),
            ],
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl Serialize for StoreSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in &self.columns {
            map.serialize_entry(&column.name, &column.kind)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// Values written into a store database row. The `Last Modified` column
/// is left to the server.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRow {
    pub store_name: String,
    pub total_cost: f64,
    pub create_date: DateTime<Utc>,
}

impl Serialize for StoreRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(
            COLUMN_STORE,
            &json!({ "title": [RichText::plain(self.store_name.as_str())] }),
        )?;
        map.serialize_entry(COLUMN_TOTAL_COST, &json!({ "number": self.total_cost }))?;
        map.serialize_entry(
            COLUMN_CREATE_DATE,
            &json!({ "date": { "start": format_notion_date(self.create_date) } }),
        )?;
        map.end()
    }
}
