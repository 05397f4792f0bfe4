//! In-memory [`Workspace`] that records every create call.
//!
//! Individual pages can be made to fail, panic, or respond slowly, and
//! database/row creation can be failed wholesale.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use scaffold_core::blocks::ContentBlock;
use scaffold_core::ids::{DatabaseId, PageId};
use scaffold_core::schema::{StoreRow, StoreSchema};
use scaffold_notion::{NotionApiError, Workspace};

#[derive(Debug, Clone)]
pub struct PageCall {
    pub id: PageId,
    pub parent: PageId,
    pub title: String,
    pub blocks: Vec<ContentBlock>,
}

#[derive(Debug, Clone)]
pub struct DatabaseCall {
    pub id: DatabaseId,
    pub parent: PageId,
    pub title: String,
    pub schema: StoreSchema,
}

#[derive(Debug, Clone)]
pub struct RowCall {
    pub id: PageId,
    pub database: DatabaseId,
    pub row: StoreRow,
}

#[derive(Default)]
pub struct RecordingWorkspace {
    next_id: AtomicUsize,
    pages: Mutex<Vec<PageCall>>,
    databases: Mutex<Vec<DatabaseCall>>,
    rows: Mutex<Vec<RowCall>>,
    failing_pages: HashSet<String>,
    panicking_pages: HashSet<String>,
    page_delays: HashMap<String, Duration>,
    fail_databases: bool,
    fail_rows: bool,
}

impl RecordingWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// `create_page` with this title returns a Notion validation error.
    pub fn fail_page(mut self, title: &str) -> Self {
        self.failing_pages.insert(title.to_string());
        self
    }

    /// `create_page` with this title panics.
    pub fn panic_on_page(mut self, title: &str) -> Self {
        self.panicking_pages.insert(title.to_string());
        self
    }

    /// `create_page` with this title sleeps before answering.
    pub fn delay_page(mut self, title: &str, delay: Duration) -> Self {
        self.page_delays.insert(title.to_string(), delay);
        self
    }

    pub fn fail_databases(mut self) -> Self {
        self.fail_databases = true;
        self
    }

    pub fn fail_rows(mut self) -> Self {
        self.fail_rows = true;
        self
    }

    /// Successful page creations, in completion order.
    pub fn pages(&self) -> Vec<PageCall> {
        self.pages.lock().unwrap().clone()
    }

    pub fn databases(&self) -> Vec<DatabaseCall> {
        self.databases.lock().unwrap().clone()
    }

    pub fn rows(&self) -> Vec<RowCall> {
        self.rows.lock().unwrap().clone()
    }

    pub fn page_titled(&self, id: &PageId) -> Option<String> {
        self.pages()
            .into_iter()
            .find(|p| &p.id == id)
            .map(|p| p.title)
    }

    fn next(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        format!("{prefix}-{n}")
    }
}

fn rejected(message: &str) -> NotionApiError {
    NotionApiError::Api {
        status: 400,
        code: "validation_error".to_string(),
        message: message.to_string(),
    }
}

#[async_trait]
impl Workspace for RecordingWorkspace {
    async fn create_page(
        &self,
        parent: &PageId,
        title: &str,
        children: &[ContentBlock],
    ) -> Result<PageId, NotionApiError> {
        if let Some(delay) = self.page_delays.get(title) {
            tokio::time::sleep(*delay).await;
        }
        if self.panicking_pages.contains(title) {
            panic!("simulated crash while creating '{title}'");
        }
        if self.failing_pages.contains(title) {
            return Err(rejected("page rejected"));
        }

        let id = PageId::new(self.next("page"));
        self.pages.lock().unwrap().push(PageCall {
            id: id.clone(),
            parent: parent.clone(),
            title: title.to_string(),
            blocks: children.to_vec(),
        });
        Ok(id)
    }

    async fn create_database(
        &self,
        parent: &PageId,
        title: &str,
        schema: &StoreSchema,
    ) -> Result<DatabaseId, NotionApiError> {
        if self.fail_databases {
            return Err(rejected("database rejected"));
        }

        let id = DatabaseId::new(self.next("db"));
        self.databases.lock().unwrap().push(DatabaseCall {
            id: id.clone(),
            parent: parent.clone(),
            title: title.to_string(),
            schema: schema.clone(),
        });
        Ok(id)
    }

    async fn create_row(
        &self,
        database: &DatabaseId,
        row: &StoreRow,
    ) -> Result<PageId, NotionApiError> {
        if self.fail_rows {
            return Err(rejected("row rejected"));
        }

        let id = PageId::new(self.next("row"));
        self.rows.lock().unwrap().push(RowCall {
            id: id.clone(),
            database: database.clone(),
            row: row.clone(),
        });
        Ok(id)
    }
}
