//! Page / store / seed-row provisioning.
//!
//! [`StructureProvisioner`] creates one child page per [`PageSpec`], then a
//! "Store Information" database inside that page, then one seed row in the
//! database. Each page runs that chain in its own task; pages are
//! independent of each other.
//!
//! Every operation returns a typed [`ProvisionError`] and leaves logging to
//! the caller. A failed database or seed row is logged and does not change
//! the outcome reported for the page that was created.

use std::sync::Arc;

use futures::future::join_all;

use scaffold_core::clock::{Clock, SystemClock};
use scaffold_core::error::CoreError;
use scaffold_core::ids::{DatabaseId, PageId};
use scaffold_core::plan::{weekly_grocery_plan, PageSpec};
use scaffold_core::schema::{
    StoreRow, StoreSchema, SEED_STORE_NAME, SEED_TOTAL_COST, STORE_DATABASE_TITLE,
};
use scaffold_notion::{NotionApiError, Workspace};

/// Errors from a single provisioning step.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    /// The page spec failed local validation; nothing was sent.
    #[error("Invalid page '{page}': {source}")]
    InvalidPage { page: String, source: CoreError },

    #[error("Error creating child page '{page}': {source}")]
    Page {
        page: String,
        source: NotionApiError,
    },

    #[error("Error creating database in '{page}': {source}")]
    Database {
        page: String,
        source: NotionApiError,
    },

    #[error("Error adding row '{store}' to database {database}: {source}")]
    Row {
        store: String,
        database: DatabaseId,
        source: NotionApiError,
    },
}

/// Creates the page hierarchy through a [`Workspace`].
///
/// Cloning is cheap: the workspace client and clock are shared.
#[derive(Clone)]
pub struct StructureProvisioner {
    workspace: Arc<dyn Workspace>,
    clock: Arc<dyn Clock>,
}

impl StructureProvisioner {
    /// Provisioner stamping rows with the system clock.
    pub fn new(workspace: Arc<dyn Workspace>) -> Self {
        Self::with_clock(workspace, Arc::new(SystemClock))
    }

    pub fn with_clock(workspace: Arc<dyn Workspace>, clock: Arc<dyn Clock>) -> Self {
        Self { workspace, clock }
    }

    /// Entry point: provision the weekly grocery pages under `parent`.
    pub async fn create_structure(&self, parent: &PageId) -> Vec<Option<PageId>> {
        let page_ids = self.create_weekly_grocery_pages(parent).await;
        tracing::info!("Structure creation completed!");
        page_ids
    }

    /// Create the three weekly grocery pages concurrently.
    ///
    /// `result[i]` is the page created for the i-th week, or `None` if that
    /// page could not be created.
    pub async fn create_weekly_grocery_pages(&self, parent: &PageId) -> Vec<Option<PageId>> {
        let page_ids = self.create_pages(parent, weekly_grocery_plan()).await;
        tracing::info!(page_ids = ?page_ids, "Created weekly grocery pages");
        page_ids
    }

    /// Provision every spec in its own task and wait for all of them.
    ///
    /// Output order matches `specs`, whatever order the tasks finish in.
    /// A failing page never cancels its siblings.
    pub async fn create_pages(&self, parent: &PageId, specs: Vec<PageSpec>) -> Vec<Option<PageId>> {
        let handles: Vec<_> = specs
            .into_iter()
            .map(|spec| {
                let provisioner = self.clone();
                let parent = parent.clone();
                tokio::spawn(async move {
                    match provisioner.create_child_page(&parent, &spec).await {
                        Ok(page_id) => Some(page_id),
                        Err(e) => {
                            tracing::error!(page = %spec.name, error = %e, "Page not provisioned");
                            None
                        }
                    }
                })
            })
            .collect();

        join_all(handles)
            .await
            .into_iter()
            .enumerate()
            .map(|(idx, joined)| {
                joined.unwrap_or_else(|e| {
                    tracing::error!(index = idx, error = %e, "Page provisioning task failed");
                    None
                })
            })
            .collect()
    }

    /// Create one child page holding the spec's task list, then its store
    /// database.
    ///
    /// Returns the page id once the page exists, even if the database or
    /// seed row afterwards fails.
    pub async fn create_child_page(
        &self,
        parent: &PageId,
        spec: &PageSpec,
    ) -> Result<PageId, ProvisionError> {
        spec.validate()
            .map_err(|source| ProvisionError::InvalidPage {
                page: spec.name.clone(),
                source,
            })?;

        let blocks = spec.blocks();
        let page_id = self
            .workspace
            .create_page(parent, &spec.name, &blocks)
            .await
            .map_err(|source| ProvisionError::Page {
                page: spec.name.clone(),
                source,
            })?;

        tracing::info!(page = %spec.name, page_id = %page_id, "Created child page");

        if let Err(e) = self.create_table_database(&page_id, &spec.name).await {
            tracing::error!(page = %spec.name, error = %e, "Store database not provisioned");
        }

        Ok(page_id)
    }

    /// Create the "Store Information" database inside `page_id` and seed it.
    ///
    /// `page_name` is only used for logging and errors.
    pub async fn create_table_database(
        &self,
        page_id: &PageId,
        page_name: &str,
    ) -> Result<DatabaseId, ProvisionError> {
        let schema = StoreSchema::store_information();
        let database_id = self
            .workspace
            .create_database(page_id, STORE_DATABASE_TITLE, &schema)
            .await
            .map_err(|source| ProvisionError::Database {
                page: page_name.to_string(),
                source,
            })?;

        tracing::info!(page = %page_name, database_id = %database_id, "Created table database");

        if let Err(e) = self
            .add_row_to_database(&database_id, SEED_STORE_NAME, SEED_TOTAL_COST)
            .await
        {
            tracing::error!(page = %page_name, error = %e, "Seed row not added");
        }

        Ok(database_id)
    }

    /// Insert one row, stamping `Create Date` with the clock reading taken
    /// when this call starts.
    pub async fn add_row_to_database(
        &self,
        database_id: &DatabaseId,
        store_name: &str,
        total_cost: f64,
    ) -> Result<PageId, ProvisionError> {
        let row = StoreRow {
            store_name: store_name.to_string(),
            total_cost,
            create_date: self.clock.now(),
        };

        let row_id = self
            .workspace
            .create_row(database_id, &row)
            .await
            .map_err(|source| ProvisionError::Row {
                store: store_name.to_string(),
                database: database_id.clone(),
                source,
            })?;

        tracing::info!(store = %store_name, row_id = %row_id, "Added row to database");
        Ok(row_id)
    }
}
