//! The three create operations the provisioner needs, as a trait.

use async_trait::async_trait;

use scaffold_core::blocks::ContentBlock;
use scaffold_core::ids::{DatabaseId, PageId};
use scaffold_core::schema::{StoreRow, StoreSchema};

use crate::api::{NotionApi, NotionApiError};
use crate::payloads::{CreateDatabaseRequest, CreatePageRequest};

/// Create-only access to a Notion workspace.
///
/// Implementations must be safe to call concurrently from several tasks.
#[async_trait]
pub trait Workspace: Send + Sync {
    /// Create a titled page under `parent` with the given body.
    async fn create_page(
        &self,
        parent: &PageId,
        title: &str,
        children: &[ContentBlock],
    ) -> Result<PageId, NotionApiError>;

    /// Create a database nested in the page `parent`.
    async fn create_database(
        &self,
        parent: &PageId,
        title: &str,
        schema: &StoreSchema,
    ) -> Result<DatabaseId, NotionApiError>;

    /// Insert one row into `database`.
    async fn create_row(
        &self,
        database: &DatabaseId,
        row: &StoreRow,
    ) -> Result<PageId, NotionApiError>;
}

#[async_trait]
impl Workspace for NotionApi {
    async fn create_page(
        &self,
        parent: &PageId,
        title: &str,
        children: &[ContentBlock],
    ) -> Result<PageId, NotionApiError> {
        let request = CreatePageRequest::child_page(parent, title, children);
        let created = self.post_page(&request).await?;
        Ok(PageId::new(created.id))
    }

    async fn create_database(
        &self,
        parent: &PageId,
        title: &str,
        schema: &StoreSchema,
    ) -> Result<DatabaseId, NotionApiError> {
        let request = CreateDatabaseRequest::inline_in_page(parent, title, schema);
        let created = self.post_database(&request).await?;
        Ok(DatabaseId::new(created.id))
    }

    async fn create_row(
        &self,
        database: &DatabaseId,
        row: &StoreRow,
    ) -> Result<PageId, NotionApiError> {
        let request = CreatePageRequest::database_row(database, row);
        let created = self.post_page(&request).await?;
        Ok(PageId::new(created.id))
    }
}
