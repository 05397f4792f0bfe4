//! Notion REST client.
//!
//! [`api::NotionApi`] speaks the subset of the Notion HTTP API needed to
//! create pages, databases and database rows. The provisioner talks to it
//! through the [`workspace::Workspace`] trait so tests can swap in an
//! in-memory implementation.

pub mod api;
pub mod payloads;
pub mod workspace;

pub use api::{NotionApi, NotionApiError};
pub use workspace::Workspace;
