//! Domain types shared by the Notion client and the provisioner.
//!
//! Nothing in this crate performs I/O: it describes what gets created
//! (pages, content blocks, the store schema, seed rows) and how those
//! values are encoded for the Notion REST API.

pub mod blocks;
pub mod clock;
pub mod error;
pub mod ids;
pub mod plan;
pub mod schema;
