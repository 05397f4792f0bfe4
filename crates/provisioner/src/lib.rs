//! `scaffold-provisioner` library crate.
//!
//! Exposes configuration loading and the [`provisioner::StructureProvisioner`]
//! for integration testing. The binary entrypoint lives in `main.rs`.

pub mod config;
pub mod provisioner;
