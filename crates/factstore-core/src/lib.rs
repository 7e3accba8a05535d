//! factstore-core: Shared types and error handling for the FactStore client.
//!
//! This crate provides the foundational pieces used across the client and
//! the demo binary:
//! - Node identity types (`Uid`, blank-node labels)
//! - Common error types

pub mod error;
pub mod types;

pub use error::FactstoreError;
pub use types::{blank, Uid};
