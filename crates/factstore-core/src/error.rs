use thiserror::Error;

/// Shared error type for the FactStore client crates.
#[derive(Error, Debug)]
pub enum FactstoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid uid literal: {0}")]
    InvalidUid(String),
}
