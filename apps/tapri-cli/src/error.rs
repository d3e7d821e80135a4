//! # CLI Error Type
//!
//! ```text
//! ConfigError ──┐
//! CoreError  ───┼──► CliError ──► main prints "error: ..." and exits 1
//! DbError    ───┤
//! serde_json ───┘
//! ```

use tapri_core::{CoreError, ValidationError};
use tapri_db::DbError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Could not prepare database directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not encode report: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
