//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. The `--db` flag overrides `TAPRI_DB_PATH`.
//!
//! | Variable                | Default                      |
//! |-------------------------|------------------------------|
//! | `TAPRI_DB_PATH`         | platform data dir `/tapri.db`|
//! | `TAPRI_OPEN_HOUR`       | `5`                          |
//! | `TAPRI_CLOSE_HOUR`      | `21`                         |
//! | `TAPRI_TOP_ITEMS`       | `10`                         |
//! | `TAPRI_CURRENCY_SYMBOL` | `₹`                          |

use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;
use tapri_core::{
    CoreError, OperatingHours, ReportConfig, DEFAULT_CLOSING_HOUR, DEFAULT_OPENING_HOUR,
    DEFAULT_TOP_ITEMS,
};

const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// Operating hours and top-items length for reports
    pub report: ReportConfig,

    /// Prefix for rendered amounts
    pub currency_symbol: String,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match lookup("TAPRI_DB_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };

        let open_hour: u32 = parse_var(&lookup, "TAPRI_OPEN_HOUR", DEFAULT_OPENING_HOUR)?;
        let close_hour: u32 = parse_var(&lookup, "TAPRI_CLOSE_HOUR", DEFAULT_CLOSING_HOUR)?;
        let top_items_limit: usize = parse_var(&lookup, "TAPRI_TOP_ITEMS", DEFAULT_TOP_ITEMS)?;

        let operating_hours = OperatingHours::new(open_hour, close_hour)?;

        let currency_symbol = lookup("TAPRI_CURRENCY_SYMBOL")
            .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string());

        Ok(CliConfig {
            db_path,
            report: ReportConfig {
                operating_hours,
                top_items_limit,
            },
            currency_symbol,
        })
    }

    /// Replaces the database path (from `--db`).
    pub fn with_db_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.db_path = path;
        }
        self
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Platform data directory, e.g. `~/.local/share/tapri-pos/tapri.db` on Linux.
fn default_db_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("com", "tapri", "pos").ok_or(ConfigError::NoDataDir)?;
    Ok(proj_dirs.data_dir().join("tapri.db"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error(transparent)]
    OperatingHours(#[from] CoreError),

    #[error("Could not determine app data directory; set TAPRI_DB_PATH")]
    NoDataDir,
}
