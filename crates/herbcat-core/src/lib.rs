//! Canonical catalog model and the pure query engine that runs over it.

pub mod app_config;
pub mod catalog;
pub mod category_index;
pub mod config;
pub mod query;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{Catalog, Category, Price, Product};
pub use category_index::CategoryIndex;
pub use config::{load_app_config, load_app_config_from_env};
pub use query::{query, CatalogQuery, CategoryFilter, SortKey, ALL_CATEGORIES};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Rejections raised while assembling a create/update payload, before
/// anything is sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field '{0}' is missing or empty")]
    MissingField(&'static str),

    #[error("category selection must be a numeric id, got '{0}'")]
    InvalidCategory(String),

    #[error("price must be a decimal number, got '{0}'")]
    InvalidPrice(String),
}
