//! catalog_core - Read-only skill, item and enemy catalogs loaded from TOML
//!
//! The combat engine only ever sees the `SkillLookup` and `ItemFactory`
//! traits; `Catalog` implements both, and spawns enemies from templates.

mod config;
mod registry;

pub use config::{CatalogFileConfig, EnemyConfig};
pub use registry::Catalog;

use std::path::PathBuf;
use thiserror::Error;

/// Error loading catalog configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path:?}': {error}")]
    Parse {
        error: toml::de::Error,
        path: Option<PathBuf>,
    },
    #[error("Validation error in '{path:?}': {message}")]
    Validation {
        message: String,
        path: Option<PathBuf>,
    },
}

/// Error spawning an enemy from a template
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("Unknown enemy: {0}")]
    UnknownEnemy(String),
    #[error("Enemy '{enemy}' references unknown skill '{skill}'")]
    UnknownSkill { enemy: String, skill: String },
}
