//! item_core - Item definitions, inventory instances and the item catalog
//!
//! Catalog entries (`ItemDef`) are immutable and shared. Every copy that lands
//! in an inventory is an `Item` with its own instance id, produced through the
//! `ItemFactory` trait so drops and thefts never construct items by hand.

pub mod catalog;
pub mod item;
pub mod types;

pub use catalog::{pick_from_pool, ItemCatalog, ItemFactory};
pub use item::{Item, ItemConfig, ItemDef};
pub use types::{EquipSlot, ItemKind, Recovery};

use thiserror::Error;

/// Error building an item catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Duplicate item id: {0}")]
    DuplicateId(String),
}
