use crate::item::{Item, ItemConfig, ItemDef};
use crate::CatalogError;
use rand::{Rng, RngCore};
use serde::Deserialize;
use std::collections::HashMap;

/// Materializes concrete inventory entries from catalog template ids
pub trait ItemFactory {
    /// Create a new copy of the item with the given catalog id.
    /// Returns `None` when the id is unknown.
    fn create_instance(&self, item_id: &str, rng: &mut dyn RngCore) -> Option<Item>;
}

/// Read-only lookup of item definitions by id
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<String, ItemDef>,
}

#[derive(Debug, Deserialize)]
struct ItemsFile {
    #[serde(default)]
    items: Vec<ItemConfig>,
}

impl ItemCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from TOML containing `[[items]]` tables
    pub fn parse(toml: &str) -> Result<Self, CatalogError> {
        let file: ItemsFile = toml::from_str(toml)?;
        let mut catalog = Self::new();
        for config in file.items {
            catalog.insert(ItemDef::from(config))?;
        }
        Ok(catalog)
    }

    /// Register a definition; ids must be unique
    pub fn insert(&mut self, def: ItemDef) -> Result<(), CatalogError> {
        if def.id.is_empty() {
            return Err(CatalogError::Validation("item with empty id".to_string()));
        }
        if self.items.contains_key(&def.id) {
            return Err(CatalogError::DuplicateId(def.id));
        }
        self.items.insert(def.id.clone(), def);
        Ok(())
    }

    /// Get a definition by id
    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// List all item ids
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(|s| s.as_str())
    }

    /// Absorb every definition from another catalog
    pub fn merge(&mut self, other: ItemCatalog) -> Result<(), CatalogError> {
        for (_, def) in other.items {
            self.insert(def)?;
        }
        Ok(())
    }

    /// Create a copy of an item with a fresh instance id
    pub fn instantiate<R: Rng + ?Sized>(&self, id: &str, rng: &mut R) -> Option<Item> {
        let def = self.items.get(id)?;
        let instance_id = format!("{}-{:016x}", def.id, rng.gen::<u64>());
        Some(Item::new(def.clone(), instance_id))
    }
}

impl ItemFactory for ItemCatalog {
    fn create_instance(&self, item_id: &str, rng: &mut dyn RngCore) -> Option<Item> {
        self.instantiate(item_id, rng)
    }
}

/// Pick a random id from a pool, or `None` if the pool is empty
pub fn pick_from_pool<'a, R: Rng + ?Sized>(pool: &'a [String], rng: &mut R) -> Option<&'a str> {
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.gen_range(0..pool.len())].as_str())
}
