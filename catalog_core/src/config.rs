use combat_core::defense::ResistanceTable;
use combat_core::{SkillConfig, Stats};
use item_core::ItemConfig;
use serde::Deserialize;

/// TOML configuration for one catalog file
///
/// A file may carry any mix of the three tables.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogFileConfig {
    #[serde(default)]
    pub skills: Vec<SkillConfig>,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
    #[serde(default)]
    pub enemies: Vec<EnemyConfig>,
}

/// Template an enemy is spawned from
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnemyConfig {
    pub id: String,
    pub name: String,
    pub stats: Stats,
    /// Skill ids, resolved against the skill catalog at spawn time
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub resistances: ResistanceTable,
}
