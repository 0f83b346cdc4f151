use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog entry for an item, shared by every copy of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: u32,
    /// Attack granted while equipped
    #[serde(default)]
    pub attack_boost: i32,
    /// Defense granted while equipped
    #[serde(default)]
    pub defense_boost: i32,
    /// HP restored when consumed
    #[serde(default)]
    pub hp_recovery: Recovery,
    /// MP restored when consumed
    #[serde(default)]
    pub mp_recovery: Recovery,
    /// Progression item checked by region unlocks; combat treats it like any other entry
    #[serde(default)]
    pub key_item: bool,
}

impl ItemDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ItemKind) -> Self {
        ItemDef {
            id: id.into(),
            name: name.into(),
            kind,
            description: String::new(),
            price: 0,
            attack_boost: 0,
            defense_boost: 0,
            hp_recovery: Recovery::None,
            mp_recovery: Recovery::None,
            key_item: false,
        }
    }

    pub fn with_boosts(mut self, attack: i32, defense: i32) -> Self {
        self.attack_boost = attack;
        self.defense_boost = defense;
        self
    }

    pub fn with_recovery(mut self, hp: Recovery, mp: Recovery) -> Self {
        self.hp_recovery = hp;
        self.mp_recovery = mp;
        self
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = price;
        self
    }
}

/// A concrete copy of an item held in an inventory or equipment slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Identity of this copy; two potions share `def.id` but not `instance_id`
    pub instance_id: String,
    #[serde(flatten)]
    pub def: ItemDef,
}

impl Item {
    pub fn new(def: ItemDef, instance_id: impl Into<String>) -> Self {
        Item {
            instance_id: instance_id.into(),
            def,
        }
    }

    /// Catalog id shared by every copy of this item
    pub fn id(&self) -> &str {
        &self.def.id
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn kind(&self) -> ItemKind {
        self.def.kind
    }

    pub fn slot(&self) -> Option<EquipSlot> {
        self.def.kind.slot()
    }

    pub fn hp_recovery(&self) -> Recovery {
        self.def.hp_recovery
    }

    pub fn mp_recovery(&self) -> Recovery {
        self.def.mp_recovery
    }

    /// Whether using this item does anything beyond being consumed
    pub fn has_effect(&self) -> bool {
        !self.def.hp_recovery.is_none() || !self.def.mp_recovery.is_none()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.def.name)
    }
}

/// Raw catalog row as written in TOML, with flat recovery flags
#[derive(Debug, Clone, Deserialize)]
pub struct ItemConfig {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: u32,
    #[serde(default)]
    pub attack_boost: i32,
    #[serde(default)]
    pub defense_boost: i32,
    #[serde(default)]
    pub hp_recovery: Option<u32>,
    #[serde(default)]
    pub mp_recovery: Option<u32>,
    #[serde(default)]
    pub full_hp_recovery: bool,
    #[serde(default)]
    pub full_mp_recovery: bool,
    #[serde(default)]
    pub key_item: bool,
}

impl From<ItemConfig> for ItemDef {
    fn from(config: ItemConfig) -> Self {
        ItemDef {
            id: config.id,
            name: config.name,
            kind: config.kind,
            description: config.description,
            price: config.price,
            attack_boost: config.attack_boost,
            defense_boost: config.defense_boost,
            hp_recovery: Recovery::from_flags(config.hp_recovery, config.full_hp_recovery),
            mp_recovery: Recovery::from_flags(config.mp_recovery, config.full_mp_recovery),
            key_item: config.key_item,
        }
    }
}
