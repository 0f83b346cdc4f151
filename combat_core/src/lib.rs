//! combat_core - Turn-based combat resolution for the RPG
//!
//! This library provides:
//! - Pool primitives: damage, heal and MP recovery clamped to [0, max]
//! - Elemental resistance: weak/resist multipliers per element
//! - Status ledger: one buff or debuff per type, ticked once per turn
//! - Player and enemy action resolvers producing ordered `ActionResult`s
//! - Battle: a seeded session that runs whole turns and keeps a log
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use combat_core::prelude::*;
//! use item_core::ItemCatalog;
//! use std::collections::HashMap;
//!
//! let items = ItemCatalog::parse(ITEMS_TOML)?;
//! let skills: HashMap<String, Skill> = HashMap::new();
//! let engine = CombatEngine::new(&StandardStats, &items, &skills);
//!
//! let player = Player::new("hero", "Hero", Stats::new(50, 20, 10, 5));
//! let enemies = vec![Enemy::new("e_slime", "Slime", Stats::new(20, 0, 6, 5))];
//!
//! let mut battle = Battle::new(player, enemies, 12345);
//! let outcome = battle.run_turn(&engine, &PlayerAction::attack(0));
//! println!("{}", battle.log_json()?);
//! ```

pub mod battle;
pub mod combat;
pub mod config;
pub mod damage;
pub mod defense;
pub mod entity;
pub mod prelude;
pub mod skill;
pub mod stats;
pub mod status;
pub mod types;

// Core API - what most users need
pub use battle::{Battle, BattleOutcome, LogEntry};
pub use combat::{ActionResult, CombatEngine, Snapshot};
pub use entity::{Combatant, Enemy, Player};
pub use skill::{Skill, SkillConfig, SkillError, SkillLookup};
pub use types::PlayerAction;

// Configuration
pub use config::{init_constants, init_constants_default, CombatConstants, ConfigError};

// Advanced: custom stat rules
pub use stats::{StandardStats, StatCalculator, Stats};
