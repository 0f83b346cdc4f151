//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::entity::{Combatant, Enemy, Equipment, Player};
pub use crate::stats::{StatBoost, Stats};
pub use crate::types::{
    Affinity, BuffType, DebuffType, Element, PlayerAction, SkillCategory, TargetShape,
};

// Skills and effects
pub use crate::skill::{Skill, SkillLookup};
pub use crate::status::{AppliedBuff, AppliedDebuff, StatusLedger};

// Resolution
pub use crate::battle::{Battle, BattleOutcome};
pub use crate::combat::{ActionResult, CombatEngine, Snapshot};

// Config
pub use crate::config::{init_constants, init_constants_default, CombatConstants};

// Stat rules (for advanced use)
pub use crate::stats::{StandardStats, StatCalculator};

// Re-exports from item_core
pub use item_core::{Item, ItemFactory};
