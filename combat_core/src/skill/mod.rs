//! Skill definitions
//!
//! Catalogs describe skills as flat rows (`SkillConfig`). At construction the
//! row is folded into one `SkillEffect` variant per category, so resolvers
//! match on shape instead of probing optional fields.

mod config;

pub use config::SkillConfig;

use crate::types::{DebuffType, Element, SkillCategory, TargetShape};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Error building a skill from its catalog row
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkillError {
    #[error("Skill '{skill_id}' is missing required field '{field}'")]
    MissingField {
        skill_id: String,
        field: &'static str,
    },
    #[error("Skill '{skill_id}': {category:?} skills cannot target {target:?}")]
    InvalidTarget {
        skill_id: String,
        category: SkillCategory,
        target: TargetShape,
    },
    #[error("Skill '{skill_id}': chance {chance} is outside [0, 1]")]
    InvalidChance { skill_id: String, chance: f64 },
    #[error("Skill '{skill_id}': invalid value for '{field}'")]
    InvalidValue {
        skill_id: String,
        field: &'static str,
    },
}

/// An immutable catalog skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SkillConfig", into = "SkillConfig")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: SkillCategory,
    pub mp_cost: u32,
    pub target: TargetShape,
    pub once_per_battle: bool,
    /// Turns the caster is stunned after use; 0 for none
    pub self_stun_turns: u32,
    pub effect: SkillEffect,
}

impl Skill {
    pub fn offensive(&self) -> Option<&OffensiveSkill> {
        match &self.effect {
            SkillEffect::Offensive(offense) => Some(offense),
            _ => None,
        }
    }

    pub fn heal(&self) -> Option<&HealSkill> {
        match &self.effect {
            SkillEffect::Heal(heal) => Some(heal),
            _ => None,
        }
    }

    pub fn support(&self) -> Option<&SupportEffect> {
        match &self.effect {
            SkillEffect::Support(support) => Some(support),
            _ => None,
        }
    }

    /// Whether the skill is aimed at the opposing side
    pub fn targets_enemies(&self) -> bool {
        self.target != TargetShape::Caster
    }
}

/// What a skill does, one variant per category family
#[derive(Debug, Clone, PartialEq)]
pub enum SkillEffect {
    /// ATTACK and MAGIC
    Offensive(OffensiveSkill),
    Heal(HealSkill),
    /// BUFF and DEFEND
    Support(SupportEffect),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OffensiveSkill {
    /// Power coefficient; formulas pick their own fallback when absent
    pub power: Option<f64>,
    pub element: Option<Element>,
    /// Fraction of damage dealt returned to the caster
    pub drain_factor: Option<f64>,
    pub debuffs: Vec<SkillDebuff>,
    pub item_steal: Option<ItemSteal>,
}

/// A debuff a skill may inflict, rolled independently per target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDebuff {
    pub kind: DebuffType,
    pub chance: f64,
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSteal {
    pub item_pool: Vec<String>,
    pub chance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFind {
    pub item_id: String,
    pub chance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealSkill {
    pub restore: HealRestore,
    pub full_mp_restore: bool,
    pub item_find: Option<ItemFind>,
}

/// HP restore rule; exactly one applies, chosen in declaration order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealRestore {
    Full,
    /// At or below `hp_threshold` of max HP restore `restore_fraction` of max,
    /// otherwise heal `fallback`
    Conditional {
        hp_threshold: f64,
        restore_fraction: f64,
        fallback: u32,
    },
    Flat(u32),
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SupportEffect {
    EvadeAll {
        turns: u32,
    },
    /// Per-turn heal of `percent_per_turn` of max HP, fixed at cast time
    Regeneration {
        percent_per_turn: f64,
        turns: u32,
    },
    AttackUp {
        amount: i32,
        turns: Option<u32>,
    },
    DefenseUp {
        amount: i32,
        turns: Option<u32>,
    },
    /// Spends its cost and does nothing
    Inert,
}

/// Read-only skill catalog lookup
pub trait SkillLookup {
    fn skill(&self, id: &str) -> Option<&Skill>;

    fn skill_name(&self, id: &str) -> Option<&str> {
        self.skill(id).map(|s| s.name.as_str())
    }
}

impl SkillLookup for HashMap<String, Skill> {
    fn skill(&self, id: &str) -> Option<&Skill> {
        self.get(id)
    }
}

impl SkillLookup for Vec<Skill> {
    fn skill(&self, id: &str) -> Option<&Skill> {
        self.iter().find(|s| s.id == id)
    }
}

impl SkillLookup for [Skill] {
    fn skill(&self, id: &str) -> Option<&Skill> {
        self.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_deserializes_through_config() {
        let skill: Skill = serde_json::from_str(
            r#"{"id":"s_fireball","name":"Fireball","category":"magic","mp_cost":5,"power":2.0,"element":"fire"}"#,
        )
        .unwrap();
        assert_eq!(skill.category, SkillCategory::Magic);
        assert!(skill.targets_enemies());
        assert_eq!(skill.offensive().unwrap().power, Some(2.0));
        assert!(skill.heal().is_none());
    }

    #[test]
    fn test_invalid_skill_fails_to_deserialize() {
        let result: Result<Skill, _> = serde_json::from_str(
            r#"{"id":"s_oops","name":"Oops","category":"heal","target":"all_enemies"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_lookup_impls() {
        let skill: Skill =
            serde_json::from_str(r#"{"id":"s_guard","name":"Guard","category":"defend"}"#).unwrap();
        let list = vec![skill.clone()];
        let map = HashMap::from([(skill.id.clone(), skill)]);

        assert_eq!(list.skill_name("s_guard"), Some("Guard"));
        assert_eq!(map.skill_name("s_guard"), Some("Guard"));
        assert!(map.skill("s_missing").is_none());
    }
}
