//! Core tags shared by skills, status effects and resolvers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Skill categories; drives which resolution branch a skill takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Attack,
    Magic,
    Heal,
    Buff,
    Defend,
}

impl SkillCategory {
    /// Whether this category deals damage to enemies
    pub fn is_offensive(&self) -> bool {
        matches!(self, SkillCategory::Attack | SkillCategory::Magic)
    }
}

/// Who a skill is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetShape {
    #[serde(rename = "self")]
    Caster,
    SingleEnemy,
    AllEnemies,
}

/// Elemental tags a skill can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Ice,
    Dark,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Fire => write!(f, "fire"),
            Element::Ice => write!(f, "ice"),
            Element::Dark => write!(f, "dark"),
        }
    }
}

/// How a combatant reacts to an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affinity {
    Weak,
    Resist,
    #[default]
    Neutral,
}

/// Timed effects on the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffType {
    AttackUp,
    DefenseUp,
    /// Single-target enemy actions miss entirely
    EvadeAll,
    /// The player skips their action
    SelfStun,
    HpRegeneration,
}

impl BuffType {
    /// Special display label; `None` means use the source skill's name
    pub fn label(&self) -> Option<&'static str> {
        match self {
            BuffType::HpRegeneration => Some("HP regeneration"),
            BuffType::EvadeAll => Some("evasive footwork"),
            BuffType::SelfStun => Some("fatigue"),
            BuffType::AttackUp | BuffType::DefenseUp => None,
        }
    }
}

/// Timed effects on enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebuffType {
    /// Value is the probability that the enemy's action misses
    AccuracyDown,
    /// Value is a flat defense reduction
    DefenseDown,
    Stun,
}

impl DebuffType {
    pub fn label(&self) -> &'static str {
        match self {
            DebuffType::AccuracyDown => "blindness",
            DebuffType::DefenseDown => "weakened guard",
            DebuffType::Stun => "paralysis",
        }
    }

    /// Narrative for the moment the debuff lands
    pub fn inflicted_text(&self) -> &'static str {
        match self {
            DebuffType::AccuracyDown => "is blinded",
            DebuffType::DefenseDown => "lowers its guard",
            DebuffType::Stun => "is paralyzed",
        }
    }
}

/// A player's chosen action for one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PlayerAction {
    Attack { target: Option<usize> },
    Skill { skill_id: String, target: Option<usize> },
    Item { item_id: String },
}

impl PlayerAction {
    pub fn attack(target: usize) -> Self {
        PlayerAction::Attack { target: Some(target) }
    }

    pub fn skill(skill_id: impl Into<String>, target: Option<usize>) -> Self {
        PlayerAction::Skill {
            skill_id: skill_id.into(),
            target,
        }
    }

    pub fn item(item_id: impl Into<String>) -> Self {
        PlayerAction::Item {
            item_id: item_id.into(),
        }
    }
}
