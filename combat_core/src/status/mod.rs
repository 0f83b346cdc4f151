//! Status effects - timed buffs and debuffs with one slot per effect type

pub mod tick;

pub use tick::{tick_enemy, tick_player};

use crate::types::{BuffType, DebuffType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Anything with a type key and a turn countdown
pub trait TimedEffect {
    type Kind: Copy + Ord + Debug;

    fn kind(&self) -> Self::Kind;
    fn skill_id(&self) -> &str;
    fn remaining_turns(&self) -> u32;
    fn set_remaining_turns(&mut self, turns: u32);
}

/// Periodic healing carried by an HP regeneration buff
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regen {
    /// Flat HP per turn, or a fraction of max HP when `percent_of_max` is set
    pub amount: f64,
    pub percent_of_max: bool,
}

impl Regen {
    pub fn flat(amount: f64) -> Self {
        Regen {
            amount,
            percent_of_max: false,
        }
    }

    pub fn percent(fraction: f64) -> Self {
        Regen {
            amount: fraction,
            percent_of_max: true,
        }
    }

    /// HP restored this turn for a combatant with the given max HP
    pub fn amount_for(&self, max_hp: u32) -> u32 {
        let amount = if self.percent_of_max {
            (max_hp as f64 * self.amount).floor()
        } else {
            self.amount.floor()
        };
        amount.max(0.0) as u32
    }
}

/// A timed effect on the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedBuff {
    /// Skill that applied this
    pub skill_id: String,
    pub kind: BuffType,
    pub remaining_turns: u32,
    /// Magnitude, e.g. attack bonus or HP per turn
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub regen: Option<Regen>,
}

impl AppliedBuff {
    pub fn new(skill_id: impl Into<String>, kind: BuffType, turns: u32) -> Self {
        AppliedBuff {
            skill_id: skill_id.into(),
            kind,
            remaining_turns: turns,
            value: None,
            regen: None,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_regen(mut self, regen: Regen) -> Self {
        self.regen = Some(regen);
        self
    }
}

impl TimedEffect for AppliedBuff {
    type Kind = BuffType;

    fn kind(&self) -> BuffType {
        self.kind
    }

    fn skill_id(&self) -> &str {
        &self.skill_id
    }

    fn remaining_turns(&self) -> u32 {
        self.remaining_turns
    }

    fn set_remaining_turns(&mut self, turns: u32) {
        self.remaining_turns = turns;
    }
}

/// A timed effect on an enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedDebuff {
    pub skill_id: String,
    pub kind: DebuffType,
    pub remaining_turns: u32,
    #[serde(default)]
    pub value: Option<f64>,
}

impl AppliedDebuff {
    pub fn new(skill_id: impl Into<String>, kind: DebuffType, turns: u32) -> Self {
        AppliedDebuff {
            skill_id: skill_id.into(),
            kind,
            remaining_turns: turns,
            value: None,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

impl TimedEffect for AppliedDebuff {
    type Kind = DebuffType;

    fn kind(&self) -> DebuffType {
        self.kind
    }

    fn skill_id(&self) -> &str {
        &self.skill_id
    }

    fn remaining_turns(&self) -> u32 {
        self.remaining_turns
    }

    fn set_remaining_turns(&mut self, turns: u32) {
        self.remaining_turns = turns;
    }
}

/// Active effects keyed by type: at most one effect per type
///
/// Applying an effect whose type is already present replaces the old one
/// outright. Durations and values are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "Vec<E>",
    into = "Vec<E>",
    bound(
        serialize = "E: TimedEffect + Clone + Serialize",
        deserialize = "E: TimedEffect + Deserialize<'de>"
    )
)]
pub struct StatusLedger<E: TimedEffect> {
    slots: BTreeMap<E::Kind, E>,
}

impl<E: TimedEffect> Default for StatusLedger<E> {
    fn default() -> Self {
        StatusLedger {
            slots: BTreeMap::new(),
        }
    }
}

impl<E: TimedEffect> StatusLedger<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an effect, returning the one it replaced
    pub fn apply(&mut self, effect: E) -> Option<E> {
        self.slots.insert(effect.kind(), effect)
    }

    pub fn get(&self, kind: E::Kind) -> Option<&E> {
        self.slots.get(&kind)
    }

    pub fn remove(&mut self, kind: E::Kind) -> Option<E> {
        self.slots.remove(&kind)
    }

    pub fn contains(&self, kind: E::Kind) -> bool {
        self.slots.contains_key(&kind)
    }

    /// Present with turns left
    pub fn is_active(&self, kind: E::Kind) -> bool {
        self.get(kind).is_some_and(|e| e.remaining_turns() > 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.slots.values()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Consume the ledger, yielding effects in type order
    pub fn into_effects(self) -> impl Iterator<Item = E> {
        self.slots.into_values()
    }
}

impl<E: TimedEffect> From<Vec<E>> for StatusLedger<E> {
    fn from(effects: Vec<E>) -> Self {
        let mut ledger = StatusLedger::new();
        for effect in effects {
            ledger.apply(effect);
        }
        ledger
    }
}

impl<E: TimedEffect> From<StatusLedger<E>> for Vec<E> {
    fn from(ledger: StatusLedger<E>) -> Self {
        ledger.into_effects().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reapply_replaces() {
        let mut ledger = StatusLedger::new();
        ledger.apply(AppliedBuff::new("s_focus", BuffType::AttackUp, 3).with_value(5.0));
        let replaced =
            ledger.apply(AppliedBuff::new("s_rage", BuffType::AttackUp, 1).with_value(9.0));

        assert_eq!(ledger.len(), 1);
        assert_eq!(replaced.unwrap().skill_id, "s_focus");

        let active = ledger.get(BuffType::AttackUp).unwrap();
        assert_eq!(active.remaining_turns, 1);
        assert_eq!(active.value, Some(9.0));
    }

    #[test]
    fn test_distinct_types_coexist() {
        let mut ledger = StatusLedger::new();
        ledger.apply(AppliedDebuff::new("s_flash", DebuffType::AccuracyDown, 2).with_value(0.25));
        ledger.apply(AppliedDebuff::new("s_jolt", DebuffType::Stun, 1));

        assert_eq!(ledger.len(), 2);
        assert!(ledger.is_active(DebuffType::Stun));
        assert!(!ledger.contains(DebuffType::DefenseDown));
    }

    #[test]
    fn test_zero_turns_is_not_active() {
        let mut ledger = StatusLedger::new();
        ledger.apply(AppliedBuff::new("s_dodge", BuffType::EvadeAll, 0));
        assert!(ledger.contains(BuffType::EvadeAll));
        assert!(!ledger.is_active(BuffType::EvadeAll));
    }

    #[test]
    fn test_from_vec_keeps_last_of_each_type() {
        let ledger: StatusLedger<AppliedBuff> = vec![
            AppliedBuff::new("a", BuffType::DefenseUp, 2),
            AppliedBuff::new("b", BuffType::DefenseUp, 4),
        ]
        .into();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(BuffType::DefenseUp).unwrap().skill_id, "b");
    }

    #[test]
    fn test_serializes_as_list() {
        let mut ledger = StatusLedger::new();
        ledger.apply(AppliedDebuff::new("s_jolt", DebuffType::Stun, 1));
        let json = serde_json::to_string(&ledger).unwrap();
        assert!(json.starts_with('['));

        let back: StatusLedger<AppliedDebuff> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }

    #[test]
    fn test_regen_amounts() {
        assert_eq!(Regen::flat(7.9).amount_for(100), 7);
        assert_eq!(Regen::percent(0.08).amount_for(120), 9);
    }
}
