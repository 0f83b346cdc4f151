//! ActionResult - one line of what happened during an action

use crate::entity::{Enemy, Player};
use crate::status::{AppliedBuff, AppliedDebuff};
use item_core::Item;
use serde::{Deserialize, Serialize};

/// A frozen copy of a combatant taken when a record is created
///
/// Later mutation of the live combatant never shows through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "side", content = "state")]
pub enum Snapshot {
    Player(Box<Player>),
    Enemy(Box<Enemy>),
}

impl Snapshot {
    pub fn player(player: &Player) -> Self {
        Snapshot::Player(Box::new(player.clone()))
    }

    pub fn enemy(enemy: &Enemy) -> Self {
        Snapshot::Enemy(Box::new(enemy.clone()))
    }

    pub fn current_hp(&self) -> u32 {
        match self {
            Snapshot::Player(p) => p.current_hp,
            Snapshot::Enemy(e) => e.current_hp,
        }
    }
}

/// One record in the ordered output of an action resolution
///
/// Records are produced in emission order and never edited afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Player-facing log line
    pub message: String,

    // === Numbers ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_dealt: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_restored: Option<u32>,
    /// MP change for the caster: negative when spent, positive when restored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mp_delta: Option<i64>,
    /// Whether a basic attack hit was critical
    #[serde(default)]
    pub critical: bool,

    // === Snapshots ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Snapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caster: Option<Snapshot>,

    // === Effects ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buff_applied: Option<AppliedBuff>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debuff_applied: Option<AppliedDebuff>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_found: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_stolen: Option<Item>,
}

impl ActionResult {
    pub fn new(message: impl Into<String>) -> Self {
        ActionResult {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn damage(mut self, amount: u32) -> Self {
        self.damage_dealt = Some(amount);
        self
    }

    pub fn healed(mut self, amount: u32) -> Self {
        self.health_restored = Some(amount);
        self
    }

    /// Record MP spent as a cost
    pub fn mp_spent(mut self, cost: u32) -> Self {
        self.mp_delta = Some(-(cost as i64));
        self
    }

    /// Record MP restored
    pub fn mp_restored(mut self, amount: u32) -> Self {
        self.mp_delta = Some(amount as i64);
        self
    }

    pub fn critical(mut self, critical: bool) -> Self {
        self.critical = critical;
        self
    }

    pub fn target(mut self, snapshot: Snapshot) -> Self {
        self.target = Some(snapshot);
        self
    }

    pub fn caster(mut self, snapshot: Snapshot) -> Self {
        self.caster = Some(snapshot);
        self
    }

    pub fn buff(mut self, buff: AppliedBuff) -> Self {
        self.buff_applied = Some(buff);
        self
    }

    pub fn debuff(mut self, debuff: AppliedDebuff) -> Self {
        self.debuff_applied = Some(debuff);
        self
    }

    pub fn found(mut self, item: Item) -> Self {
        self.item_found = Some(item);
        self
    }

    pub fn stolen(mut self, item: Item) -> Self {
        self.item_stolen = Some(item);
        self
    }

    /// Whether this record changed any number or effect
    pub fn has_effect(&self) -> bool {
        self.damage_dealt.is_some_and(|d| d > 0)
            || self.health_restored.is_some_and(|h| h > 0)
            || self.mp_delta.is_some_and(|m| m != 0)
            || self.buff_applied.is_some()
            || self.debuff_applied.is_some()
            || self.item_found.is_some()
            || self.item_stolen.is_some()
    }
}
