use serde::{Deserialize, Serialize};
use std::fmt;

/// Item categories as sold in shops and carried in the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Weapon,
    Armor,
    Shield,
    Consumable,
    LotteryTicket,
}

impl ItemKind {
    /// Equipment slot this kind occupies, if it can be equipped at all
    pub fn slot(&self) -> Option<EquipSlot> {
        match self {
            ItemKind::Weapon => Some(EquipSlot::Weapon),
            ItemKind::Armor => Some(EquipSlot::Armor),
            ItemKind::Shield => Some(EquipSlot::Shield),
            ItemKind::Consumable | ItemKind::LotteryTicket => None,
        }
    }

    pub fn is_equippable(&self) -> bool {
        self.slot().is_some()
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Weapon => write!(f, "Weapon"),
            ItemKind::Armor => write!(f, "Armor"),
            ItemKind::Shield => write!(f, "Shield"),
            ItemKind::Consumable => write!(f, "Consumable"),
            ItemKind::LotteryTicket => write!(f, "Lottery Ticket"),
        }
    }
}

/// Equipment slots on the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    Weapon,
    Armor,
    Shield,
}

impl EquipSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipSlot] {
        &[EquipSlot::Weapon, EquipSlot::Armor, EquipSlot::Shield]
    }
}

/// How much of a pool (HP or MP) a consumable restores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "amount")]
pub enum Recovery {
    #[default]
    None,
    /// Restore a flat amount, capped at the pool maximum
    Amount(u32),
    /// Restore the pool to its maximum
    Full,
}

impl Recovery {
    /// Build from the flat catalog flags; the full flag wins over an amount
    pub fn from_flags(amount: Option<u32>, full: bool) -> Self {
        match (full, amount) {
            (true, _) => Recovery::Full,
            (false, Some(n)) if n > 0 => Recovery::Amount(n),
            _ => Recovery::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Recovery::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots() {
        assert_eq!(ItemKind::Weapon.slot(), Some(EquipSlot::Weapon));
        assert_eq!(ItemKind::Shield.slot(), Some(EquipSlot::Shield));
        assert!(!ItemKind::Consumable.is_equippable());
        assert!(!ItemKind::LotteryTicket.is_equippable());
    }

    #[test]
    fn test_recovery_from_flags() {
        assert_eq!(Recovery::from_flags(Some(30), true), Recovery::Full);
        assert_eq!(Recovery::from_flags(Some(30), false), Recovery::Amount(30));
        assert_eq!(Recovery::from_flags(Some(0), false), Recovery::None);
        assert_eq!(Recovery::from_flags(None, false), Recovery::None);
    }
}
