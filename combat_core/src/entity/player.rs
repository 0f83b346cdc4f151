use super::Combatant;
use crate::skill::Skill;
use crate::stats::{StatBoost, Stats};
use crate::status::{AppliedBuff, StatusLedger};
use crate::types::BuffType;
use item_core::{EquipSlot, Item};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Equipped weapon, armor and shield
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub shield: Option<Item>,
}

impl Equipment {
    /// Equip an item into its slot
    ///
    /// Returns the item previously in that slot, or the given item back if it
    /// has no slot.
    pub fn equip(&mut self, item: Item) -> Option<Item> {
        match item.slot() {
            Some(slot) => self.slot_mut(slot).replace(item),
            None => Some(item),
        }
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
            EquipSlot::Shield => self.shield.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<Item> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Shield => &mut self.shield,
        }
    }

    /// Every equipped item
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        EquipSlot::all().iter().filter_map(|slot| self.get(*slot))
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u32,
    pub base_stats: Stats,
    pub current_hp: u32,
    pub current_mp: u32,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub inventory: Vec<Item>,
    /// Skills learned for the whole run
    #[serde(default)]
    pub persistent_skills: Vec<Skill>,
    /// Skills granted for the current battle or region
    #[serde(default)]
    pub temporary_skills: Vec<Skill>,
    #[serde(default)]
    pub temporary_boosts: StatBoost,
    #[serde(default)]
    pub buffs: StatusLedger<AppliedBuff>,
    /// Once-per-battle skills consumed in the current battle
    #[serde(default)]
    pub used_once_per_battle: BTreeSet<String>,
}

fn default_level() -> u32 {
    1
}

impl Player {
    /// Create a player at full HP and MP
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_stats: Stats) -> Self {
        Player {
            id: id.into(),
            name: name.into(),
            level: 1,
            base_stats,
            current_hp: base_stats.max_hp,
            current_mp: base_stats.max_mp,
            equipment: Equipment::default(),
            inventory: Vec::new(),
            persistent_skills: Vec::new(),
            temporary_skills: Vec::new(),
            temporary_boosts: StatBoost::default(),
            buffs: StatusLedger::new(),
            used_once_per_battle: BTreeSet::new(),
        }
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.persistent_skills.push(skill);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.inventory.push(item);
        self
    }

    /// Find a known skill, persistent skills first
    pub fn find_skill(&self, skill_id: &str) -> Option<&Skill> {
        self.persistent_skills
            .iter()
            .chain(self.temporary_skills.iter())
            .find(|s| s.id == skill_id)
    }

    pub fn has_used(&self, skill_id: &str) -> bool {
        self.used_once_per_battle.contains(skill_id)
    }

    pub fn mark_used(&mut self, skill_id: &str) {
        self.used_once_per_battle.insert(skill_id.to_string());
    }

    /// Remove the first inventory copy of an item by catalog id
    pub fn take_item(&mut self, item_id: &str) -> Option<Item> {
        let index = self.inventory.iter().position(|i| i.id() == item_id)?;
        Some(self.inventory.remove(index))
    }

    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    pub fn is_stunned(&self) -> bool {
        self.buffs.is_active(BuffType::SelfStun)
    }

    pub fn is_evading(&self) -> bool {
        self.buffs.is_active(BuffType::EvadeAll)
    }

    /// Id of the equipped weapon, if any
    pub fn weapon_id(&self) -> Option<&str> {
        self.equipment.weapon.as_ref().map(|w| w.id())
    }

    /// Clear per-battle state at the start of a battle
    pub fn reset_for_battle(&mut self) {
        self.used_once_per_battle.clear();
    }
}

impl Combatant for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn current_hp(&self) -> u32 {
        self.current_hp
    }

    fn set_current_hp(&mut self, hp: u32) {
        self.current_hp = hp;
    }

    fn current_mp(&self) -> u32 {
        self.current_mp
    }

    fn set_current_mp(&mut self, mp: u32) {
        self.current_mp = mp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use item_core::{ItemDef, ItemKind};

    fn potion(instance: &str) -> Item {
        Item::new(ItemDef::new("i_potion", "Potion", ItemKind::Consumable), instance)
    }

    #[test]
    fn test_new_player_is_full() {
        let player = Player::new("hero", "Hero", Stats::new(40, 12, 8, 3));
        assert_eq!(player.current_hp, 40);
        assert_eq!(player.current_mp, 12);
        assert!(player.is_alive());
    }

    #[test]
    fn test_take_item_removes_one_copy() {
        let mut player = Player::new("hero", "Hero", Stats::new(40, 12, 8, 3))
            .with_item(potion("a"))
            .with_item(potion("b"));

        let taken = player.take_item("i_potion").unwrap();
        assert_eq!(taken.instance_id, "a");
        assert_eq!(player.inventory.len(), 1);
        assert!(player.take_item("i_ether").is_none());
    }

    #[test]
    fn test_equip_replaces_and_rejects_consumables() {
        let mut equipment = Equipment::default();
        let sword = Item::new(ItemDef::new("i_sword", "Sword", ItemKind::Weapon), "s1");
        let axe = Item::new(ItemDef::new("i_axe", "Axe", ItemKind::Weapon), "a1");

        assert!(equipment.equip(sword).is_none());
        assert_eq!(equipment.equip(axe).unwrap().id(), "i_sword");
        assert_eq!(equipment.equip(potion("p")).unwrap().id(), "i_potion");
        assert_eq!(equipment.iter().count(), 1);
    }

    #[test]
    fn test_once_per_battle_tracking() {
        let mut player = Player::new("hero", "Hero", Stats::new(40, 12, 8, 3));
        player.mark_used("s_final");
        assert!(player.has_used("s_final"));
        player.reset_for_battle();
        assert!(!player.has_used("s_final"));
    }
}
