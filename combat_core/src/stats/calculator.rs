//! StatCalculator - derives the effective stat line every formula reads

use super::{StatBoost, Stats};
use crate::entity::{Enemy, Player};
use crate::types::{BuffType, DebuffType};

/// Computes effective stats for combatants
///
/// Resolvers call this fresh before every formula, since a single action can
/// change the inputs (MP spent, buffs applied) between hits.
pub trait StatCalculator {
    fn player_stats(&self, player: &Player) -> Stats;
    fn enemy_stats(&self, enemy: &Enemy) -> Stats;
}

/// Default rules: base + temporary boosts + equipment + stat buffs for the
/// player, base minus an active defense debuff for enemies
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardStats;

impl StatCalculator for StandardStats {
    fn player_stats(&self, player: &Player) -> Stats {
        let mut boost = player.temporary_boosts;

        for item in player.equipment.iter() {
            boost.add(&StatBoost {
                attack: item.def.attack_boost,
                defense: item.def.defense_boost,
                ..Default::default()
            });
        }

        if let Some(value) = player.buffs.get(BuffType::AttackUp).and_then(|b| b.value) {
            boost.add(&StatBoost::attack(value.floor() as i32));
        }
        if let Some(value) = player.buffs.get(BuffType::DefenseUp).and_then(|b| b.value) {
            boost.add(&StatBoost::defense(value.floor() as i32));
        }

        player.base_stats.boosted(&boost)
    }

    fn enemy_stats(&self, enemy: &Enemy) -> Stats {
        let mut stats = enemy.base_stats;
        if let Some(value) = enemy.debuffs.get(DebuffType::DefenseDown).and_then(|d| d.value) {
            stats.defense = (stats.defense - value.floor() as i32).max(0);
        }
        stats
    }
}
