//! Combat resolution - player actions, enemy actions and status ticks
//!
//! `CombatEngine` bundles the read-only collaborators every resolver needs:
//! the effective-stats calculator, the item factory for drops and thefts, the
//! skill catalog for effect labels, and the tunable constants.

mod enemy;
mod player;
mod primitives;
mod result;

pub use enemy::{choose_action, EnemyChoice};
pub use primitives::{apply_damage, apply_heal, apply_mp_recovery};
pub use result::{ActionResult, Snapshot};

use crate::config::{constants, CombatConstants};
use crate::entity::{Enemy, Player};
use crate::skill::SkillLookup;
use crate::stats::StatCalculator;
use crate::status;
use item_core::ItemFactory;

/// Resolves actions and ticks against injected collaborators
#[derive(Clone, Copy)]
pub struct CombatEngine<'a> {
    stats: &'a dyn StatCalculator,
    items: &'a dyn ItemFactory,
    skills: &'a dyn SkillLookup,
    constants: &'a CombatConstants,
}

impl<'a> CombatEngine<'a> {
    /// Create an engine using the global combat constants
    pub fn new(
        stats: &'a dyn StatCalculator,
        items: &'a dyn ItemFactory,
        skills: &'a dyn SkillLookup,
    ) -> Self {
        CombatEngine {
            stats,
            items,
            skills,
            constants: constants(),
        }
    }

    /// Use a specific constants table instead of the global one
    pub fn with_constants(mut self, constants: &'a CombatConstants) -> Self {
        self.constants = constants;
        self
    }

    pub fn constants(&self) -> &CombatConstants {
        self.constants
    }

    /// End-of-turn tick for the player's buffs
    pub fn tick_player(&self, player: &mut Player) -> Vec<String> {
        status::tick_player(player, self.stats, self.skills)
    }

    /// End-of-turn tick for one enemy's debuffs
    pub fn tick_enemy(&self, enemy: &mut Enemy) -> Vec<String> {
        status::tick_enemy(enemy)
    }

    /// Tick the player, then every enemy, collecting all messages in order
    pub fn tick_all(&self, player: &mut Player, enemies: &mut [Enemy]) -> Vec<String> {
        let mut messages = self.tick_player(player);
        for enemy in enemies.iter_mut() {
            messages.extend(self.tick_enemy(enemy));
        }
        messages
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::entity::{Enemy, Player};
    use crate::skill::{Skill, SkillConfig};
    use crate::stats::Stats;
    use item_core::ItemCatalog;

    pub const ITEMS: &str = r#"
[[items]]
id = "i_herb"
name = "Herb"
kind = "consumable"
hp_recovery = 30

[[items]]
id = "i_elixir"
name = "Elixir"
kind = "consumable"
full_hp_recovery = true
full_mp_recovery = true

[[items]]
id = "i_ether"
name = "Ether"
kind = "consumable"
mp_recovery = 10

[[items]]
id = "i_rock"
name = "Rock"
kind = "consumable"

[[items]]
id = "i_micchy_buster"
name = "Micchy Buster"
kind = "weapon"
"#;

    pub fn items() -> ItemCatalog {
        ItemCatalog::parse(ITEMS).unwrap()
    }

    pub fn skill(toml_str: &str) -> Skill {
        let config: SkillConfig = toml::from_str(toml_str).unwrap();
        Skill::try_from(config).unwrap()
    }

    pub fn hero() -> Player {
        Player::new("hero", "Hero", Stats::new(50, 20, 10, 5))
    }

    pub fn slime() -> Enemy {
        Enemy::new("e_slime", "Slime", Stats::new(20, 0, 6, 5))
    }
}
