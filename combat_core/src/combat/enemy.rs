//! Enemy action resolution
//!
//! Order of checks: stun, then the player's evasion window, then the
//! accuracy roll, then the chosen action.

use super::primitives::apply_damage;
use super::result::{ActionResult, Snapshot};
use super::CombatEngine;
use crate::damage::{enemy_basic_attack_damage, enemy_skill_damage, finalize_skill_damage};
use crate::entity::{Enemy, Player};
use crate::types::TargetShape;
use rand::Rng;
use tracing::debug;

/// What an enemy decided to do this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyChoice {
    Attack,
    /// Index into the enemy's skill list
    Skill(usize),
}

/// Pick between a basic attack and an affordable skill
///
/// With at least one affordable skill, `skill_chance` decides whether a
/// uniformly chosen affordable skill is used. Otherwise always attacks.
pub fn choose_action<R: Rng>(enemy: &Enemy, skill_chance: f64, rng: &mut R) -> EnemyChoice {
    let affordable = enemy.affordable_skills();
    if affordable.is_empty() || rng.gen::<f64>() >= skill_chance {
        return EnemyChoice::Attack;
    }
    EnemyChoice::Skill(affordable[rng.gen_range(0..affordable.len())])
}

impl CombatEngine<'_> {
    /// Resolve one enemy's turn against the player
    ///
    /// Callers only invoke this for living enemies.
    pub fn resolve_enemy_action<R: Rng>(
        &self,
        enemy: &mut Enemy,
        player: &mut Player,
        rng: &mut R,
    ) -> Vec<ActionResult> {
        if enemy.is_stunned() {
            debug!(enemy = %enemy.name, "enemy stunned");
            return vec![ActionResult::new(format!(
                "{} is paralyzed and can't move!",
                enemy.name
            ))];
        }

        let choice = choose_action(enemy, self.constants.enemy.skill_chance, rng);
        debug!(enemy = %enemy.name, ?choice, "enemy chose action");

        // Evasion covers basic attacks and single-target skills only
        if player.is_evading() {
            let evaded = match choice {
                EnemyChoice::Attack => Some(format!("{} attacks!", enemy.name)),
                EnemyChoice::Skill(index) => {
                    let skill = &enemy.skills[index];
                    (skill.target == TargetShape::SingleEnemy)
                        .then(|| format!("{} uses {}!", enemy.name, skill.name))
                }
            };
            if let Some(opening) = evaded {
                return vec![ActionResult::new(format!(
                    "{opening} But {} nimbly dodges!",
                    player.name
                ))];
            }
        }

        let miss_chance = enemy.miss_chance();
        if miss_chance > 0.0 && rng.gen::<f64>() < miss_chance {
            return vec![ActionResult::new(format!(
                "{} attacks! But it missed!",
                enemy.name
            ))];
        }

        let result = match choice {
            EnemyChoice::Skill(index) => self.enemy_skill(enemy, player, index),
            EnemyChoice::Attack => self.enemy_attack(enemy, player),
        };
        vec![result]
    }

    fn enemy_skill(&self, enemy: &mut Enemy, player: &mut Player, index: usize) -> ActionResult {
        let skill = enemy.skills[index].clone();
        enemy.current_mp = enemy.current_mp.saturating_sub(skill.mp_cost);

        let offense = match (skill.targets_enemies(), skill.offensive()) {
            (true, Some(offense)) => offense,
            _ => return ActionResult::new(format!("{} uses {}!", enemy.name, skill.name)),
        };

        let attacker = self.stats.enemy_stats(enemy);
        let defender = self.stats.player_stats(player);
        let raw = enemy_skill_damage(
            skill.category,
            offense.power,
            attacker.attack,
            defender.defense,
            &self.constants.enemy,
        );
        // Player elemental affinities are not modelled
        let damage = finalize_skill_damage(raw, 1.0);
        let dealt = apply_damage(player, damage as i64);

        ActionResult::new(format!(
            "{} uses {}! {} takes {} damage!",
            enemy.name, skill.name, player.name, dealt
        ))
        .damage(dealt)
        .target(Snapshot::player(player))
    }

    fn enemy_attack(&self, enemy: &Enemy, player: &mut Player) -> ActionResult {
        let attacker = self.stats.enemy_stats(enemy);
        let defender = self.stats.player_stats(player);
        let damage = enemy_basic_attack_damage(attacker.attack, defender.defense);
        let dealt = apply_damage(player, damage as i64);

        ActionResult::new(format!(
            "{} attacks! {} takes {} damage!",
            enemy.name, player.name, dealt
        ))
        .damage(dealt)
        .target(Snapshot::player(player))
    }
}
