//! Player action resolution
//!
//! Rejected preconditions are ordinary records with no numeric effect; an
//! action never fails with an error.

use super::primitives::{apply_damage, apply_heal, apply_mp_recovery};
use super::result::{ActionResult, Snapshot};
use super::CombatEngine;
use crate::damage::{
    all_target_skill, basic_attack_damage, finalize_skill_damage, single_target_skill,
};
use crate::defense::resolve_element;
use crate::entity::{Combatant, Enemy, Player};
use crate::skill::{
    HealRestore, HealSkill, OffensiveSkill, Skill, SkillDebuff, SkillEffect, SupportEffect,
};
use crate::stats::Stats;
use crate::status::{AppliedBuff, AppliedDebuff, Regen};
use crate::types::{BuffType, PlayerAction, TargetShape};
use item_core::{pick_from_pool, Recovery};
use rand::Rng;
use tracing::debug;

impl CombatEngine<'_> {
    /// Resolve one player action against the enemy line-up
    ///
    /// Returns records in emission order. A self-stunned player produces a
    /// single refusal and nothing else happens.
    pub fn resolve_player_action<R: Rng>(
        &self,
        player: &mut Player,
        enemies: &mut [Enemy],
        action: &PlayerAction,
        rng: &mut R,
    ) -> Vec<ActionResult> {
        if player.is_stunned() {
            debug!(player = %player.name, "player stunned");
            return vec![ActionResult::new(format!(
                "{} is too exhausted to move!",
                player.name
            ))];
        }

        let results = match action {
            PlayerAction::Attack { target } => self.player_attack(player, enemies, *target, rng),
            PlayerAction::Skill { skill_id, target } => {
                self.player_skill(player, enemies, skill_id, *target, rng)
            }
            PlayerAction::Item { item_id } => self.player_item(player, item_id),
        };

        debug!(?action, records = results.len(), "resolved player action");
        results
    }

    fn player_attack<R: Rng>(
        &self,
        player: &mut Player,
        enemies: &mut [Enemy],
        target: Option<usize>,
        rng: &mut R,
    ) -> Vec<ActionResult> {
        let Some(enemy) = target.and_then(|i| enemies.get_mut(i)) else {
            return vec![ActionResult::new(format!(
                "{} tries to attack, but there is no target!",
                player.name
            ))
            .damage(0)];
        };
        if !enemy.is_alive() {
            return vec![ActionResult::new(format!("{} is already defeated!", enemy.name))];
        }

        let player_constants = &self.constants.player;
        let hits = match player.weapon_id() {
            Some(id) if player_constants.multi_hit_weapons.iter().any(|w| w == id) => {
                player_constants.multi_hit_count
            }
            _ => 1,
        };

        let mut results = Vec::new();
        for hit in 0..hits {
            // Stats are recomputed per hit
            let attacker = self.stats.player_stats(player);
            let defender = self.stats.enemy_stats(enemy);

            let critical = attacker.crit_rate > 0.0 && rng.gen::<f64>() < attacker.crit_rate;
            let damage = basic_attack_damage(
                attacker.attack,
                defender.defense,
                critical,
                self.constants.crit.multiplier,
            );
            let dealt = apply_damage(enemy, damage as i64);

            let indicator = if hits > 1 {
                format!(" ({}/{})", hit + 1, hits)
            } else {
                String::new()
            };
            let crit_text = if critical { " A critical hit!" } else { "" };
            results.push(
                ActionResult::new(format!(
                    "{} attacks!{} {} takes {} damage!{}",
                    player.name, indicator, enemy.name, dealt, crit_text
                ))
                .damage(dealt)
                .critical(critical)
                .target(Snapshot::enemy(enemy)),
            );

            if !enemy.is_alive() {
                break;
            }
        }
        results
    }

    fn player_skill<R: Rng>(
        &self,
        player: &mut Player,
        enemies: &mut [Enemy],
        skill_id: &str,
        target: Option<usize>,
        rng: &mut R,
    ) -> Vec<ActionResult> {
        let Some(skill) = player.find_skill(skill_id).cloned() else {
            return vec![ActionResult::new(format!("Skill {skill_id} was not found!"))];
        };
        if player.current_mp < skill.mp_cost {
            return vec![ActionResult::new(format!(
                "Not enough MP! {} could not be used!",
                skill.name
            ))];
        }
        if skill.once_per_battle && player.has_used(&skill.id) {
            return vec![ActionResult::new(format!(
                "{} can't be used again this battle!",
                skill.name
            ))];
        }

        // Cost and usage are committed before anything can still go wrong
        player.current_mp -= skill.mp_cost;
        if skill.once_per_battle {
            player.mark_used(&skill.id);
        }
        let stats = self.stats.player_stats(player);

        let target = target.filter(|i| *i < enemies.len());
        if skill.target == TargetShape::SingleEnemy {
            if let Some(enemy) = target.map(|i| &enemies[i]) {
                if !enemy.is_alive() {
                    return vec![ActionResult::new(format!("{} is already defeated!", enemy.name))
                        .mp_spent(skill.mp_cost)
                        .caster(Snapshot::player(player))];
                }
            }
        }

        let mut results = Vec::new();
        match &skill.effect {
            SkillEffect::Offensive(offense) => match (skill.target, target) {
                (TargetShape::AllEnemies, _) => self.skill_all_enemies(
                    player,
                    enemies,
                    &skill,
                    offense,
                    &stats,
                    rng,
                    &mut results,
                ),
                (_, Some(index)) => self.skill_single_enemy(
                    player,
                    &mut enemies[index],
                    &skill,
                    offense,
                    &stats,
                    rng,
                    &mut results,
                ),
                (_, None) => {
                    return vec![ActionResult::new(format!("{} needs a target!", skill.name))
                        .mp_spent(skill.mp_cost)
                        .caster(Snapshot::player(player))];
                }
            },
            SkillEffect::Heal(heal) => {
                self.skill_heal(player, &skill, heal, &stats, rng, &mut results)
            }
            SkillEffect::Support(support) => {
                self.skill_support(player, &skill, support, &stats, &mut results)
            }
        }

        if skill.self_stun_turns > 0 {
            let stun = AppliedBuff::new(
                skill.id.clone(),
                BuffType::SelfStun,
                skill.self_stun_turns + self.constants.status.self_stun_extra_turns,
            );
            player.buffs.apply(stun.clone());
            results.push(
                ActionResult::new(format!("{} is completely worn out!", player.name))
                    .buff(stun)
                    .caster(Snapshot::player(player)),
            );
        }

        results
    }

    #[allow(clippy::too_many_arguments)]
    fn skill_single_enemy<R: Rng>(
        &self,
        player: &mut Player,
        enemy: &mut Enemy,
        skill: &Skill,
        offense: &OffensiveSkill,
        stats: &Stats,
        rng: &mut R,
        results: &mut Vec<ActionResult>,
    ) {
        let defender = self.stats.enemy_stats(enemy);
        let raw = single_target_skill(
            skill.category,
            offense.power,
            stats.attack,
            defender.defense,
            &self.constants.player,
        );
        let modifier =
            resolve_element(offense.element, &enemy.resistances, &self.constants.elements);
        let damage = finalize_skill_damage(raw, modifier.multiplier);
        let dealt = apply_damage(enemy, damage as i64);

        let note = modifier.note().map(|n| format!(" ({n})")).unwrap_or_default();
        results.push(
            ActionResult::new(format!(
                "{} uses {}! {} takes {} damage!{}",
                player.name, skill.name, enemy.name, dealt, note
            ))
            .damage(dealt)
            .target(Snapshot::enemy(enemy))
            .mp_spent(skill.mp_cost)
            .caster(Snapshot::player(player)),
        );

        inflict_debuffs(&skill.id, &offense.debuffs, enemy, rng, results);

        if let Some(factor) = offense.drain_factor {
            self.drain(player, dealt as u64, factor, stats, results);
        }

        if let Some(steal) = &offense.item_steal {
            if rng.gen::<f64>() < steal.chance {
                let stolen = pick_from_pool(&steal.item_pool, rng)
                    .and_then(|id| self.items.create_instance(id, &mut *rng));
                if let Some(item) = stolen {
                    player.add_item(item.clone());
                    results.push(
                        ActionResult::new(format!(
                            "{} steals {} from {}!",
                            player.name, item.def.name, enemy.name
                        ))
                        .stolen(item)
                        .caster(Snapshot::player(player)),
                    );
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn skill_all_enemies<R: Rng>(
        &self,
        player: &mut Player,
        enemies: &mut [Enemy],
        skill: &Skill,
        offense: &OffensiveSkill,
        stats: &Stats,
        rng: &mut R,
        results: &mut Vec<ActionResult>,
    ) {
        results.push(
            ActionResult::new(format!("{} uses {}!", player.name, skill.name))
                .mp_spent(skill.mp_cost)
                .caster(Snapshot::player(player)),
        );

        let mut total_dealt: u64 = 0;
        for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
            let defender = self.stats.enemy_stats(enemy);
            let raw = all_target_skill(
                skill.category,
                offense.power,
                stats.attack,
                defender.defense,
                &self.constants.player,
            );
            let modifier =
                resolve_element(offense.element, &enemy.resistances, &self.constants.elements);
            let damage = finalize_skill_damage(raw, modifier.multiplier);
            let dealt = apply_damage(enemy, damage as i64);
            total_dealt += dealt as u64;

            let note = modifier.note().map(|n| format!(" ({n})")).unwrap_or_default();
            results.push(
                ActionResult::new(format!("{} takes {} damage!{}", enemy.name, dealt, note))
                    .damage(dealt)
                    .target(Snapshot::enemy(enemy)),
            );

            inflict_debuffs(&skill.id, &offense.debuffs, enemy, rng, results);
        }

        // Drain is pooled across every hit and applied once
        if let Some(factor) = offense.drain_factor {
            self.drain(player, total_dealt, factor, stats, results);
        }
    }

    fn drain(
        &self,
        player: &mut Player,
        dealt: u64,
        factor: f64,
        stats: &Stats,
        results: &mut Vec<ActionResult>,
    ) {
        if dealt == 0 || factor <= 0.0 {
            return;
        }
        let amount = (dealt as f64 * factor).floor() as u32;
        if amount == 0 {
            return;
        }
        let healed = apply_heal(player, amount, stats, false);
        if healed > 0 {
            results.push(
                ActionResult::new(format!("{} drains {} HP!", player.name, healed))
                    .healed(healed)
                    .caster(Snapshot::player(player)),
            );
        }
    }

    fn skill_heal<R: Rng>(
        &self,
        player: &mut Player,
        skill: &Skill,
        heal: &HealSkill,
        stats: &Stats,
        rng: &mut R,
        results: &mut Vec<ActionResult>,
    ) {
        let (healed, text) = match heal.restore {
            HealRestore::Full => {
                let healed = apply_heal(player, 0, stats, true);
                (healed, "HP fully restored!".to_string())
            }
            HealRestore::Conditional {
                hp_threshold,
                restore_fraction,
                fallback,
            } => {
                let ratio = if stats.max_hp == 0 {
                    1.0
                } else {
                    player.current_hp as f64 / stats.max_hp as f64
                };
                if ratio <= hp_threshold {
                    let amount = (stats.max_hp as f64 * restore_fraction).floor() as u32;
                    let healed = apply_heal(player, amount, stats, false);
                    (healed, format!("Restored {healed} HP! Right on time!"))
                } else {
                    let healed = apply_heal(player, fallback, stats, false);
                    (healed, format!("Restored {healed} HP. It wasn't needed yet..."))
                }
            }
            HealRestore::Flat(amount) => {
                let healed = apply_heal(player, amount, stats, false);
                (healed, format!("Restored {healed} HP!"))
            }
            HealRestore::None => (0, "Nothing happened.".to_string()),
        };

        if heal.full_mp_restore {
            let recovered = apply_mp_recovery(player, 0, stats, true);
            results.push(
                ActionResult::new("MP fully restored!")
                    .mp_restored(recovered)
                    .caster(Snapshot::player(player)),
            );
        }

        results.push(
            ActionResult::new(format!("{} uses {}! {}", player.name, skill.name, text))
                .healed(healed)
                .mp_spent(skill.mp_cost)
                .caster(Snapshot::player(player)),
        );

        if let Some(find) = &heal.item_find {
            if rng.gen::<f64>() < find.chance {
                if let Some(item) = self.items.create_instance(&find.item_id, rng) {
                    player.add_item(item.clone());
                    results.push(
                        ActionResult::new(format!("{} found {}!", player.name, item.def.name))
                            .found(item)
                            .caster(Snapshot::player(player)),
                    );
                }
            }
        }
    }

    fn skill_support(
        &self,
        player: &mut Player,
        skill: &Skill,
        support: &SupportEffect,
        stats: &Stats,
        results: &mut Vec<ActionResult>,
    ) {
        let default_turns = self.constants.status.default_buff_duration;
        let stat_turns = |turns: Option<u32>| turns.filter(|t| *t > 0).unwrap_or(default_turns);

        let buff = match *support {
            SupportEffect::EvadeAll { turns } => {
                Some(AppliedBuff::new(skill.id.clone(), BuffType::EvadeAll, turns))
            }
            SupportEffect::Regeneration {
                percent_per_turn,
                turns,
            } => {
                // Baked into a flat amount from max HP at cast time
                let per_turn = (stats.max_hp as f64 * percent_per_turn).floor();
                Some(
                    AppliedBuff::new(skill.id.clone(), BuffType::HpRegeneration, turns)
                        .with_value(per_turn)
                        .with_regen(Regen::flat(per_turn)),
                )
            }
            SupportEffect::AttackUp { amount, turns } => Some(
                AppliedBuff::new(skill.id.clone(), BuffType::AttackUp, stat_turns(turns))
                    .with_value(amount as f64),
            ),
            SupportEffect::DefenseUp { amount, turns } => Some(
                AppliedBuff::new(skill.id.clone(), BuffType::DefenseUp, stat_turns(turns))
                    .with_value(amount as f64),
            ),
            SupportEffect::Inert => None,
        };

        match buff {
            Some(buff) => {
                player.buffs.apply(buff.clone());
                results.push(
                    ActionResult::new(format!("{} uses {}!", player.name, skill.name))
                        .buff(buff)
                        .mp_spent(skill.mp_cost)
                        .caster(Snapshot::player(player)),
                );
            }
            None => results.push(
                ActionResult::new(format!(
                    "{} uses {}, but nothing happened!",
                    player.name, skill.name
                ))
                .mp_spent(skill.mp_cost)
                .caster(Snapshot::player(player)),
            ),
        }
    }

    fn player_item(&self, player: &mut Player, item_id: &str) -> Vec<ActionResult> {
        let Some(item) = player.take_item(item_id) else {
            return vec![ActionResult::new(format!("You don't have {item_id}!"))];
        };
        let stats = self.stats.player_stats(player);

        let mut results = vec![ActionResult::new(format!(
            "{} uses {}!",
            player.name, item.def.name
        ))
        .caster(Snapshot::player(player))];

        match item.hp_recovery() {
            Recovery::Full => {
                let healed = apply_heal(player, 0, &stats, true);
                results.push(
                    ActionResult::new("HP fully restored!")
                        .healed(healed)
                        .caster(Snapshot::player(player)),
                );
            }
            Recovery::Amount(amount) => {
                let healed = apply_heal(player, amount, &stats, false);
                results.push(
                    ActionResult::new(format!("Restored {healed} HP!"))
                        .healed(healed)
                        .caster(Snapshot::player(player)),
                );
            }
            Recovery::None => {}
        }

        match item.mp_recovery() {
            Recovery::Full => {
                let recovered = apply_mp_recovery(player, 0, &stats, true);
                results.push(
                    ActionResult::new("MP fully restored!")
                        .mp_restored(recovered)
                        .caster(Snapshot::player(player)),
                );
            }
            Recovery::Amount(amount) => {
                let recovered = apply_mp_recovery(player, amount, &stats, false);
                results.push(
                    ActionResult::new(format!("Restored {recovered} MP!"))
                        .mp_restored(recovered)
                        .caster(Snapshot::player(player)),
                );
            }
            Recovery::None => {}
        }

        results
    }
}

/// Roll each configured debuff independently; a landed debuff replaces any
/// active one of the same type
fn inflict_debuffs<R: Rng>(
    skill_id: &str,
    debuffs: &[SkillDebuff],
    enemy: &mut Enemy,
    rng: &mut R,
    results: &mut Vec<ActionResult>,
) {
    for entry in debuffs {
        if rng.gen::<f64>() >= entry.chance {
            continue;
        }
        let mut debuff = AppliedDebuff::new(skill_id, entry.kind, entry.duration);
        debuff.value = entry.value;
        enemy.debuffs.apply(debuff.clone());
        results.push(
            ActionResult::new(format!("{} {}!", enemy.name, entry.kind.inflicted_text()))
                .debuff(debuff)
                .target(Snapshot::enemy(enemy)),
        );
    }
}
