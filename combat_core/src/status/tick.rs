//! End-of-turn ledger tick: periodic healing, countdown and expiry

use super::{AppliedBuff, AppliedDebuff, StatusLedger, TimedEffect};
use crate::combat::apply_heal;
use crate::entity::{Combatant, Enemy, Player};
use crate::skill::SkillLookup;
use crate::stats::StatCalculator;
use crate::types::BuffType;
use tracing::trace;

const UNKNOWN_EFFECT: &str = "a mysterious effect";

/// Age every buff on the player by one turn
///
/// Regeneration heals before its countdown, so a regen buff still heals on
/// the turn it expires. Returns the messages to append to the battle log.
pub fn tick_player(
    player: &mut Player,
    stats: &dyn StatCalculator,
    skills: &dyn SkillLookup,
) -> Vec<String> {
    let mut messages = Vec::new();
    let effective = stats.player_stats(player);
    let snapshot = std::mem::take(&mut player.buffs);
    let mut retained = StatusLedger::new();

    for mut buff in snapshot.into_effects() {
        if buff.kind == BuffType::HpRegeneration {
            if let Some(regen) = buff.regen {
                let amount = regen.amount_for(effective.max_hp);
                if amount > 0 && player.is_alive() && player.current_hp < effective.max_hp {
                    let healed = apply_heal(player, amount, &effective, false);
                    if healed > 0 {
                        messages.push(format!("{} regenerates {} HP.", player.name, healed));
                    }
                }
            }
        }

        if count_down(&mut buff) {
            retained.apply(buff);
        } else {
            trace!(kind = ?buff.kind, combatant = %player.name, "buff expired");
            messages.push(format!(
                "{}'s {} wore off.",
                player.name,
                buff_label(&buff, skills)
            ));
        }
    }

    player.buffs = retained;
    messages
}

/// Age every debuff on an enemy by one turn
pub fn tick_enemy(enemy: &mut Enemy) -> Vec<String> {
    let mut messages = Vec::new();
    let snapshot = std::mem::take(&mut enemy.debuffs);
    let mut retained = StatusLedger::new();

    for mut debuff in snapshot.into_effects() {
        if count_down(&mut debuff) {
            retained.apply(debuff);
        } else {
            trace!(kind = ?debuff.kind, combatant = %enemy.name, "debuff expired");
            messages.push(format!(
                "{} recovered from {}.",
                enemy.name,
                debuff_label(&debuff)
            ));
        }
    }

    enemy.debuffs = retained;
    messages
}

/// Decrement remaining turns; true if the effect should be kept
fn count_down<E: TimedEffect>(effect: &mut E) -> bool {
    let remaining = effect.remaining_turns().saturating_sub(1);
    effect.set_remaining_turns(remaining);
    remaining > 0
}

fn buff_label(buff: &AppliedBuff, skills: &dyn SkillLookup) -> String {
    match buff.kind.label() {
        Some(label) => label.to_string(),
        None => skills
            .skill_name(&buff.skill_id)
            .unwrap_or(UNKNOWN_EFFECT)
            .to_string(),
    }
}

fn debuff_label(debuff: &AppliedDebuff) -> &'static str {
    debuff.kind.label()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::{Skill, SkillConfig};
    use crate::stats::{StandardStats, Stats};
    use crate::status::Regen;
    use crate::types::DebuffType;
    use std::collections::HashMap;

    fn hero() -> Player {
        Player::new("hero", "Hero", Stats::new(100, 30, 10, 5))
    }

    fn catalog() -> HashMap<String, Skill> {
        let config: SkillConfig = toml::from_str(
            r#"
id = "s_focus"
name = "Focus"
category = "buff"
target = "self"
mp_cost = 3
duration = 3
stat_boost = { attack = 5 }
"#,
        )
        .unwrap();
        let skill = Skill::try_from(config).unwrap();
        HashMap::from([(skill.id.clone(), skill)])
    }

    #[test]
    fn test_one_turn_buff_expires_with_one_message() {
        let mut player = hero();
        player
            .buffs
            .apply(AppliedBuff::new("s_focus", BuffType::AttackUp, 1).with_value(5.0));

        let messages = tick_player(&mut player, &StandardStats, &catalog());
        assert!(player.buffs.is_empty());
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Focus"));
    }

    #[test]
    fn test_two_turn_buff_survives_one_tick() {
        let mut player = hero();
        player
            .buffs
            .apply(AppliedBuff::new("s_focus", BuffType::AttackUp, 2).with_value(5.0));

        let messages = tick_player(&mut player, &StandardStats, &catalog());
        assert!(messages.is_empty());
        assert_eq!(player.buffs.get(BuffType::AttackUp).unwrap().remaining_turns, 1);
    }

    #[test]
    fn test_special_labels_and_unknown_skill_fallback() {
        let mut player = hero();
        player.buffs.apply(AppliedBuff::new("s_rush", BuffType::SelfStun, 1));
        player
            .buffs
            .apply(AppliedBuff::new("s_gone", BuffType::DefenseUp, 1).with_value(2.0));

        let messages = tick_player(&mut player, &StandardStats, &HashMap::new());
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().any(|m| m.contains("fatigue")));
        assert!(messages.iter().any(|m| m.contains(UNKNOWN_EFFECT)));
    }

    #[test]
    fn test_regeneration_heals_before_expiring() {
        let mut player = hero();
        player.current_hp = 50;
        player.buffs.apply(
            AppliedBuff::new("s_regen", BuffType::HpRegeneration, 1)
                .with_value(8.0)
                .with_regen(Regen::flat(8.0)),
        );

        let messages = tick_player(&mut player, &StandardStats, &HashMap::new());
        assert_eq!(player.current_hp, 58);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("regenerates 8 HP"));
        assert!(messages[1].contains("HP regeneration"));
    }

    #[test]
    fn test_percent_regeneration_is_capped_at_max() {
        let mut player = hero();
        player.current_hp = 97;
        player.buffs.apply(
            AppliedBuff::new("s_regen", BuffType::HpRegeneration, 3)
                .with_regen(Regen::percent(0.1)),
        );

        let messages = tick_player(&mut player, &StandardStats, &HashMap::new());
        assert_eq!(player.current_hp, 100);
        assert_eq!(messages, vec!["Hero regenerates 3 HP.".to_string()]);
    }

    #[test]
    fn test_regeneration_skips_defeated_or_full_player() {
        let mut player = hero();
        player.current_hp = 0;
        player.buffs.apply(
            AppliedBuff::new("s_regen", BuffType::HpRegeneration, 3).with_regen(Regen::flat(10.0)),
        );
        tick_player(&mut player, &StandardStats, &HashMap::new());
        assert_eq!(player.current_hp, 0);

        player.current_hp = 100;
        let messages = tick_player(&mut player, &StandardStats, &HashMap::new());
        assert!(messages.is_empty());
        assert_eq!(player.current_hp, 100);
    }

    #[test]
    fn test_enemy_debuffs_expire() {
        let mut enemy = Enemy::new("e_bat", "Bat", Stats::new(20, 0, 6, 2));
        enemy.debuffs.apply(AppliedDebuff::new("s_jolt", DebuffType::Stun, 1));
        enemy
            .debuffs
            .apply(AppliedDebuff::new("s_flash", DebuffType::AccuracyDown, 2).with_value(0.3));

        let messages = tick_enemy(&mut enemy);
        assert_eq!(messages, vec!["Bat recovered from paralysis.".to_string()]);
        assert!(!enemy.debuffs.contains(DebuffType::Stun));
        assert_eq!(
            enemy.debuffs.get(DebuffType::AccuracyDown).unwrap().remaining_turns,
            1
        );
    }
}
