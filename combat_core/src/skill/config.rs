//! Raw skill rows as written in catalog TOML

use super::{
    HealRestore, HealSkill, ItemFind, ItemSteal, OffensiveSkill, Skill, SkillDebuff, SkillEffect,
    SkillError, SupportEffect,
};
use crate::stats::StatBoost;
use crate::types::{Element, SkillCategory, TargetShape};
use serde::{Deserialize, Serialize};

/// A skill exactly as a catalog file describes it: one flat bag of optional
/// fields, most of which only mean something for one category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Option<SkillCategory>,
    #[serde(default)]
    pub mp_cost: u32,
    pub target: Option<TargetShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drain_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub debuffs: Vec<SkillDebuff>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_steal: Option<ItemSteal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_find: Option<ItemFind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heal_amount: Option<u32>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub full_hp_restore: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub full_mp_restore: bool,
    /// HP ratio at or below which the conditional heal kicks in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_hp_threshold: Option<f64>,
    /// Fraction of max HP restored when the threshold is met
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restore_fraction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_boost: Option<StatBoost>,
    /// Duration of a stat boost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evade_turns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regen_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regen_turns: Option<u32>,
    #[serde(default)]
    pub self_stun_turns: u32,
    #[serde(default)]
    pub once_per_battle: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn check_chance(skill_id: &str, chance: f64) -> Result<(), SkillError> {
    if (0.0..=1.0).contains(&chance) {
        Ok(())
    } else {
        Err(SkillError::InvalidChance {
            skill_id: skill_id.to_string(),
            chance,
        })
    }
}

fn check_fraction(skill_id: &str, field: &'static str, value: f64) -> Result<(), SkillError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SkillError::InvalidValue {
            skill_id: skill_id.to_string(),
            field,
        })
    }
}

impl SkillConfig {
    fn heal_restore(&self) -> HealRestore {
        if self.full_hp_restore {
            return HealRestore::Full;
        }
        if let (Some(hp_threshold), Some(restore_fraction)) =
            (self.conditional_hp_threshold, self.restore_fraction)
        {
            return HealRestore::Conditional {
                hp_threshold,
                restore_fraction,
                fallback: self.heal_amount.unwrap_or(0),
            };
        }
        match self.heal_amount {
            Some(amount) if amount > 0 => HealRestore::Flat(amount),
            _ => HealRestore::None,
        }
    }

    fn support_effect(&self) -> SupportEffect {
        if let Some(turns) = self.evade_turns.filter(|t| *t > 0) {
            return SupportEffect::EvadeAll { turns };
        }
        if let (Some(percent_per_turn), Some(turns)) =
            (self.regen_percent, self.regen_turns.filter(|t| *t > 0))
        {
            return SupportEffect::Regeneration {
                percent_per_turn,
                turns,
            };
        }
        if let Some(boost) = self.stat_boost {
            if boost.attack != 0 {
                return SupportEffect::AttackUp {
                    amount: boost.attack,
                    turns: self.duration,
                };
            }
            if boost.defense != 0 {
                return SupportEffect::DefenseUp {
                    amount: boost.defense,
                    turns: self.duration,
                };
            }
        }
        SupportEffect::Inert
    }
}

impl TryFrom<SkillConfig> for Skill {
    type Error = SkillError;

    fn try_from(config: SkillConfig) -> Result<Self, Self::Error> {
        let id = config.id.clone();
        if id.is_empty() {
            return Err(SkillError::MissingField {
                skill_id: id,
                field: "id",
            });
        }
        let category = config.category.ok_or_else(|| SkillError::MissingField {
            skill_id: id.clone(),
            field: "category",
        })?;
        let target = config.target.unwrap_or(if category.is_offensive() {
            TargetShape::SingleEnemy
        } else {
            TargetShape::Caster
        });

        if category.is_offensive() == (target == TargetShape::Caster) {
            return Err(SkillError::InvalidTarget {
                skill_id: id,
                category,
                target,
            });
        }

        for debuff in &config.debuffs {
            check_chance(&id, debuff.chance)?;
        }
        if let Some(steal) = &config.item_steal {
            check_chance(&id, steal.chance)?;
        }
        if let Some(find) = &config.item_find {
            check_chance(&id, find.chance)?;
        }
        if let Some(threshold) = config.conditional_hp_threshold {
            check_fraction(&id, "conditional_hp_threshold", threshold)?;
        }
        if let Some(fraction) = config.restore_fraction {
            check_fraction(&id, "restore_fraction", fraction)?;
        }
        if let Some(percent) = config.regen_percent {
            check_fraction(&id, "regen_percent", percent)?;
        }
        if let Some(drain) = config.drain_factor {
            if drain < 0.0 {
                return Err(SkillError::InvalidValue {
                    skill_id: id,
                    field: "drain_factor",
                });
            }
        }

        let effect = match category {
            SkillCategory::Attack | SkillCategory::Magic => SkillEffect::Offensive(OffensiveSkill {
                power: config.power,
                element: config.element,
                drain_factor: config.drain_factor.filter(|d| *d > 0.0),
                debuffs: config.debuffs.clone(),
                item_steal: config.item_steal.clone().filter(|s| !s.item_pool.is_empty()),
            }),
            SkillCategory::Heal => SkillEffect::Heal(HealSkill {
                restore: config.heal_restore(),
                full_mp_restore: config.full_mp_restore,
                item_find: config.item_find.clone(),
            }),
            SkillCategory::Buff | SkillCategory::Defend => {
                SkillEffect::Support(config.support_effect())
            }
        };

        Ok(Skill {
            id: config.id,
            name: config.name,
            description: config.description,
            category,
            mp_cost: config.mp_cost,
            target,
            once_per_battle: config.once_per_battle,
            self_stun_turns: config.self_stun_turns,
            effect,
        })
    }
}

impl From<Skill> for SkillConfig {
    fn from(skill: Skill) -> Self {
        let mut config = SkillConfig {
            id: skill.id,
            name: skill.name,
            description: skill.description,
            category: Some(skill.category),
            mp_cost: skill.mp_cost,
            target: Some(skill.target),
            self_stun_turns: skill.self_stun_turns,
            once_per_battle: skill.once_per_battle,
            ..Default::default()
        };

        match skill.effect {
            SkillEffect::Offensive(offense) => {
                config.power = offense.power;
                config.element = offense.element;
                config.drain_factor = offense.drain_factor;
                config.debuffs = offense.debuffs;
                config.item_steal = offense.item_steal;
            }
            SkillEffect::Heal(heal) => {
                match heal.restore {
                    HealRestore::Full => config.full_hp_restore = true,
                    HealRestore::Conditional {
                        hp_threshold,
                        restore_fraction,
                        fallback,
                    } => {
                        config.conditional_hp_threshold = Some(hp_threshold);
                        config.restore_fraction = Some(restore_fraction);
                        config.heal_amount = Some(fallback);
                    }
                    HealRestore::Flat(amount) => config.heal_amount = Some(amount),
                    HealRestore::None => {}
                }
                config.full_mp_restore = heal.full_mp_restore;
                config.item_find = heal.item_find;
            }
            SkillEffect::Support(support) => match support {
                SupportEffect::EvadeAll { turns } => config.evade_turns = Some(turns),
                SupportEffect::Regeneration {
                    percent_per_turn,
                    turns,
                } => {
                    config.regen_percent = Some(percent_per_turn);
                    config.regen_turns = Some(turns);
                }
                SupportEffect::AttackUp { amount, turns } => {
                    config.stat_boost = Some(StatBoost::attack(amount));
                    config.duration = turns;
                }
                SupportEffect::DefenseUp { amount, turns } => {
                    config.stat_boost = Some(StatBoost::defense(amount));
                    config.duration = turns;
                }
                SupportEffect::Inert => {}
            },
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DebuffType;

    fn parse(toml_str: &str) -> Result<Skill, SkillError> {
        let config: SkillConfig = toml::from_str(toml_str).unwrap();
        Skill::try_from(config)
    }

    #[test]
    fn test_heal_priority_full_wins() {
        let skill = parse(
            r#"
id = "s_rest"
name = "Rest"
category = "heal"
target = "self"
full_hp_restore = true
heal_amount = 30
conditional_hp_threshold = 0.3
restore_fraction = 0.8
"#,
        )
        .unwrap();
        assert_eq!(skill.heal().unwrap().restore, HealRestore::Full);
    }

    #[test]
    fn test_heal_priority_conditional_over_flat() {
        let skill = parse(
            r#"
id = "s_edit"
name = "Divine Edit"
category = "heal"
target = "self"
heal_amount = 15
conditional_hp_threshold = 0.3
restore_fraction = 0.8
"#,
        )
        .unwrap();
        assert_eq!(
            skill.heal().unwrap().restore,
            HealRestore::Conditional {
                hp_threshold: 0.3,
                restore_fraction: 0.8,
                fallback: 15
            }
        );
    }

    #[test]
    fn test_heal_with_only_threshold_is_flat() {
        let skill = parse(
            r#"
id = "s_patch"
name = "Patch"
category = "heal"
heal_amount = 12
conditional_hp_threshold = 0.3
"#,
        )
        .unwrap();
        assert_eq!(skill.heal().unwrap().restore, HealRestore::Flat(12));
        assert_eq!(skill.target, TargetShape::Caster);
    }

    #[test]
    fn test_support_variant_order() {
        let evade = parse(
            r#"
id = "s_sidestep"
name = "Sidestep"
category = "defend"
evade_turns = 2
stat_boost = { defense = 5 }
"#,
        )
        .unwrap();
        assert_eq!(
            evade.support(),
            Some(&SupportEffect::EvadeAll { turns: 2 })
        );

        let guard = parse(
            r#"
id = "s_guard"
name = "Guard"
category = "defend"
stat_boost = { defense = 5 }
"#,
        )
        .unwrap();
        assert_eq!(
            guard.support(),
            Some(&SupportEffect::DefenseUp {
                amount: 5,
                turns: None
            })
        );

        let nothing = parse(
            r#"
id = "s_pose"
name = "Pose"
category = "buff"
"#,
        )
        .unwrap();
        assert_eq!(nothing.support(), Some(&SupportEffect::Inert));
    }

    #[test]
    fn test_zero_turn_support_falls_through() {
        let guard = parse(
            r#"
id = "s_brace"
name = "Brace"
category = "defend"
evade_turns = 0
stat_boost = { defense = 5 }
duration = 2
"#,
        )
        .unwrap();
        assert_eq!(
            guard.support(),
            Some(&SupportEffect::DefenseUp {
                amount: 5,
                turns: Some(2)
            })
        );

        let rally = parse(
            r#"
id = "s_rally"
name = "Rally"
category = "buff"
regen_percent = 0.1
regen_turns = 0
stat_boost = { attack = 3 }
"#,
        )
        .unwrap();
        assert_eq!(
            rally.support(),
            Some(&SupportEffect::AttackUp {
                amount: 3,
                turns: None
            })
        );
    }

    #[test]
    fn test_rejects_out_of_range_fractions() {
        let result = parse(
            r#"
id = "s_overheal"
name = "Overheal"
category = "heal"
conditional_hp_threshold = 0.3
restore_fraction = 1.5
"#,
        );
        assert!(matches!(
            result,
            Err(SkillError::InvalidValue {
                field: "restore_fraction",
                ..
            })
        ));

        let result = parse(
            r#"
id = "s_bloom"
name = "Bloom"
category = "buff"
regen_percent = -0.2
regen_turns = 3
"#,
        );
        assert!(matches!(
            result,
            Err(SkillError::InvalidValue {
                field: "regen_percent",
                ..
            })
        ));
    }

    #[test]
    fn test_offensive_fields_and_defaults() {
        let skill = parse(
            r#"
id = "s_leech"
name = "Leech"
category = "magic"
mp_cost = 4
power = 2.0
element = "dark"
drain_factor = 0.5

[[debuffs]]
kind = "stun"
chance = 0.25
duration = 1
"#,
        )
        .unwrap();
        assert_eq!(skill.target, TargetShape::SingleEnemy);
        let offense = skill.offensive().unwrap();
        assert_eq!(offense.element, Some(Element::Dark));
        assert_eq!(offense.drain_factor, Some(0.5));
        assert_eq!(offense.debuffs[0].kind, DebuffType::Stun);
    }

    #[test]
    fn test_rejects_mismatched_target() {
        let result = parse(
            r#"
id = "s_bad_heal"
name = "Bad Heal"
category = "heal"
target = "single_enemy"
"#,
        );
        assert!(matches!(result, Err(SkillError::InvalidTarget { .. })));

        let result = parse(
            r#"
id = "s_bad_slash"
name = "Bad Slash"
category = "attack"
target = "self"
"#,
        );
        assert!(matches!(result, Err(SkillError::InvalidTarget { .. })));
    }

    #[test]
    fn test_rejects_bad_chance() {
        let result = parse(
            r#"
id = "s_greedy"
name = "Greedy"
category = "attack"
item_steal = { item_pool = ["i_herb"], chance = 1.5 }
"#,
        );
        assert!(matches!(result, Err(SkillError::InvalidChance { .. })));
    }

    #[test]
    fn test_missing_category() {
        let result = parse(
            r#"
id = "s_vague"
name = "Vague"
"#,
        );
        assert!(matches!(
            result,
            Err(SkillError::MissingField {
                field: "category",
                ..
            })
        ));
    }

    #[test]
    fn test_config_round_trip_keeps_variant() {
        let skill = parse(
            r#"
id = "s_regen"
name = "Soothing Whisper"
category = "buff"
mp_cost = 6
regen_percent = 0.08
regen_turns = 3
self_stun_turns = 1
"#,
        )
        .unwrap();
        let back = Skill::try_from(SkillConfig::from(skill.clone())).unwrap();
        assert_eq!(back, skill);
    }
}
