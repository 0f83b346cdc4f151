//! Damage calculation - attack/defense/power into a damage number
//!
//! Every formula produces a `RawDamage`: the pre-floor value plus whether it
//! passed its "worth dealing damage" gate. `finalize_skill_damage` then folds
//! in the elemental multiplier and applies the floor and minimum.

use crate::config::{EnemyConstants, PlayerConstants};
use crate::types::SkillCategory;

/// Pre-floor skill damage and its positivity gate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawDamage {
    pub amount: f64,
    pub passes_gate: bool,
}

/// Player or enemy basic attack: max(1, atk - def), times the crit multiplier,
/// floored, then at least 1
pub fn basic_attack_damage(attack: i32, defense: i32, critical: bool, crit_multiplier: f64) -> u32 {
    let base = (attack - defense).max(1) as f64;
    let scaled = if critical { base * crit_multiplier } else { base };
    (scaled.floor() as i64).max(1) as u32
}

/// Enemy basic attack: floor(atk - def) when positive, else 0
pub fn enemy_basic_attack_damage(attack: i32, defense: i32) -> u32 {
    let raw = attack - defense;
    if raw > 0 {
        raw.max(1) as u32
    } else {
        0
    }
}

/// Player skill against one enemy
///
/// - MAGIC: power * scale + floor(atk / divisor), at least 1, ignores defense
/// - ATTACK: floor(max(1, atk - def) * power * multiplier)
pub fn single_target_skill(
    category: SkillCategory,
    power: Option<f64>,
    attack: i32,
    defense: i32,
    constants: &PlayerConstants,
) -> RawDamage {
    let power = power.unwrap_or(1.0);
    match category {
        SkillCategory::Magic => {
            let amount = power * constants.magic_power_scale
                + (attack as f64 / constants.magic_attack_divisor).floor();
            RawDamage {
                amount: amount.max(1.0),
                passes_gate: true,
            }
        }
        _ => {
            let base = (attack - defense).max(1) as f64;
            let amount = (base * power * constants.attack_skill_multiplier).floor();
            RawDamage {
                amount,
                passes_gate: amount > 0.0,
            }
        }
    }
}

/// Player skill against every living enemy
///
/// - MAGIC: power + floor(atk / all_divisor)
/// - ATTACK: power * atk - def, gated on power * atk exceeding def
pub fn all_target_skill(
    category: SkillCategory,
    power: Option<f64>,
    attack: i32,
    defense: i32,
    constants: &PlayerConstants,
) -> RawDamage {
    let power = power.unwrap_or(0.0);
    match category {
        SkillCategory::Magic => {
            let amount = power + (attack as f64 / constants.magic_all_attack_divisor).floor();
            RawDamage {
                amount,
                passes_gate: amount > 0.0,
            }
        }
        _ => physical_spread(power, attack, defense),
    }
}

/// Enemy skill against the player
///
/// - MAGIC: power + floor(atk / divisor)
/// - ATTACK: power * atk - def with the same gate as the all-enemies form
pub fn enemy_skill_damage(
    category: SkillCategory,
    power: Option<f64>,
    attack: i32,
    defense: i32,
    constants: &EnemyConstants,
) -> RawDamage {
    let power = power.unwrap_or(0.0);
    match category {
        SkillCategory::Magic => {
            let amount = power + (attack as f64 / constants.magic_attack_divisor).floor();
            RawDamage {
                amount,
                passes_gate: amount > 0.0,
            }
        }
        _ => physical_spread(power, attack, defense),
    }
}

fn physical_spread(power: f64, attack: i32, defense: i32) -> RawDamage {
    let scaled = power * attack as f64;
    RawDamage {
        amount: scaled - defense as f64,
        passes_gate: scaled > defense as f64,
    }
}

/// Apply the elemental multiplier and produce the damage actually dealt
///
/// Damage lands when the base formula passed its gate, or when a weakness
/// pushed an otherwise failing value above zero. Landing damage is at least 1.
pub fn finalize_skill_damage(raw: RawDamage, multiplier: f64) -> u32 {
    let effective = raw.amount * multiplier;
    if raw.passes_gate || (multiplier > 1.0 && effective > 0.0) {
        (effective.floor() as i64).max(1) as u32
    } else {
        0
    }
}
