//! Damage formulas for basic attacks and skills

mod calculation;

pub use calculation::{
    all_target_skill, basic_attack_damage, enemy_basic_attack_damage, enemy_skill_damage,
    finalize_skill_damage, single_target_skill, RawDamage,
};
