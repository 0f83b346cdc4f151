//! Combat constants configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use super::ConfigError;

/// Global combat constants instance
static COMBAT_CONSTANTS: OnceLock<CombatConstants> = OnceLock::new();

/// Initialize the global combat constants from a TOML file
///
/// Call once at startup before the first battle.
/// Returns error if already initialized or if loading fails.
pub fn init_constants(path: &Path) -> Result<(), ConfigError> {
    let constants = CombatConstants::load_from_path(path)?;
    constants.validate()?;
    COMBAT_CONSTANTS
        .set(constants)
        .map_err(|_| ConfigError::Validation("CombatConstants already initialized".to_string()))
}

/// Initialize the global combat constants with default values
pub fn init_constants_default() -> Result<(), ConfigError> {
    COMBAT_CONSTANTS
        .set(CombatConstants::default())
        .map_err(|_| ConfigError::Validation("CombatConstants already initialized".to_string()))
}

/// Get a reference to the global combat constants
///
/// Falls back to the defaults if nothing was initialized, after which
/// `init_constants` will report the constants as already set.
pub fn constants() -> &'static CombatConstants {
    COMBAT_CONSTANTS.get_or_init(CombatConstants::default)
}

/// Tunable combat constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatConstants {
    #[serde(default)]
    pub elements: ElementConstants,
    #[serde(default)]
    pub crit: CritConstants,
    #[serde(default)]
    pub player: PlayerConstants,
    #[serde(default)]
    pub enemy: EnemyConstants,
    #[serde(default)]
    pub status: StatusConstants,
}

impl CombatConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        super::load_toml(path)
    }

    /// Parse constants from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let constants: CombatConstants = super::parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Reject values that would break the formulas' guarantees
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.elements.weak_multiplier < 1.0 {
            return Err(ConfigError::Validation(
                "elements.weak_multiplier must be at least 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.elements.resist_multiplier) {
            return Err(ConfigError::Validation(
                "elements.resist_multiplier must be within [0, 1]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.enemy.skill_chance) {
            return Err(ConfigError::Validation(
                "enemy.skill_chance must be within [0, 1]".to_string(),
            ));
        }
        if self.player.magic_attack_divisor <= 0.0
            || self.player.magic_all_attack_divisor <= 0.0
            || self.enemy.magic_attack_divisor <= 0.0
        {
            return Err(ConfigError::Validation(
                "attack divisors must be positive".to_string(),
            ));
        }
        if self.player.multi_hit_count == 0 {
            return Err(ConfigError::Validation(
                "player.multi_hit_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementConstants {
    /// Damage multiplier against a weakness
    #[serde(default = "default_weak_multiplier")]
    pub weak_multiplier: f64,
    /// Damage multiplier against a resistance
    #[serde(default = "default_resist_multiplier")]
    pub resist_multiplier: f64,
}

impl Default for ElementConstants {
    fn default() -> Self {
        ElementConstants {
            weak_multiplier: 1.5,
            resist_multiplier: 0.5,
        }
    }
}

fn default_weak_multiplier() -> f64 {
    1.5
}
fn default_resist_multiplier() -> f64 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CritConstants {
    /// Basic attack critical multiplier
    #[serde(default = "default_crit_multiplier")]
    pub multiplier: f64,
}

impl Default for CritConstants {
    fn default() -> Self {
        CritConstants {
            multiplier: default_crit_multiplier(),
        }
    }
}

fn default_crit_multiplier() -> f64 {
    2.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConstants {
    /// Weapons whose basic attack strikes more than once
    #[serde(default = "default_multi_hit_weapons")]
    pub multi_hit_weapons: Vec<String>,
    /// Hits per basic attack with a multi-hit weapon
    #[serde(default = "default_multi_hit_count")]
    pub multi_hit_count: u32,
    /// ATTACK skill: floor(max(1, atk - def) * power * this)
    #[serde(default = "default_attack_skill_multiplier")]
    pub attack_skill_multiplier: f64,
    /// MAGIC single target: power * this + atk / magic_attack_divisor
    #[serde(default = "default_magic_power_scale")]
    pub magic_power_scale: f64,
    #[serde(default = "default_magic_attack_divisor")]
    pub magic_attack_divisor: f64,
    /// MAGIC all enemies: power + atk / this
    #[serde(default = "default_magic_all_attack_divisor")]
    pub magic_all_attack_divisor: f64,
}

impl Default for PlayerConstants {
    fn default() -> Self {
        PlayerConstants {
            multi_hit_weapons: default_multi_hit_weapons(),
            multi_hit_count: default_multi_hit_count(),
            attack_skill_multiplier: default_attack_skill_multiplier(),
            magic_power_scale: default_magic_power_scale(),
            magic_attack_divisor: default_magic_attack_divisor(),
            magic_all_attack_divisor: default_magic_all_attack_divisor(),
        }
    }
}

fn default_multi_hit_weapons() -> Vec<String> {
    vec!["i_micchy_buster".to_string(), "i_micchy_brave".to_string()]
}
fn default_multi_hit_count() -> u32 {
    2
}
fn default_attack_skill_multiplier() -> f64 {
    1.5
}
fn default_magic_power_scale() -> f64 {
    10.0
}
fn default_magic_attack_divisor() -> f64 {
    2.0
}
fn default_magic_all_attack_divisor() -> f64 {
    4.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyConstants {
    /// Chance to prefer an affordable skill over a basic attack
    #[serde(default = "default_skill_chance")]
    pub skill_chance: f64,
    /// MAGIC: power + atk / this
    #[serde(default = "default_enemy_magic_attack_divisor")]
    pub magic_attack_divisor: f64,
}

impl Default for EnemyConstants {
    fn default() -> Self {
        EnemyConstants {
            skill_chance: default_skill_chance(),
            magic_attack_divisor: default_enemy_magic_attack_divisor(),
        }
    }
}

fn default_skill_chance() -> f64 {
    0.5
}
fn default_enemy_magic_attack_divisor() -> f64 {
    3.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConstants {
    /// Added to self-stun durations, since the stun is checked before the
    /// end-of-turn tick consumes its first turn
    #[serde(default = "default_self_stun_extra_turns")]
    pub self_stun_extra_turns: u32,
    /// Duration for stat buffs that don't configure one
    #[serde(default = "default_buff_duration")]
    pub default_buff_duration: u32,
}

impl Default for StatusConstants {
    fn default() -> Self {
        StatusConstants {
            self_stun_extra_turns: default_self_stun_extra_turns(),
            default_buff_duration: default_buff_duration(),
        }
    }
}

fn default_self_stun_extra_turns() -> u32 {
    1
}
fn default_buff_duration() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = CombatConstants::default();
        assert!((constants.elements.weak_multiplier - 1.5).abs() < f64::EPSILON);
        assert!((constants.elements.resist_multiplier - 0.5).abs() < f64::EPSILON);
        assert!((constants.crit.multiplier - 2.0).abs() < f64::EPSILON);
        assert_eq!(constants.player.multi_hit_count, 2);
        assert_eq!(constants.status.self_stun_extra_turns, 1);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[elements]
weak_multiplier = 2.0

[player]
multi_hit_weapons = ["i_twin_blades"]
multi_hit_count = 3
"#;

        let constants = CombatConstants::parse(toml).unwrap();
        assert!((constants.elements.weak_multiplier - 2.0).abs() < f64::EPSILON);
        // Unspecified fields keep their defaults
        assert!((constants.elements.resist_multiplier - 0.5).abs() < f64::EPSILON);
        assert_eq!(constants.player.multi_hit_weapons, vec!["i_twin_blades"]);
        assert_eq!(constants.player.multi_hit_count, 3);
        assert!((constants.enemy.skill_chance - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_constants_rejected() {
        let toml = r#"
[enemy]
skill_chance = 1.5
"#;
        assert!(matches!(
            CombatConstants::parse(toml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = CombatConstants::load_from_path(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
