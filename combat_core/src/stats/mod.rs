//! Effective stats - base stats folded with equipment, boosts and active effects

mod calculator;

pub use calculator::{StandardStats, StatCalculator};

use serde::{Deserialize, Serialize};

/// A full stat line, used both for base stats and for the effective view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub max_hp: u32,
    pub max_mp: u32,
    pub attack: i32,
    pub defense: i32,
    #[serde(default)]
    pub speed: i32,
    /// Probability in [0, 1]
    #[serde(default)]
    pub crit_rate: f64,
}

impl Default for Stats {
    fn default() -> Self {
        Stats {
            max_hp: 1,
            max_mp: 0,
            attack: 0,
            defense: 0,
            speed: 0,
            crit_rate: 0.0,
        }
    }
}

impl Stats {
    pub fn new(max_hp: u32, max_mp: u32, attack: i32, defense: i32) -> Self {
        Stats {
            max_hp,
            max_mp,
            attack,
            defense,
            ..Default::default()
        }
    }

    pub fn with_crit_rate(mut self, crit_rate: f64) -> Self {
        self.crit_rate = crit_rate.clamp(0.0, 1.0);
        self
    }

    /// Fold a boost into this stat line; pools never drop below zero
    pub fn apply(&mut self, boost: &StatBoost) {
        self.max_hp = add_signed(self.max_hp, boost.max_hp);
        self.max_mp = add_signed(self.max_mp, boost.max_mp);
        self.attack += boost.attack;
        self.defense += boost.defense;
        self.speed += boost.speed;
        self.crit_rate = (self.crit_rate + boost.crit_rate).clamp(0.0, 1.0);
    }

    pub fn boosted(mut self, boost: &StatBoost) -> Self {
        self.apply(boost);
        self
    }
}

fn add_signed(value: u32, delta: i32) -> u32 {
    if delta >= 0 {
        value.saturating_add(delta as u32)
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}

/// Signed adjustments to a stat line
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatBoost {
    #[serde(default)]
    pub max_hp: i32,
    #[serde(default)]
    pub max_mp: i32,
    #[serde(default)]
    pub attack: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub speed: i32,
    #[serde(default)]
    pub crit_rate: f64,
}

impl StatBoost {
    pub fn attack(amount: i32) -> Self {
        StatBoost {
            attack: amount,
            ..Default::default()
        }
    }

    pub fn defense(amount: i32) -> Self {
        StatBoost {
            defense: amount,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == StatBoost::default()
    }

    /// Accumulate another boost into this one
    pub fn add(&mut self, other: &StatBoost) {
        self.max_hp += other.max_hp;
        self.max_mp += other.max_mp;
        self.attack += other.attack;
        self.defense += other.defense;
        self.speed += other.speed;
        self.crit_rate += other.crit_rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_boost() {
        let stats = Stats::new(50, 20, 10, 5).boosted(&StatBoost {
            max_hp: 10,
            attack: 3,
            crit_rate: 0.1,
            ..Default::default()
        });
        assert_eq!(stats.max_hp, 60);
        assert_eq!(stats.attack, 13);
        assert!((stats.crit_rate - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_boost_floors_pools() {
        let stats = Stats::new(10, 5, 10, 5).boosted(&StatBoost {
            max_hp: -30,
            max_mp: -1,
            crit_rate: -2.0,
            ..Default::default()
        });
        assert_eq!(stats.max_hp, 0);
        assert_eq!(stats.max_mp, 4);
        assert_eq!(stats.crit_rate, 0.0);
    }

    #[test]
    fn test_boost_accumulates() {
        let mut total = StatBoost::attack(2);
        total.add(&StatBoost::defense(4));
        total.add(&StatBoost::attack(1));
        assert_eq!(total.attack, 3);
        assert_eq!(total.defense, 4);
        assert!(!total.is_empty());
        assert!(StatBoost::default().is_empty());
    }
}
