use super::Combatant;
use crate::defense::ResistanceTable;
use crate::skill::Skill;
use crate::stats::Stats;
use crate::status::{AppliedDebuff, StatusLedger};
use crate::types::{Affinity, DebuffType, Element};
use serde::{Deserialize, Serialize};

/// An enemy in battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: String,
    pub name: String,
    pub base_stats: Stats,
    pub current_hp: u32,
    pub current_mp: u32,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub resistances: ResistanceTable,
    #[serde(default)]
    pub debuffs: StatusLedger<AppliedDebuff>,
}

impl Enemy {
    /// Create an enemy at full HP and MP
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_stats: Stats) -> Self {
        Enemy {
            id: id.into(),
            name: name.into(),
            base_stats,
            current_hp: base_stats.max_hp,
            current_mp: base_stats.max_mp,
            skills: Vec::new(),
            resistances: ResistanceTable::new(),
            debuffs: StatusLedger::new(),
        }
    }

    pub fn with_skills(mut self, skills: Vec<Skill>) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_resistance(mut self, element: Element, affinity: Affinity) -> Self {
        self.resistances.insert(element, affinity);
        self
    }

    /// Skills the current MP pool can pay for
    pub fn affordable_skills(&self) -> Vec<usize> {
        self.skills
            .iter()
            .enumerate()
            .filter(|(_, s)| s.mp_cost <= self.current_mp)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_stunned(&self) -> bool {
        self.debuffs.is_active(DebuffType::Stun)
    }

    /// Probability that this enemy's next action misses
    pub fn miss_chance(&self) -> f64 {
        self.debuffs
            .get(DebuffType::AccuracyDown)
            .and_then(|d| d.value)
            .unwrap_or(0.0)
            .clamp(0.0, 1.0)
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn current_hp(&self) -> u32 {
        self.current_hp
    }

    fn set_current_hp(&mut self, hp: u32) {
        self.current_hp = hp;
    }

    fn current_mp(&self) -> u32 {
        self.current_mp
    }

    fn set_current_mp(&mut self, mp: u32) {
        self.current_mp = mp;
    }
}
