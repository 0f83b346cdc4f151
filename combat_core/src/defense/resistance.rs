//! Resistance - elemental weakness and resistance multipliers
//!
//! Formula:
//! - weak: damage * weak_multiplier (1.5 by default)
//! - resist: damage * resist_multiplier (0.5 by default)
//! - neutral or no element: damage * 1.0
//!
//! The multiplier is applied to the pre-floor skill damage.

use crate::config::ElementConstants;
use crate::types::{Affinity, Element};
use std::collections::BTreeMap;

/// Per-element affinity of a combatant; missing elements are neutral
pub type ResistanceTable = BTreeMap<Element, Affinity>;

/// Outcome of checking a skill's element against a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementalModifier {
    pub multiplier: f64,
    pub affinity: Affinity,
    pub element: Option<Element>,
}

impl ElementalModifier {
    pub fn neutral() -> Self {
        ElementalModifier {
            multiplier: 1.0,
            affinity: Affinity::Neutral,
            element: None,
        }
    }

    /// Whether a weakness raised the damage
    pub fn is_weakness(&self) -> bool {
        self.affinity == Affinity::Weak
    }

    /// Log suffix, e.g. "fire weakness exploited"
    pub fn note(&self) -> Option<String> {
        let element = self.element?;
        match self.affinity {
            Affinity::Weak => Some(format!("{element} weakness exploited")),
            Affinity::Resist => Some(format!("{element} resisted")),
            Affinity::Neutral => None,
        }
    }
}

/// Resolve the damage multiplier for an element against a resistance table
pub fn resolve_element(
    element: Option<Element>,
    table: &ResistanceTable,
    constants: &ElementConstants,
) -> ElementalModifier {
    let Some(element) = element else {
        return ElementalModifier::neutral();
    };

    let affinity = table.get(&element).copied().unwrap_or_default();
    let multiplier = match affinity {
        Affinity::Weak => constants.weak_multiplier,
        Affinity::Resist => constants.resist_multiplier,
        Affinity::Neutral => 1.0,
    };

    ElementalModifier {
        multiplier,
        affinity,
        element: Some(element),
    }
}
