//! Combatants - the player and enemies resolvers act on

mod enemy;
mod player;

pub use enemy::Enemy;
pub use player::{Equipment, Player};

/// Shared pool access for anything that can take damage or be healed
pub trait Combatant {
    fn name(&self) -> &str;
    fn current_hp(&self) -> u32;
    fn set_current_hp(&mut self, hp: u32);
    fn current_mp(&self) -> u32;
    fn set_current_mp(&mut self, mp: u32);

    fn is_alive(&self) -> bool {
        self.current_hp() > 0
    }
}
