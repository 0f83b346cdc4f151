//! Battle - a seeded encounter driving the resolvers turn by turn
//!
//! A turn is: the player acts, every living enemy acts, then the status
//! ledgers of the player and all enemies tick. The same seed and the same
//! sequence of player actions reproduce the same battle.

use crate::combat::{ActionResult, CombatEngine};
use crate::entity::{Combatant, Enemy, Player};
use crate::types::PlayerAction;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Ongoing,
    Victory,
    Defeat,
}

/// One line of the battle log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum LogEntry {
    Action { turn: u32, result: ActionResult },
    Status { turn: u32, message: String },
}

impl LogEntry {
    pub fn message(&self) -> &str {
        match self {
            LogEntry::Action { result, .. } => &result.message,
            LogEntry::Status { message, .. } => message,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Battle {
    player: Player,
    enemies: Vec<Enemy>,
    rng: ChaCha8Rng,
    turn: u32,
    log: Vec<LogEntry>,
}

impl Battle {
    /// Start a battle
    ///
    /// Once-per-battle usage is cleared; active buffs carry over.
    pub fn new(mut player: Player, enemies: Vec<Enemy>, seed: u64) -> Self {
        player.reset_for_battle();
        debug!(seed, enemies = enemies.len(), "battle started");
        Battle {
            player,
            enemies,
            rng: ChaCha8Rng::seed_from_u64(seed),
            turn: 1,
            log: Vec::new(),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Export the accumulated log as JSON
    pub fn log_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.log)
    }

    pub fn outcome(&self) -> BattleOutcome {
        if !self.player.is_alive() {
            BattleOutcome::Defeat
        } else if self.enemies.iter().all(|e| !e.is_alive()) {
            BattleOutcome::Victory
        } else {
            BattleOutcome::Ongoing
        }
    }

    /// Resolve the player's action; does nothing once the battle is decided
    pub fn player_turn(
        &mut self,
        engine: &CombatEngine<'_>,
        action: &PlayerAction,
    ) -> Vec<ActionResult> {
        if self.outcome() != BattleOutcome::Ongoing {
            return Vec::new();
        }
        let results = engine.resolve_player_action(
            &mut self.player,
            &mut self.enemies,
            action,
            &mut self.rng,
        );
        self.record(&results);
        results
    }

    /// Every living enemy acts in order, stopping if the player falls
    pub fn enemy_phase(&mut self, engine: &CombatEngine<'_>) -> Vec<ActionResult> {
        let mut results = Vec::new();
        for enemy in self.enemies.iter_mut() {
            if !enemy.is_alive() || !self.player.is_alive() {
                continue;
            }
            results.extend(engine.resolve_enemy_action(enemy, &mut self.player, &mut self.rng));
        }
        self.record(&results);
        results
    }

    /// Tick every ledger and advance the turn counter
    pub fn end_turn(&mut self, engine: &CombatEngine<'_>) -> Vec<String> {
        let messages = engine.tick_all(&mut self.player, &mut self.enemies);
        self.log.extend(messages.iter().map(|message| LogEntry::Status {
            turn: self.turn,
            message: message.clone(),
        }));
        debug!(turn = self.turn, outcome = ?self.outcome(), "turn ended");
        self.turn += 1;
        messages
    }

    /// Play a full turn and report the outcome afterwards
    pub fn run_turn(&mut self, engine: &CombatEngine<'_>, action: &PlayerAction) -> BattleOutcome {
        self.player_turn(engine, action);
        if self.outcome() == BattleOutcome::Ongoing {
            self.enemy_phase(engine);
        }
        self.end_turn(engine);
        self.outcome()
    }

    /// End the battle, handing back the combatants
    pub fn into_parts(self) -> (Player, Vec<Enemy>) {
        (self.player, self.enemies)
    }

    fn record(&mut self, results: &[ActionResult]) {
        let turn = self.turn;
        self.log.extend(results.iter().map(|result| LogEntry::Action {
            turn,
            result: result.clone(),
        }));
    }
}
