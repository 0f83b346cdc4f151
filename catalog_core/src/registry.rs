//! Catalog registry - loads skills, items and enemy templates from a directory

use crate::config::{CatalogFileConfig, EnemyConfig};
use crate::{ConfigError, SpawnError};
use combat_core::{Enemy, Skill, SkillLookup};
use item_core::{Item, ItemCatalog, ItemDef, ItemFactory};
use rand::RngCore;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Every skill, item and enemy template known to the game
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    skills: HashMap<String, Skill>,
    items: ItemCatalog,
    enemies: HashMap<String, EnemyConfig>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all .toml files from a directory (recursive)
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        catalog.load_dir(dir)?;
        catalog.validate()?;
        debug!(
            skills = catalog.skills.len(),
            items = catalog.items.len(),
            enemies = catalog.enemies.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse a single TOML document
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        catalog.absorb(toml_str, None)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn load_dir(&mut self, dir: &Path) -> Result<(), ConfigError> {
        let entries = fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            let path = entry.path();

            if path.is_dir() {
                self.load_dir(&path)?;
            } else if path.extension().is_some_and(|ext| ext == "toml") {
                self.load_file(&path)?;
            }
        }

        Ok(())
    }

    fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        debug!(path = %path.display(), "loading catalog file");
        self.absorb(&content, Some(path))
    }

    fn absorb(&mut self, content: &str, path: Option<&Path>) -> Result<(), ConfigError> {
        let validation = |message: String| ConfigError::Validation {
            message,
            path: path.map(Path::to_path_buf),
        };

        let config: CatalogFileConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            error: e,
            path: path.map(Path::to_path_buf),
        })?;

        for skill_config in config.skills {
            let skill = Skill::try_from(skill_config).map_err(|e| validation(e.to_string()))?;
            if self.skills.contains_key(&skill.id) {
                return Err(validation(format!("Duplicate skill id: {}", skill.id)));
            }
            self.skills.insert(skill.id.clone(), skill);
        }

        for item_config in config.items {
            self.items
                .insert(ItemDef::from(item_config))
                .map_err(|e| validation(e.to_string()))?;
        }

        for enemy in config.enemies {
            if enemy.id.is_empty() {
                return Err(validation("enemy with empty id".to_string()));
            }
            if self.enemies.contains_key(&enemy.id) {
                return Err(validation(format!("Duplicate enemy id: {}", enemy.id)));
            }
            self.enemies.insert(enemy.id.clone(), enemy);
        }

        Ok(())
    }

    /// Cross-file checks, run once everything is loaded
    fn validate(&self) -> Result<(), ConfigError> {
        for enemy in self.enemies.values() {
            if let Some(missing) = enemy.skills.iter().find(|id| !self.skills.contains_key(*id)) {
                return Err(ConfigError::Validation {
                    message: format!("Enemy '{}' references unknown skill '{}'", enemy.id, missing),
                    path: None,
                });
            }
        }
        for skill in self.skills.values() {
            let pools = skill
                .offensive()
                .into_iter()
                .flat_map(|o| o.item_steal.iter().flat_map(|s| s.item_pool.iter()));
            let finds = skill
                .heal()
                .and_then(|h| h.item_find.as_ref())
                .map(|f| &f.item_id);
            if let Some(missing) = pools.chain(finds).find(|id| !self.items.contains(id)) {
                return Err(ConfigError::Validation {
                    message: format!("Skill '{}' references unknown item '{}'", skill.id, missing),
                    path: None,
                });
            }
        }
        Ok(())
    }

    pub fn get_skill(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    pub fn get_enemy(&self, id: &str) -> Option<&EnemyConfig> {
        self.enemies.get(id)
    }

    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    /// List all skill ids
    pub fn skill_ids(&self) -> impl Iterator<Item = &str> {
        self.skills.keys().map(|s| s.as_str())
    }

    /// List all enemy template ids
    pub fn enemy_ids(&self) -> impl Iterator<Item = &str> {
        self.enemies.keys().map(|s| s.as_str())
    }

    /// Build a fresh enemy at full HP and MP from its template
    pub fn spawn_enemy(&self, id: &str) -> Result<Enemy, SpawnError> {
        let template = self
            .enemies
            .get(id)
            .ok_or_else(|| SpawnError::UnknownEnemy(id.to_string()))?;

        let skills = template
            .skills
            .iter()
            .map(|skill_id| {
                self.skills
                    .get(skill_id)
                    .cloned()
                    .ok_or_else(|| SpawnError::UnknownSkill {
                        enemy: template.id.clone(),
                        skill: skill_id.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut enemy = Enemy::new(template.id.clone(), template.name.clone(), template.stats)
            .with_skills(skills);
        enemy.resistances = template.resistances.clone();
        Ok(enemy)
    }
}

impl SkillLookup for Catalog {
    fn skill(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }
}

impl ItemFactory for Catalog {
    fn create_instance(&self, item_id: &str, rng: &mut dyn RngCore) -> Option<Item> {
        self.items.create_instance(item_id, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::types::{Affinity, Element};
    use combat_core::{
        CombatConstants, CombatEngine, Combatant, Player, PlayerAction, StandardStats, Stats,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    const SKILLS: &str = r#"
[[skills]]
id = "s_bite"
name = "Bite"
category = "attack"
mp_cost = 2
power = 1.5

[[skills]]
id = "s_mug"
name = "Mug"
category = "attack"
mp_cost = 0
power = 1.0

[skills.item_steal]
item_pool = ["i_herb"]
chance = 1.0
"#;

    const ITEMS: &str = r#"
[[items]]
id = "i_herb"
name = "Herb"
kind = "consumable"
hp_recovery = 30
"#;

    const ENEMIES: &str = r#"
[[enemies]]
id = "e_wolf"
name = "Wolf"
skills = ["s_bite"]

[enemies.stats]
max_hp = 25
max_mp = 4
attack = 8
defense = 3

[enemies.resistances]
fire = "weak"
ice = "resist"
"#;

    #[test]
    fn test_load_recursive() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("monsters");
        fs::create_dir(&nested).unwrap();

        create_test_file(dir.path(), "skills.toml", SKILLS);
        create_test_file(dir.path(), "items.toml", ITEMS);
        create_test_file(&nested, "wolves.toml", ENEMIES);
        create_test_file(dir.path(), "notes.txt", "not a catalog");

        let catalog = Catalog::load(dir.path()).unwrap();

        assert!(catalog.get_skill("s_bite").is_some());
        assert!(catalog.items().contains("i_herb"));
        assert_eq!(catalog.get_enemy("e_wolf").unwrap().name, "Wolf");
        assert_eq!(catalog.enemy_ids().count(), 1);
        assert_eq!(catalog.skill_ids().count(), 2);
    }

    #[test]
    fn test_duplicate_skill_across_files() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "a.toml", SKILLS);
        create_test_file(dir.path(), "b.toml", SKILLS);
        create_test_file(dir.path(), "items.toml", ITEMS);

        let err = Catalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { path: Some(_), .. }));
        assert!(err.to_string().contains("Duplicate skill id"));
    }

    #[test]
    fn test_parse_error_carries_path() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(dir.path(), "broken.toml", "[[skills]\nid = ");

        match Catalog::load(dir.path()) {
            Err(ConfigError::Parse { path: Some(p), .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_dir_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = Catalog::load(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_enemy_unknown_skill_rejected() {
        let err = Catalog::parse(ENEMIES).unwrap_err();
        assert!(err.to_string().contains("unknown skill 's_bite'"));
    }

    #[test]
    fn test_skill_unknown_item_rejected() {
        let err = Catalog::parse(SKILLS).unwrap_err();
        assert!(err.to_string().contains("unknown item 'i_herb'"));
    }

    #[test]
    fn test_invalid_skill_reports_validation() {
        let err = Catalog::parse(
            r#"
[[skills]]
id = "s_odd"
name = "Odd"
category = "magic"

[[skills.debuffs]]
kind = "stun"
chance = 1.5
duration = 2
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { path: None, .. }));
    }

    #[test]
    fn test_spawn_enemy() {
        let catalog = Catalog::parse(&format!("{SKILLS}{ITEMS}{ENEMIES}")).unwrap();

        let wolf = catalog.spawn_enemy("e_wolf").unwrap();
        assert_eq!(wolf.current_hp, 25);
        assert_eq!(wolf.current_mp, 4);
        assert_eq!(wolf.skills.len(), 1);
        assert_eq!(wolf.resistances.get(&Element::Fire), Some(&Affinity::Weak));

        let err = catalog.spawn_enemy("e_dragon").unwrap_err();
        assert!(matches!(err, SpawnError::UnknownEnemy(id) if id == "e_dragon"));
    }

    #[test]
    fn test_catalog_drives_engine() {
        let catalog = Catalog::parse(&format!("{SKILLS}{ITEMS}{ENEMIES}")).unwrap();
        let constants = CombatConstants::default();
        let engine =
            CombatEngine::new(&StandardStats, &catalog, &catalog).with_constants(&constants);

        let mut player = Player::new("hero", "Hero", Stats::new(50, 10, 12, 4))
            .with_skill(catalog.get_skill("s_mug").unwrap().clone());
        let mut enemies = vec![catalog.spawn_enemy("e_wolf").unwrap()];
        let mut rng = StdRng::seed_from_u64(12345);

        let results = engine.resolve_player_action(
            &mut player,
            &mut enemies,
            &PlayerAction::skill("s_mug", Some(0)),
            &mut rng,
        );

        assert!(results
            .iter()
            .any(|r| r.item_stolen.as_ref().is_some_and(|i| i.id() == "i_herb")));
        assert!(player.inventory.iter().any(|i| i.id() == "i_herb"));
        assert!(enemies[0].current_hp() < 25);
    }
}
