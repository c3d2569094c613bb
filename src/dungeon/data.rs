//! Built-in dungeons.

use super::types::{Dungeon, DungeonFloor};
use crate::core::error::ContentError;
use crate::encounters::Bestiary;
use std::collections::HashSet;

pub const FOREST_CRYPT: &str = "dungeon_forest_crypt";
pub const SHADOW_MINE: &str = "dungeon_shadow_mine";
pub const FROZEN_CAVERN: &str = "dungeon_frozen_cavern";

pub fn forest_crypt() -> Dungeon {
    Dungeon {
        id: FOREST_CRYPT.to_string(),
        name: "Forest Crypt".to_string(),
        description: "An ancient crypt beneath the forest floor, overrun by moss and shadow."
            .to_string(),
        floors: vec![
            DungeonFloor::new("forest_crypt_f1", 1, "moss_goblin")
                .with_flavor("Damp stone corridors stretch before you..."),
            DungeonFloor::new("forest_crypt_f2", 2, "cave_spider")
                .with_flavor("Webs cover every surface..."),
            DungeonFloor::new("forest_crypt_f3", 3, "bark_sentinel")
                .boss()
                .with_flavor("A massive wooden guardian blocks the exit!"),
        ],
        energy_cost: 3,
        level_requirement: 3,
    }
}

pub fn shadow_mine() -> Dungeon {
    Dungeon {
        id: SHADOW_MINE.to_string(),
        name: "Shadow Mine".to_string(),
        description: "An abandoned mine infested with dark creatures and corrupted soldiers."
            .to_string(),
        floors: vec![
            DungeonFloor::new("shadow_mine_f1", 1, "shadow_stalker")
                .with_flavor("The mine shaft descends into darkness..."),
            DungeonFloor::new("shadow_mine_f2", 2, "frost_imp")
                .with_flavor("Frozen crystals line the walls..."),
            DungeonFloor::new("shadow_mine_f3", 3, "corrupted_knight")
                .with_flavor("An armored figure guards a narrow passage..."),
            DungeonFloor::new("shadow_mine_f4", 4, "crystal_golem")
                .with_flavor("The cavern glows with crystalline light..."),
            DungeonFloor::new("shadow_mine_f5", 5, "shadow_stalker")
                .boss()
                .with_flavor("The pack alpha emerges from the dark!"),
        ],
        energy_cost: 4,
        level_requirement: 6,
    }
}

pub fn frozen_cavern() -> Dungeon {
    Dungeon {
        id: FROZEN_CAVERN.to_string(),
        name: "Frozen Cavern".to_string(),
        description: "A cavern of eternal ice ruled by Glaciara.".to_string(),
        floors: vec![
            DungeonFloor::new("frozen_cavern_f1", 1, "ice_revenant")
                .with_flavor("Bitter cold cuts through your armor..."),
            DungeonFloor::new("frozen_cavern_f2", 2, "storm_harpy")
                .with_flavor("Wind howls through icy tunnels..."),
            DungeonFloor::new("frozen_cavern_f3", 3, "bone_construct")
                .with_flavor("Frozen bones animate in the darkness..."),
            DungeonFloor::new("frozen_cavern_f4", 4, "plague_bearer")
                .with_flavor("A noxious fog fills the chamber..."),
            DungeonFloor::new("frozen_cavern_f5", 5, "boss_glaciara")
                .boss()
                .with_flavor("Glaciara waits on her frozen throne!"),
        ],
        energy_cost: 5,
        level_requirement: 10,
    }
}

/// The set of dungeons an engine offers.
#[derive(Debug, Clone)]
pub struct DungeonCatalog {
    dungeons: Vec<Dungeon>,
}

impl DungeonCatalog {
    pub fn standard() -> Self {
        Self {
            dungeons: vec![forest_crypt(), shadow_mine(), frozen_cavern()],
        }
    }

    pub fn from_dungeons(dungeons: Vec<Dungeon>) -> Self {
        Self { dungeons }
    }

    pub fn all(&self) -> &[Dungeon] {
        &self.dungeons
    }

    pub fn get(&self, id: &str) -> Result<&Dungeon, ContentError> {
        self.dungeons
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| ContentError::UnknownDungeon(id.to_string()))
    }

    /// Dungeons a character of `level` may enter.
    pub fn available_for(&self, level: u32) -> Vec<&Dungeon> {
        self.dungeons
            .iter()
            .filter(|d| d.level_requirement <= level)
            .collect()
    }

    /// Every dungeon has floors, ids are unique, and every floor names a
    /// template the bestiary knows.
    pub fn validate(&self, bestiary: &Bestiary) -> Result<(), ContentError> {
        let mut seen = HashSet::new();
        for dungeon in &self.dungeons {
            if !seen.insert(dungeon.id.as_str()) {
                return Err(ContentError::DuplicateId(dungeon.id.clone()));
            }
            if dungeon.floors.is_empty() {
                return Err(ContentError::EmptyDungeon(dungeon.id.clone()));
            }
            for floor in &dungeon.floors {
                bestiary.get(&floor.enemy_template_id)?;
            }
        }
        Ok(())
    }
}

impl Default for DungeonCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
