//! Crafting: turning gathered materials and gold into catalog items.

use super::catalog;
use super::types::Item;
use crate::character::Character;
use crate::core::error::{ContentError, EngineError, EngineResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CraftingCategory {
    Weaponsmith,
    Armorsmith,
    Alchemy,
    Enchanting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub template_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: CraftingCategory,
    pub level_requirement: u32,
    pub gold_cost: u64,
    pub ingredients: Vec<Ingredient>,
    /// Catalog template of the crafted item
    pub result_template: String,
}

/// Lifetime crafting counts, persisted with the character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftingProgress {
    pub craft_counts: BTreeMap<String, u32>,
    pub total_crafted: u32,
}

impl CraftingProgress {
    pub fn times_crafted(&self, recipe_id: &str) -> u32 {
        self.craft_counts.get(recipe_id).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CraftResult {
    pub character: Character,
    pub item: Item,
}

impl Recipe {
    fn new(id: &str, name: &str, category: CraftingCategory, result_template: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            level_requirement: 1,
            gold_cost: 0,
            ingredients: Vec::new(),
            result_template: result_template.to_string(),
        }
    }

    fn needs_level(mut self, level: u32) -> Self {
        self.level_requirement = level;
        self
    }

    fn costs(mut self, gold: u64) -> Self {
        self.gold_cost = gold;
        self
    }

    fn ingredient(mut self, template_id: &str, quantity: u32) -> Self {
        self.ingredients.push(Ingredient {
            template_id: template_id.to_string(),
            quantity,
        });
        self
    }
}

/// Every built-in recipe, grouped by category.
pub fn recipes() -> Vec<Recipe> {
    use CraftingCategory::*;
    vec![
        Recipe::new("recipe_steel_sword", "Steel Sword", Weaponsmith, "steel_sword")
            .needs_level(3)
            .costs(50)
            .ingredient("iron_ore", 5)
            .ingredient("crystal_shard", 1),
        Recipe::new("recipe_shadow_blade", "Shadow Blade", Weaponsmith, "shadow_blade")
            .needs_level(8)
            .costs(150)
            .ingredient("iron_ore", 8)
            .ingredient("shadow_essence", 5),
        Recipe::new("recipe_chainmail", "Chainmail", Armorsmith, "chainmail")
            .needs_level(4)
            .costs(75)
            .ingredient("iron_ore", 6)
            .ingredient("enchanted_thread", 2),
        Recipe::new("recipe_plate_armor", "Plate Armor", Armorsmith, "plate_armor")
            .needs_level(10)
            .costs(200)
            .ingredient("iron_ore", 10)
            .ingredient("dragon_scale", 3),
        Recipe::new("recipe_mage_robes", "Mage Robes", Armorsmith, "mage_robes")
            .needs_level(6)
            .costs(100)
            .ingredient("enchanted_thread", 4)
            .ingredient("crystal_shard", 3),
        Recipe::new("recipe_health_potion", "Health Potion", Alchemy, "health_potion")
            .needs_level(1)
            .costs(10)
            .ingredient("crystal_shard", 2),
        Recipe::new(
            "recipe_greater_health_potion",
            "Greater Health Potion",
            Alchemy,
            "greater_health_potion",
        )
        .needs_level(5)
        .costs(30)
        .ingredient("crystal_shard", 3)
        .ingredient("enchanted_thread", 2),
        Recipe::new("recipe_antidote", "Antidote", Alchemy, "antidote")
            .needs_level(2)
            .costs(15)
            .ingredient("crystal_shard", 1)
            .ingredient("shadow_essence", 1),
        Recipe::new("recipe_stat_potion", "Stat Potion", Alchemy, "stat_potion")
            .needs_level(4)
            .costs(25)
            .ingredient("shadow_essence", 2)
            .ingredient("crystal_shard", 1),
        Recipe::new("recipe_battle_scroll", "Battle Scroll", Alchemy, "battle_scroll")
            .needs_level(6)
            .costs(40)
            .ingredient("enchanted_thread", 2)
            .ingredient("shadow_essence", 2),
        Recipe::new("recipe_clarity_amulet", "Clarity Amulet", Enchanting, "clarity_amulet")
            .needs_level(5)
            .costs(80)
            .ingredient("crystal_shard", 3)
            .ingredient("enchanted_thread", 1),
        Recipe::new("recipe_ring_of_might", "Ring of Might", Enchanting, "strength_ring")
            .needs_level(5)
            .costs(80)
            .ingredient("iron_ore", 2)
            .ingredient("shadow_essence", 2),
        Recipe::new("recipe_wisdom_pendant", "Wisdom Pendant", Enchanting, "wisdom_pendant")
            .needs_level(7)
            .costs(120)
            .ingredient("crystal_shard", 3)
            .ingredient("enchanted_thread", 2),
        Recipe::new("recipe_swiftfoot_boots", "Swiftfoot Boots", Enchanting, "dexterity_boots")
            .needs_level(6)
            .costs(100)
            .ingredient("enchanted_thread", 2)
            .ingredient("iron_ore", 2)
            .ingredient("crystal_shard", 1),
    ]
}

pub fn find_recipe(recipe_id: &str) -> Option<Recipe> {
    recipes().into_iter().find(|r| r.id == recipe_id)
}

pub fn recipes_in(category: CraftingCategory) -> Vec<Recipe> {
    recipes().into_iter().filter(|r| r.category == category).collect()
}

/// Checks level, then gold, then each ingredient in recipe order.
pub fn can_craft(character: &Character, recipe: &Recipe) -> EngineResult<()> {
    if character.level < recipe.level_requirement {
        return Err(EngineError::LevelTooLow {
            level: character.level,
            required: recipe.level_requirement,
        });
    }
    if character.gold < recipe.gold_cost {
        return Err(EngineError::InsufficientGold {
            have: character.gold,
            need: recipe.gold_cost,
        });
    }
    for ingredient in &recipe.ingredients {
        let have = character.inventory.count_template(&ingredient.template_id);
        if have < ingredient.quantity {
            return Err(EngineError::MissingMaterial {
                template_id: ingredient.template_id.clone(),
                have,
                need: ingredient.quantity,
            });
        }
    }
    Ok(())
}

/// Spends gold and materials and adds the crafted item to the inventory.
///
/// Materials are taken before the result is stored, so a stack they empty
/// frees its slot for the new item. If the result still does not fit the
/// craft is refused and the character is untouched.
pub fn craft(character: &Character, recipe_id: &str, rng: &mut impl Rng) -> EngineResult<CraftResult> {
    let recipe =
        find_recipe(recipe_id).ok_or_else(|| EngineError::UnknownRecipe(recipe_id.to_string()))?;
    if let Err(err) = can_craft(character, &recipe) {
        warn!(recipe = %recipe.id, error = %err, "craft refused");
        return Err(err);
    }
    let item = catalog::find_by_template(&recipe.result_template)
        .ok_or_else(|| ContentError::UnknownItemTemplate(recipe.result_template.clone()))?
        .instance(rng);

    let mut next = character.clone();
    next.gold -= recipe.gold_cost;
    for ingredient in &recipe.ingredients {
        next.inventory.take_template(&ingredient.template_id, ingredient.quantity)?;
    }
    next.inventory.add(item.clone(), 1)?;

    *next.crafting.craft_counts.entry(recipe.id.clone()).or_insert(0) += 1;
    next.crafting.total_crafted = next.crafting.total_crafted.saturating_add(1);
    info!(name = %next.name, recipe = %recipe.id, item = %item.name, "item crafted");

    Ok(CraftResult { character: next, item })
}
