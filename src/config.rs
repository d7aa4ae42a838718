use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::assets::ImageDef;
use crate::item::{MaterialDef, PotionDef, PuzzleObjectDef};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSpawnConfig {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnerConfig {
    pub x: f64,
    pub y: f64,
    pub puzzle_object: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub accepts: Vec<String>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,  // ImageCatalog key
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub images: Vec<ImageDef>,
    #[serde(default)]
    pub materials: Vec<MaterialDef>,
    #[serde(default)]
    pub puzzle_objects: Vec<PuzzleObjectDef>,
    #[serde(default)]
    pub potions: Vec<PotionDef>,
    #[serde(default)]
    pub spawners: Vec<SpawnerConfig>,
    #[serde(default)]
    pub cauldron: Option<StationConfig>,
    #[serde(default)]
    pub furnace: Option<StationConfig>,
    #[serde(default)]
    pub player_spawn: Option<PlayerSpawnConfig>,
}

impl GameConfig {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: GameConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Seed content for a first run, written out so it can be edited.
pub fn create_default_config() -> GameConfig {
    let image = |key: &str, width: f64, height: f64| ImageDef {
        key: key.to_string(),
        url: format!("/assets/{}.png", key),
        width,
        height,
    };

    GameConfig {
        images: vec![
            image("player_standing", 60.0, 120.0),
            image("player_walking", 60.0, 120.0),
            image("brass_key_world", 40.0, 40.0),
            image("brass_key_inv", 32.0, 32.0),
            image("mill_gear_world", 48.0, 48.0),
            image("mill_gear_inv", 32.0, 32.0),
            image("iron_key_inv", 32.0, 32.0),
            image("wood_inv", 32.0, 32.0),
            image("nightshade_inv", 32.0, 32.0),
            image("river_stone_inv", 32.0, 32.0),
            image("cauldron", 80.0, 70.0),
            image("furnace", 90.0, 110.0),
        ],
        materials: vec![
            MaterialDef {
                id: "wood".to_string(),
                name: "Wood".to_string(),
                inventory_image: Some("wood_inv".to_string()),
            },
            MaterialDef {
                id: "nightshade".to_string(),
                name: "Nightshade".to_string(),
                inventory_image: Some("nightshade_inv".to_string()),
            },
            MaterialDef {
                id: "river_stone".to_string(),
                name: "River Stone".to_string(),
                inventory_image: Some("river_stone_inv".to_string()),
            },
        ],
        puzzle_objects: vec![
            PuzzleObjectDef {
                id: "brass_key".to_string(),
                name: "Brass Key".to_string(),
                description: "Heavy, and colder than it should be.".to_string(),
                inventory_image: Some("brass_key_inv".to_string()),
                world_image: Some("brass_key_world".to_string()),
            },
            PuzzleObjectDef {
                id: "mill_gear".to_string(),
                name: "Mill Gear".to_string(),
                description: "Teeth worn smooth on one side.".to_string(),
                inventory_image: Some("mill_gear_inv".to_string()),
                world_image: Some("mill_gear_world".to_string()),
            },
            PuzzleObjectDef {
                id: "iron_key".to_string(),
                name: "Iron Key".to_string(),
                description: "The rust flakes off in your pocket.".to_string(),
                inventory_image: Some("iron_key_inv".to_string()),
                world_image: None,
            },
        ],
        potions: vec![PotionDef {
            id: "potion_of_rust".to_string(),
            name: "Potion of Rust".to_string(),
            applies_to: "brass_key".to_string(),
            turns_into: "iron_key".to_string(),
        }],
        spawners: vec![
            SpawnerConfig {
                x: 250.0,
                y: 420.0,
                puzzle_object: "brass_key".to_string(),
            },
            SpawnerConfig {
                x: 820.0,
                y: 380.0,
                puzzle_object: "mill_gear".to_string(),
            },
        ],
        cauldron: Some(StationConfig {
            x: 560.0,
            y: 440.0,
            accepts: vec![
                "wood".to_string(),
                "nightshade".to_string(),
                "river_stone".to_string(),
            ],
            image: Some("cauldron".to_string()),
        }),
        furnace: Some(StationConfig {
            x: 1040.0,
            y: 430.0,
            accepts: vec!["mill_gear".to_string()],
            image: Some("furnace".to_string()),
        }),
        player_spawn: Some(PlayerSpawnConfig { x: 120.0, y: 460.0 }),
    }
}
