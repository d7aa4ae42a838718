use std::collections::HashMap;
use thiserror::Error;

use super::def::{MaterialDef, PotionDef, PuzzleObjectDef};

/// Lookup failure against the fixed registry. Fatal to the operation that
/// needed the definition (save restore, potion reverse-lookup); gameplay
/// paths use the Option getters instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown {kind} id '{id}'")]
    UnknownItem { kind: &'static str, id: String },
}

/// Fixed mapping from string id to immutable definition, built once from
/// config and shared by reference everywhere. Inventories and save files
/// store ids, never definitions.
pub struct ItemRegistry {
    materials: HashMap<String, MaterialDef>,
    puzzle_objects: HashMap<String, PuzzleObjectDef>,
    potions: HashMap<String, PotionDef>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            puzzle_objects: HashMap::new(),
            potions: HashMap::new(),
        }
    }

    pub fn load_from_config(config: &crate::config::GameConfig) -> Self {
        let mut registry = Self::new();
        for def in &config.materials {
            registry.materials.insert(def.id.clone(), def.clone());
        }
        for def in &config.puzzle_objects {
            registry.puzzle_objects.insert(def.id.clone(), def.clone());
        }
        for def in &config.potions {
            registry.potions.insert(def.id.clone(), def.clone());
        }
        registry
    }

    pub fn material(&self, id: &str) -> Option<&MaterialDef> {
        self.materials.get(id)
    }

    pub fn puzzle_object(&self, id: &str) -> Option<&PuzzleObjectDef> {
        self.puzzle_objects.get(id)
    }

    pub fn potion(&self, id: &str) -> Option<&PotionDef> {
        self.potions.get(id)
    }

    pub fn require_material(&self, id: &str) -> Result<&MaterialDef, RegistryError> {
        self.materials.get(id).ok_or_else(|| RegistryError::UnknownItem {
            kind: "material",
            id: id.to_string(),
        })
    }

    pub fn require_puzzle_object(&self, id: &str) -> Result<&PuzzleObjectDef, RegistryError> {
        self.puzzle_objects
            .get(id)
            .ok_or_else(|| RegistryError::UnknownItem {
                kind: "puzzle object",
                id: id.to_string(),
            })
    }

    #[cfg(test)]
    pub fn insert_material(&mut self, def: MaterialDef) {
        self.materials.insert(def.id.clone(), def);
    }

    #[cfg(test)]
    pub fn insert_puzzle_object(&mut self, def: PuzzleObjectDef) {
        self.puzzle_objects.insert(def.id.clone(), def);
    }

    #[cfg(test)]
    pub fn insert_potion(&mut self, def: PotionDef) {
        self.potions.insert(def.id.clone(), def);
    }
}
