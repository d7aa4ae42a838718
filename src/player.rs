use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::{ImageCatalog, SpriteInstruction};
use crate::hotbar::{Hotbar, HotbarAction, HotbarSlot};
use crate::item::{ItemRegistry, MaterialDef, PotionDef, PuzzleObjectDef, RegistryError};
use crate::message::{Cue, Effect};
use crate::room::{Cauldron, Furnace};

/// Horizontal walk speed in world units per second.
pub const WALK_SPEED: f64 = 500.0;
/// Interaction range: strictly-less-than, horizontal distance only.
pub const REACH_DISTANCE: f64 = 200.0;

pub const DEFAULT_MATERIAL_SLOTS: usize = 6;

const STANDING_IMAGE: &str = "player_standing";
const WALKING_IMAGE: &str = "player_walking";

/// Inventory mutation called with an item the player does not hold.
/// A caller bug, not a gameplay outcome.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("item '{0}' is not held")]
    NotHeld(String),
}

/// Persisted player record. Inventories are stored as registry ids;
/// images are re-resolved from the catalog on load, never persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerData {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    pub held_materials: Vec<String>,
    pub held_puzzle_objects: Vec<String>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_inventory_size: Option<usize>,
}

/// The avatar. Owns both inventories and the hotbar projection; every
/// inventory mutation in the game goes through a method here. World
/// objects (spawners, cauldrons, furnaces) are passed in by the room,
/// and all feedback comes back as Effect values.
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    target_x: f64,
    material_inventory_size: usize,
    materials: Vec<String>,
    puzzle_objects: Vec<String>,
    pub hotbar: Hotbar,
}

impl Player {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            target_x: x,
            material_inventory_size: DEFAULT_MATERIAL_SLOTS,
            materials: Vec::new(),
            puzzle_objects: Vec::new(),
            hotbar: Hotbar::new(),
        }
    }

    pub fn target_x(&self) -> f64 {
        self.target_x
    }

    #[allow(dead_code)]
    pub fn materials(&self) -> &[String] {
        &self.materials
    }

    #[allow(dead_code)]
    pub fn puzzle_objects(&self) -> &[String] {
        &self.puzzle_objects
    }

    #[allow(dead_code)]
    pub fn material_inventory_size(&self) -> usize {
        self.material_inventory_size
    }

    pub fn has_material(&self, id: &str) -> bool {
        self.materials.iter().any(|m| m == id)
    }

    pub fn has_puzzle_object(&self, id: &str) -> bool {
        self.puzzle_objects.iter().any(|o| o == id)
    }

    /// Advance toward target_x, clamped so a step never overshoots.
    /// Returns whether the position changed.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.x == self.target_x {
            return false;
        }
        let step = WALK_SPEED * dt;
        let delta = self.target_x - self.x;
        if delta.abs() <= step {
            self.x = self.target_x;
        } else {
            self.x += step * delta.signum();
        }
        true
    }

    /// Reachability gate for every interaction. Horizontal only; y is
    /// accepted for call-site symmetry but ignored.
    pub fn can_reach(&self, x: f64, _y: f64) -> bool {
        (x - self.x).abs() < REACH_DISTANCE
    }

    pub fn move_to_cursor(&mut self, x: f64) {
        self.target_x = x;
    }

    pub fn take_material(&mut self, def: &MaterialDef, initializing: bool) -> Vec<Effect> {
        if self.materials.len() >= self.material_inventory_size {
            return Effect::rejected("Your satchel is full.");
        }
        if self.has_material(&def.id) {
            return Effect::rejected(format!("You already have some {}.", def.name));
        }
        self.materials.push(def.id.clone());
        self.hotbar.add(HotbarSlot {
            item_id: def.id.clone(),
            name: def.name.clone(),
            image: def.inventory_image.clone(),
            action: HotbarAction::DepositMaterial {
                material_id: def.id.clone(),
            },
        });
        if initializing {
            Vec::new()
        } else {
            vec![Effect::Cue(Cue::Positive), Effect::Save]
        }
    }

    /// Hotbar activation for a held material: try to drop it into the
    /// room's cauldron. Every failure is soft and leaves state unchanged.
    pub fn deposit_material(&mut self, id: &str, cauldron: Option<&mut Cauldron>) -> Vec<Effect> {
        let Some(cauldron) = cauldron else {
            return Effect::rejected("There is no cauldron here.");
        };
        if !self.can_reach(cauldron.x, cauldron.y) {
            return Effect::rejected("The cauldron is too far away.");
        }
        if !self.has_material(id) {
            return Effect::rejected("You are not carrying that.");
        }
        if !cauldron.put_item(id) {
            return Effect::rejected("The cauldron wants none of that.");
        }
        self.materials.retain(|m| m != id);
        self.hotbar.remove(id);
        vec![Effect::Save]
    }

    pub fn take_puzzle_object(&mut self, def: &PuzzleObjectDef, initializing: bool) -> Vec<Effect> {
        if self.has_puzzle_object(&def.id) {
            return Effect::rejected(format!("You already have the {}.", def.name));
        }
        self.puzzle_objects.push(def.id.clone());
        self.hotbar.add(HotbarSlot {
            item_id: def.id.clone(),
            name: def.name.clone(),
            image: def.inventory_image.clone(),
            action: HotbarAction::InspectPuzzleObject {
                object_id: def.id.clone(),
            },
        });
        if initializing {
            Vec::new()
        } else {
            vec![Effect::Cue(Cue::Chime), Effect::Save]
        }
    }

    /// Remove a held puzzle object from inventory and hotbar. Tossing an
    /// object that is not held is a logic error, not a soft failure.
    pub fn toss_puzzle_object(&mut self, id: &str) -> Result<Vec<Effect>, InventoryError> {
        let pos = self
            .puzzle_objects
            .iter()
            .position(|o| o == id)
            .ok_or_else(|| InventoryError::NotHeld(id.to_string()))?;
        self.puzzle_objects.remove(pos);
        self.hotbar.remove(id);
        Ok(vec![Effect::Save])
    }

    /// Offer a held puzzle object to the room's furnace. No furnace is a
    /// soft failure; a rejecting furnace changes nothing; acceptance
    /// removes the object via the toss path.
    pub fn place_puzzle_object(
        &mut self,
        id: &str,
        furnace: Option<&mut Furnace>,
    ) -> Result<Vec<Effect>, InventoryError> {
        if !self.has_puzzle_object(id) {
            return Err(InventoryError::NotHeld(id.to_string()));
        }
        let Some(furnace) = furnace else {
            return Ok(Effect::rejected("There is nowhere to put it."));
        };
        if !furnace.put_object_in(id) {
            return Ok(Vec::new());
        }
        self.toss_puzzle_object(id)
    }

    /// Transform the first held item matching the potion's target type.
    /// Materials are searched before puzzle objects; exactly one slot is
    /// replaced in place. Ok(false) when nothing matches. An unknown
    /// turns_into id is a registry fault and aborts the operation.
    pub fn apply_potion(
        &mut self,
        potion: &PotionDef,
        registry: &ItemRegistry,
    ) -> Result<bool, RegistryError> {
        if let Some(pos) = self.materials.iter().position(|m| m == &potion.applies_to) {
            let def = registry.require_material(&potion.turns_into)?;
            self.materials[pos] = def.id.clone();
            self.hotbar.replace(
                &potion.applies_to,
                HotbarSlot {
                    item_id: def.id.clone(),
                    name: def.name.clone(),
                    image: def.inventory_image.clone(),
                    action: HotbarAction::DepositMaterial {
                        material_id: def.id.clone(),
                    },
                },
            );
            return Ok(true);
        }
        if let Some(pos) = self
            .puzzle_objects
            .iter()
            .position(|o| o == &potion.applies_to)
        {
            let def = registry.require_puzzle_object(&potion.turns_into)?;
            self.puzzle_objects[pos] = def.id.clone();
            self.hotbar.replace(
                &potion.applies_to,
                HotbarSlot {
                    item_id: def.id.clone(),
                    name: def.name.clone(),
                    image: def.inventory_image.clone(),
                    action: HotbarAction::InspectPuzzleObject {
                        object_id: def.id.clone(),
                    },
                },
            );
            return Ok(true);
        }
        Ok(false)
    }

    pub fn to_data(&self) -> PlayerData {
        PlayerData {
            x: self.x,
            y: self.y,
            z: self.z,
            held_materials: self.materials.clone(),
            held_puzzle_objects: self.puzzle_objects.clone(),
            material_inventory_size: Some(self.material_inventory_size),
        }
    }

    /// Rebuild a player from a save record. Every stored id must resolve
    /// against the registry; an unknown id aborts the load. The hotbar is
    /// rebuilt through the initializing take paths (no cues, no save).
    pub fn from_data(data: &PlayerData, registry: &ItemRegistry) -> Result<Self, RegistryError> {
        let mut player = Player::new(data.x, data.y);
        player.z = data.z;
        if let Some(size) = data.material_inventory_size {
            player.material_inventory_size = size;
        }
        for id in &data.held_materials {
            let def = registry.require_material(id)?;
            player.take_material(def, true);
        }
        for id in &data.held_puzzle_objects {
            let def = registry.require_puzzle_object(id)?;
            player.take_puzzle_object(def, true);
        }
        Ok(player)
    }

    /// Resolve the avatar's draw call: walking sprite while moving,
    /// mirrored when headed left, anchored bottom-center on (x, y).
    pub fn sprite(&self, catalog: &ImageCatalog) -> SpriteInstruction {
        let walking = self.x != self.target_x;
        let key = if walking { WALKING_IMAGE } else { STANDING_IMAGE };
        let (width, height) = catalog.size_of(key);
        SpriteInstruction {
            image: key.to_string(),
            x: self.x - width / 2.0,
            y: self.y - height,
            width,
            height,
            mirrored: self.target_x < self.x,
        }
    }
}
