use serde::{Deserialize, Serialize};

use crate::assets::{ImageCatalog, SpriteInstruction};
use crate::item::{ItemRegistry, PuzzleObjectDef, RegistryError};
use crate::message::Effect;
use crate::player::Player;
use crate::window::DetailWindow;

/// Persisted spawner record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PuzzleObjectData {
    pub x: f64,
    pub y: f64,
    pub puzzle_object_type: String,
}

/// A world-placed, one-time pickup for a puzzle object. The spawner never
/// holds a definition, only its id; it stops rendering and responding the
/// moment the player acquires that id, and stays dormant for the rest of
/// the save-game.
pub struct PuzzleObjectSpawner {
    pub x: f64,
    pub y: f64,
    object_id: String,
    world_image: Option<String>,
    width: f64,
    height: f64,
}

impl PuzzleObjectSpawner {
    pub fn new(x: f64, y: f64, def: &PuzzleObjectDef, catalog: &ImageCatalog) -> Self {
        let world_image = def.world_image.clone();
        let (width, height) = world_image
            .as_deref()
            .map(|key| catalog.size_of(key))
            .unwrap_or((0.0, 0.0));
        Self {
            x,
            y,
            object_id: def.id.clone(),
            world_image,
            width,
            height,
        }
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    #[allow(dead_code)]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[allow(dead_code)]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Axis-aligned half-extent hit test around (x, y).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (x - self.x).abs() <= self.width / 2.0 && (y - self.y).abs() <= self.height / 2.0
    }

    pub fn is_visible(&self, player: &Player) -> bool {
        !player.has_puzzle_object(&self.object_id)
    }

    /// Window to open for a click that hit this spawner, if it should
    /// respond at all: None while collected or out of the player's reach.
    pub fn click_window(&self, player: &Player, registry: &ItemRegistry) -> Option<DetailWindow> {
        if !self.is_visible(player) {
            return None;
        }
        if !player.can_reach(self.x, self.y) {
            return None;
        }
        let def = registry.puzzle_object(&self.object_id)?;
        Some(DetailWindow::for_spawner(def, self.x, self.y))
    }

    /// Transfer the object into the player's inventory (the
    /// non-initializing path: feedback cue plus save).
    pub fn take(&self, player: &mut Player, registry: &ItemRegistry) -> Vec<Effect> {
        match registry.puzzle_object(&self.object_id) {
            Some(def) => player.take_puzzle_object(def, false),
            None => Vec::new(),
        }
    }

    /// World image centered on (x, y); nothing once collected.
    pub fn sprite(&self, player: &Player) -> Option<SpriteInstruction> {
        if !self.is_visible(player) {
            return None;
        }
        let image = self.world_image.clone()?;
        Some(SpriteInstruction {
            image,
            x: self.x - self.width / 2.0,
            y: self.y - self.height / 2.0,
            width: self.width,
            height: self.height,
            mirrored: false,
        })
    }

    pub fn to_data(&self) -> PuzzleObjectData {
        PuzzleObjectData {
            x: self.x,
            y: self.y,
            puzzle_object_type: self.object_id.clone(),
        }
    }

    pub fn from_data(
        data: &PuzzleObjectData,
        registry: &ItemRegistry,
        catalog: &ImageCatalog,
    ) -> Result<Self, RegistryError> {
        let def = registry.require_puzzle_object(&data.puzzle_object_type)?;
        Ok(Self::new(data.x, data.y, def, catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageDef;
    use crate::config::GameConfig;

    fn fixtures() -> (ItemRegistry, ImageCatalog) {
        let mut registry = ItemRegistry::new();
        registry.insert_puzzle_object(PuzzleObjectDef {
            id: "brass_key".to_string(),
            name: "Brass Key".to_string(),
            description: "Heavy, and colder than it should be.".to_string(),
            inventory_image: None,
            world_image: Some("brass_key_world".to_string()),
        });
        let mut config = GameConfig::default();
        config.images = vec![ImageDef {
            key: "brass_key_world".to_string(),
            url: "/assets/brass_key_world.png".to_string(),
            width: 40.0,
            height: 40.0,
        }];
        (registry, ImageCatalog::load_from_config(&config))
    }

    fn spawner(registry: &ItemRegistry, catalog: &ImageCatalog) -> PuzzleObjectSpawner {
        PuzzleObjectSpawner::new(
            50.0,
            50.0,
            registry.puzzle_object("brass_key").unwrap(),
            catalog,
        )
    }

    #[test]
    fn hit_box_derives_from_world_image() {
        let (registry, catalog) = fixtures();
        let spawner = spawner(&registry, &catalog);
        assert_eq!((spawner.width(), spawner.height()), (40.0, 40.0));
        assert!(spawner.contains(55.0, 55.0));
        assert!(spawner.contains(30.0, 70.0));
        assert!(!spawner.contains(71.0, 50.0));
        assert!(!spawner.contains(50.0, 29.0));
    }

    #[test]
    fn visibility_flips_once_on_pickup() {
        let (registry, catalog) = fixtures();
        let spawner = spawner(&registry, &catalog);
        let mut player = Player::new(60.0, 50.0);

        assert!(spawner.is_visible(&player));
        assert!(spawner.sprite(&player).is_some());

        let effects = spawner.take(&mut player, &registry);
        assert!(!effects.is_empty());
        assert!(!spawner.is_visible(&player));
        assert!(spawner.sprite(&player).is_none());

        // Tossing elsewhere would make it visible again; a second take
        // while held stays a no-op.
        assert!(spawner.click_window(&player, &registry).is_none());
    }

    #[test]
    fn click_window_requires_reach() {
        let (registry, catalog) = fixtures();
        let spawner = spawner(&registry, &catalog);

        let near = Player::new(100.0, 0.0);
        let window = spawner.click_window(&near, &registry).unwrap();
        assert_eq!(window.item_id, "brass_key");
        assert_eq!((window.x, window.y), (50.0, 50.0));

        let far = Player::new(400.0, 50.0);
        assert!(spawner.click_window(&far, &registry).is_none());
    }

    #[test]
    fn sprite_is_centered() {
        let (registry, catalog) = fixtures();
        let spawner = spawner(&registry, &catalog);
        let player = Player::new(0.0, 0.0);
        let sprite = spawner.sprite(&player).unwrap();
        assert_eq!(sprite.image, "brass_key_world");
        assert_eq!((sprite.x, sprite.y), (30.0, 30.0));
        assert_eq!((sprite.width, sprite.height), (40.0, 40.0));
    }

    #[test]
    fn data_round_trip() {
        let (registry, catalog) = fixtures();
        let spawner = spawner(&registry, &catalog);
        let data = spawner.to_data();
        assert_eq!(data.puzzle_object_type, "brass_key");

        let restored = PuzzleObjectSpawner::from_data(&data, &registry, &catalog).unwrap();
        assert_eq!(restored.object_id(), "brass_key");
        assert_eq!((restored.x, restored.y), (50.0, 50.0));

        let bad = PuzzleObjectData {
            x: 0.0,
            y: 0.0,
            puzzle_object_type: "moon_door".to_string(),
        };
        assert!(PuzzleObjectSpawner::from_data(&bad, &registry, &catalog).is_err());
    }
}
