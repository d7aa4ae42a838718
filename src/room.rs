use crate::assets::ImageCatalog;
use crate::item::ItemRegistry;
use crate::message::{Cue, Effect, PlayerCommand};
use crate::player::Player;
use crate::save::SaveFile;
use crate::spawner::PuzzleObjectSpawner;
use crate::window::{DetailWindow, WindowAction};

/// Brewing station. Puzzle mechanics live elsewhere; the room only models
/// the deposit interface the player talks to.
pub struct Cauldron {
    pub x: f64,
    pub y: f64,
    pub image: Option<String>,  // ImageCatalog key
    accepts: Vec<String>,
    pub contents: Vec<String>,
}

impl Cauldron {
    pub fn new(x: f64, y: f64, accepts: Vec<String>) -> Self {
        Self {
            x,
            y,
            image: None,
            accepts,
            contents: Vec::new(),
        }
    }

    pub fn put_item(&mut self, material_id: &str) -> bool {
        if !self.accepts.iter().any(|a| a == material_id) {
            return false;
        }
        self.contents.push(material_id.to_string());
        true
    }
}

/// Smelting station, same shape as the cauldron but fed puzzle objects.
pub struct Furnace {
    pub x: f64,
    pub y: f64,
    pub image: Option<String>,  // ImageCatalog key
    accepts: Vec<String>,
    pub contents: Vec<String>,
}

impl Furnace {
    pub fn new(x: f64, y: f64, accepts: Vec<String>) -> Self {
        Self {
            x,
            y,
            image: None,
            accepts,
            contents: Vec::new(),
        }
    }

    pub fn put_object_in(&mut self, object_id: &str) -> bool {
        if !self.accepts.iter().any(|a| a == object_id) {
            return false;
        }
        self.contents.push(object_id.to_string());
        true
    }
}

/// The playable scene: one avatar, the world objects around it, and the
/// single open detail window. All input lands here as PlayerCommand
/// values and is dispatched to the owning entity; the room itself never
/// mutates an inventory directly.
pub struct Room {
    pub registry: ItemRegistry,
    pub catalog: ImageCatalog,
    pub player: Player,
    pub spawners: Vec<PuzzleObjectSpawner>,
    pub cauldron: Option<Cauldron>,
    pub furnace: Option<Furnace>,
    pub window: Option<DetailWindow>,
}

impl Room {
    pub fn new(registry: ItemRegistry, catalog: ImageCatalog, player: Player) -> Self {
        Self {
            registry,
            catalog,
            player,
            spawners: Vec::new(),
            cauldron: None,
            furnace: None,
            window: None,
        }
    }

    /// Advance the frame. Returns whether anything moved.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.player.tick(dt)
    }

    pub fn handle_command(&mut self, cmd: &PlayerCommand) -> Vec<Effect> {
        match cmd.action.as_str() {
            "click" => match (cmd.x, cmd.y) {
                (Some(x), Some(y)) => self.handle_click(x, y),
                _ => Vec::new(),
            },
            "activate" => match cmd.slot {
                Some(slot) => self.activate_slot(slot),
                None => Vec::new(),
            },
            "window_take" => self.window_action(WindowAction::Take),
            "window_toss" => self.window_action(WindowAction::Toss),
            "window_place" => self.window_action(WindowAction::Place),
            "apply_potion" => match cmd.object.as_deref() {
                Some(id) => self.apply_potion(id),
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Route a world click: a visible spawner under the cursor gets first
    /// refusal; anything else closes the window and walks the avatar.
    fn handle_click(&mut self, x: f64, y: f64) -> Vec<Effect> {
        let hit = self
            .spawners
            .iter()
            .find(|s| s.contains(x, y) && s.is_visible(&self.player));
        if let Some(spawner) = hit {
            if let Some(window) = spawner.click_window(&self.player, &self.registry) {
                self.window = Some(window);
            }
            return Vec::new();
        }
        self.window = None;
        self.player.move_to_cursor(x);
        Vec::new()
    }

    fn activate_slot(&mut self, index: usize) -> Vec<Effect> {
        let Some(action) = self.player.hotbar.action_for_slot(index).cloned() else {
            return Vec::new();
        };
        match action {
            crate::hotbar::HotbarAction::DepositMaterial { material_id } => self
                .player
                .deposit_material(&material_id, self.cauldron.as_mut()),
            crate::hotbar::HotbarAction::InspectPuzzleObject { object_id } => {
                if let Some(def) = self.registry.puzzle_object(&object_id) {
                    self.window =
                        Some(DetailWindow::for_inventory(def, self.player.x, self.player.y));
                }
                Vec::new()
            }
        }
    }

    /// Resolve a detail-window button press against the open window.
    /// The window closes regardless of how the action turns out.
    fn window_action(&mut self, action: WindowAction) -> Vec<Effect> {
        let Some(window) = self.window.take() else {
            return Vec::new();
        };
        if !window.allows(action) {
            return Vec::new();
        }
        match action {
            WindowAction::Take => {
                let spawner = self
                    .spawners
                    .iter()
                    .find(|s| s.object_id() == window.item_id && s.is_visible(&self.player));
                match spawner {
                    Some(spawner) => spawner.take(&mut self.player, &self.registry),
                    None => Vec::new(),
                }
            }
            WindowAction::Toss => match self.player.toss_puzzle_object(&window.item_id) {
                Ok(effects) => effects,
                Err(err) => {
                    log::warn!("toss from window: {err}");
                    Vec::new()
                }
            },
            WindowAction::Place => {
                match self
                    .player
                    .place_puzzle_object(&window.item_id, self.furnace.as_mut())
                {
                    Ok(effects) => effects,
                    Err(err) => {
                        log::warn!("place from window: {err}");
                        Vec::new()
                    }
                }
            }
        }
    }

    fn apply_potion(&mut self, id: &str) -> Vec<Effect> {
        let Some(potion) = self.registry.potion(id) else {
            return Effect::rejected("You do not have that potion.");
        };
        match self.player.apply_potion(potion, &self.registry) {
            Ok(true) => vec![
                Effect::toast(format!("The {} takes hold.", potion.name)),
                Effect::Cue(Cue::Positive),
                Effect::Save,
            ],
            Ok(false) => Effect::rejected("Nothing you carry responds to it."),
            Err(err) => {
                log::error!("potion transformation: {err}");
                Vec::new()
            }
        }
    }

    pub fn to_save(&self) -> SaveFile {
        SaveFile {
            player: self.player.to_data(),
            spawners: self.spawners.iter().map(|s| s.to_data()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageDef;
    use crate::config::GameConfig;
    use crate::item::{MaterialDef, PotionDef, PuzzleObjectDef};

    fn click(x: f64, y: f64) -> PlayerCommand {
        PlayerCommand {
            action: "click".to_string(),
            x: Some(x),
            y: Some(y),
            slot: None,
            object: None,
        }
    }

    fn command(action: &str) -> PlayerCommand {
        PlayerCommand {
            action: action.to_string(),
            x: None,
            y: None,
            slot: None,
            object: None,
        }
    }

    fn room() -> Room {
        let mut registry = ItemRegistry::new();
        registry.insert_material(MaterialDef {
            id: "wood".to_string(),
            name: "Wood".to_string(),
            inventory_image: None,
        });
        registry.insert_material(MaterialDef {
            id: "stone".to_string(),
            name: "Stone".to_string(),
            inventory_image: None,
        });
        registry.insert_puzzle_object(PuzzleObjectDef {
            id: "brass_key".to_string(),
            name: "Brass Key".to_string(),
            description: "Heavy, and colder than it should be.".to_string(),
            inventory_image: None,
            world_image: Some("brass_key_world".to_string()),
        });
        registry.insert_potion(PotionDef {
            id: "potion_of_masonry".to_string(),
            name: "Potion of Masonry".to_string(),
            applies_to: "wood".to_string(),
            turns_into: "stone".to_string(),
        });

        let mut config = GameConfig::default();
        config.images = vec![ImageDef {
            key: "brass_key_world".to_string(),
            url: "/assets/brass_key_world.png".to_string(),
            width: 40.0,
            height: 40.0,
        }];
        let catalog = ImageCatalog::load_from_config(&config);

        let spawner = PuzzleObjectSpawner::new(
            50.0,
            50.0,
            registry.puzzle_object("brass_key").unwrap(),
            &catalog,
        );
        let mut room = Room::new(registry, catalog, Player::new(100.0, 80.0));
        room.spawners.push(spawner);
        room
    }

    #[test]
    fn click_on_spawner_opens_window_once() {
        let mut room = room();

        room.handle_command(&click(55.0, 55.0));
        let window = room.window.as_ref().expect("window should open");
        assert_eq!(window.item_id, "brass_key");

        let effects = room.handle_command(&command("window_take"));
        assert_eq!(effects, vec![Effect::Cue(Cue::Chime), Effect::Save]);
        assert!(room.player.has_puzzle_object("brass_key"));
        assert!(room.window.is_none());

        // Collected: the same click now falls through to movement.
        room.handle_command(&click(55.0, 55.0));
        assert!(room.window.is_none());
        assert_eq!(room.player.target_x(), 55.0);
    }

    #[test]
    fn click_misses_close_window_and_walk() {
        let mut room = room();
        room.handle_command(&click(55.0, 55.0));
        assert!(room.window.is_some());

        room.handle_command(&click(700.0, 10.0));
        assert!(room.window.is_none());
        assert_eq!(room.player.target_x(), 700.0);
    }

    #[test]
    fn unreachable_spawner_ignores_click() {
        let mut room = room();
        room.player.x = 400.0;
        room.player.move_to_cursor(400.0);
        room.handle_command(&click(55.0, 55.0));
        assert!(room.window.is_none());
        // A swallowed click does not move the avatar either.
        assert_eq!(room.player.target_x(), 400.0);
    }

    #[test]
    fn deposit_through_hotbar_activation() {
        let mut room = room();
        room.cauldron = Some(Cauldron::new(150.0, 80.0, vec!["wood".to_string()]));

        let def = room.registry.material("wood").unwrap().clone();
        room.player.take_material(&def, false);

        let effects = room.handle_command(&PlayerCommand {
            action: "activate".to_string(),
            x: None,
            y: None,
            slot: Some(0),
            object: None,
        });
        assert_eq!(effects, vec![Effect::Save]);
        assert!(room.player.materials().is_empty());
        assert_eq!(room.cauldron.as_ref().unwrap().contents, ["wood"]);
    }

    #[test]
    fn inspect_then_toss_through_window() {
        let mut room = room();
        room.handle_command(&click(55.0, 55.0));
        room.handle_command(&command("window_take"));

        // Slot 0 is the freshly taken key; inspecting opens toss/place.
        room.handle_command(&PlayerCommand {
            action: "activate".to_string(),
            x: None,
            y: None,
            slot: Some(0),
            object: None,
        });
        assert!(room.window.is_some());

        let effects = room.handle_command(&command("window_toss"));
        assert_eq!(effects, vec![Effect::Save]);
        assert!(!room.player.has_puzzle_object("brass_key"));

        // Tossed back into the world: the spawner is visible again.
        assert!(room.spawners[0].is_visible(&room.player));
    }

    #[test]
    fn place_without_furnace_toasts() {
        let mut room = room();
        room.handle_command(&click(55.0, 55.0));
        room.handle_command(&command("window_take"));
        room.handle_command(&PlayerCommand {
            action: "activate".to_string(),
            x: None,
            y: None,
            slot: Some(0),
            object: None,
        });

        let effects = room.handle_command(&command("window_place"));
        assert!(matches!(effects[0], Effect::Toast(_)));
        assert!(room.player.has_puzzle_object("brass_key"));
    }

    #[test]
    fn window_action_without_window_is_a_no_op() {
        let mut room = room();
        assert!(room.handle_command(&command("window_take")).is_empty());
        assert!(room.handle_command(&command("window_toss")).is_empty());
    }

    #[test]
    fn apply_potion_command() {
        let mut room = room();
        let def = room.registry.material("wood").unwrap().clone();
        room.player.take_material(&def, false);

        let effects = room.handle_command(&PlayerCommand {
            action: "apply_potion".to_string(),
            x: None,
            y: None,
            slot: None,
            object: Some("potion_of_masonry".to_string()),
        });
        assert!(effects.contains(&Effect::Save));
        assert_eq!(room.player.materials(), ["stone"]);
    }

    #[test]
    fn unknown_action_is_ignored() {
        let mut room = room();
        assert!(room.handle_command(&command("dance")).is_empty());
    }
}
