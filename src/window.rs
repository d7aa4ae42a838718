use serde::{Deserialize, Serialize};

use crate::item::PuzzleObjectDef;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowAction {
    Take,
    Toss,
    Place,
}

/// The single item-detail pop-up. At most one is open per room; clicking
/// empty space closes it. Which action buttons appear depends on where
/// the window came from: a world spawner offers Take, an inventory slot
/// offers Toss and Place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailWindow {
    pub item_id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,  // ImageCatalog key
    pub x: f64,
    pub y: f64,
    pub actions: Vec<WindowAction>,
}

impl DetailWindow {
    pub fn for_spawner(def: &PuzzleObjectDef, x: f64, y: f64) -> Self {
        Self {
            item_id: def.id.clone(),
            name: def.name.clone(),
            description: def.description.clone(),
            image: def.inventory_image.clone(),
            x,
            y,
            actions: vec![WindowAction::Take],
        }
    }

    pub fn for_inventory(def: &PuzzleObjectDef, x: f64, y: f64) -> Self {
        Self {
            item_id: def.id.clone(),
            name: def.name.clone(),
            description: def.description.clone(),
            image: def.inventory_image.clone(),
            x,
            y,
            actions: vec![WindowAction::Toss, WindowAction::Place],
        }
    }

    pub fn allows(&self, action: WindowAction) -> bool {
        self.actions.contains(&action)
    }
}
