use serde::{Deserialize, Serialize};

/// What activating a hotbar slot does. An explicit command value instead
/// of a callback: the room dispatches it to the player, so UI widgets
/// never hold entity references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HotbarAction {
    DepositMaterial { material_id: String },
    InspectPuzzleObject { object_id: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HotbarSlot {
    pub item_id: String,
    pub name: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,  // ImageCatalog key
    pub action: HotbarAction,
}

/// On-screen quick-access row mirroring both inventories in acquisition
/// order. Slots are keyed by item id; the owning Player keeps it in sync
/// with every inventory mutation.
#[derive(Clone, Debug, Default)]
pub struct Hotbar {
    slots: Vec<HotbarSlot>,
}

impl Hotbar {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn slots(&self) -> &[HotbarSlot] {
        &self.slots
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn add(&mut self, slot: HotbarSlot) {
        self.slots.push(slot);
    }

    pub fn remove(&mut self, item_id: &str) -> Option<HotbarSlot> {
        let pos = self.slots.iter().position(|s| s.item_id == item_id)?;
        Some(self.slots.remove(pos))
    }

    /// Swap the slot for `item_id` with a new one, keeping its position.
    /// Returns false when no such slot exists.
    pub fn replace(&mut self, item_id: &str, slot: HotbarSlot) -> bool {
        match self.slots.iter().position(|s| s.item_id == item_id) {
            Some(pos) => {
                self.slots[pos] = slot;
                true
            }
            None => false,
        }
    }

    pub fn action_for_slot(&self, index: usize) -> Option<&HotbarAction> {
        self.slots.get(index).map(|s| &s.action)
    }
}
