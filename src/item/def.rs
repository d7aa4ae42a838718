use serde::{Deserialize, Serialize};

/// A consumable ingredient the player can carry and drop into a cauldron.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_image: Option<String>,  // ImageCatalog key
}

/// A story-relevant collectible (key, tool). Non-consumable; at most one
/// of each is ever held.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PuzzleObjectDef {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_image: Option<String>,  // ImageCatalog key
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_image: Option<String>,  // ImageCatalog key, used by spawners
}

/// Transformation rule: consuming the potion turns one held item of type
/// `applies_to` into `turns_into`. The pair names ids of the same kind
/// (material -> material or puzzle object -> puzzle object).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PotionDef {
    pub id: String,
    pub name: String,
    pub applies_to: String,
    pub turns_into: String,
}
