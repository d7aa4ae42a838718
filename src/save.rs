use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::player::PlayerData;
use crate::spawner::PuzzleObjectData;

pub const SAVE_PATH: &str = "save.json";

/// Everything a save-game carries. World placements that never change
/// (cauldron, furnace) stay in the config and are not persisted.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub player: PlayerData,
    #[serde(default)]
    pub spawners: Vec<PuzzleObjectData>,
}

/// Read the save file if one exists. A missing file is a fresh game, not
/// an error; a malformed one is.
pub fn load(path: &str) -> Result<Option<SaveFile>> {
    if !Path::new(path).exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

pub fn write(path: &str, save: &SaveFile) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(save)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SaveFile {
        SaveFile {
            player: PlayerData {
                x: 12.0,
                y: 34.0,
                z: 0.0,
                held_materials: vec!["wood".to_string()],
                held_puzzle_objects: vec!["brass_key".to_string()],
                material_inventory_size: Some(4),
            },
            spawners: vec![PuzzleObjectData {
                x: 50.0,
                y: 50.0,
                puzzle_object_type: "gear".to_string(),
            }],
        }
    }

    #[test]
    fn round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        let path = path.to_str().unwrap();

        write(path, &sample()).unwrap();
        let loaded = load(path).unwrap().unwrap();
        assert_eq!(loaded.player.x, 12.0);
        assert_eq!(loaded.player.held_materials, ["wood"]);
        assert_eq!(loaded.player.material_inventory_size, Some(4));
        assert_eq!(loaded.spawners.len(), 1);
        assert_eq!(loaded.spawners[0].puzzle_object_type, "gear");
    }

    #[test]
    fn missing_file_is_a_fresh_game() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(load(path.to_str().unwrap()).unwrap().is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "{not json").unwrap();
        assert!(load(path.to_str().unwrap()).is_err());
    }
}
