use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Image metadata the server needs: the client fetches pixels from `url`
/// under /assets, the server only uses the dimensions for hit-boxes and
/// draw rects.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageDef {
    pub key: String,
    pub url: String,
    pub width: f64,
    pub height: f64,
}

/// A resolved draw call for the client canvas. Coordinates are the
/// top-left corner after anchoring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteInstruction {
    pub image: String,  // ImageDef key
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub mirrored: bool,
}

/// Fixed key -> image mapping, loaded from config at startup. Entities
/// keep keys and look dimensions up fresh, so nothing image-derived is
/// ever persisted.
pub struct ImageCatalog {
    images: HashMap<String, ImageDef>,
}

impl ImageCatalog {
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
        }
    }

    pub fn load_from_config(config: &crate::config::GameConfig) -> Self {
        let mut catalog = Self::new();
        for image in &config.images {
            catalog.images.insert(image.key.clone(), image.clone());
        }
        catalog
    }

    #[allow(dead_code)]
    pub fn get(&self, key: &str) -> Option<&ImageDef> {
        self.images.get(key)
    }

    pub fn size_of(&self, key: &str) -> (f64, f64) {
        self.images
            .get(key)
            .map(|img| (img.width, img.height))
            .unwrap_or((0.0, 0.0))
    }

    /// key -> url map for the client, sent with every snapshot.
    pub fn urls(&self) -> HashMap<String, String> {
        self.images
            .iter()
            .map(|(key, img)| (key.clone(), img.url.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with(key: &str, width: f64, height: f64) -> ImageCatalog {
        let mut catalog = ImageCatalog::new();
        catalog.images.insert(
            key.to_string(),
            ImageDef {
                key: key.to_string(),
                url: format!("/assets/{}.png", key),
                width,
                height,
            },
        );
        catalog
    }

    #[test]
    fn size_of_known_key() {
        let catalog = catalog_with("brass_key", 40.0, 40.0);
        assert_eq!(catalog.size_of("brass_key"), (40.0, 40.0));
    }

    #[test]
    fn size_of_missing_key_is_zero() {
        let catalog = ImageCatalog::new();
        assert_eq!(catalog.size_of("nothing"), (0.0, 0.0));
    }
}
