//! Texture loading with placeholder fallback
//!
//! The demo runs without its art installed: any texture that cannot be read
//! from disk is replaced by a flat-colored square so every sprite still has
//! something to draw.

use std::path::PathBuf;

use actor_engine::assets::{AssetError, ImageData, ImageFileLoader, Texture, TextureLoader};

/// Side length of placeholder textures
pub const PLACEHOLDER_SIZE: u32 = 64;

/// Loads image files, substituting a placeholder for missing ones
#[derive(Debug, Default)]
pub struct PlaceholderLoader {
    files: ImageFileLoader,
    substituted: Vec<String>,
}

impl PlaceholderLoader {
    /// Create a loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Names that fell back to a placeholder
    pub fn substituted(&self) -> &[String] {
        &self.substituted
    }

    /// Stable color derived from the texture name
    fn color_for(name: &str) -> [u8; 4] {
        let hash = name
            .bytes()
            .fold(0x811c_9dc5_u32, |acc, byte| (acc ^ u32::from(byte)).wrapping_mul(0x0100_0193));
        let [r, g, b, _] = hash.to_le_bytes();
        [r | 0x40, g | 0x40, b | 0x40, 255]
    }
}

impl TextureLoader for PlaceholderLoader {
    fn load_texture(&mut self, name: &str, search_paths: &[PathBuf]) -> Result<Texture, AssetError> {
        match self.files.load_texture(name, search_paths) {
            Ok(texture) => Ok(texture),
            Err(err) => {
                log::warn!("Using placeholder for {}: {}", name, err);
                self.substituted.push(name.to_string());
                let image = ImageData::solid_color(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, Self::color_for(name));
                Ok(Texture::new(name, image))
            }
        }
    }
}
