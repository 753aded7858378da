//! Image loading utilities for texture data
//!
//! Provides PNG loading through the `image` crate plus the default
//! file-system [`TextureLoader`].

use std::path::{Path, PathBuf};
use image;

use crate::assets::{AssetError, Texture, TextureLoader};

/// Decoded RGBA image data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path_ref.display(), e)))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::debug!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::InvalidData(format!("Failed to decode image bytes: {}", e)))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Create a solid color image (useful for testing and placeholders)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);

        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }

        Self {
            data,
            width,
            height,
        }
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// Loads textures from image files, trying each search path in order
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFileLoader;

impl ImageFileLoader {
    /// First existing candidate for `name` under the search paths
    pub fn resolve(name: &str, search_paths: &[PathBuf]) -> Option<PathBuf> {
        search_paths
            .iter()
            .map(|dir| dir.join(name))
            .chain(std::iter::once(PathBuf::from(name)))
            .find(|candidate| candidate.is_file())
    }
}

impl TextureLoader for ImageFileLoader {
    fn load_texture(&mut self, name: &str, search_paths: &[PathBuf]) -> Result<Texture, AssetError> {
        let path = Self::resolve(name, search_paths)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))?;
        let image = ImageData::from_file(&path)?;
        Ok(Texture::new(name, image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert_eq!(img.size_bytes(), 4 * 4 * 4);
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_invalid_bytes_rejected() {
        let result = ImageData::from_bytes(&[0, 1, 2, 3]);
        assert!(matches!(result, Err(AssetError::InvalidData(_))));
    }

    #[test]
    fn test_missing_file_not_found() {
        let mut loader = ImageFileLoader;
        let result = loader.load_texture("Assets/definitely_missing.png", &[PathBuf::from("nowhere")]);
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }
}
