//! Asset management system
//!
//! The [`AssetCache`] memoizes textures by name. It is owned by the engine,
//! created at startup and emptied at shutdown, and handed to whatever code
//! needs textures rather than being reachable globally.
//!
//! A failed load is not fatal: [`AssetCache::get_texture`] logs the failure
//! and returns `None`, and sprites without a texture simply skip drawing.

pub mod image_loader;
pub mod tile_map;

pub use image_loader::{ImageData, ImageFileLoader};
pub use tile_map::{TileGrid, TileMapError};

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::core::config::AssetConfig;

/// A decoded texture, shared between the cache and the sprites using it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    name: String,
    image: ImageData,
}

impl Texture {
    /// Create a texture from decoded image data
    pub fn new(name: impl Into<String>, image: ImageData) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }

    /// Name the texture was requested under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.image.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.image.height
    }

    /// Pixel data
    pub fn image(&self) -> &ImageData {
        &self.image
    }
}

/// Shared texture handle
pub type TextureHandle = Arc<Texture>;

/// Produces textures for names the cache has not seen yet
pub trait TextureLoader {
    /// Load and decode the named texture
    fn load_texture(&mut self, name: &str, search_paths: &[PathBuf]) -> Result<Texture, AssetError>;
}

/// Texture cache keyed by name
pub struct AssetCache {
    textures: HashMap<String, TextureHandle>,
    loader: Box<dyn TextureLoader>,
    search_paths: Vec<PathBuf>,
}

impl AssetCache {
    /// Create a cache that loads image files from the configured search paths
    pub fn new(config: &AssetConfig) -> Self {
        Self::with_loader(config, Box::new(ImageFileLoader))
    }

    /// Create a cache with a custom loader
    pub fn with_loader(config: &AssetConfig, loader: Box<dyn TextureLoader>) -> Self {
        Self {
            textures: HashMap::new(),
            loader,
            search_paths: config.search_paths.clone(),
        }
    }

    /// Get a texture, loading it on first request.
    ///
    /// Returns `None` and logs a warning if loading fails; the failure is not
    /// cached, so a later request retries.
    pub fn get_texture(&mut self, name: &str) -> Option<TextureHandle> {
        match self.try_get_texture(name) {
            Ok(texture) => Some(texture),
            Err(e) => {
                log::warn!("Failed to load texture {}: {}", name, e);
                None
            }
        }
    }

    /// Get a texture, loading it on first request, reporting failures
    pub fn try_get_texture(&mut self, name: &str) -> Result<TextureHandle, AssetError> {
        if let Some(texture) = self.textures.get(name) {
            return Ok(Arc::clone(texture));
        }

        let texture = Arc::new(self.loader.load_texture(name, &self.search_paths)?);
        log::debug!("Cached texture {} ({}x{})", name, texture.width(), texture.height());
        self.textures.insert(name.to_string(), Arc::clone(&texture));
        Ok(texture)
    }

    /// Add an already decoded texture, replacing any cached one of that name
    pub fn insert(&mut self, texture: Texture) -> TextureHandle {
        let handle = Arc::new(texture);
        self.textures.insert(handle.name().to_string(), Arc::clone(&handle));
        handle
    }

    /// Whether a texture of that name is cached
    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    /// Number of cached textures
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Release every cached texture.
    ///
    /// Sprites still holding handles keep their texture alive until dropped.
    pub fn shutdown(&mut self) {
        if !self.textures.is_empty() {
            log::info!("Releasing {} cached texture(s)", self.textures.len());
        }
        self.textures.clear();
    }
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
