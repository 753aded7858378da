//! Tile map sprite
//!
//! Draws a [`TileGrid`] using a tile-set texture cut into square tiles, laid
//! out left to right, top to bottom. Tile `n` is the `n`th tile of the set.
//! The grid's top-left corner sits at the owner's position.

use std::path::Path;

use crate::assets::{TextureHandle, TileGrid, TileMapError};
use crate::ecs::component::{Component, Sprite};
use crate::ecs::components::sprite::SpriteComponent;
use crate::foundation::math::{Rect, Transform2D};
use crate::render::RenderSurface;

/// Tile edge length given to new tile maps
pub const DEFAULT_TILE_SIZE: u32 = 32;

/// Grid of tiles drawn from a tile set
#[derive(Debug, Clone)]
pub struct TileMapComponent {
    sprite: SpriteComponent,
    grid: TileGrid,
    tile_size: u32,
}

impl TileMapComponent {
    /// Create an empty tile map
    pub fn new(draw_order: i32) -> Self {
        Self {
            sprite: SpriteComponent::new(draw_order),
            grid: TileGrid::default(),
            tile_size: DEFAULT_TILE_SIZE,
        }
    }

    /// Set the tile edge length in pixels (builder style)
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size.max(1);
        self
    }

    /// Set the tile set (builder style)
    pub fn with_tile_set(mut self, tile_set: Option<TextureHandle>) -> Self {
        self.sprite.set_texture(tile_set);
        self
    }

    /// Replace the tile set
    pub fn set_tile_set(&mut self, tile_set: Option<TextureHandle>) {
        self.sprite.set_texture(tile_set);
    }

    /// Replace the grid
    pub fn set_grid(&mut self, grid: TileGrid) {
        self.grid = grid;
    }

    /// Load the grid from a file.
    ///
    /// On error the failure is logged and the current grid is kept.
    pub fn load_map(&mut self, path: impl AsRef<Path>) -> Result<(), TileMapError> {
        let path = path.as_ref();
        let grid = TileGrid::load(path).inspect_err(|e| {
            log::error!("Failed to load tile map {}: {}", path.display(), e);
        })?;
        log::debug!(
            "Loaded tile map {} ({}x{})",
            path.display(),
            grid.column_count(),
            grid.row_count()
        );
        self.grid = grid;
        Ok(())
    }

    /// Load the grid from text. On error the current grid is kept.
    pub fn load_map_str(&mut self, text: &str) -> Result<(), TileMapError> {
        let grid = TileGrid::parse(text).inspect_err(|e| log::error!("Failed to parse tile map: {}", e))?;
        self.grid = grid;
        Ok(())
    }

    /// Current grid
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Tile edge length in pixels
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Region of the tile set holding `tile`.
    ///
    /// `None` if the tile set has no such tile.
    pub fn tile_source_rect(&self, tile: u32) -> Option<Rect> {
        let size = u64::from(self.tile_size);
        let per_row = u64::from(self.sprite.tex_width()) / size;
        let rows = u64::from(self.sprite.tex_height()) / size;
        let tile = u64::from(tile);
        if tile >= per_row * rows {
            return None;
        }

        let column = tile % per_row;
        let row = tile / per_row;
        Some(Rect::new(
            (column * size) as f32,
            (row * size) as f32,
            size as f32,
            size as f32,
        ))
    }
}

impl Component for TileMapComponent {
    fn as_sprite(&self) -> Option<&dyn Sprite> {
        Some(self)
    }

    fn as_sprite_mut(&mut self) -> Option<&mut dyn Sprite> {
        Some(self)
    }
}

impl Sprite for TileMapComponent {
    fn sprite(&self) -> &SpriteComponent {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut SpriteComponent {
        &mut self.sprite
    }

    fn draw(&self, surface: &mut dyn RenderSurface, owner: &Transform2D) {
        let Some(tile_set) = self.sprite.texture() else {
            return;
        };
        let edge = self.tile_size as f32 * owner.scale;

        for (row, column, tile) in self.grid.iter() {
            let dest = Rect::new(
                owner.position.x + column as f32 * edge,
                owner.position.y + row as f32 * edge,
                edge,
                edge,
            );
            let Some(source) = self.tile_source_rect(tile) else {
                continue;
            };
            surface.blit(tile_set, Some(source), dest, 0.0);
        }
    }
}
