use image::Rgba;

use crate::tile::TileKind;

/// Fill colors used by the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub empty: Rgba<u8>,
    pub wall: Rgba<u8>,
    /// Used for every classification without a dedicated color.
    pub fallback: Rgba<u8>,
}

impl Palette {
    pub fn color_for(&self, kind: TileKind) -> Rgba<u8> {
        match kind {
            TileKind::Empty => self.empty,
            TileKind::Wall => self.wall,
            TileKind::Other(_) => self.fallback,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            empty: Rgba([0, 255, 0, 255]),
            wall: Rgba([0, 0, 255, 255]),
            fallback: Rgba([255, 0, 0, 255]),
        }
    }
}

/// Configuration values for loading and compositing a map.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub tile_width: u32,
    pub tile_height: u32,
    pub palette: Palette,
    /// Prefer `tilewidth`/`tileheight` from the map document when present.
    pub honor_map_tile_size: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            tile_width: 40,
            tile_height: 40,
            palette: Palette::default(),
            honor_map_tile_size: true,
        }
    }
}

impl LoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tile size in pixels.
    #[must_use]
    pub fn with_tile_size(mut self, width: u32, height: u32) -> Self {
        self.tile_width = width;
        self.tile_height = height;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Ignore the tile size declared by map documents.
    #[must_use]
    pub fn with_honor_map_tile_size(mut self, honor: bool) -> Self {
        self.honor_map_tile_size = honor;
        self
    }
}
