//! End-to-end map loading: source image, map and tileset documents in,
//! resolved [`TileGrid`] out.

use std::path::Path;

use image::RgbaImage;
use log::{debug, info};

use crate::composite::composite;
use crate::config::{LoaderConfig, Palette};
use crate::document::{MapDocument, TilesetDocument, MAP_DOCUMENT};
use crate::error::{LoadError, Result};
use crate::grid::TileGrid;
use crate::resolve::resolve_tile_types;

/// A loaded map: the resolved grid plus the source image it was sized from.
#[derive(Clone, Debug)]
pub struct TiledMap {
    pub grid: TileGrid,
    pub source: RgbaImage,
}

impl TiledMap {
    /// Load a map from files on disk.
    pub fn load(
        image_path: impl AsRef<Path>,
        map_path: impl AsRef<Path>,
        tileset_path: impl AsRef<Path>,
        config: &LoaderConfig,
    ) -> Result<Self> {
        let image_bytes = read(image_path.as_ref())?;
        let map_bytes = read(map_path.as_ref())?;
        let tileset_bytes = read(tileset_path.as_ref())?;
        Self::from_bytes(&image_bytes, &map_bytes, &tileset_bytes, config)
    }

    /// Load a map from in-memory assets.
    ///
    /// The canvas takes the source image's dimensions. Any decode, schema
    /// or resolution failure aborts the load; no partial grid is returned.
    pub fn from_bytes(
        image_bytes: &[u8],
        map_json: &[u8],
        tileset_json: &[u8],
        config: &LoaderConfig,
    ) -> Result<Self> {
        let source = image::load_from_memory(image_bytes)?.to_rgba8();
        let (width, height) = source.dimensions();
        debug!("source image is {}x{}", width, height);

        let map = MapDocument::from_slice(map_json)?;
        let tileset = TilesetDocument::from_slice(tileset_json)?;

        let (tile_width, tile_height) = tile_size(&map, config);
        if tile_width == 0 || tile_height == 0 {
            return Err(LoadError::InvalidConfig(format!(
                "tile size must be non-zero, got {}x{}",
                tile_width, tile_height
            )));
        }

        let columns = (width / tile_width) as usize;
        let rows = (height / tile_height) as usize;
        check_declared_size(&map, columns, rows)?;
        let tiles = resolve_tile_types(&map, &tileset, columns)?;
        let grid = TileGrid::new(width, height, tile_width, tile_height, tiles)?;

        info!(
            "loaded {}x{} tile map ({}x{} px tiles)",
            grid.columns(),
            grid.rows(),
            tile_width,
            tile_height
        );
        Ok(Self { grid, source })
    }

    /// Composite the grid into a new canvas owned by the caller.
    pub fn render(&self, palette: &Palette) -> RgbaImage {
        composite(&self.grid, palette)
    }
}

/// A map that declares its size must match the canvas grid, otherwise cells
/// would be painted from the wrong offsets.
fn check_declared_size(map: &MapDocument, columns: usize, rows: usize) -> Result<()> {
    for (key, declared, canvas, unit) in [
        ("width", map.width, columns, "columns"),
        ("height", map.height, rows, "rows"),
    ] {
        if let Some(declared) = declared {
            if declared != canvas {
                return Err(LoadError::schema(
                    MAP_DOCUMENT,
                    key,
                    format!(
                        "is {} but the canvas holds {} tile {}",
                        declared, canvas, unit
                    ),
                ));
            }
        }
    }
    Ok(())
}

fn tile_size(map: &MapDocument, config: &LoaderConfig) -> (u32, u32) {
    if !config.honor_map_tile_size {
        return (config.tile_width, config.tile_height);
    }
    (
        map.tile_width.unwrap_or(config.tile_width),
        map.tile_height.unwrap_or(config.tile_height),
    )
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
