//! Tile map loading: decodes map and tileset JSON into a typed grid of tile
//! classifications and composites that grid into a raster canvas.

pub mod composite;
pub mod config;
pub mod document;
pub mod error;
pub mod grid;
pub mod loader;
pub mod property;
pub mod resolve;
pub mod tile;

pub use crate::composite::composite;
pub use crate::config::{LoaderConfig, Palette};
pub use crate::document::{MapDocument, MapLayer, TilesetDocument};
pub use crate::error::{CellRef, LoadError, PropertyError, Result, TileFault};
pub use crate::grid::{GridCoord, PixelRect, TileGrid};
pub use crate::loader::TiledMap;
pub use crate::property::{Property, PropertyKind, PropertyMap, PropertyValue};
pub use crate::resolve::resolve_tile_types;
pub use crate::tile::{TileKind, EMPTY_TILE, FLOOR_TILE, WALL_TILE};
