//! Resolves map tile indices into tile-type classifications.

use log::{debug, warn};

use crate::document::{MapDocument, TilesetDocument};
use crate::error::{CellRef, LoadError, Result, TileFault};
use crate::tile::EMPTY_TILE;

/// Classify every cell of every map layer.
///
/// Index 0 becomes [`EMPTY_TILE`]. Index `i > 0` takes the integer part of
/// the first sub-property of tileset entry `i - 1`. Layers are appended to
/// one flat sequence in document order; they are not overlaid.
///
/// `columns` is used to report cell coordinates when the map does not
/// declare its own width. The first unresolvable cell aborts the whole
/// resolution.
pub fn resolve_tile_types(
    map: &MapDocument,
    tileset: &TilesetDocument,
    columns: usize,
) -> Result<Vec<i32>> {
    let columns = map.width.unwrap_or(columns).max(1);
    if map.layers.len() > 1 {
        warn!(
            "map has {} layers; they are concatenated, not composited",
            map.layers.len()
        );
    }

    let mut tile_types = Vec::with_capacity(map.cell_count());
    for (layer, data) in map.layers.iter().enumerate() {
        for (index, &raw) in data.indices.iter().enumerate() {
            let cell = CellRef {
                layer,
                index,
                column: index % columns,
                row: index / columns,
            };
            let tile_type = resolve_cell(raw, tileset)
                .map_err(|fault| LoadError::TileResolution { cell, fault })?;
            tile_types.push(tile_type);
        }
    }

    debug!(
        "resolved {} cell(s) against {} tile record(s)",
        tile_types.len(),
        tileset.len()
    );
    Ok(tile_types)
}

fn resolve_cell(raw: f64, tileset: &TilesetDocument) -> std::result::Result<i32, TileFault> {
    if raw.fract() != 0.0 || !raw.is_finite() {
        return Err(TileFault::FractionalIndex(raw));
    }
    let index = raw as i64;
    if index == 0 {
        return Ok(EMPTY_TILE);
    }
    if index < 0 {
        return Err(TileFault::NegativeIndex(index));
    }

    let record = usize::try_from(index - 1)
        .ok()
        .and_then(|i| tileset.tiles.get(i))
        .ok_or(TileFault::IndexOutOfRange {
            index,
            len: tileset.len(),
        })?;
    let type_prop = record
        .first()
        .ok_or(TileFault::EmptyTileRecord(index as usize))?;
    let tile_type = type_prop
        .as_number()
        .map_err(|_| TileFault::NotNumeric {
            name: type_prop.name.clone(),
            found: type_prop.kind(),
        })?;

    let tile_type = tile_type.trunc();
    if !(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&tile_type) {
        return Err(TileFault::TypeOutOfRange(tile_type));
    }
    Ok(tile_type as i32)
}
