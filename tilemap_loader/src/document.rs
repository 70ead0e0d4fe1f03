//! Typed views over the decoded map and tileset documents.

use log::debug;

use crate::error::{LoadError, PropertyError, Result};
use crate::property::{Property, PropertyValue};

pub(crate) const MAP_DOCUMENT: &str = "map";
pub(crate) const TILESET_DOCUMENT: &str = "tileset";

/// A raw tile index as authored in a map layer. 0 means "no tile".
///
/// Kept as the decoded float; integer and sign checks belong to the
/// resolver so failures can name the offending cell.
#[derive(Clone, Debug, PartialEq)]
pub struct MapLayer {
    pub indices: Vec<f64>,
}

/// Map layout: one or more layers of 1-based tile indices.
#[derive(Clone, Debug, PartialEq)]
pub struct MapDocument {
    pub layers: Vec<MapLayer>,
    /// Declared size in cells, when the document has `width`/`height`.
    pub width: Option<usize>,
    pub height: Option<usize>,
    /// Declared tile size in pixels (`tilewidth`/`tileheight`).
    pub tile_width: Option<u32>,
    pub tile_height: Option<u32>,
}

impl MapDocument {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_property(&Property::from_slice(MAP_DOCUMENT, bytes)?)
    }

    /// Validate a decoded map tree.
    pub fn from_property(root: &Property) -> Result<Self> {
        let prop_err = |e: PropertyError| LoadError::from_property(MAP_DOCUMENT, e);

        let width = optional_count(root, "width")?.map(|v| v as usize);
        let height = optional_count(root, "height")?.map(|v| v as usize);
        let tile_width = optional_count(root, "tilewidth")?;
        let tile_height = optional_count(root, "tileheight")?;
        let declared_cells = match (width, height) {
            (Some(w), Some(h)) => Some(w.checked_mul(h).ok_or_else(|| {
                LoadError::schema(
                    MAP_DOCUMENT,
                    "width",
                    format!("{}x{} cells does not fit in memory", w, h),
                )
            })?),
            _ => None,
        };

        let layers_prop = root.get("layers").map_err(prop_err)?;
        let mut layers = Vec::new();
        for (layer_idx, layer) in layers_prop.as_list().map_err(prop_err)?.iter().enumerate() {
            let data = match &layer.value {
                PropertyValue::List(items) => items.as_slice(),
                // Tiled exports wrap the index list in an object
                PropertyValue::Map(_) => layer
                    .get("data")
                    .and_then(Property::as_list)
                    .map_err(|e| {
                        LoadError::schema(
                            MAP_DOCUMENT,
                            format!("layers.{}.data", layer_idx),
                            e.to_string(),
                        )
                    })?,
                _ => {
                    return Err(LoadError::schema(
                        MAP_DOCUMENT,
                        format!("layers.{}", layer_idx),
                        format!("must be a list of tile indices, found a {}", layer.kind()),
                    ))
                }
            };

            let indices = data
                .iter()
                .map(|cell| {
                    cell.as_number().map_err(|_| {
                        LoadError::schema(
                            MAP_DOCUMENT,
                            format!("layers.{}.{}", layer_idx, cell.name),
                            format!("must be a tile index, found a {}", cell.kind()),
                        )
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            if let Some(cells) = declared_cells {
                if indices.len() != cells {
                    return Err(LoadError::schema(
                        MAP_DOCUMENT,
                        format!("layers.{}", layer_idx),
                        format!(
                            "has {} cells but the map is {}x{} ({} cells)",
                            indices.len(),
                            width.unwrap_or_default(),
                            height.unwrap_or_default(),
                            cells
                        ),
                    ));
                }
            }

            layers.push(MapLayer { indices });
        }

        debug!(
            "decoded map: {} layer(s), declared size {:?}x{:?}",
            layers.len(),
            width,
            height
        );

        Ok(Self {
            layers,
            width,
            height,
            tile_width,
            tile_height,
        })
    }

    /// Total number of cells across all layers.
    pub fn cell_count(&self) -> usize {
        self.layers.iter().map(|l| l.indices.len()).sum()
    }
}

/// Per-tile metadata records from a tileset.
///
/// Entry `i` describes tile index `i + 1`. Each entry's sub-properties are
/// kept in document order; the first one holds the tile's type.
#[derive(Clone, Debug, PartialEq)]
pub struct TilesetDocument {
    pub tiles: Vec<Vec<Property>>,
}

impl TilesetDocument {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_property(&Property::from_slice(TILESET_DOCUMENT, bytes)?)
    }

    pub fn from_property(root: &Property) -> Result<Self> {
        let prop_err = |e: PropertyError| LoadError::from_property(TILESET_DOCUMENT, e);
        let entries = root
            .get("properties")
            .and_then(Property::as_list)
            .map_err(prop_err)?;

        let tiles = entries
            .iter()
            .map(|entry| {
                entry
                    .as_map()
                    .map(|map| map.iter().cloned().collect::<Vec<Property>>())
                    .map_err(|_| {
                        LoadError::schema(
                            TILESET_DOCUMENT,
                            format!("properties.{}", entry.name),
                            format!("must be a map of tile properties, found a {}", entry.kind()),
                        )
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("decoded tileset: {} tile record(s)", tiles.len());
        Ok(Self { tiles })
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Read an optional non-negative whole number member of a map document.
/// Values beyond `u32` are rejected.
fn optional_count(root: &Property, key: &str) -> Result<Option<u32>> {
    let Some(prop) = root
        .get_opt(key)
        .map_err(|e| LoadError::from_property(MAP_DOCUMENT, e))?
    else {
        return Ok(None);
    };
    let n = prop
        .as_number()
        .map_err(|e| LoadError::from_property(MAP_DOCUMENT, e))?;
    if n < 0.0 || n.fract() != 0.0 || n > f64::from(u32::MAX) {
        return Err(LoadError::schema(
            MAP_DOCUMENT,
            key,
            format!("must be a whole number between 0 and {}, found {}", u32::MAX, n),
        ));
    }
    Ok(Some(n as u32))
}
