//! Resolved tile grid.
//!
//! Holds the flat classification sequence produced by the resolver together
//! with the canvas and tile dimensions it will be painted at.

use log::warn;
use serde::Serialize;

use crate::error::{LoadError, Result};
use crate::tile::TileKind;

/// A cell position (column, row) in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GridCoord {
    pub x: usize,
    pub y: usize,
}

impl GridCoord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Pixel rectangle covered by one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Immutable grid of tile classifications.
///
/// Serializes for debug dumps; there is no `Deserialize` because a grid
/// must go through [`TileGrid::new`] validation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
    columns: usize,
    rows: usize,
    tiles: Vec<i32>, // Row-major: [y * columns + x]
}

impl TileGrid {
    /// Build a grid for a `width` x `height` pixel canvas.
    ///
    /// The canvas holds `width / tile_width` columns and
    /// `height / tile_height` rows; `tiles` must cover at least that many
    /// cells. Extra classifications (from additional layers) are kept but
    /// never painted.
    pub fn new(
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
        tiles: Vec<i32>,
    ) -> Result<Self> {
        if tile_width == 0 || tile_height == 0 {
            return Err(LoadError::InvalidConfig(format!(
                "tile size must be non-zero, got {}x{}",
                tile_width, tile_height
            )));
        }

        let columns = (width / tile_width) as usize;
        let rows = (height / tile_height) as usize;
        let cells = columns * rows;
        if tiles.len() < cells {
            return Err(LoadError::GridMismatch {
                expected: cells,
                actual: tiles.len(),
            });
        }
        if width % tile_width != 0 || height % tile_height != 0 {
            warn!(
                "canvas {}x{} is not a whole number of {}x{} tiles; trailing pixels stay blank",
                width, height, tile_width, tile_height
            );
        }
        if tiles.len() > cells {
            warn!(
                "{} classification(s) beyond the {}x{} grid will not be drawn",
                tiles.len() - cells,
                columns,
                rows
            );
        }

        Ok(Self {
            width,
            height,
            tile_width,
            tile_height,
            columns,
            rows,
            tiles,
        })
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Grid width in cells.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Grid height in cells.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The full resolved classification sequence.
    pub fn tiles(&self) -> &[i32] {
        &self.tiles
    }

    pub fn is_valid(&self, coord: GridCoord) -> bool {
        coord.x < self.columns && coord.y < self.rows
    }

    /// Classification at a cell. Returns `None` if out of bounds.
    pub fn get(&self, coord: GridCoord) -> Option<i32> {
        if !self.is_valid(coord) {
            return None;
        }
        self.tiles.get(coord.y * self.columns + coord.x).copied()
    }

    pub fn kind_at(&self, coord: GridCoord) -> Option<TileKind> {
        self.get(coord).map(TileKind::from_classification)
    }

    /// Pixel rectangle a cell paints into.
    pub fn pixel_rect(&self, coord: GridCoord) -> PixelRect {
        PixelRect {
            x: coord.x as u32 * self.tile_width,
            y: coord.y as u32 * self.tile_height,
            width: self.tile_width,
            height: self.tile_height,
        }
    }

    /// Iterate over all coordinates in row order.
    pub fn iter_coords(&self) -> impl Iterator<Item = GridCoord> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |y| (0..columns).map(move |x| GridCoord::new(x, y)))
    }

    /// Iterate over all cells with their kinds, in row order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, TileKind)> + '_ {
        self.tiles[..self.columns * self.rows]
            .iter()
            .enumerate()
            .map(move |(i, &tile)| {
                (
                    GridCoord::new(i % self.columns, i / self.columns),
                    TileKind::from_classification(tile),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_square_grid_indexes_by_row() {
        // 3 columns x 2 rows
        let tiles = vec![10, 11, 12, 20, 21, 22];
        let grid = TileGrid::new(30, 20, 10, 10, tiles).unwrap();
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.get(GridCoord::new(0, 1)), Some(20));
        assert_eq!(grid.get(GridCoord::new(2, 0)), Some(12));
        assert_eq!(grid.get(GridCoord::new(2, 1)), Some(22));
        assert_eq!(grid.get(GridCoord::new(3, 0)), None);
    }

    #[test]
    fn test_tall_grid_indexes_by_row() {
        // 2 columns x 3 rows
        let grid = TileGrid::new(4, 6, 2, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
        let cells: Vec<_> = grid.iter_coords().map(|c| grid.get(c).unwrap()).collect();
        assert_eq!(cells, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(grid.get(GridCoord::new(1, 2)), Some(5));
    }

    #[test]
    fn test_too_few_tiles() {
        let err = TileGrid::new(20, 20, 10, 10, vec![-1, -1, -1]).unwrap_err();
        assert!(matches!(
            err,
            LoadError::GridMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_zero_tile_size() {
        let err = TileGrid::new(20, 20, 0, 10, vec![]).unwrap_err();
        assert!(matches!(err, LoadError::InvalidConfig(_)));
    }

    #[test]
    fn test_extra_tiles_are_kept_but_not_iterated() {
        let grid = TileGrid::new(10, 10, 10, 10, vec![1, 2, 3]).unwrap();
        assert_eq!(grid.tiles().len(), 3);
        assert_eq!(grid.iter().count(), 1);
        assert_eq!(grid.kind_at(GridCoord::new(0, 0)), Some(TileKind::Wall));
    }

    #[test]
    fn test_serializes_dimensions_and_tiles() {
        let grid = TileGrid::new(2, 1, 1, 1, vec![-1, 1]).unwrap();
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json["columns"], 2);
        assert_eq!(json["tiles"], serde_json::json!([-1, 1]));
    }

    #[test]
    fn test_pixel_rect() {
        let grid = TileGrid::new(80, 40, 40, 20, vec![0; 4]).unwrap();
        assert_eq!(
            grid.pixel_rect(GridCoord::new(1, 1)),
            PixelRect {
                x: 40,
                y: 20,
                width: 40,
                height: 20
            }
        );
    }
}
