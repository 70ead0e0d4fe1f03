//! Paints a resolved [`TileGrid`] into a raster canvas.

use image::RgbaImage;

use crate::config::Palette;
use crate::grid::TileGrid;

/// Fill one tile-sized rectangle per cell with the palette color for its
/// kind. Unknown classifications use the fallback color. Pixels not covered
/// by a whole tile stay transparent.
pub fn composite(grid: &TileGrid, palette: &Palette) -> RgbaImage {
    let mut canvas = RgbaImage::new(grid.width(), grid.height());
    for (coord, kind) in grid.iter() {
        let rect = grid.pixel_rect(coord);
        let color = palette.color_for(kind);
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                canvas.put_pixel(x, y, color);
            }
        }
    }
    canvas
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;
    use crate::tile::{EMPTY_TILE, WALL_TILE};

    #[test]
    fn test_colors_by_kind() {
        let palette = Palette::default();
        let grid = TileGrid::new(4, 2, 2, 2, vec![EMPTY_TILE, WALL_TILE]).unwrap();
        let canvas = composite(&grid, &palette);
        assert_eq!(canvas.dimensions(), (4, 2));
        assert_eq!(*canvas.get_pixel(0, 0), palette.empty);
        assert_eq!(*canvas.get_pixel(1, 1), palette.empty);
        assert_eq!(*canvas.get_pixel(2, 0), palette.wall);
        assert_eq!(*canvas.get_pixel(3, 1), palette.wall);
    }

    #[test]
    fn test_unknown_type_uses_fallback() {
        let palette = Palette::default();
        let grid = TileGrid::new(2, 1, 1, 1, vec![42, -7]).unwrap();
        let canvas = composite(&grid, &palette);
        assert_eq!(*canvas.get_pixel(0, 0), palette.fallback);
        assert_eq!(*canvas.get_pixel(1, 0), palette.fallback);
    }

    #[test]
    fn test_non_square_layout() {
        // 3 columns x 1 row: a width/height mixup would read past the row
        let palette = Palette::default();
        let grid = TileGrid::new(30, 10, 10, 10, vec![WALL_TILE, EMPTY_TILE, 9]).unwrap();
        let canvas = composite(&grid, &palette);
        assert_eq!(*canvas.get_pixel(5, 5), palette.wall);
        assert_eq!(*canvas.get_pixel(15, 5), palette.empty);
        assert_eq!(*canvas.get_pixel(25, 5), palette.fallback);
    }

    #[test]
    fn test_partial_tiles_stay_transparent() {
        let palette = Palette::default();
        let grid = TileGrid::new(5, 4, 2, 2, vec![WALL_TILE; 4]).unwrap();
        let canvas = composite(&grid, &palette);
        assert_eq!(*canvas.get_pixel(3, 3), palette.wall);
        assert_eq!(*canvas.get_pixel(4, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_compositing_is_repeatable() {
        let palette = Palette::default();
        let grid = TileGrid::new(6, 4, 2, 2, vec![0, 1, 2, -1, 1, 3]).unwrap();
        assert_eq!(composite(&grid, &palette), composite(&grid, &palette));
    }
}
