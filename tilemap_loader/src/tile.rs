use serde::Serialize;

/// Classification assigned to cells whose map index is 0 (no tile).
pub const EMPTY_TILE: i32 = -1;

/// Tile type authored for open floor.
pub const FLOOR_TILE: i32 = 0;

/// Tile type authored for walls.
pub const WALL_TILE: i32 = 1;

/// Rendering category of a resolved cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TileKind {
    /// No tile, or an authored floor tile.
    Empty,
    Wall,
    /// Any other classification. Drawn with the fallback color.
    Other(i32),
}

impl TileKind {
    pub fn from_classification(tile_type: i32) -> Self {
        match tile_type {
            EMPTY_TILE | FLOOR_TILE => TileKind::Empty,
            WALL_TILE => TileKind::Wall,
            other => TileKind::Other(other),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TileKind::Empty)
    }
}

impl From<i32> for TileKind {
    fn from(tile_type: i32) -> Self {
        Self::from_classification(tile_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_to_kind() {
        assert_eq!(TileKind::from(EMPTY_TILE), TileKind::Empty);
        assert_eq!(TileKind::from(FLOOR_TILE), TileKind::Empty);
        assert_eq!(TileKind::from(WALL_TILE), TileKind::Wall);
        assert_eq!(TileKind::from(7), TileKind::Other(7));
        assert!(!TileKind::Other(-3).is_empty());
    }
}
