use crate::core::bounded_grid::BoundedGrid;
use crate::core::bounds::BoundsOriginRoot;
use crate::core::{Color, LevelError, Position, Tile};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("position {pos} is outside the {width}x{height} grid")]
    OutOfBounds { pos: Position, width: i32, height: i32 },
}

/// The immutable tile layout of a level.
#[derive(Clone, Debug)]
pub struct GridMap {
    tiles: BoundedGrid<Tile>,
    target_colors: BTreeSet<Color>,
}

impl GridMap {
    /// Builds a grid from rows of tiles. Rows must be non-empty and of equal length.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<GridMap, LevelError> {
        let height = rows.len();
        let width = rows.first().map(|row| row.len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(LevelError::Empty);
        }
        if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(LevelError::NotRectangular {
                row,
                expected: width,
                found: bad.len(),
            });
        }

        let bounds = BoundsOriginRoot::new(width as i32, height as i32);
        let mut tiles = BoundedGrid::new(bounds, Tile::Floor);
        let mut target_colors = BTreeSet::new();
        for (y, row) in rows.into_iter().enumerate() {
            for (x, tile) in row.into_iter().enumerate() {
                if let Tile::Target(color) = tile {
                    target_colors.insert(color);
                }
                tiles[&Position::new(x as i32, y as i32)] = tile;
            }
        }

        Ok(GridMap { tiles, target_colors })
    }

    pub fn width(&self) -> i32 {
        self.tiles.size().extent.x
    }

    pub fn height(&self) -> i32 {
        self.tiles.size().extent.y
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.tiles.contains(pos)
    }

    pub fn tile_at(&self, pos: Position) -> Result<Tile, GridError> {
        self.tiles.get(&pos).copied().ok_or(GridError::OutOfBounds {
            pos,
            width: self.width(),
            height: self.height(),
        })
    }

    /// Cells past the edge of the grid count as wall.
    pub fn is_wall(&self, pos: Position) -> bool {
        matches!(self.tiles.get(&pos), None | Some(Tile::Wall))
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        !self.is_wall(pos)
    }

    pub fn target_color_at(&self, pos: Position) -> Option<Color> {
        match self.tiles.get(&pos) {
            Some(Tile::Target(color)) => Some(*color),
            _ => None,
        }
    }

    /// Colors that have at least one target on this grid.
    pub fn target_colors(&self) -> &BTreeSet<Color> {
        &self.target_colors
    }

    pub fn targets(&self) -> impl Iterator<Item = (Position, Color)> + '_ {
        self.tiles.iter().filter_map(|(pos, tile)| match tile {
            Tile::Target(color) => Some((pos, *color)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use Tile::*;

    fn small_grid() -> GridMap {
        GridMap::from_rows(vec![
            vec![Wall, Wall, Wall],
            vec![Wall, Floor, Target(Color::Red)],
            vec![Wall, Target(Color::Blue), Wall],
        ])
        .unwrap()
    }

    #[test]
    fn tile_at_reads_rows_as_y() {
        let grid = small_grid();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.tile_at(Position::new(2, 1)), Ok(Target(Color::Red)));
        assert_eq!(grid.tile_at(Position::new(1, 2)), Ok(Target(Color::Blue)));
        assert_eq!(grid.tile_at(Position::new(1, 1)), Ok(Floor));
    }

    #[test]
    fn tile_at_outside_is_out_of_bounds() {
        let grid = small_grid();
        assert_eq!(
            grid.tile_at(Position::new(3, 0)),
            Err(GridError::OutOfBounds { pos: Position::new(3, 0), width: 3, height: 3 })
        );
    }

    #[test]
    fn outside_counts_as_wall_and_targets_are_walkable() {
        let grid = small_grid();
        assert!(grid.is_wall(Position::new(-1, 1)));
        assert!(grid.is_wall(Position::new(0, 0)));
        assert!(grid.is_walkable(Position::new(2, 1)));
        assert_eq!(grid.target_color_at(Position::new(2, 1)), Some(Color::Red));
        assert_eq!(grid.target_color_at(Position::new(1, 1)), None);
        assert_eq!(grid.target_color_at(Position::new(9, 9)), None);
    }

    #[test]
    fn target_colors_lists_present_colors() {
        let grid = small_grid();
        let colors: Vec<_> = grid.target_colors().iter().copied().collect();
        assert_eq!(colors, vec![Color::Red, Color::Blue]);
        assert_eq!(grid.targets().count(), 2);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let result = GridMap::from_rows(vec![vec![Floor, Floor], vec![Floor]]);
        assert_eq!(
            result.unwrap_err(),
            LevelError::NotRectangular { row: 1, expected: 2, found: 1 }
        );
        assert_eq!(GridMap::from_rows(vec![]).unwrap_err(), LevelError::Empty);
    }
}
