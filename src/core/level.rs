use crate::core::consts::*;
use crate::core::{Color, GridMap, Position, Tile};
use bimap::BiMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("malformed level: no tiles")]
    Empty,
    #[error("malformed level: row {row} has {found} tiles, expected {expected}")]
    NotRectangular { row: usize, expected: usize, found: usize },
    #[error("malformed level: unknown tile code {code} at {pos}")]
    UnknownTileCode { code: u16, pos: Position },
    #[error("malformed level: unknown character {ch:?} at {pos}")]
    UnknownCharacter { ch: char, pos: Position },
    #[error("malformed level: no player spawn")]
    MissingPlayer,
    #[error("malformed level: second player spawn at {second}, first at {first}")]
    DuplicatePlayer { first: Position, second: Position },
    #[error("malformed level: {color:?} box at {pos} has no paired target color")]
    UnpairedBox { color: Color, pos: Position },
    #[error("malformed level: {color:?} target at {pos} has no paired box color")]
    UnpairedTarget { color: Color, pos: Position },
    #[error("malformed level: spawn at {pos} is outside the grid")]
    SpawnOutOfBounds { pos: Position },
    #[error("malformed level: spawn at {pos} is on a wall")]
    SpawnOnWall { pos: Position },
    #[error("malformed level: two spawns share {pos}")]
    OverlappingSpawns { pos: Position },
    #[error("malformed level: no targets")]
    NoTargets,
}

/// What a single code of the level matrix stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileCode {
    Floor,
    Wall,
    Player,
    Box(Color),
    Target(Color),
}

/// The color pairing table: which codes are boxes, which are targets, and of
/// which color. Each color has at most one box code and one target code.
#[derive(Clone, Debug)]
pub struct Palette {
    box_codes: BiMap<u16, Color>,
    target_codes: BiMap<u16, Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Palette::empty()
            .with_pair(Color::Orange, BOX_ORANGE, TARGET_ORANGE)
            .with_pair(Color::Red, BOX_RED, TARGET_RED)
            .with_pair(Color::Blue, BOX_BLUE, TARGET_BLUE)
            .with_pair(Color::Green, BOX_GREEN, TARGET_GREEN)
            .with_pair(Color::Gray, BOX_GRAY, TARGET_GRAY)
    }
}

impl Palette {
    pub fn empty() -> Palette {
        Palette {
            box_codes: BiMap::new(),
            target_codes: BiMap::new(),
        }
    }

    pub fn with_pair(self, color: Color, box_code: u16, target_code: u16) -> Palette {
        self.with_box(color, box_code).with_target(color, target_code)
    }

    pub fn with_box(mut self, color: Color, code: u16) -> Palette {
        self.box_codes.insert(code, color);
        self
    }

    pub fn with_target(mut self, color: Color, code: u16) -> Palette {
        self.target_codes.insert(code, color);
        self
    }

    pub fn is_paired(&self, color: Color) -> bool {
        self.box_codes.contains_right(&color) && self.target_codes.contains_right(&color)
    }

    pub fn box_code(&self, color: Color) -> Option<u16> {
        self.box_codes.get_by_right(&color).copied()
    }

    pub fn target_code(&self, color: Color) -> Option<u16> {
        self.target_codes.get_by_right(&color).copied()
    }

    /// The target code paired with a box code.
    pub fn target_for_box(&self, box_code: u16) -> Option<u16> {
        let color = self.box_codes.get_by_left(&box_code)?;
        self.target_code(*color)
    }

    pub fn classify(&self, code: u16) -> Option<TileCode> {
        match code {
            FLOOR => Some(TileCode::Floor),
            WALL | VOID => Some(TileCode::Wall),
            PLAYER => Some(TileCode::Player),
            _ => {
                if let Some(&color) = self.box_codes.get_by_left(&code) {
                    Some(TileCode::Box(color))
                } else {
                    self.target_codes
                        .get_by_left(&code)
                        .map(|&color| TileCode::Target(color))
                }
            }
        }
    }
}

/// Where the movable pieces start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spawns {
    pub player: Position,
    pub boxes: Vec<(Position, Color)>,
}

/// A validated level: a grid plus spawns that fit it.
#[derive(Clone, Debug)]
pub struct LevelLayout {
    pub grid: GridMap,
    pub spawns: Spawns,
}

impl LevelLayout {
    pub fn new(grid: GridMap, spawns: Spawns) -> Result<LevelLayout, LevelError> {
        if grid.target_colors().is_empty() {
            return Err(LevelError::NoTargets);
        }

        let mut occupied = HashSet::new();
        let all_spawns = std::iter::once(spawns.player).chain(spawns.boxes.iter().map(|&(pos, _)| pos));
        for pos in all_spawns {
            if !grid.contains(&pos) {
                return Err(LevelError::SpawnOutOfBounds { pos });
            }
            if grid.is_wall(pos) {
                return Err(LevelError::SpawnOnWall { pos });
            }
            if !occupied.insert(pos) {
                return Err(LevelError::OverlappingSpawns { pos });
            }
        }

        Ok(LevelLayout { grid, spawns })
    }
}

/// A level as stored on disk: a matrix of tile codes, one row per line of the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    pub tiles: Vec<Vec<u16>>,
}

impl LevelDefinition {
    pub fn layout(&self) -> Result<LevelLayout, LevelError> {
        self.parse(&Palette::default())
    }

    pub fn parse(&self, palette: &Palette) -> Result<LevelLayout, LevelError> {
        let mut player: Option<Position> = None;
        let mut boxes = Vec::new();
        let mut rows = Vec::with_capacity(self.tiles.len());

        for (y, codes) in self.tiles.iter().enumerate() {
            let mut row = Vec::with_capacity(codes.len());
            for (x, &code) in codes.iter().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                let kind = palette
                    .classify(code)
                    .ok_or(LevelError::UnknownTileCode { code, pos })?;
                let tile = match kind {
                    TileCode::Floor => Tile::Floor,
                    TileCode::Wall => Tile::Wall,
                    TileCode::Player => {
                        if let Some(first) = player {
                            return Err(LevelError::DuplicatePlayer { first, second: pos });
                        }
                        player = Some(pos);
                        Tile::Floor
                    }
                    TileCode::Box(color) => {
                        if !palette.is_paired(color) {
                            return Err(LevelError::UnpairedBox { color, pos });
                        }
                        boxes.push((pos, color));
                        Tile::Floor
                    }
                    TileCode::Target(color) => {
                        if !palette.is_paired(color) {
                            return Err(LevelError::UnpairedTarget { color, pos });
                        }
                        Tile::Target(color)
                    }
                };
                row.push(tile);
            }
            rows.push(row);
        }

        let grid = GridMap::from_rows(rows)?;
        let player = player.ok_or(LevelError::MissingPlayer)?;
        LevelLayout::new(grid, Spawns { player, boxes })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn definition(tiles: Vec<Vec<u16>>) -> LevelDefinition {
        LevelDefinition {
            name: "test".to_string(),
            tiles,
        }
    }

    #[test]
    fn parses_codes_into_tiles_and_spawns() {
        let layout = definition(vec![
            vec![WALL, WALL, WALL, WALL],
            vec![WALL, PLAYER, BOX_RED, TARGET_RED],
            vec![VOID, WALL, WALL, WALL],
        ])
        .layout()
        .unwrap();

        assert_eq!(layout.spawns.player, Position::new(1, 1));
        assert_eq!(layout.spawns.boxes, vec![(Position::new(2, 1), Color::Red)]);
        assert_eq!(layout.grid.tile_at(Position::new(1, 1)), Ok(Tile::Floor));
        assert_eq!(layout.grid.tile_at(Position::new(2, 1)), Ok(Tile::Floor));
        assert_eq!(layout.grid.tile_at(Position::new(3, 1)), Ok(Tile::Target(Color::Red)));
        assert_eq!(layout.grid.tile_at(Position::new(0, 2)), Ok(Tile::Wall));
    }

    #[test]
    fn missing_player_is_malformed() {
        let err = definition(vec![vec![FLOOR, BOX_ORANGE, TARGET_ORANGE]]).layout().unwrap_err();
        assert_eq!(err, LevelError::MissingPlayer);
    }

    #[test]
    fn duplicate_player_is_malformed() {
        let err = definition(vec![vec![PLAYER, TARGET_ORANGE, PLAYER]]).layout().unwrap_err();
        assert_eq!(
            err,
            LevelError::DuplicatePlayer {
                first: Position::new(0, 0),
                second: Position::new(2, 0)
            }
        );
    }

    #[test]
    fn unknown_code_is_malformed() {
        let err = definition(vec![vec![PLAYER, 7]]).layout().unwrap_err();
        assert_eq!(err, LevelError::UnknownTileCode { code: 7, pos: Position::new(1, 0) });
    }

    #[test]
    fn color_without_pairing_is_malformed() {
        let palette = Palette::empty()
            .with_pair(Color::Orange, BOX_ORANGE, TARGET_ORANGE)
            .with_box(Color::Red, BOX_RED);
        let err = definition(vec![vec![PLAYER, BOX_RED, TARGET_ORANGE]])
            .parse(&palette)
            .unwrap_err();
        assert_eq!(err, LevelError::UnpairedBox { color: Color::Red, pos: Position::new(1, 0) });

        let palette = Palette::empty().with_target(Color::Blue, TARGET_BLUE);
        let err = definition(vec![vec![PLAYER, TARGET_BLUE]]).parse(&palette).unwrap_err();
        assert_eq!(err, LevelError::UnpairedTarget { color: Color::Blue, pos: Position::new(1, 0) });
    }

    #[test]
    fn level_without_targets_is_malformed() {
        let err = definition(vec![vec![PLAYER, BOX_ORANGE, FLOOR]]).layout().unwrap_err();
        assert_eq!(err, LevelError::NoTargets);
    }

    #[test]
    fn spawns_are_checked_against_the_grid() {
        let grid = GridMap::from_rows(vec![vec![Tile::Floor, Tile::Wall, Tile::Target(Color::Red)]]).unwrap();

        let out = Spawns { player: Position::new(5, 0), boxes: vec![] };
        assert_eq!(
            LevelLayout::new(grid.clone(), out).unwrap_err(),
            LevelError::SpawnOutOfBounds { pos: Position::new(5, 0) }
        );

        let on_wall = Spawns { player: Position::new(0, 0), boxes: vec![(Position::new(1, 0), Color::Red)] };
        assert_eq!(
            LevelLayout::new(grid.clone(), on_wall).unwrap_err(),
            LevelError::SpawnOnWall { pos: Position::new(1, 0) }
        );

        let stacked = Spawns { player: Position::new(2, 0), boxes: vec![(Position::new(2, 0), Color::Red)] };
        assert_eq!(
            LevelLayout::new(grid, stacked).unwrap_err(),
            LevelError::OverlappingSpawns { pos: Position::new(2, 0) }
        );
    }

    #[test]
    fn default_palette_pairs_box_and_target_codes() {
        let palette = Palette::default();
        assert_eq!(palette.target_for_box(BOX_ORANGE), Some(TARGET_ORANGE));
        assert_eq!(palette.target_for_box(BOX_GRAY), Some(TARGET_GRAY));
        assert_eq!(palette.target_for_box(TARGET_GRAY), None);
        assert_eq!(palette.classify(TARGET_BLUE), Some(TileCode::Target(Color::Blue)));
        assert_eq!(palette.classify(BOX_GREEN), Some(TileCode::Box(Color::Green)));
        assert_eq!(palette.box_code(Color::Red), Some(BOX_RED));
    }

    #[test]
    fn definitions_read_from_json() {
        let json = r#"{ "name": "one", "tiles": [[52, 8, 25]] }"#;
        let definition: LevelDefinition = serde_json::from_str(json).unwrap();
        let layout = definition.layout().unwrap();
        assert_eq!(layout.spawns.boxes, vec![(Position::new(1, 0), Color::Orange)]);
    }
}
