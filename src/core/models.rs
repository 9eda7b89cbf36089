use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A cell coordinate. `x` is the column, `y` is the row, growing downward.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum Color {
    Orange,
    Red,
    Blue,
    Green,
    Gray,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Tile {
    Floor,
    Wall,
    Target(Color),
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct BoxId(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GameBox {
    pub id: BoxId,
    pub position: Position,
    pub color: Color,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Player {
    pub position: Position,
    pub facing: Direction,
}

/// What the resolver decided a move should do. Nothing has been applied yet.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Resolution {
    Blocked,
    Step {
        player_from: Position,
        player_to: Position,
    },
    Push {
        player_to: Position,
        box_id: BoxId,
        box_from: Position,
        box_to: Position,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The level is already complete; nothing happened.
    Rejected,
    Blocked {
        facing: Direction,
    },
    Step {
        from: Position,
        to: Position,
    },
    Push {
        player_to: Position,
        box_id: BoxId,
        box_from: Position,
        box_to: Position,
    },
}

pub type CoverageCount = BTreeMap<Color, usize>;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MoveReport {
    pub outcome: MoveOutcome,
    pub completed: bool,
    pub coverage: CoverageCount,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SessionState {
    InProgress,
    Completed,
}
