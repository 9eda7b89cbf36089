//! Tile codes of the level definition matrix. They are frame indices into the
//! tilesheet the levels were drawn with.

pub const FLOOR: u16 = 0;
pub const WALL: u16 = 100;
/// Blank space outside the room.
pub const VOID: u16 = 99;
pub const PLAYER: u16 = 52;

pub const BOX_ORANGE: u16 = 8;
pub const BOX_RED: u16 = 9;
pub const BOX_BLUE: u16 = 10;
pub const BOX_GREEN: u16 = 11;
pub const BOX_GRAY: u16 = 12;

pub const TARGET_ORANGE: u16 = 25;
pub const TARGET_RED: u16 = 38;
pub const TARGET_BLUE: u16 = 51;
pub const TARGET_GREEN: u16 = 64;
pub const TARGET_GRAY: u16 = 77;
