mod bounded_grid;
mod bounds;
mod campaign;
pub mod consts;
mod coverage;
mod entities;
mod grid_map;
mod level;
mod model_helpers;
mod models;
mod session;
mod update;

pub use bounds::BoundsOriginRoot;
pub use campaign::{Campaign, CampaignError, CampaignProgress};
pub use coverage::CoverageTracker;
pub use entities::EntityRegistry;
pub use grid_map::{GridError, GridMap};
pub use level::{LevelDefinition, LevelError, LevelLayout, Palette, Spawns, TileCode};
pub use models::{
    BoxId, Color, CoverageCount, Direction, GameBox, MoveOutcome, MoveReport, Player, Position,
    Resolution, SessionState, Tile,
};
pub use session::LevelSession;
pub use update::{resolve_all, resolve_move};
