use crate::core::MoveOutcome;
use crate::score::{BestRecord, LevelStats};

pub struct GameRenderState {
    pub level_name: String,
    pub level_index: usize,
    pub level_count: usize,
    pub won: bool,
    pub finished: bool,
    pub last_outcome: Option<MoveOutcome>,
    pub stats: LevelStats,
    pub best: Option<BestRecord>,
}
