use crate::core::{Color, CoverageCount, EntityRegistry, GridMap, Position};
use tracing::trace;

/// Per color, how many boxes of that color rest on a target of the same color.
///
/// Updated incrementally around every push; `rescan` is the reference it must
/// always agree with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageTracker {
    counts: CoverageCount,
}

impl CoverageTracker {
    pub fn new(grid: &GridMap, entities: &EntityRegistry) -> CoverageTracker {
        CoverageTracker {
            counts: Self::rescan(grid, entities),
        }
    }

    /// Counts from scratch. Every target color on the grid gets an entry, even at zero.
    pub fn rescan(grid: &GridMap, entities: &EntityRegistry) -> CoverageCount {
        let mut counts: CoverageCount = grid.target_colors().iter().map(|&c| (c, 0)).collect();
        for game_box in entities.boxes() {
            if grid.target_color_at(game_box.position) == Some(game_box.color) {
                *counts.entry(game_box.color).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn on_box_left(&mut self, color: Color, pos: Position, grid: &GridMap) {
        if grid.target_color_at(pos) != Some(color) {
            return;
        }
        let count = self.counts.entry(color).or_insert(0);
        assert!(*count > 0, "{} coverage would go negative leaving {}", color.name(), pos);
        *count -= 1;
        trace!(color = color.name(), %pos, count = *count, "box left target");
    }

    pub fn on_box_entered(&mut self, color: Color, pos: Position, grid: &GridMap) {
        if grid.target_color_at(pos) != Some(color) {
            return;
        }
        let count = self.counts.entry(color).or_insert(0);
        *count += 1;
        trace!(color = color.name(), %pos, count = *count, "box entered target");
    }

    pub fn count(&self, color: Color) -> usize {
        self.counts.get(&color).copied().unwrap_or(0)
    }

    pub fn snapshot(&self) -> CoverageCount {
        self.counts.clone()
    }

    pub fn counts(&self) -> &CoverageCount {
        &self.counts
    }
}
