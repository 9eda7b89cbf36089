//! Host-side bookkeeping layered on the move report stream: move counters, a
//! level timer, and best results persisted between runs.

use crate::core::{MoveOutcome, MoveReport};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct LevelStats {
    pub moves: u32,
    pub pushes: u32,
    pub bumps: u32,
    started: Instant,
    finished: Option<Duration>,
}

impl LevelStats {
    pub fn start() -> LevelStats {
        Self::start_at(Instant::now())
    }

    pub fn start_at(started: Instant) -> LevelStats {
        LevelStats {
            moves: 0,
            pushes: 0,
            bumps: 0,
            started,
            finished: None,
        }
    }

    pub fn record(&mut self, report: &MoveReport) {
        self.record_at(report, Instant::now());
    }

    pub fn record_at(&mut self, report: &MoveReport, now: Instant) {
        match report.outcome {
            MoveOutcome::Step { .. } => self.moves += 1,
            MoveOutcome::Push { .. } => {
                self.moves += 1;
                self.pushes += 1;
            }
            MoveOutcome::Blocked { .. } => self.bumps += 1,
            MoveOutcome::Rejected => return,
        }
        if report.completed && self.finished.is_none() {
            self.finished = Some(now.saturating_duration_since(self.started));
        }
    }

    /// Time since the level started, frozen once it was completed.
    pub fn elapsed(&self) -> Duration {
        self.finished.unwrap_or_else(|| self.started.elapsed())
    }

    pub fn finished_in(&self) -> Option<Duration> {
        self.finished
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BestRecord {
    pub seconds: f32,
    pub moves: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BestTimes {
    pub levels: BTreeMap<String, BestRecord>,
}

impl BestTimes {
    /// A missing file is an empty table.
    pub fn load(path: &Path) -> anyhow::Result<BestTimes> {
        if !path.exists() {
            return Ok(BestTimes::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading best times from {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing best times in {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).with_context(|| format!("writing best times to {}", path.display()))
    }

    pub fn get(&self, level: &str) -> Option<&BestRecord> {
        self.levels.get(level)
    }

    /// Keeps the better of the stored and the new result for each measure. Returns true if either improved.
    pub fn submit(&mut self, level: &str, seconds: f32, moves: u32) -> bool {
        match self.levels.get_mut(level) {
            None => {
                self.levels.insert(level.to_string(), BestRecord { seconds, moves });
                true
            }
            Some(best) => {
                let mut improved = false;
                if seconds < best.seconds {
                    best.seconds = seconds;
                    improved = true;
                }
                if moves < best.moves {
                    best.moves = moves;
                    improved = true;
                }
                improved
            }
        }
    }
}
