use crate::core::{
    Direction, LevelDefinition, LevelError, LevelLayout, LevelSession, MoveReport, SessionState,
};
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CampaignProgress {
    /// The session now plays the level at this index.
    NextLevel(usize),
    /// The last level was completed; there is nothing left to play.
    Finished,
    /// The current level is not complete yet.
    NotComplete,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CampaignError {
    #[error("campaign has no levels")]
    NoLevels,
    #[error("level {index} ({name}) is malformed")]
    Level {
        index: usize,
        name: String,
        #[source]
        source: LevelError,
    },
}

/// Plays an ordered list of levels, moving on once each one is complete.
#[derive(Clone, Debug)]
pub struct Campaign {
    levels: Vec<(String, LevelLayout)>,
    index: usize,
    session: LevelSession,
    finished: bool,
}

impl Campaign {
    /// Validates every level up front so a bad level fails before play starts.
    pub fn new(definitions: &[LevelDefinition]) -> Result<Campaign, CampaignError> {
        let levels = definitions
            .iter()
            .enumerate()
            .map(|(index, def)| {
                def.layout()
                    .map(|layout| (def.name.clone(), layout))
                    .map_err(|source| CampaignError::Level {
                        index,
                        name: def.name.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_layouts(levels)
    }

    pub fn from_layouts(levels: Vec<(String, LevelLayout)>) -> Result<Campaign, CampaignError> {
        let Some((_, first)) = levels.first() else {
            return Err(CampaignError::NoLevels);
        };
        let session = LevelSession::new(first.clone());
        Ok(Campaign {
            levels,
            index: 0,
            session,
            finished: false,
        })
    }

    pub fn submit_move(&mut self, direction: Direction) -> MoveReport {
        self.session.submit_move(direction)
    }

    /// True once the current level is complete, including a level that was solved at load.
    pub fn level_complete(&self) -> bool {
        self.session.current_state() == SessionState::Completed
    }

    /// Moves to the next level if the current one is complete.
    pub fn advance(&mut self) -> CampaignProgress {
        if self.finished {
            return CampaignProgress::Finished;
        }
        if !self.level_complete() {
            return CampaignProgress::NotComplete;
        }
        if self.index + 1 >= self.levels.len() {
            self.finished = true;
            info!(levels = self.levels.len(), "campaign finished");
            return CampaignProgress::Finished;
        }
        self.jump_to(self.index + 1);
        CampaignProgress::NextLevel(self.index)
    }

    /// Starts the level at `index` with a fresh session. Returns false if there is no such level.
    pub fn jump_to(&mut self, index: usize) -> bool {
        let Some((name, layout)) = self.levels.get(index) else {
            return false;
        };
        info!(index, name = name.as_str(), "starting level");
        self.index = index;
        self.session = LevelSession::new(layout.clone());
        self.finished = false;
        true
    }

    pub fn restart_level(&mut self) {
        self.session.reset();
    }

    pub fn session(&self) -> &LevelSession {
        &self.session
    }

    pub fn level_name(&self) -> &str {
        &self.levels[self.index].0
    }

    pub fn level_index(&self) -> usize {
        self.index
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
