use crate::core::{
    resolve_move, Color, CoverageCount, CoverageTracker, Direction, EntityRegistry, GridMap,
    LevelDefinition, LevelError, LevelLayout, MoveOutcome, MoveReport, Resolution, SessionState,
    Spawns,
};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// One playthrough of a level.
///
/// Owns every piece of mutable puzzle state; nothing is shared between sessions.
#[derive(Clone, Debug)]
pub struct LevelSession {
    grid: GridMap,
    initial: Spawns,
    entities: EntityRegistry,
    coverage: CoverageTracker,
    box_totals: BTreeMap<Color, usize>,
    state: SessionState,
}

impl LevelSession {
    pub fn new(layout: LevelLayout) -> LevelSession {
        let LevelLayout { grid, spawns } = layout;
        let entities = EntityRegistry::from_spawns(&spawns);
        let coverage = CoverageTracker::new(&grid, &entities);
        let mut box_totals = BTreeMap::new();
        for game_box in entities.boxes() {
            *box_totals.entry(game_box.color).or_insert(0) += 1;
        }

        let mut session = LevelSession {
            grid,
            initial: spawns,
            entities,
            coverage,
            box_totals,
            state: SessionState::InProgress,
        };
        session.state = session.evaluate_state();
        session
    }

    pub fn from_definition(definition: &LevelDefinition) -> Result<LevelSession, LevelError> {
        Ok(LevelSession::new(definition.layout()?))
    }

    pub fn submit_move(&mut self, direction: Direction) -> MoveReport {
        if self.state == SessionState::Completed {
            warn!(?direction, "move rejected, level already complete");
            return self.report(MoveOutcome::Rejected);
        }

        let resolution = resolve_move(&self.grid, &self.entities, direction);
        debug!(?direction, ?resolution, "resolved move");
        self.entities.face(direction);

        let outcome = match resolution {
            Resolution::Blocked => {
                return self.report(MoveOutcome::Blocked { facing: direction });
            }
            Resolution::Step { player_from, player_to } => {
                self.entities.move_player(player_to);
                MoveOutcome::Step {
                    from: player_from,
                    to: player_to,
                }
            }
            Resolution::Push {
                player_to,
                box_id,
                box_from,
                box_to,
            } => {
                let color = match self.entities.get_box(box_id) {
                    Some(game_box) => game_box.color,
                    None => unreachable!("resolver returned unknown box {:?}", box_id),
                };
                self.coverage.on_box_left(color, box_from, &self.grid);
                self.entities.move_box(box_id, box_to);
                self.coverage.on_box_entered(color, box_to, &self.grid);
                self.entities.move_player(player_to);
                MoveOutcome::Push {
                    player_to,
                    box_id,
                    box_from,
                    box_to,
                }
            }
        };

        if self.is_complete() {
            self.state = SessionState::Completed;
            info!(coverage = ?self.coverage.counts(), "level complete");
        }
        self.report(outcome)
    }

    /// True when every target color on the grid is covered by all boxes of that color.
    pub fn is_complete(&self) -> bool {
        Self::covers_all(&self.grid, self.coverage.counts(), &self.box_totals)
    }

    /// The same check as `is_complete`, recounted from the registry.
    pub fn is_complete_by_rescan(&self) -> bool {
        let counts = CoverageTracker::rescan(&self.grid, &self.entities);
        Self::covers_all(&self.grid, &counts, &self.box_totals)
    }

    fn covers_all(grid: &GridMap, counts: &CoverageCount, totals: &BTreeMap<Color, usize>) -> bool {
        grid.target_colors().iter().all(|color| {
            let covered = counts.get(color).copied().unwrap_or(0);
            let total = totals.get(color).copied().unwrap_or(0);
            covered == total
        })
    }

    fn evaluate_state(&self) -> SessionState {
        if self.is_complete() {
            SessionState::Completed
        } else {
            SessionState::InProgress
        }
    }

    pub fn reset(&mut self) {
        self.entities = EntityRegistry::from_spawns(&self.initial);
        self.coverage = CoverageTracker::new(&self.grid, &self.entities);
        self.state = self.evaluate_state();
        info!("level reset");
    }

    fn report(&self, outcome: MoveOutcome) -> MoveReport {
        MoveReport {
            outcome,
            completed: self.state == SessionState::Completed,
            coverage: self.coverage.snapshot(),
        }
    }

    pub fn current_state(&self) -> SessionState {
        self.state
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    pub fn coverage(&self) -> &CoverageTracker {
        &self.coverage
    }

    pub fn box_totals(&self) -> &BTreeMap<Color, usize> {
        &self.box_totals
    }
}
