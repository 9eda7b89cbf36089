use crate::core::{Direction, EntityRegistry, GridMap, Resolution};

/// Decides what a move in `direction` would do, without applying it.
pub fn resolve_move(grid: &GridMap, entities: &EntityRegistry, direction: Direction) -> Resolution {
    let player_from = entities.player_position();
    let target_cell = player_from.offset(direction);

    if grid.is_wall(target_cell) {
        return Resolution::Blocked;
    }

    let Some(pushed) = entities.box_at(target_cell) else {
        return Resolution::Step {
            player_from,
            player_to: target_cell,
        };
    };

    let push_cell = pushed.position.offset(direction);
    if grid.is_wall(push_cell) || entities.has_box_at(push_cell) {
        return Resolution::Blocked;
    }

    Resolution::Push {
        player_to: target_cell,
        box_id: pushed.id,
        box_from: pushed.position,
        box_to: push_cell,
    }
}

/// Every direction paired with what it would do from the current state.
pub fn resolve_all(grid: &GridMap, entities: &EntityRegistry) -> [(Direction, Resolution); 4] {
    Direction::ALL.map(|dir| (dir, resolve_move(grid, entities, dir)))
}
