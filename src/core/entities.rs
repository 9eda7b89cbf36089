use crate::core::{BoxId, Color, Direction, GameBox, Player, Position, Spawns};

/// Live positions of the player and every box in a level.
///
/// `move_box` and `move_player` are the only position mutators. Both assert the
/// occupancy invariants; the resolver must never ask for an illegal move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityRegistry {
    player: Player,
    boxes: Vec<GameBox>,
}

impl EntityRegistry {
    pub fn from_spawns(spawns: &Spawns) -> EntityRegistry {
        let boxes = spawns
            .boxes
            .iter()
            .enumerate()
            .map(|(i, &(position, color))| GameBox {
                id: BoxId(i),
                position,
                color,
            })
            .collect();
        EntityRegistry {
            player: Player {
                position: spawns.player,
                facing: Direction::Down,
            },
            boxes,
        }
    }

    pub fn player_position(&self) -> Position {
        self.player.position
    }

    pub fn player_facing(&self) -> Direction {
        self.player.facing
    }

    pub fn boxes(&self) -> impl Iterator<Item = &GameBox> {
        self.boxes.iter()
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    pub fn boxes_of_color(&self, color: Color) -> usize {
        self.boxes.iter().filter(|b| b.color == color).count()
    }

    pub fn box_at(&self, position: Position) -> Option<&GameBox> {
        self.boxes.iter().find(|b| b.position == position)
    }

    pub fn has_box_at(&self, position: Position) -> bool {
        self.box_at(position).is_some()
    }

    pub fn get_box(&self, id: BoxId) -> Option<&GameBox> {
        self.boxes.get(id.0)
    }

    pub fn move_box(&mut self, id: BoxId, new_position: Position) {
        assert!(
            self.boxes.iter().all(|b| b.id == id || b.position != new_position),
            "box {:?} cannot move onto occupied cell {}",
            id,
            new_position
        );
        assert_ne!(
            self.player.position, new_position,
            "box {:?} cannot move onto the player", id
        );
        let game_box = self
            .boxes
            .get_mut(id.0)
            .unwrap_or_else(|| panic!("no box with id {:?}", id));
        game_box.position = new_position;
    }

    pub fn move_player(&mut self, new_position: Position) {
        assert!(
            !self.has_box_at(new_position),
            "player cannot move onto box at {}",
            new_position
        );
        self.player.position = new_position;
    }

    pub fn face(&mut self, direction: Direction) {
        self.player.facing = direction;
    }
}
