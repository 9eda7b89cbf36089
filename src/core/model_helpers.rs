use crate::core::{Color, Direction, MoveOutcome, Position};
use std::fmt;

impl Position {
    pub const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    pub fn offset(self, direction: Direction) -> Position {
        self + direction.offset()
    }
}

impl std::ops::Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Self::Output {
        Position {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn offset(self) -> Position {
        match self {
            Direction::Up => Position { x: 0, y: -1 },
            Direction::Down => Position { x: 0, y: 1 },
            Direction::Left => Position { x: -1, y: 0 },
            Direction::Right => Position { x: 1, y: 0 },
        }
    }

    /// Parses one of `U D L R` (either case), the notation used by move strings.
    pub fn from_char(c: char) -> Option<Direction> {
        match c.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::Orange,
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Gray,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Color::Orange => "orange",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Gray => "gray",
        }
    }
}

impl MoveOutcome {
    /// True for outcomes that changed a position.
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Step { .. } | MoveOutcome::Push { .. })
    }

    pub fn is_push(&self) -> bool {
        matches!(self, MoveOutcome::Push { .. })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn offsets_are_unit_and_opposite() {
        let origin = Position::new(3, 3);
        assert_eq!(origin.offset(Direction::Up), Position::new(3, 2));
        assert_eq!(origin.offset(Direction::Down), Position::new(3, 4));
        assert_eq!(origin.offset(Direction::Left), Position::new(2, 3));
        assert_eq!(origin.offset(Direction::Right), Position::new(4, 3));

        for dir in Direction::ALL {
            let o = dir.offset();
            assert_eq!(o.x.abs() + o.y.abs(), 1);
        }
    }

    #[test]
    fn direction_chars_parse_both_cases() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_char(dir.to_char()), Some(dir));
            assert_eq!(Direction::from_char(dir.to_char().to_ascii_lowercase()), Some(dir));
        }
        assert_eq!(Direction::from_char('x'), None);
    }
}
