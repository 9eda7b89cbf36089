use crate::core::Position;

/// A bounding box with one corner fixed at 0,0 and assumed to have positive extent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundsOriginRoot {
    pub extent: Position,
}

impl BoundsOriginRoot {
    pub fn new(width: i32, height: i32) -> BoundsOriginRoot {
        BoundsOriginRoot {
            extent: Position { x: width, y: height },
        }
    }

    pub fn contains(&self, pos: &Position) -> bool {
        pos.x >= 0 && pos.x < self.extent.x && pos.y >= 0 && pos.y < self.extent.y
    }

    pub fn area(&self) -> i32 {
        self.extent.x * self.extent.y
    }

    /// Every cell in row-major order.
    pub fn iter_positions(&self) -> impl Iterator<Item = Position> + use<> {
        let BoundsOriginRoot { extent } = *self;
        (0..extent.y).flat_map(move |y| (0..extent.x).map(move |x| Position { x, y }))
    }
}
