use crate::core::Position;
use crate::core::bounds::BoundsOriginRoot;

#[derive(Clone, Debug)]
pub struct BoundedGrid<T> {
    bounds: BoundsOriginRoot,
    cells: Vec<T>,
}

impl<T> BoundedGrid<T> {
    pub fn new(bounds: BoundsOriginRoot, default: T) -> Self
    where
        T: Clone,
    {
        let cells = vec![default; bounds.area() as usize];
        BoundedGrid { bounds, cells }
    }

    pub fn size(&self) -> BoundsOriginRoot {
        self.bounds
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.bounds.contains(pos)
    }

    pub fn get(&self, pos: &Position) -> Option<&T> {
        if !self.bounds.contains(pos) {
            return None;
        }
        Some(&self[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        self.bounds.iter_positions().zip(self.cells.iter())
    }

    fn index_of(&self, pos: &Position) -> usize {
        assert!(self.bounds.contains(pos), "position {pos} is outside the grid");
        (pos.y * self.bounds.extent.x + pos.x) as usize
    }
}

impl<T> std::ops::Index<&Position> for BoundedGrid<T> {
    type Output = T;

    fn index(&self, index: &Position) -> &Self::Output {
        &self.cells[self.index_of(index)]
    }
}

impl<T> std::ops::IndexMut<&Position> for BoundedGrid<T> {
    fn index_mut(&mut self, index: &Position) -> &mut Self::Output {
        let i = self.index_of(index);
        &mut self.cells[i]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn get_outside_is_none() {
        let mut grid = BoundedGrid::new(BoundsOriginRoot::new(2, 3), 0u8);
        grid[&Position::new(1, 2)] = 7;
        assert_eq!(grid.get(&Position::new(1, 2)), Some(&7));
        assert_eq!(grid.get(&Position::new(2, 0)), None);
        assert_eq!(grid.get(&Position::new(0, -1)), None);
    }

    #[test]
    #[should_panic]
    fn index_outside_panics() {
        let grid = BoundedGrid::new(BoundsOriginRoot::new(2, 2), 0u8);
        let _value: u8 = grid[&Position::new(2, 0)];
    }
}
