use super::direction::Direction;

/// A cell on the game grid, 0-indexed from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell offset by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Neighbouring cell one step in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_by(-1, 0), Cell::new(4, 5));
        assert_eq!(cell.moved_by(0, 1), Cell::new(5, 6));
        assert_eq!(cell.moved_by(0, -1), Cell::new(5, 4));
    }

    #[test]
    fn test_moved_in_direction() {
        let cell = Cell::new(0, 0);
        assert_eq!(cell.moved_in_direction(Direction::Up), Cell::new(0, -1));
        assert_eq!(cell.moved_in_direction(Direction::Left), Cell::new(-1, 0));
        assert_eq!(cell.moved_in_direction(Direction::Right), Cell::new(1, 0));
    }

    #[test]
    fn test_equality_by_value() {
        assert_eq!(Cell::new(3, 4), Cell::new(3, 4));
        assert_ne!(Cell::new(3, 4), Cell::new(4, 3));
    }
}
