use std::collections::VecDeque;

use super::{cell::Cell, direction::Direction};

/// The snake: an ordered body (head first) and a heading
///
/// Body length only ever changes through [`Snake::grow`]. A plain
/// [`Snake::advance`] keeps the length by releasing the last cell; `grow`
/// either reclaims that released cell or, if nothing was released since the
/// last growth, makes the next `advance` keep its tail.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending_growth: bool,
    vacated: Option<Cell>,
}

impl Snake {
    /// Create a snake whose body trails straight behind the head
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self {
            body,
            direction,
            pending_growth: false,
            vacated: None,
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Body cells after the head, order preserved
    pub fn tail(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().skip(1).copied()
    }

    /// All body cells, head first
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Replace the heading; reversals are not filtered here
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Move one cell along the current heading
    pub fn advance(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.push_front(new_head);

        if self.pending_growth {
            self.pending_growth = false;
            self.vacated = None;
        } else {
            self.vacated = self.body.pop_back();
        }
    }

    /// Lengthen the body by one cell at the tail end
    pub fn grow(&mut self) {
        match self.vacated.take() {
            Some(cell) => self.body.push_back(cell),
            None => self.pending_growth = true,
        }
    }

    /// True if `cell` is covered by the body, head excluded
    pub fn is_taken_by_snake(&self, cell: Cell) -> bool {
        self.tail().any(|segment| segment == cell)
    }

    /// True if `cell` is covered by any part of the snake
    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Pairs with `len` for clippy's `len_without_is_empty`; a snake always has a head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
