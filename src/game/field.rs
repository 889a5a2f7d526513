use std::collections::HashSet;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::{cell::Cell, config::GameConfig, snake::Snake};

/// The board: fixed dimensions plus the apples of the current level
#[derive(Debug, Clone)]
pub struct GameField {
    width: usize,
    height: usize,
    apples: HashSet<Cell>,
    initial_apples: usize,
    apples_per_level: usize,
    rng: StdRng,
}

impl GameField {
    /// Create an empty field; call [`GameField::seed`] to place apples
    pub fn new(config: &GameConfig, rng: StdRng) -> Self {
        Self {
            width: config.grid_width,
            height: config.grid_height,
            apples: HashSet::new(),
            initial_apples: config.initial_apples,
            apples_per_level: config.apples_per_level,
            rng,
        }
    }

    /// Create a field with a fixed apple layout; out-of-bounds cells are dropped
    pub fn with_apples(config: &GameConfig, apples: impl IntoIterator<Item = Cell>) -> Self {
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or_default());
        let mut field = Self::new(config, rng);
        let apples: HashSet<Cell> = apples
            .into_iter()
            .filter(|cell| field.is_in_bounds(*cell))
            .collect();
        field.apples = apples;
        field
    }

    /// Number of apples a level starts with
    pub fn apples_for_level(&self, level: u32) -> usize {
        self.initial_apples + level as usize * self.apples_per_level
    }

    /// Replace the apple set with a fresh layout for `level`
    ///
    /// Apples go on distinct in-bounds cells the snake does not cover. If the
    /// board has fewer free cells than the level asks for, every free cell
    /// gets an apple.
    pub fn seed(&mut self, level: u32, snake: &Snake) {
        let wanted = self.apples_for_level(level);
        let free: Vec<Cell> = (0..self.height as i32)
            .flat_map(|y| (0..self.width as i32).map(move |x| Cell::new(x, y)))
            .filter(|cell| !snake.contains(*cell))
            .collect();

        self.apples = free
            .choose_multiple(&mut self.rng, wanted)
            .copied()
            .collect();
    }

    pub fn apples(&self) -> &HashSet<Cell> {
        &self.apples
    }

    pub fn is_apple_inside(&self, cell: Cell) -> bool {
        self.apples.contains(&cell)
    }

    /// Remove the apple at `cell`, if there is one
    pub fn remove_apple(&mut self, cell: Cell) {
        self.apples.remove(&cell);
    }

    pub fn is_empty(&self) -> bool {
        self.apples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.apples.len()
    }

    /// Check if a cell is within the grid bounds
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.x < self.width as i32
            && cell.y >= 0
            && cell.y < self.height as i32
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    fn seeded_field(config: &GameConfig, seed: u64) -> GameField {
        GameField::new(config, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_should_have_five_apples_on_first_level() {
        let config = GameConfig::default();
        let snake = Snake::new(Cell::new(40, 20), Direction::Right, 3);
        let mut field = seeded_field(&config, 1);

        field.seed(0, &snake);

        assert_eq!(field.apples().len(), 5);
        assert!(!field.is_empty());
    }

    #[test]
    fn test_apple_count_grows_with_level() {
        let config = GameConfig::small();
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);
        let mut field = seeded_field(&config, 2);

        field.seed(3, &snake);

        assert_eq!(field.apples_for_level(3), 8);
        assert_eq!(field.len(), 8);
    }

    #[test]
    fn test_seeded_apples_avoid_snake_and_stay_in_bounds() {
        let config = GameConfig::small();
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 5);

        for seed in 0..20 {
            let mut field = seeded_field(&config, seed);
            field.seed(0, &snake);

            for apple in field.apples() {
                assert!(field.is_in_bounds(*apple));
                assert!(!snake.contains(*apple));
            }
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let config = GameConfig::small();
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        let mut a = seeded_field(&config, 42);
        let mut b = seeded_field(&config, 42);
        a.seed(1, &snake);
        b.seed(1, &snake);

        assert_eq!(a.apples(), b.apples());
    }

    #[test]
    fn test_seed_clamps_to_free_cells() {
        let config = GameConfig {
            initial_apples: 50,
            ..GameConfig::new(2, 2)
        };
        let snake = Snake::new(Cell::new(1, 0), Direction::Right, 2);
        let mut field = seeded_field(&config, 0);

        field.seed(0, &snake);

        let expected: HashSet<Cell> = [Cell::new(0, 1), Cell::new(1, 1)].into_iter().collect();
        assert_eq!(field.apples(), &expected);
    }

    #[test]
    fn test_remove_apple_is_idempotent() {
        let config = GameConfig::small();
        let mut field = GameField::with_apples(&config, [Cell::new(1, 1), Cell::new(2, 2)]);

        field.remove_apple(Cell::new(1, 1));
        assert!(!field.is_apple_inside(Cell::new(1, 1)));
        assert_eq!(field.len(), 1);

        field.remove_apple(Cell::new(1, 1));
        field.remove_apple(Cell::new(7, 7));
        assert_eq!(field.len(), 1);
        assert!(field.is_apple_inside(Cell::new(2, 2)));

        field.remove_apple(Cell::new(2, 2));
        assert!(field.is_empty());
    }

    #[test]
    fn test_with_apples_drops_out_of_bounds() {
        let config = GameConfig::small();
        let field = GameField::with_apples(
            &config,
            [Cell::new(-1, 0), Cell::new(10, 3), Cell::new(9, 9)],
        );
        assert_eq!(field.len(), 1);
        assert!(field.is_apple_inside(Cell::new(9, 9)));
    }

    #[test]
    fn test_bounds_checking() {
        let field = GameField::with_apples(&GameConfig::new(20, 20), Vec::new());

        assert!(field.is_in_bounds(Cell::new(0, 0)));
        assert!(field.is_in_bounds(Cell::new(19, 19)));
        assert!(!field.is_in_bounds(Cell::new(-1, 0)));
        assert!(!field.is_in_bounds(Cell::new(20, 0)));
        assert!(!field.is_in_bounds(Cell::new(0, 20)));
    }
}
