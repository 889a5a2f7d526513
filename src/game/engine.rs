use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use super::{
    cell::Cell,
    config::GameConfig,
    direction::Direction,
    field::GameField,
    snake::Snake,
};

/// Type of collision that ends a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head left the board
    Wall,
    /// Head ran into the body
    SelfCollision,
}

/// Why a game stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last level was cleared
    Won,
    /// The snake collided
    Died(CollisionType),
    /// The driver stopped the game
    Aborted,
}

/// Lifecycle of a game; `Stopped` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Stopped(StopReason),
}

/// Classification of the board after the snake has moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Lethal(CollisionType),
    Eat,
    Neutral,
}

/// What a call to [`Game::update`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Not due yet, or the game has stopped; nothing changed
    Idle,
    /// The snake moved onto an empty cell
    Moved,
    /// The snake ate an apple and apples remain
    AteApple { apple: Cell },
    /// The last apple was eaten and a new level started
    LevelUp { level: u32 },
    /// The last apple of the final level was eaten
    Won,
    /// The snake collided
    Died(CollisionType),
}

/// One play session: the snake, the field, and the progression around them
///
/// Time is an absolute millisecond clock supplied by the driver. The driver
/// polls [`Game::should_update`] every frame and calls [`Game::update`] when
/// it returns true.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    field: GameField,
    snake: Snake,
    score: u32,
    level: u32,
    speed: u64,
    status: GameStatus,
    next_tick: u64,
}

impl Game {
    /// Start a new game: snake centred and heading right, level 0 apples seeded
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let center_x = (config.grid_width / 2) as i32;
        let center_y = (config.grid_height / 2) as i32;
        let snake = Snake::new(
            Cell::new(center_x, center_y),
            Direction::Right,
            config.initial_snake_length,
        );

        let mut field = GameField::new(&config, rng);
        field.seed(0, &snake);

        Self::from_parts(config, snake, field)
    }

    /// Start a game from a prepared snake and field
    pub fn from_parts(config: GameConfig, snake: Snake, field: GameField) -> Self {
        let speed = config.default_speed;
        Self {
            config,
            field,
            snake,
            score: 0,
            level: 0,
            speed,
            status: GameStatus::Running,
            next_tick: 0,
        }
    }

    /// True when the game is running and the next tick is due
    pub fn should_update(&self, time: u64) -> bool {
        self.is_running() && time >= self.next_tick
    }

    /// Run one tick at `time`
    ///
    /// Calls that are not due (see [`Game::should_update`]) change nothing and
    /// return [`TickEvent::Idle`], so a stopped game stays frozen.
    pub fn update(&mut self, time: u64) -> TickEvent {
        if !self.should_update(time) {
            return TickEvent::Idle;
        }

        self.next_tick = time + self.speed;
        self.snake.advance();

        match self.check_state() {
            Outcome::Lethal(collision) => {
                info!(
                    ?collision,
                    head = ?self.snake.head(),
                    score = self.score,
                    level = self.level,
                    "Snake died"
                );
                self.status = GameStatus::Stopped(StopReason::Died(collision));
                TickEvent::Died(collision)
            }
            Outcome::Eat => self.eat(),
            Outcome::Neutral => TickEvent::Moved,
        }
    }

    /// Classify the board for the snake's current head
    pub fn check_state(&self) -> Outcome {
        let head = self.snake.head();

        if !self.field.is_in_bounds(head) {
            return Outcome::Lethal(CollisionType::Wall);
        }
        if self.snake.is_taken_by_snake(head) {
            return Outcome::Lethal(CollisionType::SelfCollision);
        }
        if self.field.is_apple_inside(head) {
            return Outcome::Eat;
        }
        Outcome::Neutral
    }

    fn eat(&mut self) -> TickEvent {
        let apple = self.snake.head();

        self.snake.grow();
        self.score += self.config.apple_reward;
        self.field.remove_apple(apple);
        debug!(?apple, score = self.score, remaining = self.field.len(), "Apple eaten");

        if self.field.is_empty() {
            return self.level_up();
        }
        TickEvent::AteApple { apple }
    }

    fn level_up(&mut self) -> TickEvent {
        self.score += self.config.level_bonus;
        self.level += 1;

        if self.level < self.config.max_level {
            self.speed = self.speed.saturating_sub(self.config.speed_step);
            self.field.seed(self.level, &self.snake);
            if self.field.is_empty() {
                info!(score = self.score, level = self.level, "Board full, no room for apples");
                self.status = GameStatus::Stopped(StopReason::Won);
                return TickEvent::Won;
            }
            info!(
                level = self.level,
                speed = self.speed,
                apples = self.field.len(),
                "Level up"
            );
            TickEvent::LevelUp { level: self.level }
        } else {
            info!(score = self.score, "Final level cleared");
            self.status = GameStatus::Stopped(StopReason::Won);
            TickEvent::Won
        }
    }

    /// Forward a heading change to the snake, unvalidated
    pub fn set_direction(&mut self, direction: Direction) {
        self.snake.set_direction(direction);
    }

    /// End the game from outside; a no-op if it already stopped
    pub fn stop(&mut self) {
        if self.is_running() {
            self.status = GameStatus::Stopped(StopReason::Aborted);
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn field(&self) -> &GameField {
        &self.field
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Current tick interval in milliseconds
    pub fn speed(&self) -> u64 {
        self.speed
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn next_tick(&self) -> u64 {
        self.next_tick
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
