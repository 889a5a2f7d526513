//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A driver owns one [`Game`] per session, polls it with a millisecond clock and
//! forwards headings to it.

pub mod cell;
pub mod config;
pub mod direction;
pub mod engine;
pub mod field;
pub mod snake;

// Re-export commonly used types
pub use cell::Cell;
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{CollisionType, Game, GameStatus, Outcome, StopReason, TickEvent};
pub use field::GameField;
pub use snake::Snake;
