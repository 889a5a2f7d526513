//! Level Snake - a grid snake game that speeds up as you clear apples
//!
//! This library provides:
//! - Core game logic: snake, apple field and the fixed-tick level engine (game module)
//! - Keyboard input mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal driver (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
