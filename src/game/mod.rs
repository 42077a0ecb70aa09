//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Renderers only read cells through [`SnakeGame::cell_at`] and the head position.

pub mod cell;
pub mod config;
pub mod direction;
pub mod driver;
pub mod engine;
pub mod playfield;

// Re-export commonly used types
pub use cell::Cell;
pub use config::GameConfig;
pub use direction::Direction;
pub use driver::{Clock, FrameDriver, MonotonicClock};
pub use engine::{ResetReason, SnakeGame, StepOutcome};
pub use playfield::{Playfield, Position};
