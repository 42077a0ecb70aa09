//! Grid Snake - a fixed-step snake game for the terminal
//!
//! This library provides:
//! - Core game logic: packed playfield, snake state machine, frame driver (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - The interactive terminal session (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
