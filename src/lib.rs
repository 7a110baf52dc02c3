//! Grid Snake - a terminal Snake game with a breadth-first-search autopilot
//!
//! This library provides:
//! - Core game logic, obstacle placement and pathfinding (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering with ratatui (render module)
//! - Session and batch statistics (metrics module)
//! - Execution modes: interactive play and headless simulation (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
