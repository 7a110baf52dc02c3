//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Both the keyboard-driven and the pathfinding-driven game run on it.

pub mod action;
pub mod config;
pub mod controller;
pub mod engine;
pub mod grid;
pub mod pathfinder;
pub mod placement;
pub mod rules;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{GameConfig, ObstacleBounds};
pub use controller::{Autopilot, ControlMode, Controller, Keyboard};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use grid::Grid;
pub use pathfinder::{find_path, shortest_path};
pub use session::Session;
pub use state::{
    CollisionType, EndReason, GameState, Obstacle, Orientation, Phase, Position, Snake, Snapshot,
};
