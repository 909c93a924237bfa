//! Coin Dash - a side-scrolling jump-and-collect arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, entity pools, collisions)
//! - `render`: Canvas 2D presentation adapter (wasm only)
//! - `audio`: Procedural sound effects via Web Audio (wasm only)

pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod render;

pub use sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Logical drawing surface size
    pub const SURFACE_WIDTH: f32 = 800.0;
    pub const SURFACE_HEIGHT: f32 = 400.0;

    /// Player sprite extent (square)
    pub const PLAYER_SIZE: f32 = 80.0;
    /// Fixed horizontal position of the player
    pub const PLAYER_START_X: f32 = 100.0;
    /// Downward acceleration added to vertical velocity every tick
    pub const GRAVITY: f32 = 0.5;
    /// Upward impulse applied when a queued jump fires
    pub const JUMP_STRENGTH: f32 = 10.0;

    /// Obstacle sprite extent
    pub const OBSTACLE_WIDTH: f32 = 120.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
    /// Coin sprite radius
    pub const COIN_RADIUS: f32 = 20.0;

    /// Leftward scroll applied to obstacles and coins every tick
    pub const SCROLL_SPEED: f32 = 5.0;
    /// Entity pool capacities
    pub const MAX_OBSTACLES: usize = 5;
    pub const MAX_COINS: usize = 3;
    /// Per-tick probability of spawning a new entity in a non-full pool
    pub const SPAWN_CHANCE: f32 = 0.01;
}
