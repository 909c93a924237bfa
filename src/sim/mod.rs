//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per animation frame, fixed per-tick constants
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, overlaps};
pub use state::{Coin, GameEvent, GamePhase, GameState, JumpState, Obstacle, Player};
pub use tick::{TickInput, tick};
