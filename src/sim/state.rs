//! Session state and core simulation types
//!
//! One `GameState` is one playthrough. Restart replaces the whole value
//! rather than patching fields.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Session ended on obstacle contact
    GameOver,
}

/// Side effects a tick asks the platform layer to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A queued jump impulse fired
    Jump,
    /// A coin was collected
    CoinCollected,
    /// The session ended
    GameOver,
}

/// Jump queue: at most one impulse in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpState {
    #[default]
    Idle,
    Queued,
}

/// The player sprite
///
/// `pos` is the hit box anchor; y increases downward. The sprite itself is
/// drawn offset by half the player extent, see `render`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Vertical velocity (positive = falling)
    pub vy: f32,
    pub jump: JumpState,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Player at the session start position, resting on the floor
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, SURFACE_HEIGHT - PLAYER_SIZE),
            vy: 0.0,
            jump: JumpState::Idle,
        }
    }

    /// Queue a jump impulse. Has no effect while one is already queued.
    pub fn queue_jump(&mut self) {
        if self.jump == JumpState::Idle {
            self.jump = JumpState::Queued;
        }
    }

    /// Advance the player by one tick.
    ///
    /// The ceiling clamp runs before integration, so an overshoot past the
    /// ceiling is corrected at the start of the next tick, not the end of
    /// this one. Gravity keeps accumulating while grounded; the floor clamp
    /// zeroes `vy` again every tick. Both orderings are deliberate and
    /// covered by tests.
    pub fn tick(&mut self, events: &mut Vec<GameEvent>) {
        if self.jump == JumpState::Queued {
            self.vy -= JUMP_STRENGTH;
            self.jump = JumpState::Idle;
            events.push(GameEvent::Jump);
        }

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vy = 0.0;
        }

        self.pos.y += self.vy;
        self.vy += GRAVITY;

        if self.pos.y + PLAYER_SIZE > SURFACE_HEIGHT {
            self.pos.y = SURFACE_HEIGHT - PLAYER_SIZE;
            self.vy = 0.0;
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, PLAYER_SIZE, PLAYER_SIZE)
    }
}

/// A scrolling ground obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
}

impl Obstacle {
    /// Fresh obstacle at the right edge, floor-aligned
    pub fn at_right_edge() -> Self {
        Self {
            pos: Vec2::new(SURFACE_WIDTH, SURFACE_HEIGHT - OBSTACLE_HEIGHT),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT)
    }
}

/// A scrolling collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
}

impl Coin {
    /// Fresh coin at the right edge at the given height
    pub fn at_right_edge(y: f32) -> Self {
        Self {
            pos: Vec2::new(SURFACE_WIDTH, y),
        }
    }

    /// Hit box is a radius-sized square at the anchor, while the sprite is
    /// drawn as a centered circle of twice that extent.
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, COIN_RADIUS, COIN_RADIUS)
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn RNG, advanced only by the entity pools
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Player sprite
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Live coins in spawn order
    pub coins: Vec<Coin>,
    /// Coins collected this session
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            player: Player::new(),
            obstacles: Vec::new(),
            coins: Vec::new(),
            score: 0,
            time_ticks: 0,
        }
    }
}
