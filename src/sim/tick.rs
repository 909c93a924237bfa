//! Per-frame session tick
//!
//! Advances one session deterministically and reports side effects
//! (sounds, end screen) for the platform layer to perform.

use rand::Rng;

use super::collision::overlaps;
use super::state::{Coin, GameEvent, GamePhase, GameState, Obstacle};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Queue a jump impulse (key press or jump button)
    pub jump: bool,
    /// Start a fresh session after game over (restart button)
    pub restart: bool,
}

/// Advance the session by one tick, appending side effects to `events`.
///
/// Once the session is over, ticks are inert until a restart command
/// arrives; restart replaces the whole state rather than patching fields.
pub fn tick(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if state.phase == GamePhase::GameOver {
        if input.restart {
            // Derive a fresh RNG stream so back-to-back runs differ
            let seed = state.seed.wrapping_add(state.time_ticks).wrapping_add(1);
            *state = GameState::new(seed);
            log::info!("session restarted with seed {seed}");
        }
        return;
    }

    state.time_ticks += 1;

    if input.jump {
        state.player.queue_jump();
    }
    state.player.tick(events);

    tick_obstacles(&mut state.obstacles, &mut state.rng);
    tick_coins(&mut state.coins, &mut state.rng);

    resolve_collisions(state, events);
}

/// Scroll, cull, and maybe spawn obstacles.
///
/// Spawn rolls come from the injected `rng` so tests can script them.
pub fn tick_obstacles(obstacles: &mut Vec<Obstacle>, rng: &mut impl Rng) {
    for obstacle in obstacles.iter_mut() {
        obstacle.pos.x -= SCROLL_SPEED;
    }
    // Cull once the trailing edge has left the surface
    obstacles.retain(|o| o.pos.x + OBSTACLE_WIDTH >= 0.0);

    if obstacles.len() < MAX_OBSTACLES && rng.random::<f32>() < SPAWN_CHANCE {
        obstacles.push(Obstacle::at_right_edge());
    }
}

/// Scroll, cull, and maybe spawn coins.
///
/// The cull margin is one radius, not the full diameter.
pub fn tick_coins(coins: &mut Vec<Coin>, rng: &mut impl Rng) {
    for coin in coins.iter_mut() {
        coin.pos.x -= SCROLL_SPEED;
    }
    coins.retain(|c| c.pos.x + COIN_RADIUS >= 0.0);

    if coins.len() < MAX_COINS && rng.random::<f32>() < SPAWN_CHANCE {
        let y = rng.random_range(COIN_RADIUS..SURFACE_HEIGHT - COIN_RADIUS);
        coins.push(Coin::at_right_edge(y));
    }
}

/// Obstacle contact ends the session immediately; coin checks are skipped
/// entirely on the tick the session ends.
fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player_box = state.player.aabb();

    if state
        .obstacles
        .iter()
        .any(|o| overlaps(&player_box, &o.aabb()))
    {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver);
        log::info!(
            "game over at tick {} with {} points",
            state.time_ticks,
            state.score
        );
        return;
    }

    let before = state.coins.len();
    state.coins.retain(|c| !overlaps(&player_box, &c.aabb()));
    let collected = before - state.coins.len();
    state.score += collected as u32;
    for _ in 0..collected {
        events.push(GameEvent::CoinCollected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rand::RngCore;

    /// RNG yielding a constant word. Zero forces every spawn roll to
    /// succeed, `u32::MAX` forces every roll to fail.
    struct ConstRng(u32);

    impl RngCore for ConstRng {
        fn next_u32(&mut self) -> u32 {
            self.0
        }

        fn next_u64(&mut self) -> u64 {
            ((self.0 as u64) << 32) | self.0 as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let word = self.0.to_le_bytes();
            for (i, byte) in dest.iter_mut().enumerate() {
                *byte = word[i % 4];
            }
        }
    }

    fn always_spawn() -> ConstRng {
        ConstRng(0)
    }

    fn never_spawn() -> ConstRng {
        ConstRng(u32::MAX)
    }

    #[test]
    fn obstacle_pool_respects_capacity() {
        let mut obstacles = Vec::new();
        let mut rng = always_spawn();
        for _ in 0..1000 {
            tick_obstacles(&mut obstacles, &mut rng);
            assert!(obstacles.len() <= MAX_OBSTACLES);
        }
        assert_eq!(obstacles.len(), MAX_OBSTACLES);
    }

    #[test]
    fn coin_pool_respects_capacity() {
        let mut coins = Vec::new();
        let mut rng = always_spawn();
        for _ in 0..1000 {
            tick_coins(&mut coins, &mut rng);
            assert!(coins.len() <= MAX_COINS);
        }
        assert_eq!(coins.len(), MAX_COINS);
    }

    #[test]
    fn spawned_entities_sit_at_the_right_edge() {
        let mut obstacles = Vec::new();
        let mut coins = Vec::new();
        let mut rng = always_spawn();
        tick_obstacles(&mut obstacles, &mut rng);
        tick_coins(&mut coins, &mut rng);

        assert_eq!(obstacles[0].pos, Vec2::new(SURFACE_WIDTH, SURFACE_HEIGHT - OBSTACLE_HEIGHT));
        assert_eq!(coins[0].pos.x, SURFACE_WIDTH);
        assert!(coins[0].pos.y >= COIN_RADIUS);
        assert!(coins[0].pos.y < SURFACE_HEIGHT - COIN_RADIUS);
    }

    #[test]
    fn offscreen_obstacle_is_culled_and_stays_gone() {
        let mut obstacles = vec![Obstacle {
            pos: Vec2::new(-OBSTACLE_WIDTH - 1.0, SURFACE_HEIGHT - OBSTACLE_HEIGHT),
        }];
        let mut rng = never_spawn();

        tick_obstacles(&mut obstacles, &mut rng);
        assert!(obstacles.is_empty());

        for _ in 0..100 {
            tick_obstacles(&mut obstacles, &mut rng);
            assert!(obstacles.is_empty());
        }
    }

    #[test]
    fn entity_exactly_at_the_boundary_survives() {
        // Trailing edge at x + width == 0 is not yet gone
        let mut obstacles = vec![Obstacle {
            pos: Vec2::new(-OBSTACLE_WIDTH + SCROLL_SPEED, 0.0),
        }];
        let mut rng = never_spawn();
        tick_obstacles(&mut obstacles, &mut rng);
        assert_eq!(obstacles.len(), 1);

        tick_obstacles(&mut obstacles, &mut rng);
        assert!(obstacles.is_empty());
    }

    #[test]
    fn obstacle_contact_ends_the_session() {
        let mut state = GameState::new(7);
        // Obstacle overlapping the player's x band at matching height
        state.obstacles.push(Obstacle {
            pos: Vec2::new(PLAYER_START_X + 40.0, SURFACE_HEIGHT - OBSTACLE_HEIGHT),
        });
        // A coin overlapping the player on the same tick must not be scored
        state.coins.push(Coin {
            pos: Vec2::new(PLAYER_START_X, SURFACE_HEIGHT - PLAYER_SIZE),
        });

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), &mut events);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::GameOver));
        assert!(!events.contains(&GameEvent::CoinCollected));
        assert_eq!(state.score, 0);
        // The overlapping coin was never removed
        assert!(
            state
                .coins
                .iter()
                .any(|c| overlaps(&state.player.aabb(), &c.aabb()))
        );
    }

    #[test]
    fn score_is_frozen_after_game_over() {
        let mut state = GameState::new(7);
        state.obstacles.push(Obstacle {
            pos: Vec2::new(PLAYER_START_X, SURFACE_HEIGHT - OBSTACLE_HEIGHT),
        });

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), &mut events);
        assert_eq!(state.phase, GamePhase::GameOver);

        let score = state.score;
        let ticks = state.time_ticks;
        for _ in 0..50 {
            events.clear();
            tick(&mut state, &TickInput::default(), &mut events);
        }
        assert_eq!(state.score, score);
        assert_eq!(state.time_ticks, ticks);
        assert!(events.is_empty());
    }

    #[test]
    fn multiple_coins_collected_in_one_tick() {
        let mut state = GameState::new(7);
        let on_player = Vec2::new(PLAYER_START_X + 10.0, SURFACE_HEIGHT - PLAYER_SIZE + 10.0);
        state.coins.push(Coin { pos: on_player });
        state.coins.push(Coin {
            pos: on_player + Vec2::new(20.0, 0.0),
        });

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), &mut events);

        assert_eq!(state.score, 2);
        // Nothing overlapping the player survives the tick
        assert!(
            state
                .coins
                .iter()
                .all(|c| !overlaps(&state.player.aabb(), &c.aabb()))
        );
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::CoinCollected).count(),
            2
        );
    }

    #[test]
    fn restart_replaces_the_whole_session() {
        let mut state = GameState::new(7);
        state.score = 9;
        state.obstacles.push(Obstacle {
            pos: Vec2::new(PLAYER_START_X, SURFACE_HEIGHT - OBSTACLE_HEIGHT),
        });

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), &mut events);
        assert_eq!(state.phase, GamePhase::GameOver);

        events.clear();
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, &mut events);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks, 0);
        assert!(state.obstacles.is_empty());
        assert!(state.coins.is_empty());
        assert_eq!(
            state.player.pos,
            Vec2::new(PLAYER_START_X, SURFACE_HEIGHT - PLAYER_SIZE)
        );
        assert!(events.is_empty());
    }

    #[test]
    fn restart_is_ignored_while_running() {
        // Guards against a double-bound restart button
        let mut state = GameState::new(7);
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        tick(&mut state, &restart, &mut events);
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn same_seed_and_inputs_replay_identically() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        let mut events = Vec::new();

        for i in 0..2000u64 {
            let input = TickInput {
                jump: i % 37 == 0,
                restart: false,
            };
            tick(&mut a, &input, &mut events);
            tick(&mut b, &input, &mut events);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        assert_eq!(a.coins.len(), b.coins.len());
        assert_eq!(a.player.pos, b.player.pos);
    }
}
