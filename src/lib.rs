//! Cactus Jump - an endless platform-jump arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scrolling)
//! - `game`: Start / Playing / GameOver state machine driving a frontend
//! - `highscores`: Single-value high score file
//! - `settings`: JSON settings file
//! - `audio`: Mapping of game events to sound cues
//! - `terminal`: crossterm frontend (rendering + keyboard input)

pub mod audio;
pub mod game;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod terminal;

pub use game::{FrameInput, Frontend, Game, RunState, RunSummary};
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Ticks per second
    pub const FPS: u32 = 30;
    /// Simulated milliseconds per tick (drives the enemy timer)
    pub const TICK_MS: f32 = 1000.0 / FPS as f32;

    /// Viewport dimensions (pixels, y grows downward)
    pub const VIEWPORT_WIDTH: f32 = 500.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Player physics, all per tick
    pub const GRAVITY: f32 = 1.0;
    pub const PLAYER_ACC: f32 = 0.9;
    pub const PLAYER_FRICTION: f32 = -0.10;
    pub const JUMP_VELOCITY: f32 = -20.0;
    /// Releasing jump while rising faster than this cuts the arc
    pub const JUMP_CUT_THRESHOLD: f32 = -3.0;
    pub const JUMP_CUT_VELOCITY: f32 = -2.0;
    pub const DOUBLE_JUMP_VELOCITY: f32 = -15.0;

    /// Player bounding box
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// Landing tolerance past either platform edge
    pub const PLATFORM_LANDING_SLACK: f32 = 15.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    /// Minimum live platforms after every tick
    pub const MIN_PLATFORMS: usize = 8;
    pub const PLATFORM_MIN_WIDTH: f32 = 60.0;
    pub const PLATFORM_MAX_WIDTH: f32 = 120.0;
    pub const PLATFORM_SPAWN_MIN_Y: f32 = -75.0;
    pub const PLATFORM_SPAWN_MAX_Y: f32 = -30.0;
    /// Widths used for the opening layout
    pub const STARTING_PLATFORM_WIDTHS: [f32; 2] = [100.0, 50.0];

    /// Power-ups
    /// Percent chance that a new platform carries a power-up
    pub const POW_RATE: u32 = 15;
    pub const COIN_VALUE: u64 = 3;
    pub const BOOST_VELOCITY: f32 = -50.0;
    pub const BOMB_KNOCKBACK: f32 = 100.0;
    /// Gap between a power-up's bottom and its host's top
    pub const POWER_UP_LIFT: f32 = 5.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 50.0;
    pub const ENEMY_SPEED: f32 = 3.0;
    pub const ENEMY_BOB_STEP: f32 = 0.5;
    pub const ENEMY_MAX_VY: f32 = 3.0;
    /// How far outside the viewport enemies spawn and despawn
    pub const ENEMY_MARGIN: f32 = 100.0;
    pub const ENEMY_SPAWN_INTERVAL_MS: f32 = 10_000.0;
    pub const ENEMY_SPAWN_JITTER_MS: [f32; 5] = [-1000.0, -500.0, 0.0, 500.0, 1000.0];

    /// Keys are ignored on the game over screen for this many ticks
    pub const GAME_OVER_GRACE_TICKS: u32 = FPS / 2;
}

/// Wrap a horizontal position into `[0, width)`.
///
/// Leaving past the right edge lands on column 0; leaving past the left edge
/// lands on the rightmost pixel column.
#[inline]
pub fn wrap_x(x: f32, width: f32) -> f32 {
    if x >= width {
        0.0
    } else if x < 0.0 {
        width - 1.0
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_x() {
        assert_eq!(wrap_x(250.0, 500.0), 250.0);
        assert_eq!(wrap_x(500.0, 500.0), 0.0);
        assert_eq!(wrap_x(612.5, 500.0), 0.0);
        assert_eq!(wrap_x(-0.1, 500.0), 499.0);
        assert_eq!(wrap_x(0.0, 500.0), 0.0);
    }
}
