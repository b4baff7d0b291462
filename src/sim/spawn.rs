//! Procedural generation of platforms, power-ups and enemies

use rand::Rng;

use super::rect::Rect;
use super::state::{Enemy, EnemyPose, Platform, PlatformId, PowerUp, PowerUpKind, WorldState};
use crate::consts::*;

/// Opening platform positions (top-left corners)
fn starting_layout() -> [(f32, f32); 4] {
    [
        // Directly under the player
        (VIEWPORT_WIDTH / 2.0 - 10.0, VIEWPORT_HEIGHT / 2.0 + 20.0),
        (50.0, VIEWPORT_HEIGHT - 180.0),
        (200.0, VIEWPORT_HEIGHT - 390.0),
        (70.0, VIEWPORT_HEIGHT - 480.0),
    ]
}

/// Lay out the opening platforms for a new run
pub fn spawn_starting_platforms(world: &mut WorldState) {
    for (x, y) in starting_layout() {
        let width_index = world.rng.random_range(0..STARTING_PLATFORM_WIDTHS.len());
        spawn_platform(world, x, y, STARTING_PLATFORM_WIDTHS[width_index]);
    }
}

/// Create a platform and roll for a power-up on it
pub fn spawn_platform(world: &mut WorldState, x: f32, y: f32, width: f32) -> PlatformId {
    let id = PlatformId(world.next_entity_id());
    let platform = Platform {
        id,
        rect: Rect::new(x, y, width, PLATFORM_HEIGHT),
    };

    if world.rng.random_range(0..100) < POW_RATE {
        let kind = PowerUpKind::ALL[world.rng.random_range(0..PowerUpKind::ALL.len())];
        let power_up_id = world.next_entity_id();
        log::debug!("{:?} spawned on platform {}", kind, id.0);
        world.power_ups.push(PowerUp::new(power_up_id, kind, &platform));
    }

    world.platforms.push(platform);
    id
}

/// Top the platform population back up to `MIN_PLATFORMS`.
///
/// New platforms appear just above the viewport and scroll into view.
pub fn replenish_platforms(world: &mut WorldState) {
    while world.platforms.len() < MIN_PLATFORMS {
        let width = world.rng.random_range(PLATFORM_MIN_WIDTH..PLATFORM_MAX_WIDTH);
        let x = world.rng.random_range(0.0..VIEWPORT_WIDTH - width);
        let y = world
            .rng
            .random_range(PLATFORM_SPAWN_MIN_Y..PLATFORM_SPAWN_MAX_Y);
        spawn_platform(world, x, y, width);
    }
}

/// Spawn an enemy once the jittered interval has elapsed
pub fn update_enemy_timer(world: &mut WorldState) {
    let elapsed_ms = (world.time_ticks - world.last_enemy_tick) as f32 * TICK_MS;
    let jitter = ENEMY_SPAWN_JITTER_MS[world.rng.random_range(0..ENEMY_SPAWN_JITTER_MS.len())];
    if elapsed_ms > ENEMY_SPAWN_INTERVAL_MS + jitter {
        world.last_enemy_tick = world.time_ticks;
        spawn_enemy(world);
    }
}

/// Spawn an enemy just outside a random side, heading inward
pub fn spawn_enemy(world: &mut WorldState) {
    let from_right = world.rng.random_bool(0.5);
    let center_x = if from_right {
        VIEWPORT_WIDTH + ENEMY_MARGIN
    } else {
        -ENEMY_MARGIN
    };
    let top = world.rng.random_range(0.0..VIEWPORT_HEIGHT / 2.0);
    let vx = if from_right { -ENEMY_SPEED } else { ENEMY_SPEED };

    let enemy = Enemy {
        id: world.next_entity_id(),
        rect: Rect::new(center_x - ENEMY_SIZE / 2.0, top, ENEMY_SIZE, ENEMY_SIZE),
        vx,
        vy: 0.0,
        dy: ENEMY_BOB_STEP,
        pose: EnemyPose::Up,
    };
    log::debug!(
        "Enemy {} spawned on the {} side",
        enemy.id,
        if from_right { "right" } else { "left" }
    );
    world.enemies.push(enemy);
}
