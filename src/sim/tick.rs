//! Fixed timestep simulation tick
//!
//! Advances one run by a single frame. Deterministic for a given seed and
//! input sequence.

use super::state::{DeathCause, GameEvent, WorldState};
use super::{collision, scroll, spawn};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Jump key went down this tick
    pub jump: bool,
    /// Jump key came up this tick
    pub jump_release: bool,
    /// Secondary jump key went down this tick
    pub double_jump: bool,
}

/// Advance the world by one tick. A finished run is left untouched.
pub fn tick(world: &mut WorldState, input: &TickInput) {
    if world.is_over() {
        return;
    }

    world.time_ticks += 1;

    // Edge-triggered actions land before integration
    if input.jump && world.player.jump() {
        world.emit(GameEvent::Jump);
    }
    if input.jump_release {
        world.player.cut_jump();
    }
    if input.double_jump {
        world.player.double_jump();
    }

    world.player.integrate(input.left, input.right);

    for enemy in &mut world.enemies {
        enemy.advance();
    }
    world.enemies.retain(|e| !e.is_off_screen());

    spawn::update_enemy_timer(world);

    // Enemy contact is fatal regardless of anything else this tick
    if collision::enemy_hit(world) {
        world.end_run(DeathCause::Enemy);
        return;
    }

    collision::land_on_platform(world);
    collision::collect_power_ups(world);

    scroll::scroll_world(world);
    spawn::replenish_platforms(world);
    world.sync_power_ups();

    if collision::fell_out(&world.player) {
        world.end_run(DeathCause::Fall);
    }
}
