//! World scrolling
//!
//! The camera never moves. When the player climbs into the top quarter of the
//! viewport, the player and the world are pushed down instead, and anything
//! that leaves the bottom edge is recycled.

use super::state::WorldState;
use crate::consts::*;

/// Player's top edge at or above this line triggers a scroll
pub const SCROLL_LINE: f32 = VIEWPORT_HEIGHT / 4.0;

/// Scroll the world if needed. Returns the distance shifted (0 when idle).
pub fn scroll_world(world: &mut WorldState) -> f32 {
    if world.player.bounds().top() > SCROLL_LINE {
        return 0.0;
    }

    let shift = world.player.vel.y.abs();
    world.player.pos.y += shift;

    let before = world.platforms.len();
    world.platforms.retain_mut(|p| {
        p.rect.y += shift;
        p.rect.top() < VIEWPORT_HEIGHT
    });
    // One point per platform scrolled away
    let passed = before - world.platforms.len();
    world.score += passed as u64;

    world.enemies.retain_mut(|e| {
        e.rect.y += shift;
        e.rect.top() < VIEWPORT_HEIGHT
    });

    shift
}
