//! Collision detection and response
//!
//! Resolved once per tick, in order: enemies, platforms, power-ups. The
//! fall-out check runs after scrolling (see `tick`).

use rand::Rng;

use super::state::{BombSide, GameEvent, PlatformId, Player, PowerUpKind, WorldState};
use crate::consts::*;

/// Does the player touch any enemy?
pub fn enemy_hit(world: &WorldState) -> bool {
    let bounds = world.player.bounds();
    world.enemies.iter().any(|e| e.rect.overlaps(&bounds))
}

/// Land the player on a platform while falling.
///
/// The first platform (in spawn order) that overlaps the player, spans the
/// player's x within `PLATFORM_LANDING_SLACK`, and has its bottom below the
/// player's feet wins. The player is snapped 1px into its top so the next
/// tick's fall registers as a collision again.
pub fn land_on_platform(world: &mut WorldState) -> Option<PlatformId> {
    let player = &mut world.player;
    if player.vel.y <= 0.0 {
        return None;
    }

    let bounds = player.bounds();
    let landing = world.platforms.iter().find(|p| {
        p.rect.overlaps(&bounds)
            && player.pos.x > p.rect.left() - PLATFORM_LANDING_SLACK
            && player.pos.x < p.rect.right() + PLATFORM_LANDING_SLACK
            && player.pos.y < p.rect.bottom()
    })?;

    player.pos.y = landing.rect.top() + 1.0;
    player.vel.y = 0.0;
    Some(landing.id)
}

/// Consume every power-up touching the player, returning how many were taken
pub fn collect_power_ups(world: &mut WorldState) -> usize {
    let bounds = world.player.bounds();
    let mut taken = Vec::new();
    world.power_ups.retain(|p| {
        if p.rect.overlaps(&bounds) {
            taken.push(p.kind);
            false
        } else {
            true
        }
    });

    for &kind in &taken {
        apply_power_up(world, kind);
    }
    taken.len()
}

/// Apply one power-up's effect. Only bombs draw from the world RNG.
pub fn apply_power_up(world: &mut WorldState, kind: PowerUpKind) {
    log::debug!("Picked up {:?}", kind);
    match kind {
        PowerUpKind::Boost => {
            world.player.vel.y = BOOST_VELOCITY;
            world.emit(GameEvent::Boost);
        }
        PowerUpKind::Coin => {
            world.score += COIN_VALUE;
            world.emit(GameEvent::Coin);
        }
        PowerUpKind::Bomb => {
            let side = if world.rng.random_bool(0.5) {
                BombSide::Left
            } else {
                BombSide::Right
            };
            apply_bomb(world, side);
        }
    }
}

/// Knock the player sideways away from a bomb
pub fn apply_bomb(world: &mut WorldState, side: BombSide) {
    world.player.knock_back(side);
    world.emit(GameEvent::Bomb);
}

/// Player's feet are below the viewport
pub fn fell_out(player: &Player) -> bool {
    player.bounds().bottom() > VIEWPORT_HEIGHT
}
