//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, all quantities per tick
//! - Seeded RNG only (owned by the world)
//! - Stable iteration order (spawn order)
//! - No rendering, audio or terminal dependencies

pub mod collision;
pub mod physics;
pub mod rect;
pub mod scroll;
pub mod spawn;
pub mod state;
pub mod tick;

pub use rect::Rect;
pub use state::{
    BombSide, DeathCause, Enemy, EnemyPose, EnemyView, GameEvent, Platform, PlatformId, Player,
    PowerUp, PowerUpKind, PowerUpView, Snapshot, WorldState,
};
pub use tick::{TickInput, tick};
