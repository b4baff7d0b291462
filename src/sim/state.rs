//! World state and core simulation types
//!
//! Everything one run mutates lives in [`WorldState`], which the tick passes
//! by `&mut` into physics, spawning, collision and scrolling.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::spawn;
use crate::consts::*;

/// Discrete events for the audio boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    Coin,
    Boost,
    Bomb,
    Death,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Touched an enemy
    Enemy,
    /// Fell below the viewport
    Fall,
}

/// Stable platform handle; power-ups use it to check their host is alive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlatformId(pub u32);

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Bottom-centre of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(VIEWPORT_WIDTH / 2.0, VIEWPORT_HEIGHT / 2.0),
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
        }
    }
}

impl Player {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            ..Self::default()
        }
    }

    /// Bounding box, anchored at `pos`
    pub fn bounds(&self) -> Rect {
        Rect::from_mid_bottom(self.pos, PLAYER_WIDTH, PLAYER_HEIGHT)
    }
}

/// A platform the player can land on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: PlatformId,
    pub rect: Rect,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Worth `COIN_VALUE` points
    Coin,
    /// Launches the player upward
    Boost,
    /// Knocks the player sideways
    Bomb,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Coin, PowerUpKind::Boost, PowerUpKind::Bomb];

    /// Sprite size (w, h)
    pub fn size(&self) -> (f32, f32) {
        match self {
            PowerUpKind::Coin => (20.0, 20.0),
            PowerUpKind::Boost => (22.0, 28.0),
            PowerUpKind::Bomb => (24.0, 24.0),
        }
    }
}

/// A one-shot pickup sitting on a platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub rect: Rect,
    /// Platform this power-up rides on
    pub host: PlatformId,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, host: &Platform) -> Self {
        let (w, h) = kind.size();
        let mut power_up = Self {
            id,
            kind,
            rect: Rect::new(0.0, 0.0, w, h),
            host: host.id,
        };
        power_up.sit_on(&host.rect);
        power_up
    }

    /// Centre on the host and rest just above its top edge
    pub fn sit_on(&mut self, host: &Rect) {
        self.rect.x = host.center_x() - self.rect.w / 2.0;
        self.rect.y = host.top() - POWER_UP_LIFT - self.rect.h;
    }
}

/// Which way a bomb throws the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BombSide {
    /// Blast from the left, pushes right
    Left,
    /// Blast from the right, pushes left
    Right,
}

/// Enemy wing position, flips with the bob direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyPose {
    Up,
    Down,
}

/// A flying enemy crossing the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    /// Horizontal speed (px/tick), sign points inward from the spawn side
    pub vx: f32,
    /// Vertical speed (px/tick), oscillates within ±ENEMY_MAX_VY
    pub vy: f32,
    /// Per-tick change of `vy`
    pub dy: f32,
    pub pose: EnemyPose,
}

/// Render-facing power-up data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub rect: Rect,
}

/// Render-facing enemy data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub pose: EnemyPose,
    pub rect: Rect,
}

/// Everything a renderer needs after a tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u64,
    pub player: Rect,
    pub platforms: Vec<Rect>,
    pub power_ups: Vec<PowerUpView>,
    pub enemies: Vec<EnemyView>,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct WorldState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub player: Player,
    /// Live platforms (in spawn order)
    pub platforms: Vec<Platform>,
    pub power_ups: Vec<PowerUp>,
    pub enemies: Vec<Enemy>,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Tick of the last enemy spawn
    pub last_enemy_tick: u64,
    /// Set once the run has ended
    pub death: Option<DeathCause>,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl WorldState {
    /// Start a fresh run: player at centre, opening platform layout
    pub fn new(seed: u64) -> Self {
        let mut world = Self::empty(seed);
        spawn::spawn_starting_platforms(&mut world);
        world
    }

    /// A world with only the player in it
    pub fn empty(seed: u64) -> Self {
        Self {
            seed,
            player: Player::default(),
            platforms: Vec::new(),
            power_ups: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            time_ticks: 0,
            last_enemy_tick: 0,
            death: None,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.death.is_some()
    }

    pub fn platform_alive(&self, id: PlatformId) -> bool {
        self.platforms.iter().any(|p| p.id == id)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// End the run; later calls keep the first cause
    pub fn end_run(&mut self, cause: DeathCause) {
        if self.death.is_some() {
            return;
        }
        log::info!(
            "Run over ({:?}) after {} ticks, score {}",
            cause,
            self.time_ticks,
            self.score
        );
        self.death = Some(cause);
        self.emit(GameEvent::Death);
    }

    /// Drop power-ups whose host is gone and re-seat the rest on their hosts
    pub fn sync_power_ups(&mut self) {
        let platforms = &self.platforms;
        self.power_ups.retain_mut(|power_up| {
            match platforms.iter().find(|p| p.id == power_up.host) {
                Some(host) => {
                    power_up.sit_on(&host.rect);
                    true
                }
                None => false,
            }
        });
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            player: self.player.bounds(),
            platforms: self.platforms.iter().map(|p| p.rect).collect(),
            power_ups: self
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    kind: p.kind,
                    rect: p.rect,
                })
                .collect(),
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    pose: e.pose,
                    rect: e.rect,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(id: u32, x: f32, y: f32) -> Platform {
        Platform {
            id: PlatformId(id),
            rect: Rect::new(x, y, 100.0, PLATFORM_HEIGHT),
        }
    }

    #[test]
    fn test_new_world_layout() {
        let world = WorldState::new(42);
        assert_eq!(world.platforms.len(), 4);
        assert_eq!(world.score, 0);
        assert!(!world.is_over());
        assert_eq!(world.player.pos, Vec2::new(250.0, 300.0));
        // Player starts above the centre platform, within its landing span
        let base = &world.platforms[0].rect;
        assert!(world.player.pos.y < base.top());
        assert!(world.player.pos.x > base.left() && world.player.pos.x < base.right());
    }

    #[test]
    fn test_power_up_sits_above_host() {
        let host = platform(7, 100.0, 300.0);
        let power_up = PowerUp::new(1, PowerUpKind::Coin, &host);
        assert_eq!(power_up.host, PlatformId(7));
        assert_eq!(power_up.rect.center_x(), host.rect.center_x());
        assert_eq!(power_up.rect.bottom(), host.rect.top() - POWER_UP_LIFT);
    }

    #[test]
    fn test_sync_power_ups_follows_and_drops() {
        let mut world = WorldState::empty(1);
        world.platforms.push(platform(1, 0.0, 100.0));
        world.platforms.push(platform(2, 200.0, 100.0));
        let first = PowerUp::new(10, PowerUpKind::Boost, &world.platforms[0]);
        let second = PowerUp::new(11, PowerUpKind::Bomb, &world.platforms[1]);
        world.power_ups = vec![first, second];

        // Host 1 moves, host 2 disappears
        world.platforms[0].rect.y += 40.0;
        world.platforms.remove(1);
        world.sync_power_ups();

        assert_eq!(world.power_ups.len(), 1);
        assert_eq!(world.power_ups[0].id, 10);
        assert_eq!(
            world.power_ups[0].rect.bottom(),
            world.platforms[0].rect.top() - POWER_UP_LIFT
        );
        assert!(!world.platform_alive(PlatformId(2)));
    }

    #[test]
    fn test_end_run_keeps_first_cause() {
        let mut world = WorldState::empty(1);
        world.end_run(DeathCause::Enemy);
        world.end_run(DeathCause::Fall);
        assert_eq!(world.death, Some(DeathCause::Enemy));
        assert_eq!(world.drain_events(), vec![GameEvent::Death]);
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let world = WorldState::new(3);
        let snapshot = world.snapshot();
        assert_eq!(snapshot.platforms.len(), world.platforms.len());
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"score\":0"));
    }
}
