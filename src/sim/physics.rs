//! Player and enemy motion
//!
//! All quantities are per tick; there is no `dt`. Integration is
//! semi-implicit Euler with a velocity-proportional drag on the x axis.

use super::state::{BombSide, Enemy, EnemyPose, Player};
use crate::consts::*;
use crate::wrap_x;

impl Player {
    /// Start a jump. Only honoured while vertical velocity is exactly zero.
    pub fn jump(&mut self) -> bool {
        if self.vel.y == 0.0 {
            self.vel.y = JUMP_VELOCITY;
            true
        } else {
            false
        }
    }

    /// Jump key released: cut a fast rise short
    pub fn cut_jump(&mut self) {
        if self.vel.y < JUMP_CUT_THRESHOLD {
            self.vel.y = JUMP_CUT_VELOCITY;
        }
    }

    /// Secondary jump, available at any time (including mid-air)
    pub fn double_jump(&mut self) {
        self.vel.y = DOUBLE_JUMP_VELOCITY;
    }

    /// Bomb knockback overwrites horizontal velocity
    pub fn knock_back(&mut self, side: BombSide) {
        self.vel.x = match side {
            BombSide::Left => BOMB_KNOCKBACK,
            BombSide::Right => -BOMB_KNOCKBACK,
        };
    }

    /// Advance one tick with the given held directions
    pub fn integrate(&mut self, left: bool, right: bool) {
        self.acc = glam::Vec2::new(0.0, GRAVITY);
        if left {
            self.acc.x -= PLAYER_ACC;
        }
        if right {
            self.acc.x += PLAYER_ACC;
        }

        // Drag from the pre-tick velocity, folded into acceleration
        self.acc.x += self.vel.x * PLAYER_FRICTION;
        self.vel += self.acc;
        self.pos += self.vel + 0.5 * self.acc;

        self.pos.x = wrap_x(self.pos.x, VIEWPORT_WIDTH);
    }
}

impl Enemy {
    /// Fly sideways while bobbing up and down
    pub fn advance(&mut self) {
        self.rect.x += self.vx;
        self.vy += self.dy;
        if self.vy > ENEMY_MAX_VY || self.vy < -ENEMY_MAX_VY {
            self.dy = -self.dy;
        }
        self.pose = if self.dy < 0.0 {
            EnemyPose::Up
        } else {
            EnemyPose::Down
        };
        self.rect.y += self.vy;
    }

    /// Fully past the spawn margin on either side
    pub fn is_off_screen(&self) -> bool {
        self.rect.left() > VIEWPORT_WIDTH + ENEMY_MARGIN || self.rect.right() < -ENEMY_MARGIN
    }
}
