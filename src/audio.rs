//! Audio cues
//!
//! The simulation only emits [`GameEvent`]s. This module names the sound
//! for each one and plays it on the terminal bell, the one sound device a
//! terminal is guaranteed to have. Audio never fails the game.

use std::io::{self, Write};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Coin collected
    Coin,
    /// Boost collected
    Boost,
    /// Bomb went off
    Bomb,
    /// Run ended
    Death,
    /// Run ended with a new record
    HighScore,
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Jump => SoundEffect::Jump,
            GameEvent::Coin => SoundEffect::Coin,
            GameEvent::Boost => SoundEffect::Boost,
            GameEvent::Bomb => SoundEffect::Bomb,
            GameEvent::Death => SoundEffect::Death,
        }
    }
}

impl SoundEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Coin => "coin",
            SoundEffect::Boost => "boost",
            SoundEffect::Bomb => "bomb",
            SoundEffect::Death => "death",
            SoundEffect::HighScore => "high score",
        }
    }

    /// Jumps happen constantly; ringing for them would drown everything out
    fn rings_bell(&self) -> bool {
        !matches!(self, SoundEffect::Jump)
    }
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AudioManager {
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            log::info!("Sound disabled");
        }
        Self { muted: !enabled }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play a sound effect on `out`
    pub fn play<W: Write>(&self, out: &mut W, effect: SoundEffect) -> io::Result<()> {
        log::trace!("sound: {}", effect.name());
        if self.muted || !effect.rings_bell() {
            return Ok(());
        }
        out.write_all(b"\x07")
    }
}
