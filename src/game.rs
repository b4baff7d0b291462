//! Game loop and run state machine
//!
//! `Start → Playing → GameOver → Playing → …` until the frontend reports a
//! quit. The loop is single-threaded: every step polls input, updates, draws
//! and then waits for the next tick.

use std::io;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::audio::SoundEffect;
use crate::consts::GAME_OVER_GRACE_TICKS;
use crate::highscores::HighScore;
use crate::sim::{DeathCause, Snapshot, TickInput, WorldState, tick};

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Title screen, waiting for a key
    Start,
    /// A run is in progress
    Playing,
    /// Summary screen, waiting for a key
    GameOver,
}

/// Keyboard state collected by a frontend for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump_pressed: bool,
    pub jump_released: bool,
    pub double_jump: bool,
    /// Any key went down (advances the title/summary screens)
    pub any_key: bool,
    /// Window closed / quit requested
    pub quit: bool,
}

impl FrameInput {
    pub fn to_tick_input(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            jump: self.jump_pressed,
            jump_release: self.jump_released,
            double_jump: self.double_jump,
        }
    }
}

/// Result of a finished run, shown on the game over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u64,
    /// Best score after this run was recorded
    pub high_score: u64,
    pub new_record: bool,
    pub cause: Option<DeathCause>,
}

/// Input, rendering, audio and pacing, supplied by the platform
pub trait Frontend {
    /// Collect input since the previous call
    fn poll_input(&mut self) -> io::Result<FrameInput>;
    fn draw_title(&mut self, high_score: u64) -> io::Result<()>;
    fn draw_frame(&mut self, snapshot: &Snapshot) -> io::Result<()>;
    fn draw_game_over(&mut self, summary: &RunSummary) -> io::Result<()>;
    fn play(&mut self, effect: SoundEffect) -> io::Result<()>;
    /// Block until the next tick is due
    fn wait_for_tick(&mut self);
}

/// Game instance holding all state
pub struct Game<F: Frontend> {
    frontend: F,
    high_score: HighScore,
    state: RunState,
    world: WorldState,
    summary: Option<RunSummary>,
    /// Seeds each new run
    seeds: Pcg32,
    runs: u32,
    /// Ticks left before the game over screen accepts a key
    grace_ticks: u32,
}

impl<F: Frontend> Game<F> {
    pub fn new(frontend: F, high_score: HighScore, seed: u64) -> Self {
        let mut seeds = Pcg32::seed_from_u64(seed);
        let world = WorldState::new(seeds.random());
        Self {
            frontend,
            high_score,
            state: RunState::Start,
            world,
            summary: None,
            seeds,
            runs: 0,
            grace_ticks: 0,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn high_score(&self) -> &HighScore {
        &self.high_score
    }

    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn into_frontend(self) -> F {
        self.frontend
    }

    /// Run until quit
    pub fn run(&mut self) -> io::Result<()> {
        while self.step()? {}
        log::info!("Quit after {} runs", self.runs);
        Ok(())
    }

    /// Advance by one tick. Returns false once the player quits.
    pub fn step(&mut self) -> io::Result<bool> {
        match self.state {
            RunState::Start => {
                self.frontend.draw_title(self.high_score.best())?;
                let input = self.frontend.poll_input()?;
                if input.quit {
                    return Ok(false);
                }
                if input.any_key {
                    self.start_run();
                }
            }
            RunState::Playing => {
                let input = self.frontend.poll_input()?;
                if input.quit {
                    return Ok(false);
                }
                tick(&mut self.world, &input.to_tick_input());
                for event in self.world.drain_events() {
                    self.play(event.into());
                }
                self.frontend.draw_frame(&self.world.snapshot())?;
                if self.world.is_over() {
                    self.finish_run();
                }
            }
            RunState::GameOver => {
                if let Some(summary) = self.summary {
                    self.frontend.draw_game_over(&summary)?;
                }
                let input = self.frontend.poll_input()?;
                if input.quit {
                    return Ok(false);
                }
                // Held or auto-repeating keys from the fatal moment don't count
                if self.grace_ticks > 0 {
                    self.grace_ticks -= 1;
                } else if input.any_key {
                    self.start_run();
                }
            }
        }
        self.frontend.wait_for_tick();
        Ok(true)
    }

    fn start_run(&mut self) {
        // The first run uses the world built in `new`
        if self.runs > 0 {
            self.world = WorldState::new(self.seeds.random());
        }
        self.runs += 1;
        self.summary = None;
        self.state = RunState::Playing;
        log::info!("Run {} started (seed {})", self.runs, self.world.seed);
    }

    /// Play a cue. Errors are logged, never propagated.
    fn play(&mut self, effect: SoundEffect) {
        if let Err(e) = self.frontend.play(effect) {
            log::warn!("Could not play {}: {}", effect.name(), e);
        }
    }

    fn finish_run(&mut self) {
        let score = self.world.score;
        let new_record = self.high_score.submit(score);
        if new_record {
            self.play(SoundEffect::HighScore);
        }
        self.summary = Some(RunSummary {
            score,
            high_score: self.high_score.best(),
            new_record,
            cause: self.world.death,
        });
        self.state = RunState::GameOver;
        self.grace_ticks = GAME_OVER_GRACE_TICKS;
    }
}
