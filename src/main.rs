//! Cactus Jump entry point
//!
//! Loads settings and the high score, then runs the game in the terminal.

use std::io;

use cactus_jump::audio::AudioManager;
use cactus_jump::terminal::TerminalFrontend;
use cactus_jump::{Game, HighScore, Settings};

fn main() -> io::Result<()> {
    env_logger::init();
    log::info!("Cactus Jump starting...");

    let settings = Settings::load(Settings::DEFAULT_PATH);
    let high_score = HighScore::load(&settings.high_score_file);
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Seed {}", seed);

    let frontend = TerminalFrontend::new(AudioManager::new(settings.sound))?;
    let mut game = Game::new(frontend, high_score, seed);
    let result = game.run();

    // Restore before reporting any error so it lands on the normal screen
    game.into_frontend().restore()?;
    result
}
