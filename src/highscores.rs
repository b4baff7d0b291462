//! High score persistence
//!
//! A single integer in a plain text file. Anything unreadable counts as 0.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Best score so far, backed by a text file
#[derive(Debug, Clone)]
pub struct HighScore {
    path: PathBuf,
    best: u64,
}

impl HighScore {
    /// Read the stored high score. Missing, unreadable or non-numeric files
    /// give 0.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let best = match fs::read_to_string(&path) {
            Ok(text) => match text.trim().parse::<u64>() {
                Ok(best) => {
                    log::info!("Loaded high score {} from {}", best, path.display());
                    best
                }
                Err(_) => {
                    log::warn!("{} is not a number, high score reset to 0", path.display());
                    0
                }
            },
            Err(e) => {
                log::info!("No high score at {} ({}), starting fresh", path.display(), e);
                0
            }
        };
        Self { path, best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a finished run's score.
    ///
    /// Returns true (and overwrites the file) only when the score beats the
    /// stored value. A failed write keeps the new best in memory.
    pub fn submit(&mut self, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        log::info!("New high score: {}", score);
        if let Err(e) = self.save() {
            log::warn!("Could not write high score to {}: {}", self.path.display(), e);
        }
        true
    }

    fn save(&self) -> io::Result<()> {
        fs::write(&self.path, self.best.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let scores = HighScore::load(dir.path().join("hscore.txt"));
        assert_eq!(scores.best(), 0);
    }

    #[test]
    fn test_garbage_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hscore.txt");
        fs::write(&path, "not a score").unwrap();
        assert_eq!(HighScore::load(&path).best(), 0);
    }

    #[test]
    fn test_reads_with_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hscore.txt");
        fs::write(&path, "42\n").unwrap();
        assert_eq!(HighScore::load(&path).best(), 42);
    }

    #[test]
    fn test_better_score_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hscore.txt");
        fs::write(&path, "5").unwrap();

        let mut scores = HighScore::load(&path);
        assert!(scores.submit(10));
        assert_eq!(scores.best(), 10);
        assert_eq!(fs::read_to_string(&path).unwrap(), "10");
        assert_eq!(HighScore::load(&path).best(), 10);
    }

    #[test]
    fn test_lower_score_is_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hscore.txt");
        fs::write(&path, "20").unwrap();

        let mut scores = HighScore::load(&path);
        assert!(!scores.submit(10));
        assert!(!scores.submit(20));
        assert_eq!(scores.best(), 20);
        assert_eq!(fs::read_to_string(&path).unwrap(), "20");
    }

    #[test]
    fn test_unwritable_path_keeps_best_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be overwritten as a file
        let mut scores = HighScore::load(dir.path());
        assert!(scores.submit(7));
        assert_eq!(scores.best(), 7);
    }
}
