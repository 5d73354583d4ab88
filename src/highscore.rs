use std::fs;
use std::io::{self, ErrorKind};
use std::path::PathBuf;

use log::{debug, warn};

pub trait HighScoreStore {
    /// Never fails: anything unreadable counts as no record.
    fn load(&self) -> u32;

    fn save(&mut self, score: u32) -> io::Result<()>;
}

/// Keeps the record as decimal text in a single file.
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileHighScoreStore { path: path.into() }
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> u32 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no high score file at {}", self.path.display());
                return 0;
            }
            Err(e) => {
                warn!("could not read {}: {}", self.path.display(), e);
                return 0;
            }
        };

        text.trim().parse().unwrap_or_else(|e| {
            warn!("ignoring malformed high score in {}: {}", self.path.display(), e);
            0
        })
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        fs::write(&self.path, score.to_string())
    }
}
