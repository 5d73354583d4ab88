use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Instant;

use anyhow::{ensure, Context};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::audio::{AudioSink, BellPlayer, Silent};
use crate::config::Config;
use crate::highscore::FileHighScoreStore;
use crate::input::{self, InputEvent};
use crate::session::{GameSession, TickOutcome};
use crate::term::TermManager;

pub struct SnakeGame {
    term: TermManager,
    session: GameSession<FileHighScoreStore, Box<dyn AudioSink>>,
}

impl SnakeGame {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let board = config.board();
        let term = TermManager::new().context("reading terminal size")?;

        let (cols, rows) = term.get_terminal_size();
        ensure!(
            cols >= board.width && rows > board.height,
            "terminal is {}x{}, the board needs at least {}x{}",
            cols, rows, board.width, board.height + 1
        );

        let audio: Box<dyn AudioSink> = if config.mute { Box::new(Silent) } else { Box::new(BellPlayer) };
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let store = FileHighScoreStore::new(&config.high_score_file);

        Ok(SnakeGame { term, session: GameSession::new(board, store, audio, rng) })
    }

    /// Runs until the player quits. The terminal is restored whatever happens.
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.term.setup().context("initialising terminal")?;
        let result = self.main_loop();
        let restored = self.term.restore();

        result?;
        restored.context("restoring terminal")?;
        Ok(())
    }

    fn main_loop(&mut self) -> anyhow::Result<()> {
        let (tx, rx) = mpsc::channel();
        input::spawn_listener(tx).context("starting input listener")?;

        self.term.render(&self.session)?;
        let mut next_tick = Instant::now() + self.session.interval();

        loop {
            // Fold in input until the tick is due. The interval is read fresh
            // after every tick, so level changes apply from the next one.
            let now = Instant::now();
            if now < next_tick {
                match rx.recv_timeout(next_tick - now) {
                    Ok(InputEvent::Quit) | Err(RecvTimeoutError::Disconnected) => break,
                    Ok(ev) => {
                        if self.session.handle_input(ev) {
                            next_tick = Instant::now() + self.session.interval();
                        }
                        continue;
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                }
            }

            match self.session.tick() {
                TickOutcome::Ate { kind, level_up: true } => debug!("ate {:?}, now level {}", kind, self.session.level()),
                TickOutcome::Crashed { new_record } => debug!("crashed, new record: {}", new_record),
                TickOutcome::Ate { .. } | TickOutcome::Moved | TickOutcome::Idle => {}
            }
            self.term.render(&self.session)?;
            next_tick = Instant::now() + self.session.interval();
        }

        info!("quit requested, high score {}", self.session.high_score());
        Ok(())
    }
}
