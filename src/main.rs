mod audio;
mod collision;
mod config;
mod game;
mod highscore;
mod input;
mod placement;
mod session;
mod snake;
mod term;

use std::fs::File;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use env_logger::{Env, Target};
use log::info;

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

fn main() -> anyhow::Result<()> {
    let config = config::Config::parse();
    init_logging(&config.log_file)?;
    info!("starting with {:?}", config);

    let mut game = game::SnakeGame::new(&config)?;

    // Returns once the player quits; the terminal is restored before any error surfaces
    game.run()
}

/// The terminal belongs to the game, so logs go to a file.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")
}
