use std::path::PathBuf;

use clap::Parser;

use crate::placement::Board;
use crate::TermInt;

#[derive(Parser, Debug)]
#[command(name = "snake", about = "Terminal snake with levels, power-ups and obstacles")]
pub struct Config {
    /// Board width in cells, border included
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u16).range(14..=250))]
    pub width: TermInt,

    /// Board height in cells, border included
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(14..=250))]
    pub height: TermInt,

    #[arg(long, default_value = "highscore.txt")]
    pub high_score_file: PathBuf,

    /// Log destination; RUST_LOG sets the level
    #[arg(long, default_value = "snake.log")]
    pub log_file: PathBuf,

    #[arg(long)]
    pub mute: bool,

    /// Seed for food and obstacle placement
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Config {
    pub fn board(&self) -> Board {
        Board { width: self.width, height: self.height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_board() {
        let config = Config::try_parse_from(["snake"]).unwrap();
        assert_eq!(config.board(), Board { width: 40, height: 20 });
        assert_eq!(config.high_score_file, PathBuf::from("highscore.txt"));
        assert!(!config.mute);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn flags_are_parsed() {
        let config = Config::try_parse_from([
            "snake", "--width", "60", "--height", "30", "--mute", "--seed", "42",
            "--high-score-file", "/tmp/hs.txt",
        ])
        .unwrap();
        assert_eq!(config.board(), Board { width: 60, height: 30 });
        assert!(config.mute);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.high_score_file, PathBuf::from("/tmp/hs.txt"));
    }

    #[test]
    fn board_too_small_for_spawn_is_rejected() {
        assert!(Config::try_parse_from(["snake", "--width", "13"]).is_err());
        assert!(Config::try_parse_from(["snake", "--height", "5"]).is_err());
        assert!(Config::try_parse_from(["snake", "--width", "14", "--height", "14"]).is_ok());
    }
}
