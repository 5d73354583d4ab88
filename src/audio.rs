use std::io::{stderr, Write};
use std::thread;
use std::time::Duration;

use log::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cue {
    Eat,
    PowerUp,
    LevelUp,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tone {
    pub freq_hz: u32,
    pub duration: Duration,
    /// Wait before the next tone starts.
    pub gap: Duration,
}

const fn tone(freq_hz: u32, duration_ms: u64, gap_ms: u64) -> Tone {
    Tone {
        freq_hz,
        duration: Duration::from_millis(duration_ms),
        gap: Duration::from_millis(gap_ms),
    }
}

const EAT: &[Tone] = &[tone(800, 50, 0)];
const POWER_UP: &[Tone] = &[tone(600, 100, 50), tone(800, 100, 50), tone(1000, 100, 0)];
const LEVEL_UP: &[Tone] = &[tone(1000, 100, 80), tone(1200, 100, 0)];
const GAME_OVER: &[Tone] = &[tone(400, 200, 100), tone(300, 200, 100), tone(200, 300, 0)];

impl Cue {
    pub fn tones(self) -> &'static [Tone] {
        match self {
            Cue::Eat => EAT,
            Cue::PowerUp => POWER_UP,
            Cue::LevelUp => LEVEL_UP,
            Cue::GameOver => GAME_OVER,
        }
    }
}

pub trait AudioSink {
    /// Must return without waiting for the cue to finish.
    fn play(&self, cue: Cue);
}

impl<T: AudioSink + ?Sized> AudioSink for Box<T> {
    fn play(&self, cue: Cue) {
        (**self).play(cue)
    }
}

/// Rings the terminal bell on stderr for each tone. Stdout belongs to the
/// renderer; BEL is a C0 control, so it is harmless even in the middle of
/// an escape sequence being written there.
pub struct BellPlayer;

impl AudioSink for BellPlayer {
    fn play(&self, cue: Cue) {
        debug!("cue {:?}", cue);

        let spawned = thread::Builder::new()
            .name(format!("cue-{:?}", cue))
            .spawn(move || {
                for tone in cue.tones() {
                    debug!("tone {} Hz for {:?}", tone.freq_hz, tone.duration);
                    let mut err = stderr();
                    let _ = err.write_all(b"\x07").and_then(|_| err.flush());
                    thread::sleep(tone.gap);
                }
            });

        if let Err(e) = spawned {
            debug!("could not start cue thread: {}", e);
        }
    }
}

pub struct Silent;

impl AudioSink for Silent {
    fn play(&self, cue: Cue) {
        debug!("cue {:?} (muted)", cue);
    }
}
