use std::io;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};

use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Steer(Direction),
    Confirm,
    Restart,
    Quit,
}

pub fn map_key(ev: &KeyEvent) -> Option<InputEvent> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }
    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(InputEvent::Steer(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(InputEvent::Steer(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(InputEvent::Steer(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(InputEvent::Steer(Right)),
        KeyCode::Enter => Some(InputEvent::Confirm),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::Restart),
        KeyCode::Esc => Some(InputEvent::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Blocks on terminal events in the background and forwards mapped keys.
/// The thread ends after forwarding `Quit`, when the receiver is gone, or
/// when the terminal stops delivering events (reported as `Quit`).
pub fn spawn_listener(tx: Sender<InputEvent>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("input".into())
        .spawn(move || loop {
            let ev = match read() {
                Ok(Event::Key(key)) => match map_key(&key) {
                    Some(ev) => ev,
                    None => continue,
                },
                Ok(_) => continue,
                Err(e) => {
                    warn!("input stopped: {}", e);
                    InputEvent::Quit
                }
            };

            if tx.send(ev).is_err() || ev == InputEvent::Quit {
                debug!("input listener exiting");
                return;
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_steer() {
        assert_eq!(map_key(&press(KeyCode::Up)), Some(InputEvent::Steer(Up)));
        assert_eq!(map_key(&press(KeyCode::Char('a'))), Some(InputEvent::Steer(Left)));
        assert_eq!(map_key(&press(KeyCode::Down)), Some(InputEvent::Steer(Down)));
        assert_eq!(map_key(&press(KeyCode::Char('d'))), Some(InputEvent::Steer(Right)));
    }

    #[test]
    fn control_keys() {
        assert_eq!(map_key(&press(KeyCode::Enter)), Some(InputEvent::Confirm));
        assert_eq!(map_key(&press(KeyCode::Char('r'))), Some(InputEvent::Restart));
        assert_eq!(map_key(&press(KeyCode::Char('R'))), Some(InputEvent::Restart));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Quit)
        );
        assert_eq!(map_key(&press(KeyCode::Char('c'))), None);
        assert_eq!(map_key(&press(KeyCode::Tab)), None);
    }

    #[test]
    fn releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(&release), None);
    }
}
