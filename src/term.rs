use crate::placement::FoodKind;
use crate::session::{GamePhase, GameSession};
use crate::{Coords, TermInt};
use std::io::{self, Stdout, Write, stdout};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

const SNAKE_BODY_CHAR: char = '█';
const SNAKE_HEAD_CHAR: char = '●';
const OBSTACLE_CHAR: char = '▓';
const FOOD_CHAR: char = '◆';
const POWER_UP_CHAR: char = '★';
const POWER_UP_BLINK_FRAMES: u64 = 5;

const TITLE: &[&str] = &[
    r" ____  _   _    _    _  _______ ",
    r"/ ___|| \ | |  / \  | |/ / ____|",
    r"\___ \|  \| | / _ \ | ' /|  _|  ",
    r" ___) | |\  |/ ___ \| . \| |___ ",
    r"|____/|_| \_/_/   \_\_|\_\_____|",
];

#[derive(Copy, Clone, PartialEq, Eq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell { ch: ' ', color: Color::Reset };

/// Owns the terminal. Frames are composed off-screen and only the cells
/// that changed since the last frame are written.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<Cell>,
    frame: Vec<Cell>,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let cells = width as usize * height as usize;
        Ok(TermManager {
            width,
            height,
            stdout: stdout(),
            screen: vec![BLANK; cells],
            frame: vec![BLANK; cells],
        })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        self.screen.fill(BLANK);
        Ok(())
    }

    /// Best effort: every step is attempted even if an earlier one fails.
    pub fn restore(&mut self) -> io::Result<()> {
        let raw = terminal::disable_raw_mode();
        let screen = execute!(
            self.stdout,
            style::ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        );
        raw.and(screen)
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn render<S, A>(&mut self, session: &GameSession<S, A>) -> io::Result<()> {
        self.frame.fill(BLANK);

        match session.phase() {
            GamePhase::Menu => self.compose_menu(session),
            GamePhase::Playing => self.compose_board(session),
            GamePhase::GameOver => {
                self.compose_board(session);
                self.compose_game_over(session);
            }
        }

        self.present()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn compose_board<S, A>(&mut self, session: &GameSession<S, A>) {
        let board = session.board();
        let (end_x, end_y) = (board.width - 1, board.height - 1);

        for x in 1..end_x {
            self.put((x, 0), '═', Color::White);
            self.put((x, end_y), '═', Color::White);
        }
        for y in 1..end_y {
            self.put((0, y), '║', Color::White);
            self.put((end_x, y), '║', Color::White);
        }
        self.put((0, 0), '╔', Color::White);
        self.put((end_x, 0), '╗', Color::White);
        self.put((0, end_y), '╚', Color::White);
        self.put((end_x, end_y), '╝', Color::White);

        for &obs in session.obstacles() {
            self.put(obs, OBSTACLE_CHAR, Color::White);
        }

        for (i, &pos) in session.snake().body().iter().enumerate() {
            if i == 0 {
                self.put(pos, SNAKE_HEAD_CHAR, Color::Yellow);
            } else {
                self.put(pos, SNAKE_BODY_CHAR, Color::Green);
            }
        }

        let food = session.food();
        match food.kind {
            FoodKind::Normal => self.put(food.pos, FOOD_CHAR, Color::Red),
            FoodKind::PowerUp => {
                let blink = (session.frame() / POWER_UP_BLINK_FRAMES) % 2 == 0;
                let color = if blink { Color::Magenta } else { Color::Yellow };
                self.put(food.pos, POWER_UP_CHAR, color);
            }
        }

        let status = format!(
            " Score: {} | Record: {} | Level: {} | Length: {} ",
            session.score(),
            session.high_score(),
            session.level(),
            session.snake().len()
        );
        self.put_str((2, board.height), &status, Color::Cyan);
    }

    fn compose_menu<S, A>(&mut self, session: &GameSession<S, A>) {
        for (i, line) in TITLE.iter().enumerate() {
            self.put_str((4, i as TermInt), line, Color::Green);
        }

        let record = format!("Record: {}", session.high_score());
        self.put_box((2, TITLE.len() as TermInt + 1), &[
            (record.as_str(), Color::Yellow),
            ("", Color::Cyan),
            ("Arrows/WASD  move", Color::Cyan),
            ("Enter        start", Color::Cyan),
            ("R            restart", Color::Cyan),
            ("Esc          quit", Color::Cyan),
            ("", Color::Cyan),
            ("◆ food         10 points", Color::Cyan),
            ("★ power-up     50 points", Color::Cyan),
            ("▓ obstacle     avoid!", Color::Cyan),
            ("Faster every 50 points", Color::Cyan),
            ("", Color::Cyan),
            ("Press ENTER to start", Color::Yellow),
        ]);
    }

    fn compose_game_over<S, A>(&mut self, session: &GameSession<S, A>) {
        let score = format!("Score: {}", session.score());
        let record = format!("Record: {}", session.high_score());
        let level = format!("Level: {}", session.level());
        let length = format!("Length: {}", session.snake().len());

        let mut lines = vec![("GAME OVER!", Color::Red), ("", Color::Red)];
        if session.is_new_record() {
            lines.push(("★ NEW RECORD! ★", Color::Yellow));
            lines.push(("", Color::Red));
            lines.push((score.as_str(), Color::Red));
        } else {
            lines.push((score.as_str(), Color::Red));
            lines.push((record.as_str(), Color::Red));
        }
        lines.extend_from_slice(&[
            (level.as_str(), Color::Red),
            (length.as_str(), Color::Red),
            ("", Color::Red),
            ("R - play again", Color::Red),
            ("Esc - quit", Color::Red),
        ]);

        let board = session.board();
        let (w, h) = box_size(&lines);
        let left = (board.width / 2).saturating_sub(w / 2);
        let top = (board.height / 2).saturating_sub(h / 2);
        self.put_box((left, top), &lines);
    }

    /// Draws centered lines inside a double-line frame whose top-left corner is `top_left`.
    fn put_box(&mut self, top_left: Coords, lines: &[(&str, Color)]) {
        let (w, h) = box_size(lines);
        let (x0, y0) = top_left;
        let inner = w as usize - 2;

        let edge: String = "═".repeat(inner);
        self.put_str((x0, y0), &format!("╔{}╗", edge), Color::White);
        self.put_str((x0, y0 + h - 1), &format!("╚{}╝", edge), Color::White);

        for (i, (line, color)) in lines.iter().enumerate() {
            let y = y0 + 1 + i as TermInt;
            let padded = format!("{line: ^width$}", line = line, width = inner);
            self.put((x0, y), '║', Color::White);
            self.put_str((x0 + 1, y), &padded, *color);
            self.put((x0 + w - 1, y), '║', Color::White);
        }
    }

    fn put_str(&mut self, pos: Coords, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put((pos.0.saturating_add(i as TermInt), pos.1), ch, color);
        }
    }

    /// Cells outside the terminal are dropped.
    fn put(&mut self, pos: Coords, ch: char, color: Color) {
        if pos.0 < self.width && pos.1 < self.height {
            self.frame[self.width as usize * pos.1 as usize + pos.0 as usize] = Cell { ch, color };
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let width = self.width as usize;

        for (i, (new, old)) in self.frame.iter().zip(self.screen.iter()).enumerate() {
            if new != old {
                let (x, y) = ((i % width) as TermInt, (i / width) as TermInt);
                queue!(self.stdout, cursor::MoveTo(x, y), style::SetForegroundColor(new.color), style::Print(new.ch))?;
            }
        }

        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()?;
        std::mem::swap(&mut self.screen, &mut self.frame);
        Ok(())
    }
}

/// Outer size of a framed box: one column of padding each side plus the frame.
fn box_size(lines: &[(&str, Color)]) -> (TermInt, TermInt) {
    let longest = lines.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    ((longest + 4) as TermInt, (lines.len() + 2) as TermInt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_fits_longest_line() {
        let lines = [("GAME OVER!", Color::Red), ("★ NEW RECORD! ★", Color::Yellow)];
        assert_eq!(box_size(&lines), (19, 4));
    }

    #[test]
    fn empty_box_is_just_a_frame() {
        assert_eq!(box_size(&[]), (4, 2));
    }
}
