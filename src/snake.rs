use std::collections::VecDeque;

use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn reverse(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Moves `pos` one cell. Coordinates saturate at 0, which is always
    /// a border cell, so the result still reads as a wall hit.
    pub fn step(self, pos: Coords) -> Coords {
        match self {
            Up => (pos.0, pos.1.saturating_sub(1)),
            Down => (pos.0, pos.1.saturating_add(1)),
            Left => (pos.0.saturating_sub(1), pos.1),
            Right => (pos.0.saturating_add(1), pos.1),
        }
    }
}

/// Head-first body plus the direction the snake is currently moving in.
///
/// Steering is buffered: `steer` only records an intent, and the intent is
/// committed by `commit_turn` at the start of the next step. Intents are
/// checked against the direction of travel, never against an earlier intent,
/// so any number of key presses between two steps cannot reverse the snake.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
    next_direction: Option<Direction>,
}

impl Snake {
    /// Lays out `size` cells ending at `head`, trailing away from `direction`.
    pub fn new(head: Coords, size: u16, direction: Direction) -> Self {
        let back = direction.reverse();
        let mut body = VecDeque::with_capacity(size as usize);
        let mut pos = head;

        for _ in 0..size.max(1) {
            body.push_back(pos);
            pos = back.step(pos);
        }

        Snake { body, direction, next_direction: None }
    }

    #[cfg(test)]
    pub fn from_body(body: Vec<Coords>, direction: Direction) -> Self {
        assert!(!body.is_empty());
        Snake { body: body.into(), direction, next_direction: None }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn steer(&mut self, new_direction: Direction) {
        if new_direction != self.direction.reverse() {
            self.next_direction = Some(new_direction);
        }
    }

    pub fn commit_turn(&mut self) {
        if let Some(dir) = self.next_direction.take() {
            self.direction = dir;
        }
    }

    /// Where the head lands if the snake moves now.
    pub fn next_head(&self) -> Coords {
        self.direction.step(self.head())
    }

    /// Prepends `new_head`; drops the tail unless `grow` is set. Returns the
    /// vacated tail cell, if any.
    pub fn advance(&mut self, new_head: Coords, grow: bool) -> Option<Coords> {
        self.body.push_front(new_head);

        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }
}
