use std::time::Duration;

use log::{info, warn};
use rand::rngs::StdRng;

use crate::audio::{AudioSink, Cue};
use crate::collision;
use crate::highscore::HighScoreStore;
use crate::input::InputEvent;
use crate::placement::{self, Board, Food, FoodKind, SPAWN};
use crate::snake::{Direction, Snake};
use crate::Coords;

const INITIAL_SNAKE_LENGTH: u16 = 3;
const POINTS_PER_LEVEL: u32 = 50;
const BASE_INTERVAL_MS: u64 = 150;
const INTERVAL_STEP_MS: u64 = 10;
const MIN_INTERVAL_MS: u64 = 50;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    Playing,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing simulated.
    Idle,
    Moved,
    Ate { kind: FoodKind, level_up: bool },
    Crashed { new_record: bool },
}

pub fn level_for(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

pub fn tick_interval(level: u32) -> Duration {
    let speedup = u64::from(level.saturating_sub(1)).saturating_mul(INTERVAL_STEP_MS);
    Duration::from_millis(BASE_INTERVAL_MS.saturating_sub(speedup).max(MIN_INTERVAL_MS))
}

pub struct GameSession<S, A> {
    board: Board,
    snake: Snake,
    food: Food,
    obstacles: Vec<Coords>,
    score: u32,
    high_score: u32,
    level: u32,
    interval: Duration,
    frame: u64,
    phase: GamePhase,
    rng: StdRng,
    store: S,
    audio: A,
}

impl<S: HighScoreStore, A: AudioSink> GameSession<S, A> {
    /// Starts in the menu with the stored record loaded and a board ready to play.
    pub fn new(board: Board, store: S, audio: A, mut rng: StdRng) -> Self {
        let high_score = store.load();
        let snake = Snake::new(SPAWN, INITIAL_SNAKE_LENGTH, Direction::Right);
        let food = placement::spawn_food(&mut rng, board, &snake, &[]);

        let mut session = GameSession {
            board,
            snake,
            food,
            obstacles: vec![],
            score: 0,
            high_score,
            level: 1,
            interval: tick_interval(1),
            frame: 0,
            phase: GamePhase::Menu,
            rng,
            store,
            audio,
        };
        session.regenerate_obstacles();

        info!("session ready on {}x{} board, high score {}", board.width, board.height, high_score);
        session
    }

    /// Fresh snake, score and level, new food and obstacles, straight into play.
    pub fn restart(&mut self) {
        self.snake = Snake::new(SPAWN, INITIAL_SNAKE_LENGTH, Direction::Right);
        self.score = 0;
        self.level = 1;
        self.interval = tick_interval(1);
        self.frame = 0;
        self.obstacles.clear();
        self.respawn_food();
        self.regenerate_obstacles();
        self.phase = GamePhase::Playing;
        info!("new round started");
    }

    /// Returns true when the event started a round, so the caller can
    /// reschedule with the fresh interval.
    pub fn handle_input(&mut self, ev: InputEvent) -> bool {
        match (self.phase, ev) {
            (GamePhase::Menu, InputEvent::Confirm) => {
                self.phase = GamePhase::Playing;
                info!("game started");
                true
            }
            (GamePhase::GameOver, InputEvent::Restart) => {
                self.restart();
                true
            }
            (GamePhase::Playing, InputEvent::Steer(dir)) => {
                self.snake.steer(dir);
                false
            }
            _ => false,
        }
    }

    /// One scheduler tick. Only the playing phase simulates; the other
    /// phases just count the frame for the renderer.
    pub fn tick(&mut self) -> TickOutcome {
        self.frame += 1;

        match self.phase {
            GamePhase::Playing => self.step(),
            GamePhase::Menu | GamePhase::GameOver => TickOutcome::Idle,
        }
    }

    fn step(&mut self) -> TickOutcome {
        self.snake.commit_turn();
        let new_head = self.snake.next_head();

        if collision::is_fatal(new_head, self.board, &self.snake, &self.obstacles) {
            let new_record = self.end_round();
            return TickOutcome::Crashed { new_record };
        }

        let ate = new_head == self.food.pos;
        self.snake.advance(new_head, ate);

        if !ate {
            return TickOutcome::Moved;
        }

        let kind = self.food.kind;
        self.score += kind.points();
        self.audio.play(match kind {
            FoodKind::Normal => Cue::Eat,
            FoodKind::PowerUp => Cue::PowerUp,
        });

        let level_up = self.update_level();
        self.respawn_food();

        TickOutcome::Ate { kind, level_up }
    }

    fn update_level(&mut self) -> bool {
        let new_level = level_for(self.score);
        if new_level <= self.level {
            return false;
        }

        self.level = new_level;
        self.interval = tick_interval(new_level);
        self.regenerate_obstacles();
        self.audio.play(Cue::LevelUp);
        info!("level {} reached, tick every {:?}", self.level, self.interval);
        true
    }

    /// Returns whether the round set a new record.
    fn end_round(&mut self) -> bool {
        self.phase = GamePhase::GameOver;
        info!(
            "game over at {:?} heading {:?}: score {}, level {}, length {}",
            self.snake.head(),
            self.snake.get_direction(),
            self.score,
            self.level,
            self.snake.len()
        );

        let new_record = self.score > self.high_score;
        if new_record {
            self.high_score = self.score;
            info!("new high score {}", self.high_score);
            if let Err(e) = self.store.save(self.high_score) {
                warn!("could not save high score: {}", e);
            }
        }

        self.audio.play(Cue::GameOver);
        new_record
    }

    fn respawn_food(&mut self) {
        self.food = placement::spawn_food(&mut self.rng, self.board, &self.snake, &self.obstacles);
    }

    fn regenerate_obstacles(&mut self) {
        self.obstacles = placement::generate_obstacles(
            &mut self.rng,
            self.board,
            self.level,
            &self.snake,
            self.food.pos,
        );
    }
}

impl<S, A> GameSession<S, A> {
    pub fn board(&self) -> Board {
        self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Food {
        self.food
    }

    pub fn obstacles(&self) -> &[Coords] {
        &self.obstacles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// What the game-over screen celebrates: a non-zero score that is the record.
    pub fn is_new_record(&self) -> bool {
        self.score > 0 && self.score >= self.high_score
    }
}
