use log::{debug, warn};
use rand::Rng;

use crate::snake::Snake;
use crate::{Coords, TermInt};

/// Where the snake starts; cells around it never receive food or obstacles.
pub const SPAWN: Coords = (10, 10);
const SPAWN_MARGIN: TermInt = 2;

pub const FOOD_ATTEMPTS: u32 = 100;
pub const OBSTACLE_ATTEMPTS: u32 = 50;
pub const OBSTACLES_PER_LEVEL: usize = 2;
pub const MAX_OBSTACLES: usize = 20;
const POWER_UP_PERCENT: u32 = 20;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub width: TermInt,
    pub height: TermInt,
}

impl Board {
    /// Uniform draw over the cells strictly inside the border.
    pub fn random_interior_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Coords {
        (rng.gen_range(1..self.width - 1), rng.gen_range(1..self.height - 1))
    }
}

pub fn in_spawn_zone(pos: Coords) -> bool {
    let (sx, sy) = SPAWN;
    pos.0 >= sx - SPAWN_MARGIN && pos.0 <= sx + SPAWN_MARGIN &&
        pos.1 >= sy - SPAWN_MARGIN && pos.1 <= sy + SPAWN_MARGIN
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    Safe(Coords),
    /// Budget exhausted; the last sampled cell, not checked.
    Fallback(Coords),
}

impl Placement {
    pub fn pos(self) -> Coords {
        match self {
            Placement::Safe(pos) | Placement::Fallback(pos) => pos,
        }
    }
}

/// Samples interior cells until `is_safe` accepts one, at most `attempts` times.
pub fn find_cell<R, F>(rng: &mut R, board: Board, attempts: u32, is_safe: F) -> Placement
where
    R: Rng + ?Sized,
    F: Fn(Coords) -> bool,
{
    let mut candidate = board.random_interior_cell(rng);

    for attempt in 1..=attempts.max(1) {
        if attempt > 1 {
            candidate = board.random_interior_cell(rng);
        }
        if is_safe(candidate) {
            return Placement::Safe(candidate);
        }
    }

    debug!("no safe cell after {} attempts, falling back to {:?}", attempts, candidate);
    Placement::Fallback(candidate)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FoodKind {
    Normal,
    PowerUp,
}

impl FoodKind {
    pub fn points(self) -> u32 {
        match self {
            FoodKind::Normal => 10,
            FoodKind::PowerUp => 50,
        }
    }

    fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_range(0..100) < POWER_UP_PERCENT {
            FoodKind::PowerUp
        } else {
            FoodKind::Normal
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Food {
    pub pos: Coords,
    pub kind: FoodKind,
}

/// Places the next food. The old food is being replaced, so it is not
/// part of the safety check.
pub fn spawn_food<R: Rng + ?Sized>(rng: &mut R, board: Board, snake: &Snake, obstacles: &[Coords]) -> Food {
    let placement = find_cell(rng, board, FOOD_ATTEMPTS, |pos| {
        !snake.contains(pos) && !obstacles.contains(&pos) && !in_spawn_zone(pos)
    });

    if let Placement::Fallback(pos) = placement {
        warn!("food placed on unchecked cell {:?}", pos);
    }

    Food { pos: placement.pos(), kind: FoodKind::roll(rng) }
}

pub fn obstacle_count(level: u32) -> usize {
    (level as usize).saturating_mul(OBSTACLES_PER_LEVEL).min(MAX_OBSTACLES)
}

/// Builds a fresh obstacle set for `level`. Nothing carries over from the
/// previous set.
pub fn generate_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    board: Board,
    level: u32,
    snake: &Snake,
    food: Coords,
) -> Vec<Coords> {
    let count = obstacle_count(level);
    let mut obstacles = Vec::with_capacity(count);

    for _ in 0..count {
        let placement = find_cell(rng, board, OBSTACLE_ATTEMPTS, |pos| {
            !snake.contains(pos) && pos != food && !obstacles.contains(&pos) && !in_spawn_zone(pos)
        });

        if let Placement::Fallback(pos) = placement {
            warn!("obstacle placed on unchecked cell {:?}", pos);
        }
        obstacles.push(placement.pos());
    }

    obstacles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::Right;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BOARD: Board = Board { width: 40, height: 20 };

    fn start_snake() -> Snake {
        Snake::new(SPAWN, 3, Right)
    }

    #[test]
    fn spawn_zone_is_five_by_five() {
        assert!(in_spawn_zone((8, 8)));
        assert!(in_spawn_zone((12, 12)));
        assert!(in_spawn_zone((10, 10)));
        assert!(!in_spawn_zone((7, 10)));
        assert!(!in_spawn_zone((10, 13)));
    }

    #[test]
    fn samples_stay_inside_border() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let (x, y) = BOARD.random_interior_cell(&mut rng);
            assert!((1..=38).contains(&x));
            assert!((1..=18).contains(&y));
        }
    }

    #[test]
    fn exhausted_budget_falls_back() {
        let mut rng = StdRng::seed_from_u64(7);
        let placement = find_cell(&mut rng, BOARD, 50, |_| false);
        assert!(matches!(placement, Placement::Fallback(_)));
        assert!(!crate::collision::hits_wall(placement.pos(), BOARD));
    }

    #[test]
    fn first_safe_candidate_is_taken() {
        let mut rng = StdRng::seed_from_u64(7);
        let placement = find_cell(&mut rng, BOARD, 100, |_| true);
        assert!(matches!(placement, Placement::Safe(_)));
    }

    #[test]
    fn obstacle_count_scales_and_caps() {
        assert_eq!(obstacle_count(1), 2);
        assert_eq!(obstacle_count(2), 4);
        assert_eq!(obstacle_count(10), 20);
        assert_eq!(obstacle_count(11), 20);
        assert_eq!(obstacle_count(u32::MAX), 20);
    }

    #[test]
    fn obstacles_avoid_snake_food_and_spawn() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = start_snake();
        let food = (30, 5);

        for level in 1..=12 {
            let obstacles = generate_obstacles(&mut rng, BOARD, level, &snake, food);
            assert_eq!(obstacles.len(), obstacle_count(level));

            for (i, &obs) in obstacles.iter().enumerate() {
                assert!(!snake.contains(obs));
                assert_ne!(obs, food);
                assert!(!in_spawn_zone(obs));
                assert!(!obstacles[i + 1..].contains(&obs), "duplicate obstacle {:?}", obs);
            }
        }
    }

    #[test]
    fn power_ups_show_up_about_a_fifth_of_the_time() {
        let mut rng = StdRng::seed_from_u64(11);
        let snake = start_snake();
        let power_ups = (0..5000)
            .filter(|_| spawn_food(&mut rng, BOARD, &snake, &[]).kind == FoodKind::PowerUp)
            .count();
        assert!((800..1200).contains(&power_ups), "got {}", power_ups);
    }

    #[test]
    fn points_per_kind() {
        assert_eq!(FoodKind::Normal.points(), 10);
        assert_eq!(FoodKind::PowerUp.points(), 50);
    }

    proptest::proptest! {
        #[test]
        fn food_never_lands_on_snake_or_obstacles(seed in proptest::prelude::any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let snake = start_snake();
            let obstacles = generate_obstacles(&mut rng, BOARD, 10, &snake, (1, 1));
            let food = spawn_food(&mut rng, BOARD, &snake, &obstacles);

            proptest::prop_assert!(!snake.contains(food.pos));
            proptest::prop_assert!(!obstacles.contains(&food.pos));
            proptest::prop_assert!(!in_spawn_zone(food.pos));
        }
    }
}
