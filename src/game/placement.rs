//! Food and obstacle placement.
//!
//! Both placements sample random cells until one satisfies the occupancy
//! constraints. Sampling gives up after a configured number of attempts and
//! scans the grid for the remaining valid candidates instead, so a crowded
//! board cannot stall a tick.

use rand::seq::IteratorRandom;
use rand::Rng;
use tracing::{debug, warn};

use super::config::ObstacleBounds;
use super::grid::Grid;
use super::state::{Obstacle, Orientation, Position, Snake};

fn random_cell<R: Rng + ?Sized>(rng: &mut R, grid: &Grid) -> Position {
    let x = rng.gen_range(0..grid.columns) as i32;
    let y = rng.gen_range(0..grid.rows) as i32;
    Position::new(x, y)
}

fn is_free(pos: Position, snake: &Snake, obstacles: &[Obstacle]) -> bool {
    !snake.occupies(pos) && !obstacles.iter().any(|o| o.contains(pos))
}

/// Pick a cell for the food that is neither snake nor obstacle.
///
/// Returns `None` only when no such cell exists.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    snake: &Snake,
    obstacles: &[Obstacle],
    max_attempts: usize,
) -> Option<Position> {
    for _ in 0..max_attempts {
        let pos = random_cell(rng, grid);
        if is_free(pos, snake, obstacles) {
            debug!(x = pos.x, y = pos.y, "food placed");
            return Some(pos);
        }
    }

    warn!(max_attempts, "food sampling exhausted, scanning grid");
    let pos = grid
        .cells()
        .filter(|&pos| is_free(pos, snake, obstacles))
        .choose(rng)?;
    debug!(x = pos.x, y = pos.y, "food placed by scan");
    Some(pos)
}

struct ObstacleRules<'a> {
    grid: &'a Grid,
    snake: &'a Snake,
    food: Option<Position>,
    bounds: ObstacleBounds,
}

impl ObstacleRules<'_> {
    fn accepts(&self, candidate: &Obstacle, placed: &[Obstacle]) -> bool {
        if !self.grid.in_bounds(candidate.anchor()) {
            return false;
        }
        if self.bounds == ObstacleBounds::Inside && !candidate.is_inside(self.grid) {
            return false;
        }
        candidate.cells.iter().all(|&cell| {
            !self.snake.occupies(cell)
                && self.food != Some(cell)
                && !placed.iter().any(|o| o.contains(cell))
        })
    }
}

fn random_orientation<R: Rng + ?Sized>(rng: &mut R) -> Orientation {
    if rng.gen_bool(0.5) {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    }
}

/// Build `count` obstacle groups that avoid the snake, the food and each other.
///
/// Fewer than `count` groups are returned only if no valid spot is left for
/// the next one.
pub fn place_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    count: usize,
    snake: &Snake,
    food: Option<Position>,
    bounds: ObstacleBounds,
    max_attempts: usize,
) -> Vec<Obstacle> {
    let rules = ObstacleRules {
        grid,
        snake,
        food,
        bounds,
    };
    let mut placed: Vec<Obstacle> = Vec::with_capacity(count);

    while placed.len() < count {
        let sampled = (0..max_attempts)
            .map(|_| Obstacle::new(random_cell(rng, grid), random_orientation(rng)))
            .find(|candidate| rules.accepts(candidate, &placed));

        let obstacle = match sampled {
            Some(obstacle) => obstacle,
            None => {
                warn!(max_attempts, placed = placed.len(), "obstacle sampling exhausted, scanning grid");
                let scanned = grid
                    .cells()
                    .flat_map(|anchor| {
                        [Orientation::Horizontal, Orientation::Vertical]
                            .map(|orientation| Obstacle::new(anchor, orientation))
                    })
                    .filter(|candidate| rules.accepts(candidate, &placed))
                    .choose(rng);
                match scanned {
                    Some(obstacle) => obstacle,
                    None => {
                        warn!(placed = placed.len(), count, "no room left for obstacles");
                        break;
                    }
                }
            }
        };

        debug!(
            x = obstacle.anchor().x,
            y = obstacle.anchor().y,
            orientation = ?obstacle.orientation,
            "obstacle placed"
        );
        placed.push(obstacle);
    }

    placed
}
