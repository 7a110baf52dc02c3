use super::grid::Grid;
use super::state::{CollisionType, Obstacle, Position, Snake};

/// Check if a candidate head position causes a collision
///
/// The whole current body counts, tail included, even though the tail would
/// move away on a non-eating step.
pub fn check_collision(
    grid: &Grid,
    candidate: Position,
    snake: &Snake,
    obstacles: &[Obstacle],
) -> Option<CollisionType> {
    if !grid.in_bounds(candidate) {
        return Some(CollisionType::Wall);
    }

    if snake.occupies(candidate) {
        return Some(CollisionType::SelfCollision);
    }

    if obstacles.iter().any(|o| o.contains(candidate)) {
        return Some(CollisionType::Obstacle);
    }

    None
}

pub fn is_fatal(grid: &Grid, candidate: Position, snake: &Snake, obstacles: &[Obstacle]) -> bool {
    check_collision(grid, candidate, snake, obstacles).is_some()
}

/// Move the head onto `candidate`, growing if it is the food.
///
/// Returns whether the food was eaten.
pub fn apply_move(snake: &mut Snake, candidate: Position, food: Option<Position>) -> bool {
    let ate_food = food == Some(candidate);
    snake.advance_to(candidate, ate_food);
    ate_food
}
