//! Breadth-first search from the snake head to the food.
//!
//! Snake segments and obstacle cells are impassable for the whole search,
//! including the tail segment that would move away on a non-eating step.
//! Neighbours are expanded in [`Direction::ALL`] order (up, down, left,
//! right), which fixes the path returned when several are equally short.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::trace;

use super::action::Direction;
use super::grid::Grid;
use super::state::{GameState, Position};

/// Shortest path from `start` to `target`, both inclusive.
///
/// Returns `None` if the target cannot be reached through unblocked
/// in-bounds cells. A path from a cell to itself is just `[start]`.
pub fn find_path(
    grid: &Grid,
    start: Position,
    target: Position,
    blocked: &HashSet<Position>,
) -> Option<Vec<Position>> {
    let mut visited = vec![false; grid.cell_count()];
    let mut parents: HashMap<Position, Position> = HashMap::new();
    let mut frontier = VecDeque::new();

    if let Some(index) = grid.index(start) {
        visited[index] = true;
    }
    frontier.push_back(start);

    while let Some(current) = frontier.pop_front() {
        if current == target {
            return Some(reconstruct(&parents, start, target));
        }

        for direction in Direction::ALL {
            let neighbor = current.moved_in_direction(direction);
            let Some(index) = grid.index(neighbor) else {
                continue;
            };
            if visited[index] || blocked.contains(&neighbor) {
                continue;
            }

            visited[index] = true;
            parents.insert(neighbor, current);
            frontier.push_back(neighbor);
        }
    }

    trace!(?start, ?target, "no path");
    None
}

fn reconstruct(
    parents: &HashMap<Position, Position>,
    start: Position,
    target: Position,
) -> Vec<Position> {
    let mut path = vec![target];
    let mut current = target;
    while current != start {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Cells the search may not enter: every snake segment and obstacle cell
pub fn blocked_cells(state: &GameState) -> HashSet<Position> {
    state
        .snake
        .body
        .iter()
        .copied()
        .chain(state.obstacles.iter().flat_map(|o| o.cells))
        .collect()
}

/// Shortest path from the snake head to the food, if there is food and a route
pub fn shortest_path(state: &GameState) -> Option<Vec<Position>> {
    let food = state.food?;
    find_path(&state.grid, state.snake.head(), food, &blocked_cells(state))
}
