use super::state::Position;

/// Fixed-size playing field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub columns: usize,
    pub rows: usize,
}

impl Grid {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    /// Check if a position is within the grid bounds
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && (pos.x as usize) < self.columns && pos.y >= 0 && (pos.y as usize) < self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Row-major index of an in-bounds position
    pub fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.columns + pos.x as usize)
    }

    /// All in-bounds positions, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |y| (0..columns).map(move |x| Position::new(x as i32, y as i32)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 20);

        assert!(grid.in_bounds(Position::new(0, 0)));
        assert!(grid.in_bounds(Position::new(19, 19)));
        assert!(!grid.in_bounds(Position::new(-1, 0)));
        assert!(!grid.in_bounds(Position::new(0, -1)));
        assert!(!grid.in_bounds(Position::new(20, 0)));
        assert!(!grid.in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_non_square_bounds() {
        let grid = Grid::new(4, 2);
        assert!(grid.in_bounds(Position::new(3, 1)));
        assert!(!grid.in_bounds(Position::new(1, 3)));
    }

    #[test]
    fn test_cells_cover_grid_in_row_major_order() {
        let grid = Grid::new(3, 2);
        let cells: Vec<_> = grid.cells().collect();

        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[1], Position::new(1, 0));
        assert_eq!(cells[3], Position::new(0, 1));
        assert!(cells.iter().all(|&c| grid.in_bounds(c)));
    }

    #[test]
    fn test_index() {
        let grid = Grid::new(5, 4);
        assert_eq!(grid.index(Position::new(0, 0)), Some(0));
        assert_eq!(grid.index(Position::new(4, 0)), Some(4));
        assert_eq!(grid.index(Position::new(0, 1)), Some(5));
        assert_eq!(grid.index(Position::new(5, 0)), None);
    }
}
